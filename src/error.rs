use thiserror::Error;

#[derive(Error, Debug)]
pub enum PowerCropError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("フォルダが見つかりません: {0}")]
    FolderNotFound(String),

    #[error("画像が見つかりません: {0}")]
    NoImagesFound(String),

    #[error("画像読み込みエラー: {0}")]
    ImageLoad(String),

    #[error("CLI実行エラー: {0}")]
    CliExecution(String),

    #[error("画像処理エラー: {0}")]
    Image(#[from] image::ImageError),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] crop_common::Error),
}

pub type Result<T> = std::result::Result<T, PowerCropError>;
