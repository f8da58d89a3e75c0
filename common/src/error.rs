//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid size: {0} (expected WxH, e.g. 1024x768)")]
    InvalidSize(String),

    #[error("Not a preset size: {0} (use one of the catalog sizes or custom)")]
    UnknownPreset(String),

    #[error("Invalid orientation: {0} (expected portrait or landscape)")]
    InvalidOrientation(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
