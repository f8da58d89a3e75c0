//! エラーケーステスト
//!
//! 各種エラー条件でのエラーハンドリングを検証

use power_cropper::error::PowerCropError;
use power_cropper::scanner;
use power_cropper::session::CropSession;
use power_cropper::store::{CropHistory, ResumeIndex};
use crop_common::Orientation;
use std::path::Path;
use tempfile::tempdir;

/// 存在しないフォルダをスキャンした場合
#[test]
fn test_scan_nonexistent_folder() {
    let result = scanner::scan_folder(Path::new("/nonexistent/path/12345"));
    assert!(matches!(result, Err(PowerCropError::FolderNotFound(_))));
}

/// 画像のないフォルダを開いた場合
#[test]
fn test_open_folder_without_images() {
    let dir = tempdir().expect("Failed to create temp dir");
    let photos = dir.path().join("photos");
    std::fs::create_dir(&photos).unwrap();
    std::fs::write(photos.join("notes.txt"), "hello").unwrap();

    let mut session = CropSession::new(
        CropHistory::load(dir.path().join("cropped_info.json")),
        ResumeIndex::load(dir.path().join("last_cropped.json")),
        Orientation::Portrait,
        "cropped",
    );

    let result = session.open_folder(&photos);
    assert!(matches!(result, Err(PowerCropError::NoImagesFound(_))));
    // 状態は変わらない
    assert!(session.folder().is_none());
    assert!(session.current().is_none());
    assert!(!photos.join("cropped").exists());
}

/// 壊れた履歴ファイルは空として扱う
#[test]
fn test_corrupt_documents_load_empty() {
    let dir = tempdir().expect("Failed to create temp dir");
    let history_path = dir.path().join("cropped_info.json");
    let resume_path = dir.path().join("last_cropped.json");
    std::fs::write(&history_path, "{\"data\": [1, 2").unwrap();
    std::fs::write(&resume_path, "[]").unwrap();

    let history = CropHistory::load(&history_path);
    let resume = ResumeIndex::load(&resume_path);

    assert!(history.document().data.is_empty());
    assert!(resume.entries().is_empty());
}

/// 保存先に書き込めなくても状態はメモリ上に残る
#[test]
fn test_flush_failure_keeps_memory_state() {
    let dir = tempdir().expect("Failed to create temp dir");
    // ディレクトリをファイルパスとして使うと書き込みに失敗する
    let mut history = CropHistory::load(dir.path());

    assert!(history.record_crop("/photos", "/photos/a.png", crop_common::Rect::new(0, 0, 4, 4)));
    assert_eq!(history.crop_labels("/photos", "/photos/a.png"), vec!["4x4"]);
    assert!(history.flush().is_err());
}

/// PowerCropErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        PowerCropError::Config("テスト設定エラー".to_string()),
        PowerCropError::FolderNotFound("/path/to/folder".to_string()),
        PowerCropError::NoImagesFound("フォルダ".to_string()),
        PowerCropError::ImageLoad("a.png".to_string()),
        PowerCropError::CliExecution("入力エラー".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: PowerCropError = io_err.into();

    assert!(matches!(err, PowerCropError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// JSONエラーからの変換
#[test]
fn test_json_error_conversion() {
    let json_err = serde_json::from_str::<serde_json::Value>("{ invalid }").unwrap_err();
    let err: PowerCropError = json_err.into();

    assert!(matches!(err, PowerCropError::JsonParse(_)));
}

/// crop_common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = "12by34".parse::<crop_common::CropSize>().unwrap_err();
    let err: PowerCropError = common_err.into();

    assert!(matches!(err, PowerCropError::Common(_)));
    assert!(format!("{}", err).contains("12by34"));
}
