//! 切り抜き履歴の永続化
//!
//! - history: フォルダ → 画像 → 切り抜き一覧（`cropped_info.json`）
//! - resume: フォルダ → 最後の切り抜き（`last_cropped.json`）
//!
//! どちらも変更のたびにファイル全体を書き直す。読み込み失敗は空として扱う。

pub mod history;
mod json_file;
pub mod resume;

pub use history::{CropHistory, HistoryDocument};
pub use resume::ResumeIndex;
