use crop_common::{Rect, SizeMode};
use std::path::PathBuf;

/// 開いている画像
#[derive(Debug, Clone, PartialEq)]
pub struct ImageContext {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    /// 開いた時点で選ばれた既定サイズ
    pub size_mode: SizeMode,
    /// 既定の矩形（custom では None）
    pub default_rect: Option<Rect>,
}

/// 切り抜き確定の結果
#[derive(Debug, Clone, PartialEq)]
pub enum CommitOutcome {
    /// PNGを保存して次の画像へ進んだ（`recorded` は履歴に追加されたか）
    Saved {
        output: PathBuf,
        rect: Rect,
        recorded: bool,
    },
    /// 矩形が小さすぎる・面積ゼロ
    Rejected,
    /// 画像・矩形・保存先のいずれかがない
    Skipped,
    /// PNG保存に失敗（次の画像へは進む）
    Failed(String),
}

/// 最後の切り抜きへのジャンプ結果
#[derive(Debug, Clone, PartialEq)]
pub enum JumpOutcome {
    Jumped(usize),
    /// フォルダを開いていない
    NoFolder,
    /// このフォルダに記録がない
    NoEntry,
    /// 記録された画像が現在の一覧にない
    Stale(PathBuf),
}

/// カスタム矩形のドラッグ中の状態
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Drag {
    pub start: (i64, i64),
    pub live: Rect,
}
