//! 切り抜きサイズのプリセットと既定サイズの選択
//!
//! - プリセットは固定の順序付きカタログ（+ `custom`）
//! - 画像に収まるプリセットのうち、向きの優先に一致する形を先に選ぶ
//! - 一致の有無が同じなら面積が大きいほうを既定とする
//! - 収まるものがなければ `custom`

use crate::error::Error;
use crate::types::{CropSize, Orientation};
use std::cmp::Reverse;
use std::fmt;
use std::str::FromStr;

/// プリセットカタログ（表示順）
pub const PRESETS: [CropSize; 6] = [
    CropSize::new(512, 512),
    CropSize::new(1024, 1024),
    CropSize::new(512, 768),
    CropSize::new(768, 1024),
    CropSize::new(768, 512),
    CropSize::new(1024, 768),
];

const CUSTOM_LABEL: &str = "custom";

/// 選択中のサイズモード
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SizeMode {
    /// 固定サイズ
    Preset(CropSize),
    /// ドラッグで自由に指定
    Custom,
}

impl Default for SizeMode {
    fn default() -> Self {
        SizeMode::Preset(PRESETS[1])
    }
}

impl SizeMode {
    pub fn fixed_size(&self) -> Option<CropSize> {
        match self {
            SizeMode::Preset(size) => Some(*size),
            SizeMode::Custom => None,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, SizeMode::Custom)
    }

    /// カタログ全体（プリセット + custom）
    pub fn catalog() -> impl Iterator<Item = SizeMode> {
        PRESETS
            .into_iter()
            .map(SizeMode::Preset)
            .chain(std::iter::once(SizeMode::Custom))
    }
}

impl fmt::Display for SizeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SizeMode::Preset(size) => write!(f, "{}", size),
            SizeMode::Custom => write!(f, "{}", CUSTOM_LABEL),
        }
    }
}

impl FromStr for SizeMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case(CUSTOM_LABEL) {
            return Ok(SizeMode::Custom);
        }
        let size: CropSize = s.parse()?;
        if !PRESETS.contains(&size) {
            return Err(Error::UnknownPreset(s.trim().to_string()));
        }
        Ok(SizeMode::Preset(size))
    }
}

/// 画像 (width, height) に収まるプリセット（カタログ順）
pub fn fitting_presets(width: u32, height: u32) -> Vec<CropSize> {
    PRESETS
        .into_iter()
        .filter(|size| size.fits_in(width, height))
        .collect()
}

/// 既定のサイズを選ぶ
///
/// 並び順のキーは `(向き一致, 面積)` の降順。安定ソートなので完全に同じキーはカタログ順。
pub fn best_preset(width: u32, height: u32, orientation: Orientation) -> SizeMode {
    let mut fitting = fitting_presets(width, height);
    fitting.sort_by_key(|size| Reverse((orientation.matches(*size), size.area())));
    fitting
        .first()
        .map_or(SizeMode::Custom, |size| SizeMode::Preset(*size))
}

/// このサイズが選択可能か（custom は常に可）
pub fn is_enabled(mode: SizeMode, width: u32, height: u32) -> bool {
    match mode {
        SizeMode::Preset(size) => size.fits_in(width, height),
        SizeMode::Custom => true,
    }
}

/// プリセット行の表示状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PresetState {
    pub mode: SizeMode,
    pub enabled: bool,
    pub selected: bool,
}

/// カタログ全体の選択可否・選択中フラグ
pub fn preset_states(width: u32, height: u32, selected: SizeMode) -> Vec<PresetState> {
    SizeMode::catalog()
        .map(|mode| PresetState {
            mode,
            enabled: is_enabled(mode, width, height),
            selected: mode == selected,
        })
        .collect()
}
