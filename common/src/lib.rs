//! Power Cropper Common Library
//!
//! CLIと対話セッションで共有される型と寸法ポリシー（画像I/Oを持たない）

pub mod error;
pub mod geometry;
pub mod preset;
pub mod types;

pub use error::{Error, Result};
pub use geometry::Rect;
pub use preset::{best_preset, fitting_presets, is_enabled, preset_states, PresetState, SizeMode, PRESETS};
pub use types::{CropRecord, CropSize, LastCroppedEntry, Orientation};
