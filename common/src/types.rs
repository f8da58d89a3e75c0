//! 切り抜き記録の型定義
//!
//! 履歴ファイル・再開インデックスの両方で共有される型:
//! - CropSize: `WxH` 形式のサイズラベル
//! - CropRecord: 1回分の切り抜き（サイズ + 座標）
//! - LastCroppedEntry: フォルダごとの最後の切り抜き
//! - Orientation: 既定サイズ選択時の向きの優先

use crate::error::Error;
use crate::geometry::Rect;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 切り抜きサイズ（ピクセル）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CropSize {
    pub width: u32,
    pub height: u32,
}

impl CropSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    /// 高さが幅より大きい（正方形は含まない）
    pub fn is_portrait(&self) -> bool {
        self.height > self.width
    }

    /// 幅が高さより大きい（正方形は含まない）
    pub fn is_landscape(&self) -> bool {
        self.width > self.height
    }

    /// 画像 (width, height) に収まるか
    pub fn fits_in(&self, width: u32, height: u32) -> bool {
        self.width <= width && self.height <= height
    }
}

impl fmt::Display for CropSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl FromStr for CropSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidSize(s.to_string());
        let (w, h) = s.trim().split_once(['x', 'X']).ok_or_else(invalid)?;
        let width: u32 = w.trim().parse().map_err(|_| invalid())?;
        let height: u32 = h.trim().parse().map_err(|_| invalid())?;
        if width == 0 || height == 0 {
            return Err(invalid());
        }
        Ok(Self { width, height })
    }
}

/// 保存済みの切り抜き1件
///
/// `size` は常に `coords` から計算する。同一画像内では `(size, coords)` が一意。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRecord {
    pub size: String,
    pub coords: Rect,
}

impl CropRecord {
    pub fn from_rect(coords: Rect) -> Self {
        Self {
            size: coords.size_label(),
            coords,
        }
    }
}

/// フォルダごとの最後に保存した切り抜き
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LastCroppedEntry {
    pub size: String,
    pub coords: Rect,
    pub image_path: String,
    pub folder: String,
}

impl LastCroppedEntry {
    pub fn new(coords: Rect, image_path: impl Into<String>, folder: impl Into<String>) -> Self {
        Self {
            size: coords.size_label(),
            coords,
            image_path: image_path.into(),
            folder: folder.into(),
        }
    }
}

/// 既定サイズを選ぶときの向きの優先
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl Orientation {
    /// サイズがこの向きの形か
    ///
    /// 縦長は `h > w` のみ。横長は `w >= h` で、正方形も横長側に数える。
    pub fn matches(&self, size: CropSize) -> bool {
        match self {
            Orientation::Portrait => size.is_portrait(),
            Orientation::Landscape => !size.is_portrait(),
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Portrait => write!(f, "portrait"),
            Orientation::Landscape => write!(f, "landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "portrait" | "p" => Ok(Orientation::Portrait),
            "landscape" | "l" => Ok(Orientation::Landscape),
            _ => Err(Error::InvalidOrientation(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crop_size_parse() {
        let size: CropSize = "1024x768".parse().unwrap();
        assert_eq!(size, CropSize::new(1024, 768));
        assert_eq!(size.to_string(), "1024x768");
        assert_eq!("512X512".parse::<CropSize>().unwrap(), CropSize::new(512, 512));
    }

    #[test]
    fn test_crop_size_parse_invalid() {
        assert!("1024".parse::<CropSize>().is_err());
        assert!("0x512".parse::<CropSize>().is_err());
        assert!("axb".parse::<CropSize>().is_err());
        assert!("".parse::<CropSize>().is_err());
    }

    #[test]
    fn test_square_is_neither_portrait_nor_landscape() {
        let square = CropSize::new(1024, 1024);
        assert!(!square.is_portrait());
        assert!(!square.is_landscape());
    }

    #[test]
    fn test_orientation_matches() {
        assert!(Orientation::Portrait.matches(CropSize::new(512, 768)));
        assert!(!Orientation::Portrait.matches(CropSize::new(512, 512)));
        assert!(Orientation::Landscape.matches(CropSize::new(768, 512)));
        assert!(Orientation::Landscape.matches(CropSize::new(512, 512)));
        assert!(!Orientation::Landscape.matches(CropSize::new(768, 1024)));
    }

    #[test]
    fn test_crop_record_size_from_coords() {
        let record = CropRecord::from_rect(Rect::new(10, 20, 522, 788));
        assert_eq!(record.size, "512x768");
    }

    #[test]
    fn test_crop_record_json_shape() {
        let record = CropRecord::from_rect(Rect::new(0, 0, 512, 512));
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "size": "512x512", "coords": [0, 0, 512, 512] })
        );
    }

    #[test]
    fn test_orientation_parse() {
        assert_eq!("Portrait".parse::<Orientation>().unwrap(), Orientation::Portrait);
        assert_eq!("l".parse::<Orientation>().unwrap(), Orientation::Landscape);
        assert!("diagonal".parse::<Orientation>().is_err());
        assert_eq!(
            serde_json::to_string(&Orientation::Landscape).unwrap(),
            "\"landscape\""
        );
    }
}
