//! 画像ピクセル座標上の矩形計算
//!
//! 入力座標（クリック位置・ドラッグ端点）は画像外を指すことがあるため `i64` で受け、
//! 結果の矩形は常に画像範囲 `[0, width] x [0, height]` にクランプされる。

use crate::types::CropSize;
use serde::{Deserialize, Serialize};

/// 切り抜き矩形 (left, top, right, bottom)
///
/// JSONでは `[left, top, right, bottom]` の配列として保存される。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "[u32; 4]", into = "[u32; 4]")]
pub struct Rect {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl From<[u32; 4]> for Rect {
    fn from([left, top, right, bottom]: [u32; 4]) -> Self {
        Self { left, top, right, bottom }
    }
}

impl From<Rect> for [u32; 4] {
    fn from(rect: Rect) -> Self {
        [rect.left, rect.top, rect.right, rect.bottom]
    }
}

impl Rect {
    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn width(&self) -> u32 {
        self.right.saturating_sub(self.left)
    }

    pub fn height(&self) -> u32 {
        self.bottom.saturating_sub(self.top)
    }

    pub fn size(&self) -> CropSize {
        CropSize::new(self.width(), self.height())
    }

    /// `"{width}x{height}"` 形式のラベル
    pub fn size_label(&self) -> String {
        self.size().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }

    /// 中心 (cx, cy) に `size` の矩形を置き、画像内に収まるよう平行移動する
    ///
    /// 画像がサイズより小さい軸では画像端で切り詰められ、名目サイズより小さくなる。
    pub fn centered_at(cx: i64, cy: i64, size: CropSize, image_width: u32, image_height: u32) -> Self {
        let (left, right) = place_axis(cx, size.width, image_width);
        let (top, bottom) = place_axis(cy, size.height, image_height);
        Self { left, top, right, bottom }
    }

    /// 画像中央に置いた既定の矩形
    pub fn centered_in(size: CropSize, image_width: u32, image_height: u32) -> Self {
        Self::centered_at(
            i64::from(image_width / 2),
            i64::from(image_height / 2),
            size,
            image_width,
            image_height,
        )
    }

    /// 対角の2点から正規化した矩形（left <= right, top <= bottom）
    pub fn from_corners(x0: i64, y0: i64, x1: i64, y1: i64, image_width: u32, image_height: u32) -> Self {
        let (x0, x1) = (clamp_coord(x0, image_width), clamp_coord(x1, image_width));
        let (y0, y1) = (clamp_coord(y0, image_height), clamp_coord(y1, image_height));
        Self {
            left: x0.min(x1),
            top: y0.min(y1),
            right: x0.max(x1),
            bottom: y0.max(y1),
        }
    }

    /// 画像範囲へクランプした矩形
    pub fn clamped(&self, image_width: u32, image_height: u32) -> Self {
        Self::from_corners(
            i64::from(self.left),
            i64::from(self.top),
            i64::from(self.right),
            i64::from(self.bottom),
            image_width,
            image_height,
        )
    }

    pub fn fits_within(&self, image_width: u32, image_height: u32) -> bool {
        self.left <= self.right
            && self.top <= self.bottom
            && self.right <= image_width
            && self.bottom <= image_height
    }
}

fn clamp_coord(value: i64, bound: u32) -> u32 {
    // 0..=bound に収めた値は u32 に収まる
    value.clamp(0, i64::from(bound)) as u32
}

fn place_axis(center: i64, length: u32, bound: u32) -> (u32, u32) {
    let length = i64::from(length);
    let bound = i64::from(bound);
    let start = (center - length / 2).min(bound - length).max(0);
    let end = (start + length).min(bound);
    (start as u32, end as u32)
}
