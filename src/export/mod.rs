//! 切り抜き画像のPNG出力

use crate::error::{PowerCropError, Result};
use crop_common::{CropSize, Rect};
use image::ImageFormat;
use std::path::{Path, PathBuf};

/// 出力ファイル名 `{元ファイル名}_cropped_{W}x{H}.png`
pub fn crop_file_name(image_path: &Path, size: CropSize) -> String {
    let base_name = image_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "image".to_string());
    format!("{}_cropped_{}.png", base_name, size)
}

/// 画像から `rect` を切り出して `save_folder` にPNGで保存
///
/// 同名ファイルは上書きする。
pub fn save_crop(image_path: &Path, rect: Rect, save_folder: &Path) -> Result<PathBuf> {
    let image = image::open(image_path)
        .map_err(|e| PowerCropError::ImageLoad(format!("{}: {}", image_path.display(), e)))?;

    let cropped = image.crop_imm(rect.left, rect.top, rect.width(), rect.height());
    let output = save_folder.join(crop_file_name(image_path, rect.size()));
    cropped.save_with_format(&output, ImageFormat::Png)?;

    Ok(output)
}
