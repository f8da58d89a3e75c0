use crate::error::{PowerCropError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "bmp"];

/// フォルダ直下の画像を絶対パスでソートして返す
pub fn scan_folder(folder: &Path) -> Result<Vec<PathBuf>> {
    if !folder.is_dir() {
        return Err(PowerCropError::FolderNotFound(folder.display().to_string()));
    }
    let folder = absolute_folder(folder)?;

    let mut images: Vec<PathBuf> = WalkDir::new(&folder)
        .min_depth(1)
        .max_depth(1)  // 直下のみ（出力先の cropped/ は含めない）
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.into_path())
        .filter(|path| has_image_extension(path))
        .collect();

    images.sort();

    Ok(images)
}

/// フォルダを絶対パスにし、末尾の区切りや `.` を取り除く
///
/// 履歴のキーになるので、`photos` と `photos/` は同じパスにする。
pub fn absolute_folder(folder: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(folder)?;
    Ok(absolute.components().collect())
}

/// 拡張子が対応画像形式か（大文字小文字を区別しない）
pub fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::{self, File};

    #[test]
    fn test_has_image_extension() {
        assert!(has_image_extension(Path::new("a.png")));
        assert!(has_image_extension(Path::new("a.JPG")));
        assert!(has_image_extension(Path::new("a.jpeg")));
        assert!(has_image_extension(Path::new("a.Bmp")));
        assert!(!has_image_extension(Path::new("a.txt")));
        assert!(!has_image_extension(Path::new("a.gif")));
        assert!(!has_image_extension(Path::new("png")));
    }

    #[test]
    fn test_absolute_folder_normalizes_spelling() {
        let dir = tempfile::tempdir().unwrap();
        let plain = absolute_folder(dir.path()).unwrap();
        let with_slash = absolute_folder(Path::new(&format!("{}/", dir.path().display()))).unwrap();
        let with_dot = absolute_folder(&dir.path().join(".")).unwrap();

        assert_eq!(plain, dir.path());
        assert_eq!(with_slash.to_string_lossy(), plain.to_string_lossy());
        assert_eq!(with_dot.to_string_lossy(), plain.to_string_lossy());
    }

    #[test]
    fn test_scan_folder_not_found() {
        let result = scan_folder(Path::new("/nonexistent/folder"));
        assert!(matches!(result, Err(PowerCropError::FolderNotFound(_))));
    }

    #[test]
    fn test_scan_folder_with_images() {
        let dir = tempfile::tempdir().unwrap();
        File::create(dir.path().join("c.png")).unwrap();
        File::create(dir.path().join("a.JPG")).unwrap();
        File::create(dir.path().join("b.bmp")).unwrap();
        File::create(dir.path().join("readme.txt")).unwrap();
        fs::create_dir(dir.path().join("cropped")).unwrap();
        File::create(dir.path().join("cropped").join("a_cropped_512x512.png")).unwrap();

        let result = scan_folder(dir.path()).unwrap();
        let names: Vec<_> = result
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["a.JPG", "b.bmp", "c.png"]);
        assert!(result.iter().all(|p| p.is_absolute()));
    }
}
