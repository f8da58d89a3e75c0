use crate::error::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

/// JSONファイルを読み込む（存在しない・壊れている場合は既定値）
pub(crate) fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> T {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("{} が存在しないため空で開始", path.display());
            return T::default();
        }
        Err(e) => {
            warn!("{} を読み込めません、空で開始: {}", path.display(), e);
            return T::default();
        }
    };

    match serde_json::from_reader(BufReader::new(file)) {
        Ok(value) => value,
        Err(e) => {
            warn!("{} の形式が不正なため破棄します: {}", path.display(), e);
            T::default()
        }
    }
}

/// JSONファイル全体を書き直す（インデント2）
///
/// 同じフォルダの一時ファイルに書いてから置き換えるので、途中で失敗しても元のファイルは残る。
pub(crate) fn write_pretty<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;

    let mut temp = NamedTempFile::new_in(parent)?;
    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        serde_json::to_writer_pretty(&mut writer, value)?;
        writer.flush()?;
    }
    temp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
