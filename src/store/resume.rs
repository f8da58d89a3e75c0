//! フォルダごとの最後の切り抜き（再開用インデックス）

use super::json_file;
use crate::error::Result;
use crop_common::LastCroppedEntry;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// フォルダ → 最後の切り抜き
#[derive(Debug)]
pub struct ResumeIndex {
    path: PathBuf,
    entries: BTreeMap<String, LastCroppedEntry>,
}

impl ResumeIndex {
    /// 再開インデックスを読み込み（失敗時は空）
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = json_file::load_or_default(&path);
        Self { path, entries }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn entries(&self) -> &BTreeMap<String, LastCroppedEntry> {
        &self.entries
    }

    /// フォルダの最後の切り抜きを上書きして保存
    pub fn record_last(&mut self, folder: &str, entry: LastCroppedEntry) {
        self.entries.insert(folder.to_string(), entry);
        if let Err(e) = self.flush() {
            error!("再開情報の保存に失敗: {}: {}", self.path.display(), e);
        }
    }

    pub fn last_for(&self, folder: &str) -> Option<&LastCroppedEntry> {
        self.entries.get(folder)
    }

    pub fn flush(&self) -> Result<()> {
        json_file::write_pretty(&self.path, &self.entries)?;
        debug!("再開情報を保存: {}", self.path.display());
        Ok(())
    }
}
