//! 切り抜き履歴ストア
//!
//! フォルダ → 画像パス → 切り抜き一覧 を保持し、変更のたびにファイル全体を保存する。
//! 保存に失敗してもメモリ上の状態を正としてセッションを続ける。

use super::json_file;
use crate::error::Result;
use crop_common::{CropRecord, Rect};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error};

/// 画像パス → 切り抜き一覧（保存順）
pub type FolderCrops = BTreeMap<String, Vec<CropRecord>>;

/// 履歴ファイルの構造 `{ "data": { folder: { image: [crop] } } }`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HistoryDocument {
    #[serde(default)]
    pub data: BTreeMap<String, FolderCrops>,
}

/// 切り抜き履歴
#[derive(Debug)]
pub struct CropHistory {
    path: PathBuf,
    document: HistoryDocument,
}

impl CropHistory {
    /// 履歴ファイルを読み込み（失敗時は空）
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let document = json_file::load_or_default(&path);
        Self { path, document }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn document(&self) -> &HistoryDocument {
        &self.document
    }

    /// 切り抜きを追加（同じサイズ・座標が既にあれば何もしない）
    ///
    /// 書き込みが発生したかを返す。
    pub fn record_crop(&mut self, folder: &str, image_path: &str, coords: Rect) -> bool {
        let record = CropRecord::from_rect(coords);
        let crops = self
            .document
            .data
            .entry(folder.to_string())
            .or_default()
            .entry(image_path.to_string())
            .or_default();

        if crops.contains(&record) {
            debug!("重複した切り抜きを無視: {} {}", image_path, record.size);
            return false;
        }

        crops.push(record);
        self.persist();
        true
    }

    /// 画像の履歴をすべて削除（フォルダが空になればフォルダごと削除）
    pub fn remove_image(&mut self, folder: &str, image_path: &str) -> bool {
        let Some(images) = self.document.data.get_mut(folder) else {
            return false;
        };
        if images.remove(image_path).is_none() {
            return false;
        }
        if images.is_empty() {
            self.document.data.remove(folder);
        }
        self.persist();
        true
    }

    /// フォルダ内のサイズごとの切り抜き数
    pub fn counts_by_size(&self, folder: &str) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        if let Some(images) = self.document.data.get(folder) {
            for crop in images.values().flatten() {
                *counts.entry(crop.size.clone()).or_insert(0) += 1;
            }
        }
        counts
    }

    /// 画像の切り抜き一覧（保存順）
    pub fn crops_for(&self, folder: &str, image_path: &str) -> &[CropRecord] {
        self.document
            .data
            .get(folder)
            .and_then(|images| images.get(image_path))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 画像の切り抜きサイズラベル一覧
    pub fn crop_labels(&self, folder: &str, image_path: &str) -> Vec<String> {
        self.crops_for(folder, image_path)
            .iter()
            .map(|crop| crop.size.clone())
            .collect()
    }

    /// 履歴のあるフォルダ
    pub fn folders(&self) -> impl Iterator<Item = &str> {
        self.document.data.keys().map(String::as_str)
    }

    /// フォルダ内で履歴のある画像数
    pub fn image_count(&self, folder: &str) -> usize {
        self.document.data.get(folder).map_or(0, BTreeMap::len)
    }

    /// ファイルへ保存
    pub fn flush(&self) -> Result<()> {
        json_file::write_pretty(&self.path, &self.document)?;
        debug!("履歴を保存: {}", self.path.display());
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.flush() {
            error!("履歴の保存に失敗: {}: {}", self.path.display(), e);
        }
    }
}
