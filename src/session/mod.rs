//! 切り抜きセッション
//!
//! フォルダ内の画像を順に開き、既定サイズの選択・矩形の配置・切り抜きの確定・
//! 画像の削除・前回位置への復帰を行う。描画や入力は呼び出し側（CLI等）が担い、
//! ここでは名前付きの操作と表示用の読み出しだけを提供する。
//!
//! ## 状態遷移
//! - 固定サイズ: 矩形なし → 配置済み → 保存（次の画像へ進み、矩形なしに戻る）
//! - custom: 待機 → ドラッグ中 → 確定 → 保存

mod types;

pub use types::{CommitOutcome, ImageContext, JumpOutcome};

use crate::config::Config;
use crate::error::{PowerCropError, Result};
use crate::export;
use crate::scanner;
use crate::store::{CropHistory, ResumeIndex};
use crop_common::{preset, CropRecord, LastCroppedEntry, Orientation, PresetState, Rect, SizeMode};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, warn};
use types::Drag;

/// 保存できる矩形の最小辺（ピクセル）
pub const MIN_CROP_EDGE: u32 = 2;

/// 履歴・再開インデックスのキーとして使うパス文字列
pub fn path_key(path: &Path) -> String {
    path.to_string_lossy().to_string()
}

pub struct CropSession {
    history: CropHistory,
    resume: ResumeIndex,
    output_dir_name: String,
    orientation: Orientation,
    size_mode: SizeMode,
    folder: Option<PathBuf>,
    save_folder: Option<PathBuf>,
    images: Vec<PathBuf>,
    index: usize,
    current: Option<ImageContext>,
    rect: Option<Rect>,
    drag: Option<Drag>,
}

impl CropSession {
    pub fn new(
        history: CropHistory,
        resume: ResumeIndex,
        orientation: Orientation,
        output_dir_name: impl Into<String>,
    ) -> Self {
        Self {
            history,
            resume,
            output_dir_name: output_dir_name.into(),
            orientation,
            size_mode: SizeMode::default(),
            folder: None,
            save_folder: None,
            images: Vec::new(),
            index: 0,
            current: None,
            rect: None,
            drag: None,
        }
    }

    /// 設定ファイルの場所から履歴を読み込んでセッションを作る
    pub fn from_config(config: &Config) -> Result<Self> {
        let history = CropHistory::load(config.history_path()?);
        let resume = ResumeIndex::load(config.resume_path()?);
        Ok(Self::new(
            history,
            resume,
            config.orientation,
            config.output_dir_name.clone(),
        ))
    }

    // ========== フォルダ・画像の切り替え ==========

    /// フォルダを開く（画像一覧を取得し、前回の位置へ移動）
    ///
    /// 画像数を返す。画像がなければエラーで、状態は変わらない。
    pub fn open_folder(&mut self, folder: &Path) -> Result<usize> {
        let images = scanner::scan_folder(folder)?;
        if images.is_empty() {
            return Err(PowerCropError::NoImagesFound(folder.display().to_string()));
        }
        let count = images.len();
        self.load_images(folder, images)?;
        self.jump_to_last_cropped();
        Ok(count)
    }

    /// 画像一覧を直接渡してフォルダを開く（先頭の画像を開く）
    pub fn load_images(&mut self, folder: &Path, images: Vec<PathBuf>) -> Result<()> {
        let folder = scanner::absolute_folder(folder)?;
        let save_folder = folder.join(&self.output_dir_name);
        std::fs::create_dir_all(&save_folder)?;

        info!("フォルダを開く: {} ({}枚)", folder.display(), images.len());
        self.folder = Some(folder);
        self.save_folder = Some(save_folder);
        self.images = images;
        self.index = 0;
        self.open_image(0);
        Ok(())
    }

    /// `index` 番目の画像を開き、既定サイズと既定の矩形を決める
    ///
    /// 読み込めない画像でも位置はそこへ移る（移動・削除はできる）。
    pub fn open_image(&mut self, index: usize) -> Option<ImageContext> {
        self.rect = None;
        self.drag = None;
        self.current = None;

        let path = self.images.get(index)?.clone();
        self.index = index;

        let (width, height) = match image::image_dimensions(&path) {
            Ok(dims) => dims,
            Err(e) => {
                warn!("画像を開けません: {}: {}", path.display(), e);
                return None;
            }
        };

        let size_mode = preset::best_preset(width, height, self.orientation);
        self.size_mode = size_mode;
        let default_rect = default_rect(size_mode, width, height);
        self.rect = default_rect;
        debug!(
            "画像を開く: {} ({}x{}) 既定サイズ {}",
            path.display(),
            width,
            height,
            size_mode
        );

        let context = ImageContext {
            path,
            width,
            height,
            size_mode,
            default_rect,
        };
        self.current = Some(context.clone());
        Some(context)
    }

    /// 前後の画像へ移動（端で折り返す）
    pub fn advance(&mut self, step: isize) -> Option<ImageContext> {
        if self.images.is_empty() {
            return None;
        }
        let len = self.images.len() as isize;
        let next = (self.index as isize + step).rem_euclid(len) as usize;
        self.open_image(next)
    }

    /// このフォルダで最後に切り抜いた画像へ移動
    pub fn jump_to_last_cropped(&mut self) -> JumpOutcome {
        let Some(folder) = &self.folder else {
            return JumpOutcome::NoFolder;
        };
        let Some(entry) = self.resume.last_for(&path_key(folder)) else {
            return JumpOutcome::NoEntry;
        };
        let target = entry.image_path.clone();

        match self.images.iter().position(|p| path_key(p) == target) {
            Some(index) => {
                self.open_image(index);
                JumpOutcome::Jumped(index)
            }
            None => {
                warn!("最後に切り抜いた画像が現在のフォルダにありません: {}", target);
                JumpOutcome::Stale(PathBuf::from(target))
            }
        }
    }

    /// 現在の画像を削除（履歴・ファイル・一覧から）
    ///
    /// 削除した画像のパスを返す。一覧が空になればセッションは終了する。
    pub fn delete_current_image(&mut self) -> Option<PathBuf> {
        let path = self.images.get(self.index)?.clone();

        if let Some(folder) = &self.folder {
            let folder_key = path_key(folder);
            self.history.remove_image(&folder_key, &path_key(&path));
        }

        match std::fs::remove_file(&path) {
            Ok(()) => info!("画像を削除: {}", path.display()),
            Err(e) => error!("画像の削除に失敗: {}: {}", path.display(), e),
        }

        self.images.remove(self.index);
        if self.images.is_empty() {
            self.index = 0;
            self.current = None;
            self.rect = None;
            self.drag = None;
            return Some(path);
        }

        self.index = self.index.min(self.images.len() - 1);
        self.open_image(self.index);
        Some(path)
    }

    // ========== サイズ・向き ==========

    /// サイズを切り替える（画像に収まらないプリセットは選べない）
    ///
    /// 矩形はクリアされ、固定サイズなら中央に置き直す。
    pub fn select_size(&mut self, mode: SizeMode) -> bool {
        if let Some(ctx) = &self.current {
            if !preset::is_enabled(mode, ctx.width, ctx.height) {
                debug!("{} は {}x{} に収まりません", mode, ctx.width, ctx.height);
                return false;
            }
        }

        self.size_mode = mode;
        self.drag = None;
        self.rect = self
            .current
            .as_ref()
            .and_then(|ctx| default_rect(mode, ctx.width, ctx.height));
        true
    }

    /// 向きの優先を変え、現在の画像の既定サイズを選び直す
    pub fn set_orientation(&mut self, orientation: Orientation) {
        self.orientation = orientation;
        if let Some((width, height)) = self.image_size() {
            let mode = preset::best_preset(width, height, orientation);
            self.select_size(mode);
        }
    }

    // ========== 矩形 ==========

    /// 固定サイズの矩形を (cx, cy) 中心に置く（custom では何もしない）
    pub fn place_rectangle_at(&mut self, cx: i64, cy: i64) -> Option<Rect> {
        let size = self.size_mode.fixed_size()?;
        let ctx = self.current.as_ref()?;
        let rect = Rect::centered_at(cx, cy, size, ctx.width, ctx.height);
        self.rect = Some(rect);
        Some(rect)
    }

    /// カスタム矩形のドラッグ開始
    pub fn begin_custom_drag(&mut self, x: i64, y: i64) -> bool {
        let Some((width, height)) = self.image_size() else {
            return false;
        };
        if !self.size_mode.is_custom() {
            return false;
        }
        self.rect = None;
        self.drag = Some(Drag {
            start: (x, y),
            live: Rect::from_corners(x, y, x, y, width, height),
        });
        true
    }

    /// ドラッグ中の矩形を更新
    pub fn update_custom_drag(&mut self, x: i64, y: i64) -> Option<Rect> {
        let (width, height) = self.image_size()?;
        let drag = self.drag.as_mut()?;
        let (x0, y0) = drag.start;
        drag.live = Rect::from_corners(x0, y0, x, y, width, height);
        Some(drag.live)
    }

    /// ドラッグを確定（どちらかの辺が2ピクセル未満なら破棄）
    pub fn finalize_custom_drag(&mut self, x: i64, y: i64) -> Option<Rect> {
        let (width, height) = self.image_size()?;
        let drag = self.drag.take()?;
        let (x0, y0) = drag.start;
        let rect = Rect::from_corners(x0, y0, x, y, width, height);

        if !has_min_edge(rect) {
            debug!("小さすぎる矩形を破棄: {}", rect.size_label());
            return None;
        }
        self.rect = Some(rect);
        Some(rect)
    }

    /// ドラッグ中の寸法表示 `"W x H"`
    pub fn drag_label(&self) -> Option<String> {
        self.drag
            .map(|drag| format!("{} x {}", drag.live.width(), drag.live.height()))
    }

    // ========== 保存 ==========

    /// 現在の矩形で切り抜きを確定
    pub fn quick_save(&mut self) -> CommitOutcome {
        match self.rect {
            Some(rect) => self.commit_crop(rect),
            None => CommitOutcome::Skipped,
        }
    }

    /// 矩形を切り抜いてPNG保存し、履歴と再開情報を更新して次の画像へ進む
    pub fn commit_crop(&mut self, rect: Rect) -> CommitOutcome {
        let (Some(ctx), Some(folder), Some(save_folder)) = (
            self.current.clone(),
            self.folder.clone(),
            self.save_folder.clone(),
        ) else {
            return CommitOutcome::Skipped;
        };

        let rect = rect.clamped(ctx.width, ctx.height);
        if !has_min_edge(rect) {
            debug!("切り抜きを却下: {}", rect.size_label());
            return CommitOutcome::Rejected;
        }

        let outcome = match export::save_crop(&ctx.path, rect, &save_folder) {
            Ok(output) => {
                let folder_key = path_key(&folder);
                let image_key = path_key(&ctx.path);
                let recorded = self.history.record_crop(&folder_key, &image_key, rect);
                self.resume
                    .record_last(&folder_key, LastCroppedEntry::new(rect, image_key, folder_key.clone()));
                info!("切り抜きを保存: {}", output.display());
                CommitOutcome::Saved {
                    output,
                    rect,
                    recorded,
                }
            }
            Err(e) => {
                error!("切り抜きの保存に失敗: {}: {}", ctx.path.display(), e);
                CommitOutcome::Failed(e.to_string())
            }
        };

        self.advance(1);
        outcome
    }

    // ========== 表示用の読み出し ==========

    pub fn current(&self) -> Option<&ImageContext> {
        self.current.as_ref()
    }

    /// 現在位置の画像パス（読み込めなかった画像も含む）
    pub fn current_path(&self) -> Option<&Path> {
        self.images.get(self.index).map(PathBuf::as_path)
    }

    /// 現在位置の画像を読み込めなかった
    pub fn is_unreadable(&self) -> bool {
        self.current.is_none() && !self.images.is_empty()
    }

    pub fn current_rect(&self) -> Option<Rect> {
        self.rect
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.current.as_ref().map(|ctx| (ctx.width, ctx.height))
    }

    pub fn size_mode(&self) -> SizeMode {
        self.size_mode
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_some()
    }

    pub fn folder(&self) -> Option<&Path> {
        self.folder.as_deref()
    }

    pub fn save_folder(&self) -> Option<&Path> {
        self.save_folder.as_deref()
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn history(&self) -> &CropHistory {
        &self.history
    }

    pub fn resume(&self) -> &ResumeIndex {
        &self.resume
    }

    /// (1始まりの位置, 総数)
    pub fn position(&self) -> Option<(usize, usize)> {
        if self.images.is_empty() {
            return None;
        }
        Some((self.index + 1, self.images.len()))
    }

    /// 現在の画像の保存済み切り抜き
    pub fn previous_crops(&self) -> &[CropRecord] {
        match (&self.folder, &self.current) {
            (Some(folder), Some(ctx)) => self
                .history
                .crops_for(&path_key(folder), &path_key(&ctx.path)),
            _ => &[],
        }
    }

    /// 現在の画像の保存済みサイズラベル
    pub fn crop_labels(&self) -> Vec<String> {
        self.previous_crops()
            .iter()
            .map(|crop| crop.size.clone())
            .collect()
    }

    /// 現在のフォルダのサイズごとの切り抜き数
    pub fn counts_by_size(&self) -> BTreeMap<String, usize> {
        self.folder
            .as_ref()
            .map(|folder| self.history.counts_by_size(&path_key(folder)))
            .unwrap_or_default()
    }

    /// プリセット行の選択可否・選択中
    pub fn preset_states(&self) -> Vec<PresetState> {
        self.image_size()
            .map(|(width, height)| preset::preset_states(width, height, self.size_mode))
            .unwrap_or_default()
    }

    /// `"Image size: W x H px (i/n)"`
    pub fn dimension_label(&self) -> Option<String> {
        let (width, height) = self.image_size()?;
        let (position, total) = self.position()?;
        Some(format!(
            "Image size: {} x {} px  ({}/{})",
            width, height, position, total
        ))
    }

    /// `"Cropped sizes: ..."` または `"Not yet cropped"`
    pub fn cropped_label(&self) -> Option<String> {
        self.current.as_ref()?;
        let labels = self.crop_labels();
        if labels.is_empty() {
            Some("Not yet cropped".to_string())
        } else {
            Some(format!("Cropped sizes: {}", labels.join(", ")))
        }
    }
}

fn default_rect(mode: SizeMode, width: u32, height: u32) -> Option<Rect> {
    mode.fixed_size()
        .map(|size| Rect::centered_in(size, width, height))
}

fn has_min_edge(rect: Rect) -> bool {
    rect.width() >= MIN_CROP_EDGE && rect.height() >= MIN_CROP_EDGE
}
