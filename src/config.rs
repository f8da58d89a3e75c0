use crate::error::{PowerCropError, Result};
use crop_common::Orientation;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const DATA_DIR_ENV: &str = "POWER_CROPPER_DATA_DIR";
const HISTORY_FILE_NAME: &str = "cropped_info.json";
const RESUME_FILE_NAME: &str = "last_cropped.json";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 切り抜き履歴ファイル（省略時はデータディレクトリ）
    pub history_file: Option<PathBuf>,
    /// 再開インデックスファイル（省略時はデータディレクトリ）
    pub resume_file: Option<PathBuf>,
    /// 既定の向きの優先
    pub orientation: Orientation,
    /// 出力先サブフォルダ名
    pub output_dir_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            history_file: None,
            resume_file: None,
            orientation: Orientation::Portrait,
            output_dir_name: "cropped".into(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn config_dir() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| PowerCropError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("power-cropper"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// 履歴ファイルの置き場所
    pub fn data_dir() -> Result<PathBuf> {
        // 環境変数を優先
        if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
            if !dir.trim().is_empty() {
                return Ok(PathBuf::from(dir));
            }
        }

        Self::config_dir()
    }

    pub fn history_path(&self) -> Result<PathBuf> {
        match &self.history_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(HISTORY_FILE_NAME)),
        }
    }

    pub fn resume_path(&self) -> Result<PathBuf> {
        match &self.resume_file {
            Some(path) => Ok(path.clone()),
            None => Ok(Self::data_dir()?.join(RESUME_FILE_NAME)),
        }
    }

    pub fn set_orientation(&mut self, orientation: Orientation) -> Result<()> {
        self.orientation = orientation;
        self.save()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.orientation, Orientation::Portrait);
        assert_eq!(config.output_dir_name, "cropped");
        assert!(config.history_file.is_none());
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config: Config = serde_json::from_str(r#"{ "orientation": "landscape" }"#).unwrap();
        assert_eq!(config.orientation, Orientation::Landscape);
        assert_eq!(config.output_dir_name, "cropped");
    }

    #[test]
    fn test_explicit_paths_win() {
        let config = Config {
            history_file: Some(PathBuf::from("/tmp/h.json")),
            resume_file: Some(PathBuf::from("/tmp/r.json")),
            ..Config::default()
        };
        assert_eq!(config.history_path().unwrap(), PathBuf::from("/tmp/h.json"));
        assert_eq!(config.resume_path().unwrap(), PathBuf::from("/tmp/r.json"));
    }
}
