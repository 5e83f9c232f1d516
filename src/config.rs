use crate::error::{DashboardError, Result};
use road_damage_common::DEFAULT_DAMAGE_TYPES;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 損傷データファイルを指定する環境変数
pub const DATASET_ENV: &str = "ROAD_DAMAGE_DATASET";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub dataset_path: Option<PathBuf>,
    pub storage_path: Option<PathBuf>,
    /// 種別分布の並び順
    pub damage_types: Vec<String>,
    /// 最近の損傷報告の表示件数
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_config()
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default_config())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("road-damage").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            dataset_path: None,
            storage_path: None,
            damage_types: DEFAULT_DAMAGE_TYPES.iter().map(|t| t.to_string()).collect(),
            recent_limit: 5,
        }
    }

    /// 損傷データファイル（コマンド引数 > 環境変数 > 設定ファイル）
    pub fn resolve_dataset(&self, arg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Ok(path) = std::env::var(DATASET_ENV) {
            if !path.is_empty() {
                return Ok(PathBuf::from(path));
            }
        }

        self.dataset_path.clone().ok_or_else(|| {
            DashboardError::Config(format!(
                "損傷データファイルが未設定です。--dataset、環境変数 {}、または `road-damage config --set-dataset` で指定してください",
                DATASET_ENV
            ))
        })
    }

    /// 上書き・画面設定の保存先（コマンド引数 > 設定ファイル > データディレクトリ）
    pub fn resolve_storage(&self, arg: Option<&Path>) -> Result<PathBuf> {
        if let Some(path) = arg {
            return Ok(path.to_path_buf());
        }
        if let Some(path) = &self.storage_path {
            return Ok(path.clone());
        }

        let data_dir = dirs::data_dir()
            .ok_or_else(|| DashboardError::Config("データディレクトリが見つかりません".into()))?;
        Ok(data_dir.join("road-damage").join("storage.json"))
    }
}
