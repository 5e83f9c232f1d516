//! Road Damage Common Library
//!
//! CLIとWeb(WASM)で共有される型・上書きマージストア・集計処理

pub mod dataset;
pub mod error;
pub mod export;
pub mod filter;
pub mod preferences;
pub mod selection;
pub mod stats;
pub mod storage;
pub mod store;
pub mod types;

pub use dataset::parse_dataset;
pub use error::{Error, Result};
pub use filter::{DamageFilter, FilterOptions, MonthOption, ALL};
pub use preferences::{load_sidebar_collapsed, save_sidebar_collapsed, FilterPreferences};
pub use selection::{clear_selected, clear_selected_if, load_selected, save_selected};
pub use stats::{DashboardSummary, DEFAULT_DAMAGE_TYPES};
pub use storage::{read_json_or_default, KeyValueStore, MemoryStore};
pub use store::{merge_records, DamageStore, OverrideMap};
pub use types::{DamageRecord, DamageStatus, OverridePatch, SeverityLevel};
