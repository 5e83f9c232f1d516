//! エラー型定義

use thiserror::Error;

/// 共通エラー型
#[derive(Error, Debug)]
pub enum Error {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Dataset error: {0}")]
    Dataset(String),

    /// ストレージが使用不可、または容量超過
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Unknown damage record: id={0}")]
    UnknownRecord(u64),

    #[error("Duplicate damage id: {0}")]
    DuplicateId(u64),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;
