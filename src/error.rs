use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("損傷データファイルが見つかりません: {0}")]
    DatasetNotFound(String),

    #[error("損傷データが不正: {0}")]
    InvalidDataset(String),

    #[error("損傷が見つかりません: ID {0}")]
    RecordNotFound(u64),

    #[error("日付の形式が不正です（YYYY-MM-DD）: {0}")]
    InvalidDate(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] road_damage_common::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
