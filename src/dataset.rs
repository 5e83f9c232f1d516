//! 損傷データファイルの読み込み

use crate::error::{DashboardError, Result};
use road_damage_common::{parse_dataset, DamageRecord, Error as CommonError};
use std::path::Path;

pub fn load_dataset(path: &Path) -> Result<Vec<DamageRecord>> {
    if !path.exists() {
        return Err(DashboardError::DatasetNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let records = parse_dataset(&content).map_err(|e| match e {
        CommonError::Json(e) => DashboardError::InvalidDataset(format!("{}: {}", path.display(), e)),
        other => DashboardError::Common(other),
    })?;

    tracing::info!(path = %path.display(), count = records.len(), "損傷データを読み込みました");
    Ok(records)
}
