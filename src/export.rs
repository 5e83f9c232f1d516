//! 損傷台帳のExcel出力（CLI版）

use crate::error::{DashboardError, Result};
use road_damage_common::export::ledger::generate_ledger_buffer;
use road_damage_common::DamageRecord;
use std::path::{Path, PathBuf};

/// 出力先がディレクトリ（または拡張子なし）の場合は `<タイトル>.xlsx`
pub fn output_path(output: &Path, title: &str) -> PathBuf {
    if output.is_dir() || output.extension().is_none() {
        output.join(format!("{}.xlsx", title))
    } else {
        output.to_path_buf()
    }
}

pub fn export_ledger(records: &[DamageRecord], output: &Path, title: &str) -> Result<PathBuf> {
    let path = output_path(output, title);
    let buffer = generate_ledger_buffer(records, title).map_err(DashboardError::ExcelGeneration)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(&path, buffer)?;

    tracing::debug!(path = %path.display(), count = records.len(), "損傷台帳を出力");
    Ok(path)
}
