//! ベースデータの読み込み
//!
//! 損傷データはJSON配列。`const damages = [...];` のようにスクリプトに埋め込まれた
//! 配列も、中身がJSONであればそのまま読み込める。

use crate::error::{Error, Result};
use crate::store::validate_unique_ids;
use crate::types::DamageRecord;

/// 文字列から [...] 部分を取り出す
fn extract_array(content: &str) -> Option<&str> {
    let start = content.find('[')?;
    let end = content.rfind(']')?;
    (end >= start).then(|| &content[start..=end])
}

/// 損傷データをパース（IDの重複はエラー）
pub fn parse_dataset(content: &str) -> Result<Vec<DamageRecord>> {
    let json = extract_array(content)
        .ok_or_else(|| Error::Dataset("損傷データの配列が見つかりません".into()))?;
    let records: Vec<DamageRecord> = serde_json::from_str(json)?;
    validate_unique_ids(&records)?;
    Ok(records)
}
