//! Output records emitted by the game memory reader.
//!
//! The reader prints one JSON object per line. Most lines carry unrelated
//! unit data; the only field this program cares about is the quest
//! description nested under `u.qtts`.

use serde::Deserialize;
use serde_json::{Map, Value};

/// One JSON line from the reader. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
pub struct OutputRecord {
    pub u: Option<UnitUpdate>,
}

/// Unit-update payload; `qtts` is kept as a raw object so the
/// non-empty guard can be applied before looking up the leaf.
#[derive(Debug, Deserialize)]
pub struct UnitUpdate {
    pub qtts: Option<Map<String, Value>>,
}

/// Key of the announcement text inside the `qtts` object.
const QUEST_DESCRIPTION_KEY: &str = "questDescription";

/// Extract the announcement payload from one reader line.
///
/// Returns `Err` for malformed JSON. Returns `Ok(None)` when the line is
/// valid JSON but carries no announcement: the `u.qtts.questDescription`
/// path is absent at any level, `qtts` is an empty object, or the leaf is
/// not a string. This is the common case and deliberately silent.
pub fn extract_announcement(line: &str) -> serde_json::Result<Option<String>> {
    let record: OutputRecord = serde_json::from_str(line)?;
    Ok(record
        .u
        .and_then(|u| u.qtts)
        .filter(|qtts| !qtts.is_empty())
        .and_then(|qtts| {
            qtts.get(QUEST_DESCRIPTION_KEY)
                .and_then(Value::as_str)
                .map(str::to_string)
        }))
}
