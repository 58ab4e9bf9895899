use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Append-only free-text note on a candidate. `@mention` tokens are
/// persisted verbatim; rendering them is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: i64,
    pub candidate_id: String,
    pub text: String,
    pub at: DateTime<Utc>,
}
