use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub stage: Stage,
    /// Reference to the job this candidate applied for. Expected to be a
    /// valid job id but not enforced as a foreign key.
    pub job_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Position in the hiring pipeline. Applied through Hired is the normal
/// progression; Rejected is reachable from any stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    Applied,
    Screen,
    Tech,
    Offer,
    Hired,
    Rejected,
}

impl Stage {
    pub const ALL: [Stage; 6] = [
        Stage::Applied,
        Stage::Screen,
        Stage::Tech,
        Stage::Offer,
        Stage::Hired,
        Stage::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::Applied => "applied",
            Stage::Screen => "screen",
            Stage::Tech => "tech",
            Stage::Offer => "offer",
            Stage::Hired => "hired",
            Stage::Rejected => "rejected",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "applied" => Some(Stage::Applied),
            "screen" => Some(Stage::Screen),
            "tech" => Some(Stage::Tech),
            "offer" => Some(Stage::Offer),
            "hired" => Some(Stage::Hired),
            "rejected" => Some(Stage::Rejected),
            _ => None,
        }
    }
}

/// Append-only audit record of a candidate's movement through the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEvent {
    pub id: i64,
    pub candidate_id: String,
    pub at: DateTime<Utc>,
    pub action: TimelineAction,
    /// Present iff `action` is `StageChange`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_stage: Option<Stage>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimelineAction {
    Created,
    StageChange,
}

impl TimelineAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimelineAction::Created => "created",
            TimelineAction::StageChange => "stage_change",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "created" => Some(TimelineAction::Created),
            "stage_change" => Some(TimelineAction::StageChange),
            _ => None,
        }
    }
}
