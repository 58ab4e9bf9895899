use crate::models::Stage;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[validate(email)]
    pub email: String,
    pub job_id: Option<String>,
    pub stage: Option<Stage>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCandidatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    pub stage: Option<Stage>,
    pub job_id: Option<String>,
}

impl UpdateCandidatePayload {
    pub fn stage(stage: Stage) -> Self {
        Self {
            stage: Some(stage),
            ..Self::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CandidateListQuery {
    pub search: Option<String>,
    pub stage: Option<Stage>,
    /// 1-based page index.
    pub page: u32,
    pub page_size: u32,
}

impl Default for CandidateListQuery {
    fn default() -> Self {
        Self {
            search: None,
            stage: None,
            page: 1,
            page_size: 100,
        }
    }
}
