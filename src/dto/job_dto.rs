use crate::models::JobStatus;
use crate::store::jobs::JobSort;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateJobPayload {
    #[validate(length(min = 1))]
    pub title: String,
    /// Derived from the title when not given.
    pub slug: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: Option<JobStatus>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateJobPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub slug: Option<String>,
    pub status: Option<JobStatus>,
    pub tags: Option<Vec<String>>,
}

#[derive(Debug, Clone)]
pub struct JobListQuery {
    pub search: Option<String>,
    pub status: Option<JobStatus>,
    /// 1-based page index.
    pub page: u32,
    pub page_size: u32,
    pub sort: JobSort,
}

impl Default for JobListQuery {
    fn default() -> Self {
        Self {
            search: None,
            status: None,
            page: 1,
            page_size: 25,
            sort: JobSort::Order,
        }
    }
}
