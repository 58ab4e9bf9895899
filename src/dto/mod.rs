pub mod assessment_dto;
pub mod candidate_dto;
pub mod job_dto;

pub use assessment_dto::{CreateNotePayload, PutAssessmentPayload, SubmitAssessmentPayload};
pub use candidate_dto::{CandidateListQuery, CreateCandidatePayload, UpdateCandidatePayload};
pub use job_dto::{CreateJobPayload, JobListQuery, UpdateJobPayload};

use serde::{Deserialize, Serialize};

/// One page of a filtered listing; `total` counts the whole filtered set,
/// not just this page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: i64,
}
