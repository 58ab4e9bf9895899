pub mod assessment_service;
pub mod candidate_service;
pub mod job_service;
pub mod note_service;
pub mod sim;

pub use assessment_service::AssessmentService;
pub use candidate_service::CandidateService;
pub use job_service::JobService;
pub use note_service::NoteService;
pub use sim::SimPolicy;
