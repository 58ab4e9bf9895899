pub mod assessment;
pub mod candidate;
pub mod job;
pub mod note;

pub use assessment::{
    Answer, AnswerMap, Assessment, Question, QuestionKind, QuestionOption, QuestionPatch, Section,
    ShowIf, SubmissionResponse,
};
pub use candidate::{Candidate, Stage, TimelineAction, TimelineEvent};
pub use job::{Job, JobStatus};
pub use note::Note;
