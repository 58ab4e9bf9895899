use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Per-job questionnaire schema. One assessment per job, replaced wholesale
/// on save.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub job_id: String,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub required: bool,
    /// Visibility dependency on an earlier question's answer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_if: Option<ShowIf>,
    #[serde(flatten)]
    pub kind: QuestionKind,
}

/// The `type` discriminant plus the constraint fields relevant to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum QuestionKind {
    Short {
        #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Long {
        #[serde(default, rename = "maxLength", skip_serializing_if = "Option::is_none")]
        max_length: Option<u32>,
    },
    Single {
        options: Vec<QuestionOption>,
    },
    Multi {
        options: Vec<QuestionOption>,
    },
    Number {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        min: Option<f64>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        max: Option<f64>,
    },
    File,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionOption {
    pub id: String,
    pub label: String,
}

/// Single equality predicate: the question is shown iff the answer recorded
/// for `question_id` equals `equals` exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowIf {
    pub question_id: String,
    pub equals: String,
}

/// Partial edit to a question. Unspecified fields are preserved; the id
/// never changes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPatch {
    pub label: Option<String>,
    pub required: Option<bool>,
    pub show_if: Option<ShowIf>,
    #[serde(flatten)]
    pub kind: Option<QuestionKind>,
}

impl Question {
    pub fn merge(&mut self, patch: QuestionPatch) {
        if let Some(label) = patch.label {
            self.label = label;
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(show_if) = patch.show_if {
            self.show_if = Some(show_if);
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
    }
}

impl Assessment {
    /// Builder edit: new sections always append.
    pub fn add_section(&mut self, title: impl Into<String>) -> &mut Section {
        self.sections.push(Section {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.into(),
            questions: Vec::new(),
        });
        self.sections.last_mut().expect("just pushed")
    }
}

impl Section {
    /// Builder edit: new questions append to the section's list.
    pub fn add_question(&mut self, question: Question) {
        self.questions.push(question);
    }
}

/// A recorded answer. Single-valued questions (including number and file,
/// which answer with their textual form) record text; multi-select records
/// the chosen option labels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Many(Vec<String>),
}

impl Answer {
    pub fn is_empty(&self) -> bool {
        match self {
            Answer::Text(s) => s.is_empty(),
            Answer::Many(v) => v.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Answer::Text(s) => Some(s),
            Answer::Many(_) => None,
        }
    }
}

/// Question id -> answer, as filled in by a respondent.
pub type AnswerMap = HashMap<String, Answer>;

/// A filled-in instance of an assessment, kept append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub id: i64,
    pub job_id: String,
    pub candidate_id: Option<String>,
    pub payload: AnswerMap,
    pub submitted_at: DateTime<Utc>,
}
