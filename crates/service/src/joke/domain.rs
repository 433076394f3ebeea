use serde::{Deserialize, Serialize};

use crate::errors::{FieldError, Rejected};

pub use models::joke::Model as Joke;

/// Joke fields as submitted by a caller. Every field may be missing.
///
/// `id` is only consulted by updates, where it must match the addressed record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JokeInput {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub author: Option<String>,
}

/// Validated fields, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JokeDraft {
    pub question: String,
    pub answer: String,
    pub author: Option<String>,
}

impl JokeInput {
    pub fn new(question: &str, answer: &str, author: Option<&str>) -> Self {
        Self {
            id: None,
            question: Some(question.to_string()),
            answer: Some(answer.to_string()),
            author: author.map(str::to_string),
        }
    }

    pub fn with_id(mut self, id: i32) -> Self {
        self.id = Some(id);
        self
    }

    /// Question and answer must be present and not blank; a blank author is
    /// stored as absent.
    pub fn validate(self) -> Result<JokeDraft, Rejected> {
        let mut errors = Vec::new();
        if is_blank(&self.question) {
            errors.push(required("question"));
        }
        if is_blank(&self.answer) {
            errors.push(required("answer"));
        }
        if !errors.is_empty() {
            return Err(Rejected { input: self, errors });
        }
        Ok(JokeDraft {
            question: self.question.unwrap_or_default(),
            answer: self.answer.unwrap_or_default(),
            author: self.author.filter(|a| !a.trim().is_empty()),
        })
    }
}

fn is_blank(v: &Option<String>) -> bool {
    v.as_deref().map_or(true, |s| s.trim().is_empty())
}

fn required(field: &'static str) -> FieldError {
    FieldError { field, message: format!("the {field} field is required") }
}
