// src/models/question.rs

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Question kind markers stored in the `kind` column.
pub const KIND_SINGLE: &str = "single";
pub const KIND_MULTI: &str = "multi";

/// Represents the 'questions' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,
    pub quiz_id: i64,

    /// Question kind: 'single' (one correct choice) or 'multi' (one or more).
    pub kind: String,

    /// Topic label, used for per-theme reporting.
    pub topic: String,

    /// The text content of the question.
    pub content: String,

    /// Choices serialized as a JSON array of {id, label, is_correct, feedback?}.
    /// Kept as raw text so a malformed blob degrades to an empty choice set
    /// instead of failing the row fetch.
    pub choices: String,
}

/// A single choice of a question. Choice ids are short codes ("A", "B", ...)
/// unique within their question only, so any persisted or compared form must
/// stay scoped to (question id, choice id).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub label: String,
    pub is_correct: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
}

impl Question {
    /// Parses the stored choice list, substituting empty on malformed JSON.
    pub fn choice_list(&self) -> Vec<Choice> {
        serde_json::from_str(&self.choices).unwrap_or_default()
    }

    /// Sorted ids of the choices flagged correct.
    pub fn correct_choice_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self
            .choice_list()
            .into_iter()
            .filter(|c| c.is_correct)
            .map(|c| c.id)
            .collect();
        ids.sort();
        ids
    }

    /// Grades a canonical (sorted, deduplicated) selection: correct iff it
    /// equals the correct-id list exactly. Both sides being sorted makes this
    /// set equality; a strict subset, superset or disjoint set all fail.
    pub fn grade(&self, selected: &[String]) -> bool {
        selected == self.correct_choice_ids().as_slice()
    }
}

/// Candidate-facing DTO: strips correctness flags and feedback so the
/// rendering layer can never leak them.
#[derive(Debug, Serialize)]
pub struct PublicQuestion {
    pub id: i64,
    pub kind: String,
    pub topic: String,
    pub content: String,
    pub choices: Vec<PublicChoice>,
}

#[derive(Debug, Serialize)]
pub struct PublicChoice {
    pub id: String,
    pub label: String,
}

impl From<&Question> for PublicQuestion {
    fn from(q: &Question) -> Self {
        PublicQuestion {
            id: q.id,
            kind: q.kind.clone(),
            topic: q.topic.clone(),
            content: q.content.clone(),
            choices: q
                .choice_list()
                .into_iter()
                .map(|c| PublicChoice {
                    id: c.id,
                    label: c.label,
                })
                .collect(),
        }
    }
}
