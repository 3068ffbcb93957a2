// src/models/answer.rs

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;

/// Represents the 'answers' table in the database.
/// At most one row per (session, question) pair; resubmission updates it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Answer {
    pub id: i64,
    pub session_id: i64,
    pub question_id: i64,
    /// Canonical sorted JSON list of selected choice ids.
    pub selected: String,
    pub is_correct: bool,
}

/// DTO for a quiz submission.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    /// Key: question id. Value: one choice id for single-kind questions,
    /// a list of choice ids for multi-kind ones. Questions of the session
    /// absent from the map are graded against an empty selection.
    #[serde(default)]
    pub answers: HashMap<i64, Selection>,
}

/// A submitted selection: a bare choice id or a list of them.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum Selection {
    One(String),
    Many(Vec<String>),
}

/// Canonical form of a selection: sorted lexically and deduplicated, so that
/// comparison against the sorted correct-id list is set equality. An empty
/// single value counts as no selection.
pub fn canonicalize_selection(selection: Selection) -> Vec<String> {
    let mut ids = match selection {
        Selection::One(v) if v.is_empty() => Vec::new(),
        Selection::One(v) => vec![v],
        Selection::Many(vs) => vs,
    };
    ids.sort();
    ids.dedup();
    ids
}
