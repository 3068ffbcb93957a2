// src/handlers/quiz.rs

use std::collections::HashMap;

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use sqlx::{Sqlite, SqlitePool};

use crate::{
    error::AppError,
    models::{
        answer::{SubmitQuizRequest, canonicalize_selection},
        question::{PublicQuestion, Question},
        quiz::Quiz,
        session::Session,
    },
};

/// User-facing message for an unknown or stale session token.
pub const INVALID_LINK_MSG: &str =
    "Lien invalide ou expiré. Veuillez recommencer depuis l'accueil.";

/// Payload handed to the rendering layer for the quiz page.
#[derive(Debug, Serialize)]
pub struct TakeQuizResponse {
    pub quiz_title: String,
    pub token: String,
    pub first_name: String,
    pub questions: Vec<PublicQuestion>,
}

/// `GET /t/{token}` — the quiz page payload.
///
/// Questions come back in the exact order of the session's frozen draw.
/// Sessions that skipped the profile step are sent back to it.
pub async fn take(
    State(pool): State<SqlitePool>,
    Path(token): Path<String>,
) -> Result<Response, AppError> {
    let session = Session::find_by_token(&pool, &token)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_LINK_MSG.to_string()))?;

    if !session.has_profile() {
        return Ok(Redirect::to(&format!("/t/{}/profil", token)).into_response());
    }

    let quiz = Quiz::find_by_id(&pool, session.quiz_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Quiz introuvable.".to_string()))?;

    let questions = resolve_questions(&pool, &session).await?;

    let payload = TakeQuizResponse {
        quiz_title: quiz.title,
        token: session.token.clone(),
        first_name: session.first_name.clone(),
        questions: questions.iter().map(PublicQuestion::from).collect(),
    };

    Ok(Json(payload).into_response())
}

/// `POST /t/{token}` — grades a submission.
///
/// Re-resolves the same question list `take` served, grades each question by
/// set equality against its correct choice ids, and upserts one answer row
/// per (session, question) inside a single transaction. Resubmitting updates
/// the existing rows, so scoring stays deterministic and row counts stable.
pub async fn submit(
    State(pool): State<SqlitePool>,
    Path(token): Path<String>,
    Json(req): Json<SubmitQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = Session::find_by_token(&pool, &token)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_LINK_MSG.to_string()))?;

    let questions = resolve_questions(&pool, &session).await?;

    let mut answers = req.answers;
    let mut correct_count: i64 = 0;
    let mut graded: Vec<(i64, String, bool)> = Vec::with_capacity(questions.len());

    for question in &questions {
        let selected = answers
            .remove(&question.id)
            .map(canonicalize_selection)
            .unwrap_or_default();
        let is_correct = question.grade(&selected);
        if is_correct {
            correct_count += 1;
        }
        graded.push((question.id, serde_json::to_string(&selected)?, is_correct));
    }

    // All answer writes of one submission commit together or not at all.
    let mut tx = pool.begin().await?;
    for (question_id, selected, is_correct) in &graded {
        sqlx::query(
            r#"
            INSERT INTO answers (session_id, question_id, selected, is_correct)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(session_id, question_id) DO UPDATE SET
                selected = excluded.selected,
                is_correct = excluded.is_correct
            "#,
        )
        .bind(session.id)
        .bind(question_id)
        .bind(selected)
        .bind(is_correct)
        .execute(&mut *tx)
        .await?;
    }
    tx.commit().await?;

    Ok(Json(serde_json::json!({
        "message": format!("Merci {} !", session.first_name),
        "correct": correct_count,
        "total": questions.len(),
    })))
}

/// Resolves the question list for a session.
///
/// The frozen draw is authoritative: its rows are loaded with one `IN` query
/// and reordered in memory to the exact stored order (ids that no longer
/// exist are skipped). An empty or malformed frozen list falls back to the
/// quiz's full question set ordered by id — the legacy compatibility path.
/// `take` and `submit` both go through here, which is what guarantees the
/// graded set is always the presented set.
pub async fn resolve_questions(
    pool: &SqlitePool,
    session: &Session,
) -> Result<Vec<Question>, AppError> {
    let chosen = session.frozen_ids();

    if chosen.is_empty() {
        let questions = sqlx::query_as::<_, Question>(
            r#"
            SELECT id, quiz_id, kind, topic, content, choices
            FROM questions
            WHERE quiz_id = ?
            ORDER BY id ASC
            "#,
        )
        .bind(session.quiz_id)
        .fetch_all(pool)
        .await?;
        return Ok(questions);
    }

    // Dynamic IN clause for the frozen ids.
    let mut query_builder = sqlx::QueryBuilder::<Sqlite>::new(
        "SELECT id, quiz_id, kind, topic, content, choices FROM questions WHERE id IN (",
    );
    let mut separated = query_builder.separated(",");
    for id in &chosen {
        separated.push_bind(id);
    }
    separated.push_unseparated(")");

    let rows: Vec<Question> = query_builder.build_query_as().fetch_all(pool).await?;

    let mut by_id: HashMap<i64, Question> = rows.into_iter().map(|q| (q.id, q)).collect();
    Ok(chosen.iter().filter_map(|id| by_id.remove(id)).collect())
}
