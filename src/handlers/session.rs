// src/handlers/session.rs

use axum::{
    extract::State,
    response::{IntoResponse, Redirect},
};
use rand::seq::SliceRandom;
use sqlx::SqlitePool;

use crate::{
    error::AppError,
    seed::{self, DEFAULT_QUIZ_SLUG},
    utils::token::{SESSION_TOKEN_LEN, generate_token},
};

/// How many questions a session draws from the catalog. Quizzes with fewer
/// questions assign them all.
pub const QUESTIONS_PER_SESSION: usize = 5;

/// Entry point for candidates: `POST /start` (and the legacy `GET /init`).
///
/// Creates the session and sends the candidate to the profile step.
pub async fn start(State(pool): State<SqlitePool>) -> Result<impl IntoResponse, AppError> {
    let token = start_session(&pool, DEFAULT_QUIZ_SLUG).await?;
    Ok(Redirect::to(&format!("/t/{}/profil", token)))
}

/// Creates a new candidate session on the quiz with the given slug.
///
/// * Ensures the quiz exists (seeding its catalog on first use) and marks it
///   active.
/// * Draws the session's frozen question list — the one `take` and `submit`
///   will both replay.
/// * Mints the unguessable token that becomes the session's only address.
pub async fn start_session(pool: &SqlitePool, slug: &str) -> Result<String, AppError> {
    let quiz = seed::ensure_quiz(pool, slug).await?;

    let all_ids: Vec<i64> = sqlx::query_scalar("SELECT id FROM questions WHERE quiz_id = ?")
        .bind(quiz.id)
        .fetch_all(pool)
        .await?;

    let chosen = draw_question_ids(&all_ids, QUESTIONS_PER_SESSION);
    let token = generate_token(SESSION_TOKEN_LEN);

    sqlx::query("INSERT INTO sessions (token, quiz_id, question_ids) VALUES (?, ?, ?)")
        .bind(&token)
        .bind(quiz.id)
        .bind(serde_json::to_string(&chosen)?)
        .execute(pool)
        .await?;

    tracing::info!(
        "Started session {} on quiz '{}' ({} questions)",
        token,
        slug,
        chosen.len()
    );

    Ok(token)
}

/// Uniform sample of `min(count, ids.len())` ids without replacement.
/// The order of the result is the presentation and grading order.
pub fn draw_question_ids(ids: &[i64], count: usize) -> Vec<i64> {
    let mut drawn = ids.to_vec();
    drawn.shuffle(&mut rand::thread_rng());
    drawn.truncate(count);
    drawn
}
