// src/models/quiz.rs

use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};

use crate::error::AppError;

/// Represents the 'quizzes' table in the database.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Quiz {
    pub id: i64,
    pub title: String,
    /// Unique addressing key for a quiz (e.g. "demo").
    pub slug: String,
    pub is_active: bool,
}

impl Quiz {
    pub async fn find_by_slug(pool: &SqlitePool, slug: &str) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, slug, is_active
            FROM quizzes
            WHERE slug = ?
            "#,
        )
        .bind(slug)
        .fetch_optional(pool)
        .await?;

        Ok(quiz)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Quiz>, AppError> {
        let quiz = sqlx::query_as::<_, Quiz>(
            r#"
            SELECT id, title, slug, is_active
            FROM quizzes
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(quiz)
    }
}
