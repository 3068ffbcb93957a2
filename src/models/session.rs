// src/models/session.rs

use serde::{Deserialize, Serialize};
use sqlx::{SqlitePool, prelude::FromRow};
use validator::Validate;

use crate::error::AppError;

/// Represents the 'sessions' table in the database.
/// One row per candidate quiz link; the token is the only external key.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Session {
    pub id: i64,
    pub token: String,
    pub quiz_id: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,

    pub first_name: String,
    pub last_name: String,
    pub consent: bool,
    pub role: String,
    pub experience: String,
    pub shop_type: String,

    /// Frozen ordered question-id draw, serialized as a JSON array.
    pub question_ids: String,
}

impl Session {
    pub async fn find_by_token(
        pool: &SqlitePool,
        token: &str,
    ) -> Result<Option<Session>, AppError> {
        let session = sqlx::query_as::<_, Session>(
            r#"
            SELECT id, token, quiz_id, created_at,
                   first_name, last_name, consent, role, experience, shop_type,
                   question_ids
            FROM sessions
            WHERE token = ?
            "#,
        )
        .bind(token)
        .fetch_optional(pool)
        .await?;

        Ok(session)
    }

    /// The frozen question-id list. A malformed blob is treated as empty,
    /// which sends callers down the full-set fallback path.
    pub fn frozen_ids(&self) -> Vec<i64> {
        serde_json::from_str(&self.question_ids).unwrap_or_default()
    }

    /// A session is eligible for the quiz once the profile step recorded a
    /// first name.
    pub fn has_profile(&self) -> bool {
        !self.first_name.is_empty()
    }
}

/// DTO for the profile form submission.
#[derive(Debug, Deserialize, Validate)]
pub struct ProfileRequest {
    #[validate(length(max = 80, message = "Le prénom est trop long."))]
    pub first_name: String,
    #[serde(default)]
    #[validate(length(max = 80, message = "Le nom est trop long."))]
    pub last_name: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub role: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub experience: String,
    #[serde(default)]
    #[validate(length(max = 80))]
    pub shop_type: String,
    #[serde(default)]
    pub consent: bool,
}

/// DTO for the profile page state.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub token: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub experience: String,
    pub shop_type: String,
    pub consent: bool,
    pub profile_complete: bool,
}

impl From<&Session> for ProfileResponse {
    fn from(s: &Session) -> Self {
        ProfileResponse {
            token: s.token.clone(),
            first_name: s.first_name.clone(),
            last_name: s.last_name.clone(),
            role: s.role.clone(),
            experience: s.experience.clone(),
            shop_type: s.shop_type.clone(),
            consent: s.consent,
            profile_complete: s.has_profile(),
        }
    }
}

/// Row shape for the admin views: session columns plus answer counts
/// computed by subqueries.
#[derive(Debug, FromRow)]
pub struct SessionStats {
    pub id: i64,
    pub token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub first_name: String,
    pub last_name: String,
    pub consent: bool,
    pub role: String,
    pub experience: String,
    pub shop_type: String,
    pub question_ids: String,
    pub answers_count: i64,
    pub correct_count: i64,
}

impl SessionStats {
    /// Questions actually assigned to this session: the frozen list length,
    /// or the recorded answer count for legacy sessions without a draw.
    pub fn total_questions(&self) -> i64 {
        let frozen: Vec<i64> = serde_json::from_str(&self.question_ids).unwrap_or_default();
        if frozen.is_empty() {
            self.answers_count
        } else {
            frozen.len() as i64
        }
    }
}

/// Aggregated summary of one session for the admin dashboard.
#[derive(Debug, Serialize)]
pub struct SessionSummary {
    pub id: i64,
    pub token: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub first_name: String,
    pub last_name: String,
    pub consent: bool,
    pub role: String,
    pub experience: String,
    pub shop_type: String,
    pub correct: i64,
    pub total: i64,
    pub score_pct: i64,
}

impl From<SessionStats> for SessionSummary {
    fn from(s: SessionStats) -> Self {
        let total = s.total_questions();
        SessionSummary {
            score_pct: score_pct(s.correct_count, total),
            id: s.id,
            token: s.token,
            created_at: s.created_at,
            first_name: s.first_name,
            last_name: s.last_name,
            consent: s.consent,
            role: s.role,
            experience: s.experience,
            shop_type: s.shop_type,
            correct: s.correct_count,
            total,
        }
    }
}

/// Rounded percentage, with zero graded questions scoring 0 instead of
/// dividing by zero.
pub fn score_pct(correct: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (correct as f64 / total as f64 * 100.0).round() as i64
}
