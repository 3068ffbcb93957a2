// src/handlers/admin.rs

use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderValue, header},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use sqlx::SqlitePool;

use crate::{
    config::Config,
    error::AppError,
    models::session::{SessionStats, SessionSummary},
    utils::admin_session::{ADMIN_COOKIE, AdminSessions, cookie_value},
};

/// Session columns plus subquery counts, newest first. Shared by the
/// dashboard and the CSV export so both report identical numbers.
const SESSION_STATS_SQL: &str = r#"
    SELECT s.id, s.token, s.created_at,
           s.first_name, s.last_name, s.consent, s.role, s.experience, s.shop_type,
           s.question_ids,
           (SELECT COUNT(*) FROM answers a WHERE a.session_id = s.id) AS answers_count,
           (SELECT COUNT(*) FROM answers a WHERE a.session_id = s.id AND a.is_correct) AS correct_count
    FROM sessions s
    ORDER BY s.id DESC
"#;

/// DTO for the admin login form.
#[derive(Debug, Deserialize)]
pub struct AdminLoginRequest {
    pub password: String,
}

/// `POST /admin/login` — exchanges the shared password for a cookie token.
///
/// No lockout or backoff: a wrong password just gets its message back.
pub async fn login(
    State(config): State<Config>,
    State(sessions): State<AdminSessions>,
    Json(payload): Json<AdminLoginRequest>,
) -> Result<Response, AppError> {
    if payload.password != config.admin_password {
        return Err(AppError::AuthError("Mot de passe incorrect.".to_string()));
    }

    let token = sessions.issue();
    let cookie = format!(
        "{}={}; HttpOnly; SameSite=Lax; Max-Age={}; Path=/",
        ADMIN_COOKIE,
        token,
        sessions.max_age_secs()
    );

    let mut response = Redirect::to("/admin").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_str(&cookie)
            .map_err(|e| AppError::InternalServerError(e.to_string()))?,
    );
    Ok(response)
}

/// `GET /admin/logout` — revokes the cookie's token and clears the cookie.
pub async fn logout(State(sessions): State<AdminSessions>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, ADMIN_COOKIE) {
        sessions.revoke(token);
    }

    let mut response = Redirect::to("/").into_response();
    response.headers_mut().insert(
        header::SET_COOKIE,
        HeaderValue::from_static("admin_token=; Max-Age=0; Path=/"),
    );
    response
}

#[derive(Debug, Deserialize)]
pub struct ListParams {
    pub limit: Option<i64>,
}

/// `GET /admin` — newest-first session summaries for the dashboard.
pub async fn dashboard(
    State(pool): State<SqlitePool>,
    Query(params): Query<ListParams>,
) -> Result<impl IntoResponse, AppError> {
    let limit = params.limit.unwrap_or(200).clamp(1, 1000);

    let sql = format!("{} LIMIT ?", SESSION_STATS_SQL);
    let stats: Vec<SessionStats> = sqlx::query_as(&sql)
        .bind(limit)
        .fetch_all(&pool)
        .await
        .map_err(|e| {
            tracing::error!("Failed to list sessions: {:?}", e);
            AppError::InternalServerError(e.to_string())
        })?;

    let summaries: Vec<SessionSummary> = stats.into_iter().map(SessionSummary::from).collect();
    Ok(Json(summaries))
}

/// `GET /admin/export.csv` — every session as one flat CSV row.
pub async fn export_csv(State(pool): State<SqlitePool>) -> Result<Response, AppError> {
    let stats: Vec<SessionStats> = sqlx::query_as(SESSION_STATS_SQL).fetch_all(&pool).await?;

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "date",
            "token",
            "first_name",
            "last_name",
            "role",
            "experience",
            "shop_type",
            "correct",
            "total",
            "score_pct",
        ])
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    for stat in stats {
        let summary = SessionSummary::from(stat);
        writer
            .write_record([
                summary.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
                summary.token,
                summary.first_name,
                summary.last_name,
                summary.role,
                summary.experience,
                summary.shop_type,
                summary.correct.to_string(),
                summary.total.to_string(),
                summary.score_pct.to_string(),
            ])
            .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| AppError::InternalServerError(e.to_string()))?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"podotest_resultats.csv\"",
            ),
        ],
        body,
    )
        .into_response())
}
