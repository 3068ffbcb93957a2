// src/handlers/profile.rs

use axum::{
    Json,
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use sqlx::SqlitePool;
use validator::Validate;

use crate::{
    error::AppError,
    handlers::quiz::INVALID_LINK_MSG,
    models::session::{ProfileRequest, ProfileResponse, Session},
};

/// `GET /t/{token}/profil` — current profile state for the form renderer.
pub async fn show(
    State(pool): State<SqlitePool>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let session = Session::find_by_token(&pool, &token)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_LINK_MSG.to_string()))?;

    Ok(Json(ProfileResponse::from(&session)))
}

/// `POST /t/{token}/profil` — records the candidate profile on the session.
///
/// Consent and a non-empty first name are required before the quiz opens.
pub async fn save(
    State(pool): State<SqlitePool>,
    Path(token): Path<String>,
    Json(payload): Json<ProfileRequest>,
) -> Result<impl IntoResponse, AppError> {
    let session = Session::find_by_token(&pool, &token)
        .await?
        .ok_or_else(|| AppError::NotFound(INVALID_LINK_MSG.to_string()))?;

    if let Err(validation_errors) = payload.validate() {
        return Err(AppError::BadRequest(validation_errors.to_string()));
    }

    if !payload.consent {
        return Err(AppError::BadRequest(
            "Vous devez accepter le consentement pour continuer.".to_string(),
        ));
    }

    let first_name = payload.first_name.trim();
    if first_name.is_empty() {
        return Err(AppError::BadRequest("Le prénom est requis.".to_string()));
    }

    sqlx::query(
        r#"
        UPDATE sessions
        SET first_name = ?, last_name = ?, role = ?, experience = ?,
            shop_type = ?, consent = TRUE
        WHERE id = ?
        "#,
    )
    .bind(first_name)
    .bind(payload.last_name.trim())
    .bind(payload.role.trim())
    .bind(payload.experience.trim())
    .bind(payload.shop_type.trim())
    .bind(session.id)
    .execute(&pool)
    .await?;

    Ok(Redirect::to(&format!("/t/{}", token)))
}
