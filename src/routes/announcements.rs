use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;
use serde_json::{json, Value};

use crate::{
    error::ServiceError,
    middleware::auth::TeacherAuth,
    models::announcement::{Announcement, CreateAnnouncementRequest, UpdateAnnouncementRequest},
    AppState,
};

/// GET /announcements: public, currently active announcements.
pub async fn list_active(
    State(state): State<AppState>,
) -> Result<Json<Vec<Announcement>>, ServiceError> {
    let active = state.announcements.list_active(Utc::now()).await?;
    Ok(Json(active))
}

/// GET /announcements/all: management view, teachers only.
pub async fn list_all(
    State(state): State<AppState>,
    _auth: TeacherAuth,
) -> Result<Json<Vec<Announcement>>, ServiceError> {
    let all = state.announcements.list_all().await?;
    Ok(Json(all))
}

/// POST /announcements
pub async fn create_announcement(
    State(state): State<AppState>,
    TeacherAuth(teacher): TeacherAuth,
    body: Result<Json<CreateAnnouncementRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<Announcement>), ServiceError> {
    let Json(body) = body?;
    let created = state.announcements.create(body, Utc::now()).await?;
    tracing::debug!("{} created announcement {}", teacher.username, created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

/// PUT /announcements/{id}
pub async fn update_announcement(
    State(state): State<AppState>,
    _auth: TeacherAuth,
    Path(id): Path<String>,
    body: Result<Json<UpdateAnnouncementRequest>, JsonRejection>,
) -> Result<Json<Announcement>, ServiceError> {
    let Json(body) = body?;
    let updated = state.announcements.update(&id, body).await?;
    Ok(Json(updated))
}

/// DELETE /announcements/{id}
pub async fn delete_announcement(
    State(state): State<AppState>,
    _auth: TeacherAuth,
    Path(id): Path<String>,
) -> Result<Json<Value>, ServiceError> {
    state.announcements.delete(&id).await?;
    Ok(Json(json!({ "message": "Deleted" })))
}
