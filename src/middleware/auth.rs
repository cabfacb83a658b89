use axum::{
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;

use crate::{error::ServiceError, models::teacher::Principal, AppState};

#[derive(Debug, Deserialize)]
struct TeacherQuery {
    teacher_username: Option<String>,
}

/// Extractor that runs the credential gate for management routes.
///
/// The identifier comes from the `teacher_username` query parameter, or the
/// `X-Teacher-Username` header when the query parameter is absent.
#[derive(Debug, Clone)]
pub struct TeacherAuth(pub Principal);

impl FromRequestParts<AppState> for TeacherAuth {
    type Rejection = ServiceError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let identifier = Query::<TeacherQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.teacher_username)
            .or_else(|| {
                parts
                    .headers
                    .get("X-Teacher-Username")
                    .and_then(|v| v.to_str().ok())
                    .map(str::to_string)
            });

        let principal = state.credentials.authorize(identifier.as_deref()).await?;
        Ok(TeacherAuth(principal))
    }
}
