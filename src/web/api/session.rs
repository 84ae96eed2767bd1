use axum::Json;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::session::{self, Credentials, NavigationTarget, Role};

#[derive(Debug, Deserialize, ToSchema)]
pub struct SessionRequest {
    pub role: Role,
    #[serde(default)]
    pub credentials: Option<Credentials>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SessionResponse {
    pub role: Role,
    pub target: NavigationTarget,
    pub path: String,
}

#[utoipa::path(
    post,
    path = "/api/session",
    request_body = SessionRequest,
    responses(
        (status = 200, description = "Dashboard for the chosen role", body = SessionResponse)
    ),
    tag = "session"
)]
pub async fn create_session(Json(request): Json<SessionRequest>) -> Json<SessionResponse> {
    let target = session::authenticate(request.role, request.credentials.as_ref());
    Json(SessionResponse {
        role: request.role,
        target,
        path: target.path().to_string(),
    })
}
