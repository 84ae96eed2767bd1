use axum::{
    extract::{Path, State},
    Json,
};

use crate::fleet::{FleetSnapshot, TrackedUnit};
use crate::web::api::error::{ApiError, ApiResult, ErrorResponse};
use crate::web::state::AppState;

#[utoipa::path(
    get,
    path = "/api/fleet",
    responses(
        (status = 200, description = "Latest state of every bus", body = FleetSnapshot)
    ),
    tag = "fleet"
)]
pub async fn list_fleet(State(state): State<AppState>) -> Json<FleetSnapshot> {
    Json(state.feed.snapshot())
}

#[utoipa::path(
    get,
    path = "/api/units/{id}",
    params(
        ("id" = u32, Path, description = "Bus id")
    ),
    responses(
        (status = 200, description = "Latest state of one bus", body = TrackedUnit),
        (status = 404, description = "Unknown bus", body = ErrorResponse)
    ),
    tag = "fleet"
)]
pub async fn get_unit(
    State(state): State<AppState>,
    Path(id): Path<u32>,
) -> ApiResult<Json<TrackedUnit>> {
    state
        .feed
        .unit(id)
        .map(Json)
        .ok_or(ApiError::UnitNotFound(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::config::Config;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_fleet_and_unit_agree() {
        let state = AppState::new(Config::default()).unwrap();
        tokio::time::sleep(Duration::from_secs(9)).await;

        let Json(snapshot) = list_fleet(State(state.clone())).await;
        assert_eq!(snapshot.tick, 2);
        assert_eq!(snapshot.interval_ms, 4000);
        assert_eq!(snapshot.units.len(), 3);

        let Json(unit) = get_unit(State(state.clone()), Path(3)).await.unwrap();
        assert_eq!(Some(&unit), snapshot.units.iter().find(|u| u.id == 3));

        state.feed.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_unit_is_404() {
        let state = AppState::new(Config::default()).unwrap();
        let response = get_unit(State(state.clone()), Path(42))
            .await
            .unwrap_err()
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        state.feed.stop().await;
    }
}
