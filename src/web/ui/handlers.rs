use askama::Template;
use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect},
    Form, Json,
};
use serde::{Deserialize, Serialize};

use crate::session::{self, Credentials, Role};
use crate::views::{MapView, SingleUnitView, UnitPanel};
use crate::web::api::error::{ApiError, ApiResult};
use crate::web::state::AppState;

use super::templates::{
    AdminTemplate, FleetPanelTemplate, LoginTemplate, RoleOption, UnitPanelTemplate,
    UnitTemplate,
};

#[derive(Debug, Deserialize)]
pub struct LoginQuery {
    #[serde(default)]
    pub role: Role,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}

impl LoginForm {
    fn credentials(self) -> Option<Credentials> {
        match (self.phone, self.username, self.password) {
            (Some(phone), _, _) if !phone.is_empty() => Some(Credentials::Phone { phone }),
            (_, Some(username), password) => Some(Credentials::Account {
                username,
                password: password.unwrap_or_default(),
            }),
            _ => None,
        }
    }
}

/// Map state plus the re-rendered text panel, polled by the page script.
#[derive(Debug, Serialize)]
pub struct LiveUpdate {
    pub map: MapView,
    pub html: String,
}

pub async fn index() -> Redirect {
    Redirect::to(session::logout().path())
}

pub async fn login_page(Query(query): Query<LoginQuery>) -> impl IntoResponse {
    LoginTemplate {
        roles: RoleOption::all(query.role),
        role: query.role.to_string(),
        driver: query.role == Role::Driver,
    }
}

pub async fn login(Form(form): Form<LoginForm>) -> Redirect {
    let role = form.role;
    let target = session::authenticate(role, form.credentials().as_ref());
    Redirect::to(target.path())
}

pub async fn logout() -> Redirect {
    Redirect::to(session::logout().path())
}

pub async fn admin_dashboard(State(state): State<AppState>) -> impl IntoResponse {
    let snapshot = state.feed.snapshot();
    AdminTemplate {
        panel: state.fleet_view.panel(&snapshot.units),
        interval_ms: snapshot.interval_ms,
    }
}

pub async fn admin_live(State(state): State<AppState>) -> ApiResult<Json<LiveUpdate>> {
    let snapshot = state.feed.snapshot();
    let panel = state.fleet_view.panel(&snapshot.units);
    let html = FleetPanelTemplate { panel: &panel }
        .render()
        .map_err(ApiError::Render)?;
    Ok(Json(LiveUpdate {
        map: panel.map,
        html,
    }))
}

pub async fn parent_dashboard(State(state): State<AppState>) -> ApiResult<UnitTemplate> {
    unit_page(&state, &state.parent_view, "/parent-dashboard/live")
}

pub async fn parent_live(State(state): State<AppState>) -> ApiResult<Json<LiveUpdate>> {
    unit_live(&state, &state.parent_view)
}

pub async fn driver_dashboard(State(state): State<AppState>) -> ApiResult<UnitTemplate> {
    unit_page(&state, &state.driver_view, "/driver-dashboard/live")
}

pub async fn driver_live(State(state): State<AppState>) -> ApiResult<Json<LiveUpdate>> {
    unit_live(&state, &state.driver_view)
}

fn unit_panel(state: &AppState, view: &SingleUnitView) -> ApiResult<(UnitPanel, u64)> {
    let snapshot = state.feed.snapshot();
    let panel = view
        .panel(&snapshot.units)
        .ok_or(ApiError::UnitNotFound(view.unit_id()))?;
    Ok((panel, snapshot.interval_ms))
}

fn unit_page(
    state: &AppState,
    view: &SingleUnitView,
    live_path: &'static str,
) -> ApiResult<UnitTemplate> {
    let (panel, interval_ms) = unit_panel(state, view)?;
    Ok(UnitTemplate {
        panel,
        interval_ms,
        live_path,
    })
}

fn unit_live(state: &AppState, view: &SingleUnitView) -> ApiResult<Json<LiveUpdate>> {
    let (panel, _) = unit_panel(state, view)?;
    let html = UnitPanelTemplate { panel: &panel }
        .render()
        .map_err(ApiError::Render)?;
    Ok(Json(LiveUpdate {
        map: panel.map,
        html,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::config::Config;
    use axum::http::{header, StatusCode};
    use std::time::Duration;

    fn form(role: Role) -> LoginForm {
        LoginForm {
            role,
            username: Some("parent@example.com".into()),
            password: Some("secret".into()),
            phone: None,
        }
    }

    #[tokio::test]
    async fn test_login_redirects_by_role() {
        let response = login(Form(form(Role::Admin))).await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            response.headers()[header::LOCATION],
            "/admin-dashboard"
        );

        let driver = LoginForm {
            role: Role::Driver,
            username: None,
            password: None,
            phone: Some("+1 555 123 4567".into()),
        };
        let response = login(Form(driver)).await.into_response();
        assert_eq!(response.headers()[header::LOCATION], "/driver-dashboard");

        let response = logout().await.into_response();
        assert_eq!(response.headers()[header::LOCATION], "/login");
    }

    #[test]
    fn test_form_credentials() {
        assert!(matches!(
            form(Role::Parent).credentials(),
            Some(Credentials::Account { .. })
        ));
        let phone = LoginForm {
            role: Role::Driver,
            username: None,
            password: None,
            phone: Some("555".into()),
        };
        assert!(matches!(phone.credentials(), Some(Credentials::Phone { .. })));
        let empty = LoginForm {
            role: Role::Parent,
            username: None,
            password: None,
            phone: Some(String::new()),
        };
        assert!(empty.credentials().is_none());
    }

    #[test]
    fn test_login_page_role_toggle() {
        let page = LoginTemplate {
            roles: RoleOption::all(Role::Driver),
            role: Role::Driver.to_string(),
            driver: true,
        };
        let html = page.render().unwrap();
        assert!(html.contains("name=\"phone\""));
        assert!(!html.contains("name=\"password\""));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dashboards_render_shared_state() {
        let state = AppState::new(Config::default()).unwrap();
        tokio::time::sleep(Duration::from_secs(5)).await;

        let admin = admin_dashboard(State(state.clone()))
            .await
            .into_response();
        assert_eq!(admin.status(), StatusCode::OK);

        let Json(fleet) = admin_live(State(state.clone())).await.unwrap();
        let Json(parent) = parent_live(State(state.clone())).await.unwrap();
        assert_eq!(fleet.map.markers.len(), 3);
        assert_eq!(parent.map.markers.len(), 1);
        assert_eq!(parent.map.markers[0].position, fleet.map.markers[0].position);
        assert_eq!(parent.map.center, parent.map.markers[0].position);
        assert!(fleet.html.contains("Jane Smith"));
        assert!(parent.html.contains("Emma Smith"));

        let page = driver_dashboard(State(state.clone())).await.unwrap();
        assert!(page.render().unwrap().contains("Driver Dashboard"));

        state.feed.stop().await;
    }
}
