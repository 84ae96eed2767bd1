use axum::{routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::api::fleet as fleet_handlers;
use super::api::session as session_handlers;
use super::api_doc::ApiDoc;
use super::config::Config;
use super::state::AppState;
use super::ui::handlers as ui_handlers;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // UI routes
        .route("/", get(ui_handlers::index))
        .route(
            "/login",
            get(ui_handlers::login_page).post(ui_handlers::login),
        )
        .route("/logout", get(ui_handlers::logout))
        .route("/admin-dashboard", get(ui_handlers::admin_dashboard))
        .route("/admin-dashboard/live", get(ui_handlers::admin_live))
        .route("/parent-dashboard", get(ui_handlers::parent_dashboard))
        .route("/parent-dashboard/live", get(ui_handlers::parent_live))
        .route("/driver-dashboard", get(ui_handlers::driver_dashboard))
        .route("/driver-dashboard/live", get(ui_handlers::driver_live))
        // Fleet API endpoints
        .route("/api/fleet", get(fleet_handlers::list_fleet))
        .route("/api/units/{id}", get(fleet_handlers::get_unit))
        // Session API endpoints
        .route("/api/session", post(session_handlers::create_session))
        // Static files
        .nest_service("/static", ServeDir::new("src/web/static"))
        // OpenAPI / Swagger
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        // Middleware
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: Config) -> std::io::Result<()> {
    let bind_addr = config.web.bind.clone();
    let state = AppState::new(config).map_err(std::io::Error::other)?;
    let feed = state.feed.clone();
    let app = router(state);

    log::info!("Starting server on {}", bind_addr);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await;

    feed.stop().await;
    served
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("Shutting down");
}
