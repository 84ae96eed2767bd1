use utoipa::OpenApi;

use super::api::error::ErrorResponse;
use super::api::session::{SessionRequest, SessionResponse};

#[derive(OpenApi)]
#[openapi(
    paths(
        super::api::fleet::list_fleet,
        super::api::fleet::get_unit,
        super::api::session::create_session,
    ),
    components(
        schemas(
            ErrorResponse,
            SessionRequest,
            SessionResponse,
            crate::fleet::FleetSnapshot,
            crate::fleet::TrackedUnit,
            crate::fleet::Position,
            crate::fleet::UnitStatus,
            crate::session::Role,
            crate::session::Credentials,
            crate::session::NavigationTarget,
        )
    ),
    info(
        title = "SchoolBus Tracker API",
        description = "Simulated live positions of the school-bus fleet",
        version = "0.1.0"
    ),
    tags(
        (name = "fleet", description = "Live bus positions"),
        (name = "session", description = "Role selection")
    )
)]
pub struct ApiDoc;
