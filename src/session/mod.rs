use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    ToSchema,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Role {
    #[default]
    Parent,
    Admin,
    Driver,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Parent, Role::Admin, Role::Driver];

    pub fn label(&self) -> &'static str {
        match self {
            Role::Parent => "Parent",
            Role::Admin => "Admin",
            Role::Driver => "Driver",
        }
    }
}

/// What the login form collected. Drivers sign in with a phone number,
/// everyone else with a username and password.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum Credentials {
    Account { username: String, password: String },
    Phone { phone: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum NavigationTarget {
    Login,
    ParentDashboard,
    AdminDashboard,
    DriverDashboard,
}

impl NavigationTarget {
    pub fn path(&self) -> &'static str {
        match self {
            NavigationTarget::Login => "/login",
            NavigationTarget::ParentDashboard => "/parent-dashboard",
            NavigationTarget::AdminDashboard => "/admin-dashboard",
            NavigationTarget::DriverDashboard => "/driver-dashboard",
        }
    }
}

/// Maps a role to its dashboard.
///
/// Credentials are accepted as-is: there is no account store behind this
/// gate and every call succeeds. A real deployment needs a checked variant
/// returning a typed failure instead.
pub fn authenticate(role: Role, credentials: Option<&Credentials>) -> NavigationTarget {
    let who = match credentials {
        Some(Credentials::Account { username, .. }) => username.as_str(),
        Some(Credentials::Phone { phone }) => phone.as_str(),
        None => "anonymous",
    };
    log::info!("Sign-in as {} ({})", role, who);

    match role {
        Role::Parent => NavigationTarget::ParentDashboard,
        Role::Admin => NavigationTarget::AdminDashboard,
        Role::Driver => NavigationTarget::DriverDashboard,
    }
}

pub fn logout() -> NavigationTarget {
    NavigationTarget::Login
}
