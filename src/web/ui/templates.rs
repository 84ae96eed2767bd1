use askama::Template;
use askama_web::WebTemplate;

use crate::session::Role;
use crate::views::{FleetPanel, UnitPanel};

pub struct RoleOption {
    pub value: String,
    pub label: &'static str,
    pub selected: bool,
}

impl RoleOption {
    pub fn all(selected: Role) -> Vec<RoleOption> {
        Role::ALL
            .iter()
            .map(|role| RoleOption {
                value: role.to_string(),
                label: role.label(),
                selected: *role == selected,
            })
            .collect()
    }
}

#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub roles: Vec<RoleOption>,
    pub role: String,
    pub driver: bool,
}

#[derive(Template, WebTemplate)]
#[template(path = "admin.html")]
pub struct AdminTemplate {
    pub panel: FleetPanel,
    pub interval_ms: u64,
}

#[derive(Template, WebTemplate)]
#[template(path = "unit.html")]
pub struct UnitTemplate {
    pub panel: UnitPanel,
    pub interval_ms: u64,
    pub live_path: &'static str,
}

#[derive(Template)]
#[template(path = "fleet_panel.html")]
pub struct FleetPanelTemplate<'a> {
    pub panel: &'a FleetPanel,
}

#[derive(Template)]
#[template(path = "unit_panel.html")]
pub struct UnitPanelTemplate<'a> {
    pub panel: &'a UnitPanel,
}
