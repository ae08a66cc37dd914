//! The assembled dashboard for one snapshot.
//!
//! `build_dashboard` is what a render pass does: compute capabilities once,
//! decide the tab set, then build only the screens whose tab exists.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::{
    capability::Capabilities,
    gate::Gate,
    traits::GateCatalog,
};

use crate::screens::{
    applications::{self, ApplicationsView},
    inbox::{self, NotificationsView},
    logs::{self, SystemLogsView},
    roles::{self, RoleManagementView},
    tabs::{visible_tabs, AdminTab},
    users::{self, UserManagementView},
    ScreenAction,
};

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub authenticated: bool,
    pub permission_codes: Vec<String>,
    pub role_names: Vec<String>,
    /// RFC 3339 time the grants were loaded, when known.
    pub loaded_at: Option<String>,
    pub capabilities: Capabilities,
    pub tabs: Vec<AdminTab>,
    /// Shown only to the privileged role.
    pub banner: Option<&'static str>,
    pub notifications: Option<NotificationsView>,
    pub applications: Option<ApplicationsView>,
    pub users: Option<UserManagementView>,
    pub roles: Option<RoleManagementView>,
    pub logs: Option<SystemLogsView>,
    pub help: Option<Vec<ScreenAction>>,
}

impl DashboardView {
    pub fn has_tab(&self, tab: AdminTab) -> bool {
        self.tabs.contains(&tab)
    }
}

pub fn build_dashboard(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> DashboardView {
    let tabs = visible_tabs(snapshot);
    let shows = |tab: AdminTab| tabs.contains(&tab);

    DashboardView {
        authenticated: snapshot.is_authenticated(),
        permission_codes: snapshot.permission_codes().map(|c| c.0.clone()).collect(),
        role_names: snapshot.role_names().map(|r| r.0.clone()).collect(),
        loaded_at: snapshot.loaded_at().map(|t| t.to_rfc3339()),
        capabilities: Capabilities::from_snapshot(snapshot),
        banner: Gate::admin_only()
            .render_or_nothing(snapshot, "Administrator mode: all controls unlocked"),
        notifications: shows(AdminTab::Notifications)
            .then(|| inbox::build_notifications(snapshot, catalog)),
        applications: shows(AdminTab::Applications).then(|| applications::build(snapshot, catalog)),
        users: shows(AdminTab::UserManagement).then(|| users::build(snapshot, catalog)),
        roles: shows(AdminTab::RoleManagement).then(|| roles::build(snapshot, catalog)),
        logs: shows(AdminTab::SystemLogs).then(|| logs::build(snapshot, catalog)),
        help: shows(AdminTab::HelpCenter).then(|| inbox::build_help(snapshot, catalog)),
        tabs,
    }
}
