//! The top-level tab set.
//!
//! Whether a tab exists at all is decided from derived capabilities, not from
//! the gate catalog: a missing tab is a navigation decision, a missing button
//! inside an existing tab is a screen decision.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::capability::{Capabilities, Capability};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum AdminTab {
    Overview,
    Notifications,
    Applications,
    UserManagement,
    RoleManagement,
    SystemLogs,
    HelpCenter,
}

impl AdminTab {
    /// Every tab, in navigation order.
    pub const ALL: [AdminTab; 7] = [
        AdminTab::Overview,
        AdminTab::Notifications,
        AdminTab::Applications,
        AdminTab::UserManagement,
        AdminTab::RoleManagement,
        AdminTab::SystemLogs,
        AdminTab::HelpCenter,
    ];

    pub fn label(self) -> &'static str {
        match self {
            AdminTab::Overview => "Overview",
            AdminTab::Notifications => "Notifications",
            AdminTab::Applications => "Applications",
            AdminTab::UserManagement => "User Management",
            AdminTab::RoleManagement => "Role Management",
            AdminTab::SystemLogs => "System Logs",
            AdminTab::HelpCenter => "Help Center",
        }
    }

    /// The capability a tab needs, or `None` for tabs every signed-in user sees.
    pub fn capability(self) -> Option<Capability> {
        match self {
            AdminTab::Overview | AdminTab::Notifications | AdminTab::HelpCenter => None,
            AdminTab::Applications => Some(Capability::CanViewApplications),
            AdminTab::UserManagement => Some(Capability::CanViewUsers),
            AdminTab::RoleManagement => Some(Capability::CanViewRoles),
            AdminTab::SystemLogs => Some(Capability::CanViewAuditLogs),
        }
    }
}

/// The tabs `snapshot` may navigate to. Empty when unauthenticated.
pub fn visible_tabs(snapshot: &PermissionSnapshot) -> Vec<AdminTab> {
    if !snapshot.is_authenticated() {
        return Vec::new();
    }
    let caps = Capabilities::from_snapshot(snapshot);
    AdminTab::ALL
        .into_iter()
        .filter(|tab| tab.capability().map_or(true, |c| caps.get(c)))
        .collect()
}
