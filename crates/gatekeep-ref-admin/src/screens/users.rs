//! User management screen.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::traits::GateCatalog;

use super::{visible_actions, ActionSpec, ScreenAction};
use crate::mock_data::{users, UserRecord};

/// Toolbar controls above the table.
pub const TOOLBAR: &[ActionSpec] = &[ActionSpec {
    gate_id: "users.create",
    label: "Invite user",
}];

/// Per-row menu controls.
pub const ROW_MENU: &[ActionSpec] = &[
    ActionSpec {
        gate_id: "users.view",
        label: "View profile",
    },
    ActionSpec {
        gate_id: "users.edit",
        label: "Edit",
    },
    ActionSpec {
        gate_id: "users.assign_roles",
        label: "Assign roles",
    },
    ActionSpec {
        gate_id: "users.reset_password",
        label: "Reset password",
    },
    ActionSpec {
        gate_id: "users.deactivate",
        label: "Deactivate",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct UserRow {
    pub user: UserRecord,
    pub actions: Vec<ScreenAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UserManagementView {
    pub toolbar: Vec<ScreenAction>,
    pub rows: Vec<UserRow>,
}

pub fn build(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> UserManagementView {
    let row_actions = visible_actions(ROW_MENU, snapshot, catalog);
    let rows = users()
        .into_iter()
        .map(|user| {
            // Inactive accounts offer "Reactivate" in place of "Deactivate".
            let actions = row_actions
                .iter()
                .map(|a| match (a.gate_id, user.active) {
                    ("users.deactivate", false) => ScreenAction {
                        label: "Reactivate",
                        ..a.clone()
                    },
                    _ => a.clone(),
                })
                .collect();
            UserRow { user, actions }
        })
        .collect();

    UserManagementView {
        toolbar: visible_actions(TOOLBAR, snapshot, catalog),
        rows,
    }
}
