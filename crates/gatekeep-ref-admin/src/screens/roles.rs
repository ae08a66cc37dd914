//! Role management screen.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::{capability::Capability, traits::GateCatalog};

use super::{visible_actions, ActionSpec, ScreenAction};
use crate::mock_data::{roles, RoleRecord};

pub const TOOLBAR: &[ActionSpec] = &[ActionSpec {
    gate_id: "roles.create",
    label: "New role",
}];

pub const ROW_MENU: &[ActionSpec] = &[
    ActionSpec {
        gate_id: "roles.view_members",
        label: "Members",
    },
    ActionSpec {
        gate_id: "roles.edit_permissions",
        label: "Edit permissions",
    },
    ActionSpec {
        gate_id: "roles.delete",
        label: "Delete",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct RoleRow {
    pub role: RoleRecord,
    pub actions: Vec<ScreenAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RoleManagementView {
    pub toolbar: Vec<ScreenAction>,
    pub rows: Vec<RoleRow>,
    /// Permission codes are listed only to users who may edit them.
    pub show_permission_codes: bool,
}

pub fn build(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> RoleManagementView {
    let row_actions = visible_actions(ROW_MENU, snapshot, catalog);
    let rows = roles()
        .into_iter()
        .map(|role| {
            // The Administrator role itself can be neither edited nor deleted.
            let actions = row_actions
                .iter()
                .filter(|a| role.name != "Administrator" || a.gate_id == "roles.view_members")
                .cloned()
                .collect();
            RoleRow { role, actions }
        })
        .collect();

    RoleManagementView {
        toolbar: visible_actions(TOOLBAR, snapshot, catalog),
        rows,
        show_permission_codes: Capability::CanManageRoles.evaluate(snapshot),
    }
}
