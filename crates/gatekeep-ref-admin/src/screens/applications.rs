//! Applicant and application listings.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::traits::GateCatalog;

use super::{visible_actions, ActionSpec, ScreenAction};
use crate::mock_data::{applications, ApplicationRecord};

pub const ROW_MENU: &[ActionSpec] = &[
    ActionSpec {
        gate_id: "applications.view",
        label: "Open",
    },
    ActionSpec {
        gate_id: "applications.change_status",
        label: "Change status",
    },
    ActionSpec {
        gate_id: "applications.reassign",
        label: "Reassign",
    },
];

/// Statuses from which no further transition is offered.
const TERMINAL_STATUSES: &[&str] = &["approved", "declined"];

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationRow {
    pub application: ApplicationRecord,
    pub actions: Vec<ScreenAction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationsView {
    pub rows: Vec<ApplicationRow>,
}

pub fn build(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> ApplicationsView {
    let row_actions = visible_actions(ROW_MENU, snapshot, catalog);
    let rows = applications()
        .into_iter()
        .map(|application| {
            let terminal = TERMINAL_STATUSES.contains(&application.status);
            let actions = row_actions
                .iter()
                .filter(|a| !terminal || a.gate_id == "applications.view")
                .cloned()
                .collect();
            ApplicationRow { application, actions }
        })
        .collect();

    ApplicationsView { rows }
}
