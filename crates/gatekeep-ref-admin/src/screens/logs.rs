//! System activity log screen.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::traits::GateCatalog;

use super::{visible_actions, ActionSpec, ScreenAction};
use crate::mock_data::{system_logs, LogEntry};

pub const TOOLBAR: &[ActionSpec] = &[
    ActionSpec {
        gate_id: "logs.filter",
        label: "Filter",
    },
    ActionSpec {
        gate_id: "logs.export",
        label: "Export CSV",
    },
];

#[derive(Debug, Clone, Serialize)]
pub struct SystemLogsView {
    pub toolbar: Vec<ScreenAction>,
    pub entries: Vec<LogEntry>,
}

pub fn build(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> SystemLogsView {
    SystemLogsView {
        toolbar: visible_actions(TOOLBAR, snapshot, catalog),
        entries: system_logs(),
    }
}
