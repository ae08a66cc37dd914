//! Notification inbox and help center. Both are open to every signed-in
//! user; only their controls are gated.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::traits::GateCatalog;

use super::{visible_actions, ActionSpec, ScreenAction};
use crate::mock_data::{notifications, NotificationRecord};

pub const NOTIFICATION_ACTIONS: &[ActionSpec] = &[
    ActionSpec {
        gate_id: "notifications.mark_read",
        label: "Mark all read",
    },
    ActionSpec {
        gate_id: "notifications.broadcast",
        label: "Broadcast",
    },
];

pub const HELP_ACTIONS: &[ActionSpec] = &[ActionSpec {
    gate_id: "help.contact_support",
    label: "Contact support",
}];

#[derive(Debug, Clone, Serialize)]
pub struct NotificationsView {
    pub actions: Vec<ScreenAction>,
    pub items: Vec<NotificationRecord>,
    pub unread: usize,
}

pub fn build_notifications(
    snapshot: &PermissionSnapshot,
    catalog: &dyn GateCatalog,
) -> NotificationsView {
    let items = notifications();
    let unread = items.iter().filter(|n| !n.read).count();
    NotificationsView {
        actions: visible_actions(NOTIFICATION_ACTIONS, snapshot, catalog),
        items,
        unread,
    }
}

pub fn build_help(snapshot: &PermissionSnapshot, catalog: &dyn GateCatalog) -> Vec<ScreenAction> {
    visible_actions(HELP_ACTIONS, snapshot, catalog)
}
