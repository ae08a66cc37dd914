//! Admin dashboard screens.
//!
//! Each screen module lists its gated controls as `ActionSpec`s and builds a
//! view of its mock data for a given snapshot. Controls are resolved through
//! a `GateCatalog`, so the screens never hardcode permission codes.

use serde::Serialize;

use gatekeep_contracts::snapshot::PermissionSnapshot;
use gatekeep_core::traits::GateCatalog;

pub mod applications;
pub mod inbox;
pub mod logs;
pub mod roles;
pub mod tabs;
pub mod users;

/// A gated control declared by a screen.
#[derive(Debug, Clone, Copy)]
pub struct ActionSpec {
    /// Catalog gate id.
    pub gate_id: &'static str,
    /// Button or menu label.
    pub label: &'static str,
}

/// A control after gating.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScreenAction {
    pub gate_id: &'static str,
    pub label: &'static str,
}

/// The controls of `specs` that `snapshot` may see, in declaration order.
pub fn visible_actions(
    specs: &[ActionSpec],
    snapshot: &PermissionSnapshot,
    catalog: &dyn GateCatalog,
) -> Vec<ScreenAction> {
    specs
        .iter()
        .filter(|spec| catalog.decide(spec.gate_id, snapshot).is_render())
        .map(|spec| ScreenAction {
            gate_id: spec.gate_id,
            label: spec.label,
        })
        .collect()
}
