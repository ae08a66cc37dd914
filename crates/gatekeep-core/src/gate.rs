//! The gating decision and its rendering wrapper.
//!
//! [`evaluate`] is the whole decision: a pure function of a snapshot and a
//! requirement. [`Gate`] is the thin wrapper UI code uses to pick between the
//! guarded content and its fallback.
//!
//! Evaluation algorithm:
//!
//! 1. Unauthenticated snapshot → deny.
//! 2. Snapshot holds the privileged role → allow, whatever the requirement says.
//! 3. For each non-empty list (permissions, roles), compute a verdict:
//!    AND over the list when `require_all`, OR otherwise.
//! 4. OR the verdicts of the non-empty lists together. When both lists are
//!    empty the requirement is unconstrained → allow.

use tracing::trace;

use gatekeep_contracts::{
    grant::{PermissionCode, RoleName},
    requirement::AccessRequirement,
    snapshot::PermissionSnapshot,
};

use crate::predicate::{
    has_all_permissions, has_all_roles, has_any_permission, has_any_role, is_privileged,
};

/// Which branch a gate selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateDecision {
    /// Show the guarded content.
    Render,
    /// Show the fallback (or nothing).
    Fallback,
}

impl GateDecision {
    pub fn is_render(self) -> bool {
        self == GateDecision::Render
    }
}

impl From<bool> for GateDecision {
    fn from(allowed: bool) -> Self {
        if allowed {
            GateDecision::Render
        } else {
            GateDecision::Fallback
        }
    }
}

/// Evaluate `requirement` against `snapshot`.
pub fn evaluate(snapshot: &PermissionSnapshot, requirement: &AccessRequirement) -> bool {
    if !snapshot.is_authenticated() {
        trace!("gate denied: snapshot is unauthenticated");
        return false;
    }

    if is_privileged(snapshot) {
        trace!("gate allowed: privileged role bypass");
        return true;
    }

    let permission_verdict = (!requirement.permissions.is_empty()).then(|| {
        if requirement.require_all {
            has_all_permissions(snapshot, requirement.permissions.as_slice())
        } else {
            has_any_permission(snapshot, requirement.permissions.as_slice())
        }
    });

    let role_verdict = (!requirement.roles.is_empty()).then(|| {
        if requirement.require_all {
            has_all_roles(snapshot, requirement.roles.as_slice())
        } else {
            has_any_role(snapshot, requirement.roles.as_slice())
        }
    });

    let allowed = match (permission_verdict, role_verdict) {
        (None, None) => true,
        (Some(p), None) => p,
        (None, Some(r)) => r,
        (Some(p), Some(r)) => p || r,
    };

    trace!(
        ?permission_verdict,
        ?role_verdict,
        require_all = requirement.require_all,
        allowed,
        "gate evaluated"
    );

    allowed
}

/// A requirement bound to the rendering decision.
///
/// ```rust,ignore
/// let delete_button = Gate::permission("user_manage")
///     .render_or_nothing(&snapshot, Button::new("Delete"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gate {
    requirement: AccessRequirement,
}

impl Gate {
    pub fn new(requirement: AccessRequirement) -> Self {
        Self { requirement }
    }

    /// Only the privileged role passes.
    pub fn admin_only() -> Self {
        Self::new(AccessRequirement::role(RoleName::privileged()))
    }

    /// Any one of `roles` passes (and the privileged role, as always).
    pub fn role_only<I>(roles: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RoleName>,
    {
        Self::new(AccessRequirement::any_role(roles))
    }

    /// A single permission code passes.
    pub fn permission(code: impl Into<PermissionCode>) -> Self {
        Self::new(AccessRequirement::permission(code))
    }

    pub fn requirement(&self) -> &AccessRequirement {
        &self.requirement
    }

    pub fn decision(&self, snapshot: &PermissionSnapshot) -> GateDecision {
        evaluate(snapshot, &self.requirement).into()
    }

    pub fn allows(&self, snapshot: &PermissionSnapshot) -> bool {
        self.decision(snapshot).is_render()
    }

    /// Return `children` when allowed, `fallback` otherwise.
    pub fn render<T>(&self, snapshot: &PermissionSnapshot, children: T, fallback: T) -> T {
        match self.decision(snapshot) {
            GateDecision::Render => children,
            GateDecision::Fallback => fallback,
        }
    }

    /// Return `Some(children)` when allowed, `None` otherwise.
    pub fn render_or_nothing<T>(&self, snapshot: &PermissionSnapshot, children: T) -> Option<T> {
        self.allows(snapshot).then_some(children)
    }

    /// Like [`Gate::render`], building only the branch that is shown.
    pub fn render_with<T>(
        &self,
        snapshot: &PermissionSnapshot,
        children: impl FnOnce() -> T,
        fallback: impl FnOnce() -> T,
    ) -> T {
        match self.decision(snapshot) {
            GateDecision::Render => children(),
            GateDecision::Fallback => fallback(),
        }
    }

    /// Like [`Gate::render_or_nothing`], building `children` only when shown.
    pub fn show_with<T>(
        &self,
        snapshot: &PermissionSnapshot,
        children: impl FnOnce() -> T,
    ) -> Option<T> {
        self.allows(snapshot).then(children)
    }
}

impl From<AccessRequirement> for Gate {
    fn from(requirement: AccessRequirement) -> Self {
        Self::new(requirement)
    }
}
