//! Pure permission predicates over a `PermissionSnapshot`.
//!
//! Every predicate returns false for an unauthenticated snapshot. Comparisons
//! are exact and case-sensitive.

use gatekeep_contracts::{grant::PRIVILEGED_ROLE, snapshot::PermissionSnapshot};

/// True iff `code` is held.
pub fn has_permission(snapshot: &PermissionSnapshot, code: &str) -> bool {
    snapshot.is_authenticated() && snapshot.contains_permission(code)
}

/// True iff at least one of `codes` is held. An empty list is never satisfied.
pub fn has_any_permission<C: AsRef<str>>(snapshot: &PermissionSnapshot, codes: &[C]) -> bool {
    snapshot.is_authenticated() && codes.iter().any(|c| snapshot.contains_permission(c.as_ref()))
}

/// True iff every one of `codes` is held.
///
/// An empty list is vacuously satisfied by an authenticated snapshot.
pub fn has_all_permissions<C: AsRef<str>>(snapshot: &PermissionSnapshot, codes: &[C]) -> bool {
    snapshot.is_authenticated() && codes.iter().all(|c| snapshot.contains_permission(c.as_ref()))
}

/// True iff `role` is held.
pub fn has_role(snapshot: &PermissionSnapshot, role: &str) -> bool {
    snapshot.is_authenticated() && snapshot.contains_role(role)
}

/// True iff at least one of `roles` is held. An empty list is never satisfied.
pub fn has_any_role<R: AsRef<str>>(snapshot: &PermissionSnapshot, roles: &[R]) -> bool {
    snapshot.is_authenticated() && roles.iter().any(|r| snapshot.contains_role(r.as_ref()))
}

/// True iff every one of `roles` is held.
pub fn has_all_roles<R: AsRef<str>>(snapshot: &PermissionSnapshot, roles: &[R]) -> bool {
    snapshot.is_authenticated() && roles.iter().all(|r| snapshot.contains_role(r.as_ref()))
}

/// True iff the snapshot holds the `"Administrator"` super-role.
pub fn is_privileged(snapshot: &PermissionSnapshot) -> bool {
    has_role(snapshot, PRIVILEGED_ROLE)
}
