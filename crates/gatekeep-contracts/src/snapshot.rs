//! The client-side view of what the current user may do.
//!
//! A `PermissionSnapshot` is immutable. The snapshot store replaces it
//! wholesale on login, refresh, and logout; nothing ever edits one in place.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::grant::{PermissionCode, RoleName};

/// The permission codes and role names held by the current user.
///
/// The default value is the unauthenticated, empty snapshot. It is what
/// every consumer sees before the identity fetch completes, after logout,
/// and after a failed fetch. Every predicate evaluates to false against it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PermissionSnapshot {
    permission_codes: BTreeSet<PermissionCode>,
    role_names: BTreeSet<RoleName>,
    is_authenticated: bool,
    /// When the backend data behind this snapshot was ingested.
    /// Informational only; never consulted by predicates.
    loaded_at: Option<DateTime<Utc>>,
}

impl PermissionSnapshot {
    /// The empty, unauthenticated snapshot.
    pub fn unauthenticated() -> Self {
        Self::default()
    }

    /// Build an authenticated snapshot.
    ///
    /// Repeated entries collapse: the inputs are treated as sets.
    pub fn authenticated<P, R>(permission_codes: P, role_names: R) -> Self
    where
        P: IntoIterator,
        P::Item: Into<PermissionCode>,
        R: IntoIterator,
        R::Item: Into<RoleName>,
    {
        Self {
            permission_codes: permission_codes.into_iter().map(Into::into).collect(),
            role_names: role_names.into_iter().map(Into::into).collect(),
            is_authenticated: true,
            loaded_at: None,
        }
    }

    /// Stamp the snapshot with the time its source data was ingested.
    pub fn with_loaded_at(mut self, at: DateTime<Utc>) -> Self {
        self.loaded_at = Some(at);
        self
    }

    pub fn is_authenticated(&self) -> bool {
        self.is_authenticated
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    /// Return true if `code` is held. Ignores authentication state.
    pub fn contains_permission(&self, code: &str) -> bool {
        self.permission_codes.contains(code)
    }

    /// Return true if `role` is held. Ignores authentication state.
    pub fn contains_role(&self, role: &str) -> bool {
        self.role_names.contains(role)
    }

    /// All held permission codes in sorted order.
    pub fn permission_codes(&self) -> impl Iterator<Item = &PermissionCode> {
        self.permission_codes.iter()
    }

    /// All held role names in sorted order.
    pub fn role_names(&self) -> impl Iterator<Item = &RoleName> {
        self.role_names.iter()
    }

    pub fn permission_count(&self) -> usize {
        self.permission_codes.len()
    }

    pub fn role_count(&self) -> usize {
        self.role_names.len()
    }

    /// Compare grants only, ignoring `loaded_at`.
    pub fn same_grants(&self, other: &Self) -> bool {
        self.is_authenticated == other.is_authenticated
            && self.permission_codes == other.permission_codes
            && self.role_names == other.role_names
    }
}
