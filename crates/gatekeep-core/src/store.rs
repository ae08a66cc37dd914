//! The permission snapshot store.
//!
//! `SnapshotStore` holds exactly one current `PermissionSnapshot`. It is an
//! ordinary value: construct one per application (or per test) and share it
//! by reference or `Arc`. There is no process-global instance.
//!
//! Replacement is wholesale: the held `Arc` and the revision counter change
//! together under a single write lock, so a reader never observes a
//! half-updated snapshot.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use gatekeep_contracts::{
    grant::{PermissionCode, RoleName},
    snapshot::PermissionSnapshot,
};

use crate::traits::SnapshotReader;

struct Held {
    snapshot: Arc<PermissionSnapshot>,
    /// Bumped on every replace or clear, starting at 0.
    revision: u64,
}

/// Holds the current user's permission snapshot.
pub struct SnapshotStore {
    held: RwLock<Held>,
}

impl SnapshotStore {
    /// Create a store holding the unauthenticated, empty snapshot.
    pub fn new() -> Self {
        Self {
            held: RwLock::new(Held {
                snapshot: Arc::new(PermissionSnapshot::unauthenticated()),
                revision: 0,
            }),
        }
    }

    /// The current snapshot. Never fails.
    ///
    /// A poisoned lock still holds a whole snapshot (writers only ever swap
    /// the `Arc`), so poisoning is recovered rather than propagated.
    pub fn get_snapshot(&self) -> Arc<PermissionSnapshot> {
        let held = self.held.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&held.snapshot)
    }

    /// How many times the snapshot has been replaced or cleared.
    pub fn revision(&self) -> u64 {
        self.held.read().unwrap_or_else(PoisonError::into_inner).revision
    }

    /// Replace the snapshot with an authenticated one built from the given
    /// grants. Duplicates collapse.
    pub fn set_snapshot<P, R>(&self, permission_codes: P, role_names: R) -> u64
    where
        P: IntoIterator,
        P::Item: Into<PermissionCode>,
        R: IntoIterator,
        R::Item: Into<RoleName>,
    {
        self.replace(PermissionSnapshot::authenticated(permission_codes, role_names))
    }

    /// Replace the snapshot with `snapshot`. Returns the new revision.
    pub fn replace(&self, snapshot: PermissionSnapshot) -> u64 {
        let permissions = snapshot.permission_count();
        let roles = snapshot.role_count();
        let authenticated = snapshot.is_authenticated();

        let mut held = self.held.write().unwrap_or_else(PoisonError::into_inner);
        held.snapshot = Arc::new(snapshot);
        held.revision += 1;

        debug!(
            revision = held.revision,
            authenticated,
            permissions,
            roles,
            "permission snapshot replaced"
        );

        held.revision
    }

    /// Reset to the unauthenticated, empty snapshot. Returns the new revision.
    pub fn clear(&self) -> u64 {
        let mut held = self.held.write().unwrap_or_else(PoisonError::into_inner);
        held.snapshot = Arc::new(PermissionSnapshot::unauthenticated());
        held.revision += 1;

        debug!(revision = held.revision, "permission snapshot cleared");

        held.revision
    }
}

impl Default for SnapshotStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotReader for SnapshotStore {
    fn snapshot(&self) -> Arc<PermissionSnapshot> {
        self.get_snapshot()
    }
}

impl<T: SnapshotReader + ?Sized> SnapshotReader for Arc<T> {
    fn snapshot(&self) -> Arc<PermissionSnapshot> {
        (**self).snapshot()
    }
}
