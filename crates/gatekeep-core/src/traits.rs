//! Collaborator seams for the GATEKEEP core.
//!
//! - `IdentitySource`: untrusted I/O (the backend "who am I" endpoint)
//! - `PayloadParser`: trusted boundary (raw JSON → `PermissionSnapshot`)
//! - `SnapshotReader`: anything that can hand out the current snapshot
//! - `GateCatalog`: named screen gates, looked up by id
//!
//! The core never performs network I/O itself; it only consumes these.

use std::sync::Arc;

use gatekeep_contracts::{
    error::GatekeepResult, requirement::AccessRequirement, session::SessionId,
    snapshot::PermissionSnapshot,
};

use crate::gate::GateDecision;

/// Fetches the current user's grants from the backend.
///
/// Implementations own retries, caching, and transport. A returned `Err`
/// leaves the store cleared.
pub trait IdentitySource: Send + Sync {
    /// Return the raw identity payload for `session`.
    ///
    /// The payload is expected to look like
    /// `{ "permissionCodes": [...], "roleNames": [...] }` but is not trusted
    /// until a `PayloadParser` accepts it.
    fn fetch(&self, session: &SessionId) -> GatekeepResult<serde_json::Value>;
}

impl<T: IdentitySource + ?Sized> IdentitySource for Arc<T> {
    fn fetch(&self, session: &SessionId) -> GatekeepResult<serde_json::Value> {
        (**self).fetch(session)
    }
}

/// Turns a raw identity payload into a well-formed snapshot.
pub trait PayloadParser: Send + Sync {
    /// Validate `raw` and build an authenticated `PermissionSnapshot`.
    fn parse(&self, raw: &serde_json::Value) -> GatekeepResult<PermissionSnapshot>;
}

/// Read access to the current snapshot.
///
/// Readers get an `Arc` to an immutable value, so a render pass always sees
/// one consistent snapshot even if the store is replaced mid-pass.
pub trait SnapshotReader: Send + Sync {
    fn snapshot(&self) -> Arc<PermissionSnapshot>;
}

/// A catalog of named gates (e.g. `"users.deactivate"`) for screens that
/// look their requirements up by id instead of building them inline.
pub trait GateCatalog: Send + Sync {
    /// The requirement registered under `gate_id`, if any.
    fn requirement(&self, gate_id: &str) -> Option<&AccessRequirement>;

    /// Decide `gate_id` for `snapshot`.
    ///
    /// Implementations must deny gate ids they do not know.
    fn decide(&self, gate_id: &str, snapshot: &PermissionSnapshot) -> GateDecision;
}
