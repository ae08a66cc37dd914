//! Gate rule types and catalog configuration schema.
//!
//! A `GateConfig` is deserialized from TOML and holds a list of named
//! `GateRule`s. Each rule binds a stable gate id used by screen code to an
//! access requirement.

use serde::{Deserialize, Serialize};

use gatekeep_contracts::{
    grant::{PermissionCode, RoleName},
    requirement::AccessRequirement,
};

/// A single named gate loaded from TOML.
///
/// Example in TOML:
/// ```toml
/// [[gates]]
/// id = "users.deactivate"
/// description = "Deactivate button in the user table row menu"
/// permissions = ["user_manage"]
/// ```
///
/// `permissions` and `roles` default to empty and `require_all` to false.
/// A gate with neither list is open to every authenticated user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GateRule {
    /// Stable identifier referenced by screen code.
    pub id: String,

    /// Human-readable explanation of what this gate guards.
    pub description: String,

    /// Permission codes the gate checks.
    #[serde(default)]
    pub permissions: Vec<PermissionCode>,

    /// Role names the gate checks.
    #[serde(default)]
    pub roles: Vec<RoleName>,

    /// AND within each list instead of OR. The two lists are always OR'ed.
    #[serde(default)]
    pub require_all: bool,
}

impl GateRule {
    /// The access requirement this rule describes.
    pub fn requirement(&self) -> AccessRequirement {
        AccessRequirement {
            permissions: self.permissions.clone(),
            roles: self.roles.clone(),
            require_all: self.require_all,
        }
    }
}

/// The top-level structure deserialized from a TOML gate catalog.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GateConfig {
    #[serde(default)]
    pub gates: Vec<GateRule>,
}
