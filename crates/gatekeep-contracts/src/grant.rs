//! Permission code and role name types.
//!
//! Both are opaque strings issued by the backend. GATEKEEP compares them
//! exactly and case-sensitively and never normalizes them.

use std::{borrow::Borrow, fmt};

use serde::{Deserialize, Serialize};

/// The role name that bypasses every access requirement.
///
/// Not configurable.
pub const PRIVILEGED_ROLE: &str = "Administrator";

/// An opaque identifier for a single grantable capability.
///
/// Example: `PermissionCode::new("user_manage")`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionCode(pub String);

impl PermissionCode {
    /// Construct a permission code from any string-like value.
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PermissionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PermissionCode {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionCode {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PermissionCode {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// The name of a role currently held by the user.
///
/// Only the name is visible to GATEKEEP; the permissions bundled into a role
/// are resolved by the backend and arrive as separate permission codes.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoleName(pub String);

impl RoleName {
    /// Construct a role name from any string-like value.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The designated super-role, see [`PRIVILEGED_ROLE`].
    pub fn privileged() -> Self {
        Self::new(PRIVILEGED_ROLE)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return true if this is the designated super-role.
    pub fn is_privileged(&self) -> bool {
        self.0 == PRIVILEGED_ROLE
    }
}

impl fmt::Display for RoleName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for RoleName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for RoleName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RoleName {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}
