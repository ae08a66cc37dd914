//! Declarative access requirements attached to gated UI regions.
//!
//! An `AccessRequirement` is built ad hoc at each call site (or loaded from
//! the gate catalog) and lives only for the duration of one evaluation.

use serde::{Deserialize, Serialize};

use crate::grant::{PermissionCode, RoleName};

/// A permission/role condition guarding a piece of UI.
///
/// `require_all` governs how the elements *within* each list combine:
/// AND when true, OR when false. The permission list and the role list are
/// always combined with OR. A requirement naming neither permissions nor
/// roles is satisfied by any authenticated user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessRequirement {
    #[serde(default)]
    pub permissions: Vec<PermissionCode>,
    #[serde(default)]
    pub roles: Vec<RoleName>,
    #[serde(default)]
    pub require_all: bool,
}

impl AccessRequirement {
    /// A requirement with no conditions.
    pub fn none() -> Self {
        Self::default()
    }

    /// Satisfied by a single permission code.
    pub fn permission(code: impl Into<PermissionCode>) -> Self {
        Self {
            permissions: vec![code.into()],
            ..Self::default()
        }
    }

    /// Satisfied by any one of `codes`.
    pub fn any_permission<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PermissionCode>,
    {
        Self {
            permissions: codes.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Satisfied only when every one of `codes` is held.
    pub fn all_permissions<I>(codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PermissionCode>,
    {
        Self::any_permission(codes).require_all(true)
    }

    /// Satisfied by a single role.
    pub fn role(name: impl Into<RoleName>) -> Self {
        Self {
            roles: vec![name.into()],
            ..Self::default()
        }
    }

    /// Satisfied by any one of `names`.
    pub fn any_role<I>(names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RoleName>,
    {
        Self {
            roles: names.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    /// Add a role list to an existing requirement.
    pub fn with_roles<I>(mut self, names: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<RoleName>,
    {
        self.roles.extend(names.into_iter().map(Into::into));
        self
    }

    /// Add a permission list to an existing requirement.
    pub fn with_permissions<I>(mut self, codes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<PermissionCode>,
    {
        self.permissions.extend(codes.into_iter().map(Into::into));
        self
    }

    pub fn require_all(mut self, require_all: bool) -> Self {
        self.require_all = require_all;
        self
    }

    /// Return true if neither list names anything.
    pub fn is_unconstrained(&self) -> bool {
        self.permissions.is_empty() && self.roles.is_empty()
    }
}
