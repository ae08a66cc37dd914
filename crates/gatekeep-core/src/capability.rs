//! Derived capabilities: named booleans computed from the snapshot.
//!
//! Navigation and tab construction need a plain boolean ("does the User
//! Management tab exist at all?") rather than a renderable gate. Each
//! `Capability` is a fixed `AccessRequirement` evaluated with the same
//! algorithm as [`crate::gate::evaluate`].

use serde::Serialize;

use gatekeep_contracts::{requirement::AccessRequirement, snapshot::PermissionSnapshot};

use crate::gate::evaluate;

/// Permission codes issued by the backend that the capability vocabulary
/// refers to.
pub mod codes {
    pub const USER_VIEW_ALL: &str = "user_view_all";
    pub const USER_MANAGE: &str = "user_manage";
    pub const ROLE_VIEW: &str = "role_view";
    pub const ROLE_MANAGE: &str = "role_manage";
    pub const ROLE_ASSIGN: &str = "role_assign";
    pub const AUDIT_LOG_VIEW: &str = "audit_log_view";
    pub const APPLICATION_VIEW: &str = "application_view";
    pub const APPLICATION_MANAGE: &str = "application_manage";
    pub const NOTIFICATION_MANAGE: &str = "notification_manage";
}

/// Role names, other than the privileged one, that capabilities refer to.
pub mod roles {
    pub const MANAGER: &str = "Manager";
    pub const UNDERWRITER: &str = "Underwriter";
    pub const AUDITOR: &str = "Auditor";
}

/// The fixed vocabulary of derived capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    IsAdmin,
    CanViewUsers,
    CanManageUsers,
    CanAssignRoles,
    CanViewRoles,
    CanManageRoles,
    CanViewAuditLogs,
    CanViewApplications,
    CanManageApplications,
    CanManageNotifications,
}

impl Capability {
    pub const ALL: [Capability; 10] = [
        Capability::IsAdmin,
        Capability::CanViewUsers,
        Capability::CanManageUsers,
        Capability::CanAssignRoles,
        Capability::CanViewRoles,
        Capability::CanManageRoles,
        Capability::CanViewAuditLogs,
        Capability::CanViewApplications,
        Capability::CanManageApplications,
        Capability::CanManageNotifications,
    ];

    /// Stable snake_case name, as used in logs and CLI output.
    pub fn name(self) -> &'static str {
        match self {
            Capability::IsAdmin => "is_admin",
            Capability::CanViewUsers => "can_view_users",
            Capability::CanManageUsers => "can_manage_users",
            Capability::CanAssignRoles => "can_assign_roles",
            Capability::CanViewRoles => "can_view_roles",
            Capability::CanManageRoles => "can_manage_roles",
            Capability::CanViewAuditLogs => "can_view_audit_logs",
            Capability::CanViewApplications => "can_view_applications",
            Capability::CanManageApplications => "can_manage_applications",
            Capability::CanManageNotifications => "can_manage_notifications",
        }
    }

    /// The requirement that defines this capability.
    pub fn requirement(self) -> AccessRequirement {
        use codes::*;

        match self {
            Capability::IsAdmin => {
                AccessRequirement::role(gatekeep_contracts::grant::PRIVILEGED_ROLE)
            }
            Capability::CanViewUsers => {
                AccessRequirement::any_permission([USER_VIEW_ALL, USER_MANAGE])
            }
            Capability::CanManageUsers => AccessRequirement::permission(USER_MANAGE),
            Capability::CanAssignRoles => AccessRequirement::permission(ROLE_ASSIGN),
            Capability::CanViewRoles => {
                AccessRequirement::any_permission([ROLE_VIEW, ROLE_MANAGE, ROLE_ASSIGN])
            }
            Capability::CanManageRoles => AccessRequirement::permission(ROLE_MANAGE),
            Capability::CanViewAuditLogs => {
                AccessRequirement::permission(AUDIT_LOG_VIEW).with_roles([roles::AUDITOR])
            }
            Capability::CanViewApplications => {
                AccessRequirement::any_permission([APPLICATION_VIEW, APPLICATION_MANAGE])
                    .with_roles([roles::UNDERWRITER, roles::MANAGER])
            }
            Capability::CanManageApplications => AccessRequirement::permission(APPLICATION_MANAGE),
            Capability::CanManageNotifications => {
                AccessRequirement::permission(NOTIFICATION_MANAGE)
            }
        }
    }

    pub fn evaluate(self, snapshot: &PermissionSnapshot) -> bool {
        evaluate(snapshot, &self.requirement())
    }
}

/// Every derived capability, computed once for one render pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Capabilities {
    pub is_admin: bool,
    pub can_view_users: bool,
    pub can_manage_users: bool,
    pub can_assign_roles: bool,
    pub can_view_roles: bool,
    pub can_manage_roles: bool,
    pub can_view_audit_logs: bool,
    pub can_view_applications: bool,
    pub can_manage_applications: bool,
    pub can_manage_notifications: bool,
}

impl Capabilities {
    pub fn from_snapshot(snapshot: &PermissionSnapshot) -> Self {
        Self {
            is_admin: Capability::IsAdmin.evaluate(snapshot),
            can_view_users: Capability::CanViewUsers.evaluate(snapshot),
            can_manage_users: Capability::CanManageUsers.evaluate(snapshot),
            can_assign_roles: Capability::CanAssignRoles.evaluate(snapshot),
            can_view_roles: Capability::CanViewRoles.evaluate(snapshot),
            can_manage_roles: Capability::CanManageRoles.evaluate(snapshot),
            can_view_audit_logs: Capability::CanViewAuditLogs.evaluate(snapshot),
            can_view_applications: Capability::CanViewApplications.evaluate(snapshot),
            can_manage_applications: Capability::CanManageApplications.evaluate(snapshot),
            can_manage_notifications: Capability::CanManageNotifications.evaluate(snapshot),
        }
    }

    pub fn get(&self, capability: Capability) -> bool {
        match capability {
            Capability::IsAdmin => self.is_admin,
            Capability::CanViewUsers => self.can_view_users,
            Capability::CanManageUsers => self.can_manage_users,
            Capability::CanAssignRoles => self.can_assign_roles,
            Capability::CanViewRoles => self.can_view_roles,
            Capability::CanManageRoles => self.can_manage_roles,
            Capability::CanViewAuditLogs => self.can_view_audit_logs,
            Capability::CanViewApplications => self.can_view_applications,
            Capability::CanManageApplications => self.can_manage_applications,
            Capability::CanManageNotifications => self.can_manage_notifications,
        }
    }

    /// The capabilities that evaluated to true, in vocabulary order.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL.into_iter().filter(|c| self.get(*c))
    }
}

#[cfg(test)]
mod tests {
    use gatekeep_contracts::snapshot::PermissionSnapshot;

    use super::{codes, Capabilities, Capability};

    #[test]
    fn unauthenticated_has_no_capabilities() {
        let caps = Capabilities::from_snapshot(&PermissionSnapshot::default());
        assert_eq!(caps, Capabilities::default());
        assert_eq!(caps.granted().count(), 0);
    }

    #[test]
    fn administrator_has_every_capability() {
        let snap = PermissionSnapshot::authenticated(Vec::<&str>::new(), ["Administrator"]);
        let caps = Capabilities::from_snapshot(&snap);
        for cap in Capability::ALL {
            assert!(caps.get(cap), "{} must be granted to Administrator", cap.name());
        }
    }

    #[test]
    fn manage_implies_view_for_users() {
        let snap = PermissionSnapshot::authenticated([codes::USER_MANAGE], Vec::<&str>::new());
        let caps = Capabilities::from_snapshot(&snap);
        assert!(caps.can_view_users);
        assert!(caps.can_manage_users);
        assert!(!caps.can_assign_roles);
        assert!(!caps.is_admin);
    }

    #[test]
    fn audit_logs_via_role_alone() {
        let snap = PermissionSnapshot::authenticated(Vec::<&str>::new(), ["Auditor"]);
        assert!(Capability::CanViewAuditLogs.evaluate(&snap));
        assert!(!Capability::CanViewUsers.evaluate(&snap));
    }

    #[test]
    fn struct_agrees_with_individual_evaluation() {
        let snap = PermissionSnapshot::authenticated(
            [codes::ROLE_ASSIGN, codes::APPLICATION_VIEW],
            ["Manager"],
        );
        let caps = Capabilities::from_snapshot(&snap);
        for cap in Capability::ALL {
            assert_eq!(caps.get(cap), cap.evaluate(&snap), "{}", cap.name());
            // Same capability, same snapshot, same answer.
            assert_eq!(cap.evaluate(&snap), cap.evaluate(&snap));
        }
        assert!(caps.can_assign_roles);
        assert!(caps.can_view_roles);
        assert!(caps.can_view_applications);
    }

    #[test]
    fn capability_names_are_unique() {
        let names: std::collections::HashSet<&str> =
            Capability::ALL.iter().map(|c| c.name()).collect();
        assert_eq!(names.len(), Capability::ALL.len());
    }
}
