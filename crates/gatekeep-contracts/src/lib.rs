//! # gatekeep-contracts
//!
//! Shared types and contracts for the GATEKEEP access layer.
//!
//! All crates in the workspace import from here. No evaluation logic lives in
//! this crate, only data definitions, requirement builders, and error types.

pub mod error;
pub mod grant;
pub mod requirement;
pub mod session;
pub mod snapshot;

#[cfg(test)]
mod tests {
    use super::*;
    use error::GatekeepError;
    use grant::{PermissionCode, RoleName, PRIVILEGED_ROLE};
    use requirement::AccessRequirement;
    use session::{SessionEvent, SessionId};
    use snapshot::PermissionSnapshot;

    // ── PermissionSnapshot ───────────────────────────────────────────────────

    #[test]
    fn default_snapshot_is_unauthenticated_and_empty() {
        let snap = PermissionSnapshot::default();
        assert!(!snap.is_authenticated());
        assert_eq!(snap.permission_count(), 0);
        assert_eq!(snap.role_count(), 0);
        assert!(snap.loaded_at().is_none());
        assert_eq!(snap, PermissionSnapshot::unauthenticated());
    }

    #[test]
    fn authenticated_snapshot_collapses_duplicates() {
        let snap = PermissionSnapshot::authenticated(
            ["user_view_all", "user_view_all", "role_view"],
            ["Manager", "Manager"],
        );

        assert!(snap.is_authenticated());
        assert_eq!(snap.permission_count(), 2);
        assert_eq!(snap.role_count(), 1);
        assert!(snap.contains_permission("user_view_all"));
        assert!(snap.contains_role("Manager"));
    }

    #[test]
    fn snapshot_lookup_is_case_sensitive() {
        let snap = PermissionSnapshot::authenticated(["user_manage"], ["Manager"]);
        assert!(!snap.contains_permission("USER_MANAGE"));
        assert!(!snap.contains_permission(" user_manage"));
        assert!(!snap.contains_role("manager"));
    }

    #[test]
    fn same_grants_ignores_loaded_at() {
        let a = PermissionSnapshot::authenticated(["a"], ["r"]);
        let b = a.clone().with_loaded_at(chrono::Utc::now());
        assert!(a.same_grants(&b));
        assert_ne!(a, b);
    }

    #[test]
    fn snapshot_iterates_in_sorted_order() {
        let snap = PermissionSnapshot::authenticated(["c", "a", "b"], Vec::<&str>::new());
        let codes: Vec<&str> = snap.permission_codes().map(|c| c.as_str()).collect();
        assert_eq!(codes, vec!["a", "b", "c"]);
    }

    // ── Grants ───────────────────────────────────────────────────────────────

    #[test]
    fn privileged_role_constant() {
        assert_eq!(PRIVILEGED_ROLE, "Administrator");
        assert!(RoleName::privileged().is_privileged());
        assert!(!RoleName::new("administrator").is_privileged());
    }

    #[test]
    fn grant_types_serialize_transparently() {
        let json = serde_json::to_string(&PermissionCode::new("user_manage")).unwrap();
        assert_eq!(json, "\"user_manage\"");
        let role: RoleName = serde_json::from_str("\"Manager\"").unwrap();
        assert_eq!(role.as_str(), "Manager");
    }

    // ── AccessRequirement ────────────────────────────────────────────────────

    #[test]
    fn requirement_builders() {
        let req = AccessRequirement::all_permissions(["user_view_all", "user_manage"]);
        assert!(req.require_all);
        assert_eq!(req.permissions.len(), 2);
        assert!(req.roles.is_empty());

        let req = AccessRequirement::permission("role_assign").with_roles(["Manager"]);
        assert!(!req.require_all);
        assert_eq!(req.permissions, vec![PermissionCode::new("role_assign")]);
        assert_eq!(req.roles, vec![RoleName::new("Manager")]);

        assert!(AccessRequirement::none().is_unconstrained());
        assert!(!AccessRequirement::role("Manager").is_unconstrained());
    }

    #[test]
    fn requirement_deserializes_with_defaults() {
        let req: AccessRequirement =
            serde_json::from_str(r#"{ "permissions": ["audit_view"] }"#).unwrap();
        assert_eq!(req.permissions, vec![PermissionCode::new("audit_view")]);
        assert!(req.roles.is_empty());
        assert!(!req.require_all);
    }

    // ── Sessions ─────────────────────────────────────────────────────────────

    #[test]
    fn session_id_new_produces_unique_values() {
        let unique: std::collections::HashSet<String> =
            (0..100).map(|_| SessionId::new().to_string()).collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn session_event_round_trips() {
        let event = SessionEvent::AuthenticationFailed {
            reason: "token expired".to_string(),
        };
        let json = serde_json::to_string(&event).unwrap();
        let decoded: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(event, decoded);
    }

    // ── GatekeepError display messages ───────────────────────────────────────

    #[test]
    fn error_config_error_display() {
        let err = GatekeepError::ConfigError {
            reason: "duplicate gate id".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("configuration error"));
        assert!(msg.contains("duplicate gate id"));
    }

    #[test]
    fn error_payload_rejected_display() {
        let err = GatekeepError::PayloadRejected {
            reason: "empty permission code".to_string(),
        };
        assert!(err.to_string().contains("identity payload rejected"));
    }

    #[test]
    fn error_identity_fetch_failed_display() {
        let err = GatekeepError::IdentityFetchFailed {
            reason: "503 from auth/rbac/me".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("identity fetch failed"));
        assert!(msg.contains("auth/rbac/me"));
    }

    #[test]
    fn error_unknown_identity_display() {
        let err = GatekeepError::UnknownIdentity {
            name: "ghost".to_string(),
        };
        assert_eq!(err.to_string(), "unknown identity 'ghost'");
    }
}
