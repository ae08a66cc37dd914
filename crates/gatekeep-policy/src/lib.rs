//! # gatekeep-policy
//!
//! A TOML-driven, deny-by-default catalog of named screen gates.
//!
//! ## Overview
//!
//! This crate provides [`TomlGateCatalog`], which implements the
//! [`GateCatalog`](gatekeep_core::traits::GateCatalog) trait. Screens refer
//! to controls by a stable gate id (`"users.deactivate"`, `"logs.export"`);
//! the catalog maps each id to an access requirement. Asking for an id the
//! catalog does not know is denied.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use gatekeep_policy::engine::TomlGateCatalog;
//!
//! let catalog = TomlGateCatalog::from_file(Path::new("policies/admin.toml"))?;
//! let decision = catalog.decide("users.deactivate", &snapshot);
//! ```
//!
//! The privileged role is not configurable here; it always passes.

pub mod engine;
pub mod rule;

pub use engine::TomlGateCatalog;
pub use rule::{GateConfig, GateRule};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use gatekeep_contracts::{error::GatekeepError, snapshot::PermissionSnapshot};
    use gatekeep_core::{gate::GateDecision, traits::GateCatalog};

    use crate::TomlGateCatalog;

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn snap(perms: &[&str], roles: &[&str]) -> PermissionSnapshot {
        PermissionSnapshot::authenticated(perms.iter().copied(), roles.iter().copied())
    }

    const CATALOG: &str = r#"
        [[gates]]
        id = "users.deactivate"
        description = "Deactivate button in the user row menu"
        permissions = ["user_manage"]

        [[gates]]
        id = "roles.assign"
        description = "Assign-roles dialog"
        permissions = ["role_assign", "user_manage"]
        require_all = true

        [[gates]]
        id = "logs.export"
        description = "Export system logs as CSV"
        permissions = ["audit_log_export"]
        roles = ["Auditor"]

        [[gates]]
        id = "help.center"
        description = "Help center link"
    "#;

    // ── 1. deny-by-default ────────────────────────────────────────────────────

    /// An empty catalog denies every gate id, even to an authenticated user.
    #[test]
    fn test_unknown_gate_denied_by_default() {
        let catalog = TomlGateCatalog::from_toml_str("gates = []").unwrap();
        assert!(catalog.is_empty());
        assert_eq!(
            catalog.decide("users.deactivate", &snap(&["user_manage"], &[])),
            GateDecision::Fallback
        );
    }

    /// Unknown ids are denied even to the Administrator: there is nothing to
    /// bypass when no gate exists.
    #[test]
    fn test_unknown_gate_denied_for_admin() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(
            catalog.decide("users.delete_everything", &snap(&[], &["Administrator"])),
            GateDecision::Fallback
        );
    }

    // ── 2. matching gates ─────────────────────────────────────────────────────

    #[test]
    fn test_single_permission_gate() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(
            catalog.decide("users.deactivate", &snap(&["user_manage"], &[])),
            GateDecision::Render
        );
        assert_eq!(
            catalog.decide("users.deactivate", &snap(&["user_view_all"], &[])),
            GateDecision::Fallback
        );
    }

    #[test]
    fn test_require_all_gate() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        assert_eq!(
            catalog.decide("roles.assign", &snap(&["role_assign"], &[])),
            GateDecision::Fallback
        );
        assert_eq!(
            catalog.decide("roles.assign", &snap(&["role_assign", "user_manage"], &[])),
            GateDecision::Render
        );
    }

    #[test]
    fn test_role_or_permission_gate() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        assert!(catalog.decide("logs.export", &snap(&[], &["Auditor"])).is_render());
        assert!(catalog.decide("logs.export", &snap(&["audit_log_export"], &[])).is_render());
        let manager = snap(&["audit_log_view"], &["Manager"]);
        assert!(!catalog.decide("logs.export", &manager).is_render());
    }

    #[test]
    fn test_open_gate_requires_authentication() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        assert!(catalog.decide("help.center", &snap(&[], &[])).is_render());
        assert!(!catalog
            .decide("help.center", &PermissionSnapshot::unauthenticated())
            .is_render());
    }

    #[test]
    fn test_privileged_bypasses_catalog_gates() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        let admin = snap(&[], &["Administrator"]);
        for id in catalog.ids() {
            assert!(catalog.decide(id, &admin).is_render(), "admin denied '{id}'");
        }
    }

    // ── 3. catalog metadata ───────────────────────────────────────────────────

    #[test]
    fn test_ids_keep_declaration_order() {
        let catalog = TomlGateCatalog::from_toml_str(CATALOG).unwrap();
        let ids: Vec<&str> = catalog.ids().collect();
        assert_eq!(ids, vec!["users.deactivate", "roles.assign", "logs.export", "help.center"]);
        assert_eq!(catalog.len(), 4);
        assert_eq!(
            catalog.description("logs.export"),
            Some("Export system logs as CSV")
        );
        assert!(catalog.gate("roles.assign").unwrap().requirement().require_all);
        assert!(catalog.gate("nope").is_none());
    }

    // ── 4. configuration errors ───────────────────────────────────────────────

    #[test]
    fn test_toml_parse_error() {
        let result = TomlGateCatalog::from_toml_str("this is not valid toml ][[[");
        match result {
            Err(GatekeepError::ConfigError { reason }) => {
                assert!(
                    reason.contains("failed to parse gate catalog TOML"),
                    "expected parse error message, got: {reason}"
                );
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_gate_id_rejected() {
        let toml = r#"
            [[gates]]
            id = "users.edit"
            description = "first"
            permissions = ["user_manage"]

            [[gates]]
            id = "users.edit"
            description = "second"
            roles = ["Manager"]
        "#;
        match TomlGateCatalog::from_toml_str(toml) {
            Err(GatekeepError::ConfigError { reason }) => {
                assert!(reason.contains("duplicate gate id 'users.edit'"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_gate_id_rejected() {
        let toml = r#"
            [[gates]]
            id = "  "
            description = "blank"
        "#;
        assert!(matches!(
            TomlGateCatalog::from_toml_str(toml),
            Err(GatekeepError::ConfigError { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_config_error() {
        let result = TomlGateCatalog::from_file(std::path::Path::new("/nonexistent/gates.toml"));
        match result {
            Err(GatekeepError::ConfigError { reason }) => {
                assert!(reason.contains("failed to read gate catalog"));
            }
            other => panic!("expected ConfigError, got {:?}", other),
        }
    }
}
