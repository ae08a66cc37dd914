//! Identity payload validator.
//!
//! Accepted payload shape:
//!
//! ```json
//! { "permissionCodes": ["user_manage", { "code": "role_view" }],
//!   "roleNames": ["Manager", { "name": "Auditor" }] }
//! ```
//!
//! Entries may be bare strings or objects carrying the string under `code`
//! (permissions) or `name` (roles), since the backend returns both forms
//! depending on the endpoint. A missing array means "no grants of that
//! kind". Extra top-level fields (user id, email, ...) are ignored.
//!
//! Structural failures are reported as `SchemaValidation`, value failures as
//! `PayloadRejected`. All failures found in one pass are reported together.

use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tracing::{debug, warn};

use gatekeep_contracts::{
    error::{GatekeepError, GatekeepResult},
    grant::{PermissionCode, RoleName},
    snapshot::PermissionSnapshot,
};
use gatekeep_core::traits::PayloadParser;

/// JSON Schema for the identity payload.
pub const IDENTITY_SCHEMA: &str = r#"{
    "type": "object",
    "properties": {
        "permissionCodes": {
            "type": "array",
            "items": {
                "oneOf": [
                    { "type": "string" },
                    {
                        "type": "object",
                        "properties": { "code": { "type": "string" } },
                        "required": ["code"]
                    }
                ]
            }
        },
        "roleNames": {
            "type": "array",
            "items": {
                "oneOf": [
                    { "type": "string" },
                    {
                        "type": "object",
                        "properties": { "name": { "type": "string" } },
                        "required": ["name"]
                    }
                ]
            }
        }
    }
}"#;

/// A caller-supplied payload check.
///
/// Receives the full raw payload. Returns `Some(message)` when the payload
/// must be rejected, or `None` to accept.
pub type CustomCheckFn = Box<dyn Fn(&Value) -> Option<String> + Send + Sync>;

/// Validates identity payloads and builds permission snapshots.
pub struct IdentityValidator {
    schema: jsonschema::Validator,
    custom_checks: HashMap<String, CustomCheckFn>,
}

impl IdentityValidator {
    /// Compile the identity schema. Fails only if [`IDENTITY_SCHEMA`] itself
    /// is broken.
    pub fn new() -> GatekeepResult<Self> {
        let document: Value =
            serde_json::from_str(IDENTITY_SCHEMA).map_err(|e| GatekeepError::ConfigError {
                reason: format!("identity schema is not valid JSON: {e}"),
            })?;
        let schema = jsonschema::validator_for(&document).map_err(|e| GatekeepError::ConfigError {
            reason: format!("invalid identity JSON Schema document: {e}"),
        })?;
        Ok(Self {
            schema,
            custom_checks: HashMap::new(),
        })
    }

    /// Register an additional check under `name`. Registering the same name
    /// twice replaces the previous check.
    pub fn register_check(&mut self, name: impl Into<String>, check: CustomCheckFn) {
        self.custom_checks.insert(name.into(), check);
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Pull the string entries out of `payload[key]`, reading `field` from
    /// object entries. Assumes the schema already passed.
    fn entries<'v>(payload: &'v Value, key: &str, field: &str) -> Vec<&'v str> {
        payload
            .get(key)
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(|item| match item {
                        Value::String(s) => Some(s.as_str()),
                        other => other.get(field).and_then(Value::as_str),
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl PayloadParser for IdentityValidator {
    /// Validate `raw` and build an authenticated snapshot stamped with the
    /// current time.
    fn parse(&self, raw: &Value) -> GatekeepResult<PermissionSnapshot> {
        // ── Phase 1: JSON Schema structural validation ────────────────────────
        let structural: Vec<String> = self
            .schema
            .iter_errors(raw)
            .map(|error| format!("at '{}': {}", error.instance_path, error))
            .collect();

        if !structural.is_empty() {
            warn!(failure_count = structural.len(), "identity payload failed schema validation");
            return Err(GatekeepError::SchemaValidation {
                reason: structural.join("; "),
            });
        }

        // ── Phase 2: semantic rules ───────────────────────────────────────────
        let codes = Self::entries(raw, "permissionCodes", "code");
        let roles = Self::entries(raw, "roleNames", "name");
        let mut failures: Vec<String> = Vec::new();

        for (idx, code) in codes.iter().enumerate() {
            if code.is_empty() {
                failures.push(format!("permissionCodes[{idx}] is an empty string"));
            }
        }
        for (idx, role) in roles.iter().enumerate() {
            if role.is_empty() {
                failures.push(format!("roleNames[{idx}] is an empty string"));
            }
        }

        // Sorted so failure messages are stable across runs.
        let mut names: Vec<&String> = self.custom_checks.keys().collect();
        names.sort();
        for name in names {
            if let Some(message) = self.custom_checks.get(name).and_then(|check| check(raw)) {
                failures.push(format!("{name}: {message}"));
            }
        }

        if !failures.is_empty() {
            warn!(failure_count = failures.len(), "identity payload rejected");
            return Err(GatekeepError::PayloadRejected {
                reason: failures.join("; "),
            });
        }

        let snapshot = PermissionSnapshot::authenticated(
            codes.into_iter().map(PermissionCode::new),
            roles.into_iter().map(RoleName::new),
        )
        .with_loaded_at(Utc::now());

        debug!(
            permissions = snapshot.permission_count(),
            roles = snapshot.role_count(),
            "identity payload accepted"
        );

        Ok(snapshot)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use gatekeep_contracts::error::GatekeepError;
    use gatekeep_core::{predicate::has_permission, traits::PayloadParser};

    use super::IdentityValidator;

    fn validator() -> IdentityValidator {
        IdentityValidator::new().expect("identity schema must compile")
    }

    #[test]
    fn accepts_string_arrays() {
        let snap = validator()
            .parse(&json!({
                "permissionCodes": ["user_view_all", "user_manage"],
                "roleNames": ["Manager"]
            }))
            .unwrap();

        assert!(snap.is_authenticated());
        assert!(snap.loaded_at().is_some());
        assert_eq!(snap.permission_count(), 2);
        assert!(snap.contains_role("Manager"));
    }

    #[test]
    fn accepts_object_entries() {
        let snap = validator()
            .parse(&json!({
                "permissionCodes": [
                    { "code": "role_view", "description": "View roles" },
                    "role_assign"
                ],
                "roleNames": [{ "name": "Auditor", "id": 7 }]
            }))
            .unwrap();

        assert!(has_permission(&snap, "role_view"));
        assert!(has_permission(&snap, "role_assign"));
        assert!(snap.contains_role("Auditor"));
    }

    #[test]
    fn missing_arrays_mean_no_grants() {
        let snap = validator().parse(&json!({ "userId": 42 })).unwrap();
        assert!(snap.is_authenticated());
        assert_eq!(snap.permission_count(), 0);
        assert_eq!(snap.role_count(), 0);
    }

    #[test]
    fn duplicates_collapse() {
        let snap = validator()
            .parse(&json!({
                "permissionCodes": ["user_manage", "user_manage", { "code": "user_manage" }],
                "roleNames": ["Manager", "Manager"]
            }))
            .unwrap();
        assert_eq!(snap.permission_count(), 1);
        assert_eq!(snap.role_count(), 1);
    }

    #[test]
    fn values_are_not_normalized() {
        let snap = validator()
            .parse(&json!({ "permissionCodes": ["User_Manage "], "roleNames": [] }))
            .unwrap();
        assert!(!has_permission(&snap, "user_manage"));
        assert!(has_permission(&snap, "User_Manage "));
    }

    #[test]
    fn rejects_wrong_shapes() {
        let cases = [
            json!("not an object"),
            json!({ "permissionCodes": "user_manage" }),
            json!({ "permissionCodes": [1, 2] }),
            json!({ "roleNames": [{ "title": "Manager" }] }),
            json!({ "roleNames": [null] }),
        ];
        for raw in cases {
            match validator().parse(&raw) {
                Err(GatekeepError::SchemaValidation { .. }) => {}
                other => panic!("expected SchemaValidation for {raw}, got {:?}", other),
            }
        }
    }

    #[test]
    fn rejects_empty_strings_and_reports_all() {
        let result = validator().parse(&json!({
            "permissionCodes": ["user_manage", ""],
            "roleNames": [{ "name": "" }]
        }));
        match result {
            Err(GatekeepError::PayloadRejected { reason }) => {
                assert!(reason.contains("permissionCodes[1]"), "got: {reason}");
                assert!(reason.contains("roleNames[0]"), "got: {reason}");
            }
            other => panic!("expected PayloadRejected, got {:?}", other),
        }
    }

    #[test]
    fn custom_check_can_reject() {
        let mut v = validator();
        v.register_check(
            "active-account",
            Box::new(|raw: &serde_json::Value| {
                if raw.get("active").and_then(|a| a.as_bool()) == Some(false) {
                    Some("account is deactivated".to_string())
                } else {
                    None
                }
            }),
        );

        assert!(v.parse(&json!({ "roleNames": ["Manager"], "active": true })).is_ok());

        match v.parse(&json!({ "roleNames": ["Manager"], "active": false })) {
            Err(GatekeepError::PayloadRejected { reason }) => {
                assert_eq!(reason, "active-account: account is deactivated");
            }
            other => panic!("expected PayloadRejected, got {:?}", other),
        }
    }
}
