//! TOML-driven gate catalog implementation.
//!
//! `TomlGateCatalog` loads a `GateConfig` from a TOML string or file and
//! implements the `GateCatalog` trait from gatekeep-core.
//!
//! Lookup algorithm:
//!
//! 1. Find the gate registered under the requested id.
//! 2. If found, evaluate its requirement with `gatekeep_core::gate::evaluate`.
//! 3. If no gate is registered under that id → `Fallback` (deny-by-default).
//!
//! Loading rejects empty ids and duplicate ids, so every id maps to exactly
//! one requirement.

use std::{collections::HashMap, path::Path};

use tracing::{debug, warn};

use gatekeep_contracts::{
    error::{GatekeepError, GatekeepResult},
    requirement::AccessRequirement,
    snapshot::PermissionSnapshot,
};
use gatekeep_core::{
    gate::{evaluate, Gate, GateDecision},
    traits::GateCatalog,
};

use crate::rule::GateConfig;

/// A `GateCatalog` implementation that reads named gates from TOML.
///
/// ```rust,ignore
/// use gatekeep_policy::engine::TomlGateCatalog;
///
/// let catalog = TomlGateCatalog::from_file(Path::new("policies/admin.toml"))?;
/// ```
#[derive(Debug)]
pub struct TomlGateCatalog {
    /// Gate ids in declaration order.
    order: Vec<String>,
    gates: HashMap<String, (String, AccessRequirement)>,
}

impl TomlGateCatalog {
    /// Parse `s` as TOML and build a `TomlGateCatalog`.
    ///
    /// Returns `GatekeepError::ConfigError` if the TOML is malformed, does not
    /// match the `GateConfig` schema, or declares an empty or duplicate id.
    pub fn from_toml_str(s: &str) -> GatekeepResult<Self> {
        let config: GateConfig = toml::from_str(s).map_err(|e| GatekeepError::ConfigError {
            reason: format!("failed to parse gate catalog TOML: {}", e),
        })?;
        Self::from_config(config)
    }

    /// Read the file at `path` and parse it as a TOML gate catalog.
    pub fn from_file(path: &Path) -> GatekeepResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| GatekeepError::ConfigError {
            reason: format!("failed to read gate catalog '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Build a catalog from an already-deserialized configuration.
    pub fn from_config(config: GateConfig) -> GatekeepResult<Self> {
        let mut order = Vec::with_capacity(config.gates.len());
        let mut gates = HashMap::with_capacity(config.gates.len());

        for rule in config.gates {
            if rule.id.trim().is_empty() {
                return Err(GatekeepError::ConfigError {
                    reason: "gate id must not be empty".to_string(),
                });
            }
            if gates.contains_key(&rule.id) {
                return Err(GatekeepError::ConfigError {
                    reason: format!("duplicate gate id '{}'", rule.id),
                });
            }

            let requirement = rule.requirement();
            if requirement.is_unconstrained() {
                debug!(gate_id = %rule.id, "gate is open to every authenticated user");
            }
            order.push(rule.id.clone());
            gates.insert(rule.id, (rule.description, requirement));
        }

        debug!(gate_count = order.len(), "gate catalog loaded");
        Ok(Self { order, gates })
    }

    /// Gate ids in declaration order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// Human-readable description of `gate_id`.
    pub fn description(&self, gate_id: &str) -> Option<&str> {
        self.gates.get(gate_id).map(|(d, _)| d.as_str())
    }

    /// A renderable `Gate` for `gate_id`, if registered.
    pub fn gate(&self, gate_id: &str) -> Option<Gate> {
        self.requirement(gate_id).cloned().map(Gate::new)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

impl GateCatalog for TomlGateCatalog {
    fn requirement(&self, gate_id: &str) -> Option<&AccessRequirement> {
        self.gates.get(gate_id).map(|(_, r)| r)
    }

    /// Evaluate the gate registered under `gate_id`.
    ///
    /// An unknown id is denied: a typo in screen code hides the control
    /// instead of exposing it.
    fn decide(&self, gate_id: &str, snapshot: &PermissionSnapshot) -> GateDecision {
        match self.requirement(gate_id) {
            Some(requirement) => {
                let decision = GateDecision::from(evaluate(snapshot, requirement));
                debug!(gate_id, ?decision, "gate decided");
                decision
            }
            None => {
                warn!(gate_id, "no gate registered under this id; denying by default");
                GateDecision::Fallback
            }
        }
    }
}
