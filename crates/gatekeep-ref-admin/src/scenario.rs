//! End-to-end scenarios: sign a mock identity in and render the dashboard.
//!
//! Each run wires real GATEKEEP components (identity validator, snapshot
//! store, session, gate catalog) to the mock identity source.

use std::sync::Arc;

use serde::Serialize;
use tracing::{info, warn};

use gatekeep_contracts::{
    error::{GatekeepError, GatekeepResult},
    session::{SessionEvent, SessionId},
};
use gatekeep_core::{session::Session, store::SnapshotStore, traits::GateCatalog};
use gatekeep_ingest::IdentityValidator;
use gatekeep_policy::TomlGateCatalog;

use crate::{
    dashboard::{build_dashboard, DashboardView},
    source::MockIdentitySource,
};

/// The gate catalog bundled with the reference dashboard.
pub const ADMIN_CATALOG: &str = include_str!("../policies/admin.toml");

pub fn default_catalog() -> GatekeepResult<TomlGateCatalog> {
    TomlGateCatalog::from_toml_str(ADMIN_CATALOG)
}

/// The outcome of signing one identity in.
#[derive(Debug, Clone, Serialize)]
pub struct ScenarioReport {
    pub identity: String,
    /// Why grants could not be loaded, if they could not.
    pub load_error: Option<String>,
    pub revision: u64,
    pub view: DashboardView,
}

/// Sign `identity` in and render the dashboard it would see.
///
/// A failed identity load is not an error here: it is reported in
/// `load_error` next to the (maximally restricted) view the user gets.
pub fn run_scenario(identity: &str, catalog: &dyn GateCatalog) -> GatekeepResult<ScenarioReport> {
    let (store, load_error) = sign_in(identity)?;
    Ok(report(identity, load_error, &store, catalog))
}

/// Sign `identity` in and return the populated store, plus the load error
/// if the grants could not be fetched.
pub fn sign_in(identity: &str) -> GatekeepResult<(Arc<SnapshotStore>, Option<String>)> {
    let store = Arc::new(SnapshotStore::new());
    let session = Session::new(
        Box::new(MockIdentitySource::new(identity)),
        Box::new(IdentityValidator::new()?),
        Arc::clone(&store),
    );

    let load_error = login(&session, identity)?;
    Ok((store, load_error))
}

/// Sign `from` in, switch the backend to `to`'s grants, and deliver a
/// `PermissionsChanged` event. Returns the view before and after.
pub fn run_role_change(
    from: &str,
    to: &str,
    catalog: &dyn GateCatalog,
) -> GatekeepResult<(ScenarioReport, ScenarioReport)> {
    let store = Arc::new(SnapshotStore::new());
    let source = Arc::new(MockIdentitySource::new(from));
    let session = Session::new(
        Box::new(Arc::clone(&source)),
        Box::new(IdentityValidator::new()?),
        Arc::clone(&store),
    );

    let session_id = SessionId::new();
    let load_error = apply(&session, SessionEvent::LoggedIn { session_id: session_id.clone() })?;
    let before = report(from, load_error, &store, catalog);

    source.switch_to(to);
    info!(from, to, "backend grants changed");
    let load_error = apply(&session, SessionEvent::PermissionsChanged { session_id })?;
    let after = report(to, load_error, &store, catalog);

    Ok((before, after))
}

fn login(session: &Session, identity: &str) -> GatekeepResult<Option<String>> {
    info!(identity, "signing in");
    apply(session, SessionEvent::LoggedIn { session_id: SessionId::new() })
}

/// Apply `event`, turning load failures into a reportable message. Errors
/// that indicate a broken setup rather than a bad backend still propagate.
fn apply(session: &Session, event: SessionEvent) -> GatekeepResult<Option<String>> {
    match session.apply(event) {
        Ok(_) => Ok(None),
        Err(e @ GatekeepError::ConfigError { .. }) => Err(e),
        Err(e) => {
            warn!(error = %e, "identity load failed; rendering restricted dashboard");
            Ok(Some(e.to_string()))
        }
    }
}

fn report(
    identity: &str,
    load_error: Option<String>,
    store: &SnapshotStore,
    catalog: &dyn GateCatalog,
) -> ScenarioReport {
    let snapshot = store.get_snapshot();
    ScenarioReport {
        identity: identity.to_string(),
        load_error,
        revision: store.revision(),
        view: build_dashboard(&snapshot, catalog),
    }
}
