//! # gatekeep-ref-admin
//!
//! Reference model of the credit-risk admin dashboard, gated by GATEKEEP.
//!
//! The dashboard has seven tabs (overview, notifications, applications, user
//! management, role management, system logs, help center). Whether a tab
//! exists is decided by derived capabilities; the controls inside each tab
//! are decided by the bundled gate catalog (`policies/admin.toml`).
//!
//! All data is hardcoded and fictional. No backend is contacted.

pub mod dashboard;
pub mod mock_data;
pub mod scenario;
pub mod screens;
pub mod source;

pub use dashboard::{build_dashboard, DashboardView};
pub use scenario::{default_catalog, run_role_change, run_scenario, sign_in, ScenarioReport};
