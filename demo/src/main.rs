//! GATEKEEP Admin Dashboard Demo CLI
//!
//! Signs a mock identity in and prints what the credit-risk admin dashboard
//! would show it: tabs, capabilities, and the controls inside each screen.
//!
//! Usage:
//!   cargo run -p demo -- run-all
//!   cargo run -p demo -- show manager
//!   cargo run -p demo -- show auditor --json
//!   cargo run -p demo -- check underwriter applications.change_status
//!   cargo run -p demo -- role-change viewer auditor
//!   cargo run -p demo -- --catalog my-gates.toml show manager

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use gatekeep_contracts::error::{GatekeepError, GatekeepResult};
use gatekeep_core::{capability::Capability, traits::GateCatalog};
use gatekeep_policy::TomlGateCatalog;
use gatekeep_ref_admin::{
    default_catalog,
    mock_data::{identity_payload, IDENTITIES},
    run_role_change, run_scenario,
    screens::ScreenAction,
    sign_in,
    ScenarioReport,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// GATEKEEP: client-side access gating for the credit-risk admin dashboard.
#[derive(Parser)]
#[command(
    name = "demo",
    about = "GATEKEEP admin dashboard demo",
    long_about = "Signs mock identities in and shows which dashboard tabs and controls\n\
                  each one gets, using the same gates the dashboard renders with."
)]
struct Cli {
    /// Gate catalog TOML to use instead of the bundled one.
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Summarize every mock identity.
    RunAll,
    /// Print the full dashboard for one identity.
    Show {
        identity: String,
        /// Emit JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Decide one catalog gate for one identity.
    Check { identity: String, gate_id: String },
    /// Sign one identity in, then switch the backend to another's grants.
    RoleChange { from: String, to: String },
    /// List the mock identities and their raw payloads.
    Identities,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Initialize structured logging.  Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    let result = load_catalog(cli.catalog.as_deref()).and_then(|catalog| match cli.command {
        Command::RunAll => run_all(&catalog),
        Command::Show { identity, json } => show(&identity, json, &catalog),
        Command::Check { identity, gate_id } => check(&identity, &gate_id, &catalog),
        Command::RoleChange { from, to } => role_change(&from, &to, &catalog),
        Command::Identities => list_identities(),
    });

    if let Err(e) = result {
        eprintln!("Demo error: {}", e);
        std::process::exit(1);
    }
}

fn load_catalog(path: Option<&std::path::Path>) -> GatekeepResult<TomlGateCatalog> {
    match path {
        Some(path) => {
            info!(path = %path.display(), "loading gate catalog override");
            TomlGateCatalog::from_file(path)
        }
        None => default_catalog(),
    }
}

// ── Commands ──────────────────────────────────────────────────────────────────

fn run_all(catalog: &TomlGateCatalog) -> GatekeepResult<()> {
    println!();
    println!("{:<14} {:<6} {}", "IDENTITY", "AUTH", "TABS");
    println!("{}", "-".repeat(72));
    for identity in IDENTITIES {
        let report = run_scenario(identity, catalog)?;
        let tabs: Vec<&str> = report.view.tabs.iter().map(|t| t.label()).collect();
        println!(
            "{:<14} {:<6} {}",
            identity,
            if report.view.authenticated { "yes" } else { "no" },
            if tabs.is_empty() { "(none)".to_string() } else { tabs.join(", ") }
        );
        if let Some(err) = &report.load_error {
            println!("{:<14} {:<6} ↳ {}", "", "", err);
        }
    }
    println!();
    Ok(())
}

fn show(identity: &str, json: bool, catalog: &TomlGateCatalog) -> GatekeepResult<()> {
    let report = run_scenario(identity, catalog)?;

    if json {
        let out = serde_json::to_string_pretty(&report).map_err(|e| GatekeepError::ConfigError {
            reason: format!("could not serialize report: {e}"),
        })?;
        println!("{out}");
        return Ok(());
    }

    print_report(&report);
    Ok(())
}

fn check(identity: &str, gate_id: &str, catalog: &TomlGateCatalog) -> GatekeepResult<()> {
    let (store, load_error) = sign_in(identity)?;
    let snapshot = store.get_snapshot();
    if let Some(err) = load_error {
        println!("(load failed: {err})");
    }

    let decision = catalog.decide(gate_id, &snapshot);
    match catalog.description(gate_id) {
        Some(desc) => println!("{gate_id} ({desc})"),
        None => println!("{gate_id} (not in catalog)"),
    }
    println!("  identity: {identity}");
    println!("  decision: {:?}", decision);
    Ok(())
}

fn role_change(from: &str, to: &str, catalog: &TomlGateCatalog) -> GatekeepResult<()> {
    let (before, after) = run_role_change(from, to, catalog)?;
    println!("── before (revision {}) ──", before.revision);
    print_report(&before);
    println!("── after permissions changed (revision {}) ──", after.revision);
    print_report(&after);
    Ok(())
}

fn list_identities() -> GatekeepResult<()> {
    for identity in IDENTITIES {
        match identity_payload(identity) {
            Some(payload) => println!("{identity}: {payload}"),
            None => println!("{identity}: (backend unreachable)"),
        }
    }
    Ok(())
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_actions(title: &str, actions: &[ScreenAction]) {
    let labels: Vec<&str> = actions.iter().map(|a| a.label).collect();
    if labels.is_empty() {
        println!("    {title}: —");
    } else {
        println!("    {title}: {}", labels.join(" | "));
    }
}

fn print_report(report: &ScenarioReport) {
    let view = &report.view;

    println!();
    println!("Identity: {}", report.identity);
    if let Some(err) = &report.load_error {
        println!("  load failed: {err}");
    }
    println!("  roles:       {}", view.role_names.join(", "));
    println!("  permissions: {}", view.permission_codes.join(", "));
    if let Some(at) = &view.loaded_at {
        println!("  loaded at:   {at}");
    }
    if let Some(banner) = view.banner {
        println!("  [{banner}]");
    }

    let granted: Vec<&str> = Capability::ALL
        .iter()
        .filter(|c| view.capabilities.get(**c))
        .map(|c| c.name())
        .collect();
    println!("  capabilities: {}", granted.join(", "));

    let tabs: Vec<&str> = view.tabs.iter().map(|t| t.label()).collect();
    println!("  tabs: {}", tabs.join(" | "));

    if let Some(n) = &view.notifications {
        println!("  Notifications ({} unread)", n.unread);
        print_actions("actions", &n.actions);
    }
    if let Some(apps) = &view.applications {
        println!("  Applications");
        for row in &apps.rows {
            let a = &row.application;
            print_actions(
                &format!("{} {} [{}]", a.reference, a.applicant, a.status),
                &row.actions,
            );
        }
    }
    if let Some(users) = &view.users {
        println!("  User Management");
        print_actions("toolbar", &users.toolbar);
        for row in &users.rows {
            print_actions(row.user.full_name, &row.actions);
        }
    }
    if let Some(roles) = &view.roles {
        println!("  Role Management");
        print_actions("toolbar", &roles.toolbar);
        for row in &roles.rows {
            if roles.show_permission_codes {
                print_actions(
                    &format!("{} ({})", row.role.name, row.role.permission_codes.join(", ")),
                    &row.actions,
                );
            } else {
                print_actions(row.role.name, &row.actions);
            }
        }
    }
    if let Some(logs) = &view.logs {
        println!("  System Logs ({} entries)", logs.entries.len());
        print_actions("toolbar", &logs.toolbar);
    }
    if let Some(help) = &view.help {
        println!("  Help Center");
        print_actions("actions", help);
    }
    println!();
}
