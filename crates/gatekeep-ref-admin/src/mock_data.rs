//! Simulated backend data for the admin dashboard reference model.
//!
//! All data in this module is hardcoded and fictional. No backend is
//! contacted. Identity payloads mimic the `auth/rbac/me` response, including
//! its habit of mixing bare strings and `{ "code": ... }` objects.

use serde::Serialize;
use serde_json::{json, Value};

/// Names of the mock identities, in display order.
pub const IDENTITIES: &[&str] = &[
    "administrator",
    "manager",
    "underwriter",
    "auditor",
    "analyst",
    "viewer",
    "malformed",
    "offline",
];

/// The identity whose backend is unreachable.
pub const OFFLINE_IDENTITY: &str = "offline";

/// The raw identity payload the backend would return for `name`.
///
/// Returns `None` for unknown names and for [`OFFLINE_IDENTITY`].
pub fn identity_payload(name: &str) -> Option<Value> {
    let payload = match name {
        "administrator" => json!({
            "userId": 1,
            "email": "a.okafor@example.test",
            "permissionCodes": [],
            "roleNames": ["Administrator"]
        }),
        "manager" => json!({
            "userId": 2,
            "email": "m.lindqvist@example.test",
            "permissionCodes": [
                "user_view_all",
                "user_manage",
                "role_view",
                "application_view",
                "notification_manage"
            ],
            "roleNames": ["Manager"]
        }),
        "underwriter" => json!({
            "userId": 3,
            "email": "u.haddad@example.test",
            "permissionCodes": [
                { "code": "application_view", "description": "View applications" },
                { "code": "application_manage", "description": "Decide applications" }
            ],
            "roleNames": [{ "id": 4, "name": "Underwriter" }]
        }),
        "auditor" => json!({
            "userId": 4,
            "email": "r.castellanos@example.test",
            "permissionCodes": ["audit_log_view", "user_view_all"],
            "roleNames": ["Auditor"]
        }),
        "analyst" => json!({
            "userId": 5,
            "email": "k.mwangi@example.test",
            "permissionCodes": ["application_view", "role_assign"],
            "roleNames": ["Risk Analyst"]
        }),
        "viewer" => json!({
            "userId": 6,
            "email": "j.doe@example.test",
            "permissionCodes": [],
            "roleNames": []
        }),
        "malformed" => json!({
            "userId": 7,
            "permissionCodes": "user_manage",
            "roleNames": ["Manager"]
        }),
        _ => return None,
    };
    Some(payload)
}

// ── Screen data ──────────────────────────────────────────────────────────────

/// A row in the user management table.
#[derive(Debug, Clone, Serialize)]
pub struct UserRecord {
    pub id: u32,
    pub full_name: &'static str,
    pub email: &'static str,
    pub roles: &'static [&'static str],
    pub active: bool,
}

pub fn users() -> Vec<UserRecord> {
    vec![
        UserRecord {
            id: 1,
            full_name: "Adaeze Okafor",
            email: "a.okafor@example.test",
            roles: &["Administrator"],
            active: true,
        },
        UserRecord {
            id: 2,
            full_name: "Maja Lindqvist",
            email: "m.lindqvist@example.test",
            roles: &["Manager"],
            active: true,
        },
        UserRecord {
            id: 3,
            full_name: "Usama Haddad",
            email: "u.haddad@example.test",
            roles: &["Underwriter"],
            active: true,
        },
        UserRecord {
            id: 4,
            full_name: "Rosa Castellanos",
            email: "r.castellanos@example.test",
            roles: &["Auditor"],
            active: true,
        },
        UserRecord {
            id: 5,
            full_name: "Kamau Mwangi",
            email: "k.mwangi@example.test",
            roles: &["Risk Analyst"],
            active: true,
        },
        UserRecord {
            id: 6,
            full_name: "Jordan Doe",
            email: "j.doe@example.test",
            roles: &[],
            active: false,
        },
    ]
}

/// A role as listed on the role management screen.
#[derive(Debug, Clone, Serialize)]
pub struct RoleRecord {
    pub name: &'static str,
    pub member_count: u32,
    pub permission_codes: &'static [&'static str],
}

pub fn roles() -> Vec<RoleRecord> {
    vec![
        RoleRecord {
            name: "Administrator",
            member_count: 1,
            permission_codes: &[],
        },
        RoleRecord {
            name: "Manager",
            member_count: 1,
            permission_codes: &[
                "user_view_all",
                "user_manage",
                "role_view",
                "application_view",
                "notification_manage",
            ],
        },
        RoleRecord {
            name: "Underwriter",
            member_count: 1,
            permission_codes: &["application_view", "application_manage"],
        },
        RoleRecord {
            name: "Auditor",
            member_count: 1,
            permission_codes: &["audit_log_view", "user_view_all"],
        },
        RoleRecord {
            name: "Risk Analyst",
            member_count: 1,
            permission_codes: &["application_view", "role_assign"],
        },
    ]
}

/// One entry in the system activity log.
#[derive(Debug, Clone, Serialize)]
pub struct LogEntry {
    pub at: &'static str,
    pub actor: &'static str,
    pub action: &'static str,
    pub target: &'static str,
}

pub fn system_logs() -> Vec<LogEntry> {
    vec![
        LogEntry {
            at: "2026-10-17T08:02:11Z",
            actor: "a.okafor",
            action: "role.assign",
            target: "user/5 → Risk Analyst",
        },
        LogEntry {
            at: "2026-10-17T09:15:40Z",
            actor: "u.haddad",
            action: "application.approve",
            target: "application/A-1042",
        },
        LogEntry {
            at: "2026-10-17T11:47:03Z",
            actor: "m.lindqvist",
            action: "user.deactivate",
            target: "user/6",
        },
        LogEntry {
            at: "2026-10-18T07:30:59Z",
            actor: "system",
            action: "risk.rescore",
            target: "application/A-1045",
        },
    ]
}

/// A credit application as listed on the applications screen.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicationRecord {
    pub reference: &'static str,
    pub applicant: &'static str,
    pub amount: u64,
    pub status: &'static str,
    pub risk_band: &'static str,
}

pub fn applications() -> Vec<ApplicationRecord> {
    vec![
        ApplicationRecord {
            reference: "A-1042",
            applicant: "Lerato Dlamini",
            amount: 25_000,
            status: "approved",
            risk_band: "B",
        },
        ApplicationRecord {
            reference: "A-1043",
            applicant: "Tomás Ferreira",
            amount: 8_500,
            status: "under_review",
            risk_band: "C",
        },
        ApplicationRecord {
            reference: "A-1044",
            applicant: "Ines Vogel",
            amount: 120_000,
            status: "submitted",
            risk_band: "A",
        },
        ApplicationRecord {
            reference: "A-1045",
            applicant: "Daniel Osei",
            amount: 4_200,
            status: "declined",
            risk_band: "E",
        },
    ]
}

/// An inbox notification.
#[derive(Debug, Clone, Serialize)]
pub struct NotificationRecord {
    pub title: &'static str,
    pub read: bool,
}

pub fn notifications() -> Vec<NotificationRecord> {
    vec![
        NotificationRecord {
            title: "Application A-1044 awaits review",
            read: false,
        },
        NotificationRecord {
            title: "Scheduled maintenance on Sunday 02:00 UTC",
            read: true,
        },
    ]
}
