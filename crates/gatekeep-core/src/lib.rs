//! # gatekeep-core
//!
//! The client-side access decision layer for GATEKEEP.
//!
//! This crate provides:
//! - Pure permission predicates (`predicate`)
//! - The gating decision and its rendering wrapper (`gate`)
//! - The injectable permission snapshot store (`store`)
//! - The fixed vocabulary of derived capabilities (`capability`)
//! - Session wiring from lifecycle events to store updates (`session`)
//! - The collaborator traits the core consumes (`traits`)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use gatekeep_core::{gate::Gate, store::SnapshotStore};
//!
//! let store = SnapshotStore::new();
//! store.set_snapshot(["user_view_all"], ["Manager"]);
//! let row_actions =
//!     Gate::permission("user_manage").render_or_nothing(&store.get_snapshot(), actions);
//! ```

pub mod capability;
pub mod gate;
pub mod predicate;
pub mod session;
pub mod store;
pub mod traits;

pub use capability::{Capabilities, Capability};
pub use gate::{evaluate, Gate, GateDecision};
pub use session::{Session, SessionOutcome};
pub use store::SnapshotStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use gatekeep_contracts::{requirement::AccessRequirement, snapshot::PermissionSnapshot};

    use crate::{
        gate::{evaluate, Gate, GateDecision},
        predicate::*,
        store::SnapshotStore,
    };

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn snap(perms: &[&str], roles: &[&str]) -> PermissionSnapshot {
        PermissionSnapshot::authenticated(perms.iter().copied(), roles.iter().copied())
    }

    fn req(perms: &[&str], roles: &[&str], require_all: bool) -> AccessRequirement {
        AccessRequirement::any_permission(perms.iter().copied())
            .with_roles(roles.iter().copied())
            .require_all(require_all)
    }

    /// Every ordering of `items`.
    fn permutations<T: Clone>(items: &[T]) -> Vec<Vec<T>> {
        if items.len() <= 1 {
            return vec![items.to_vec()];
        }
        let mut out = Vec::new();
        for i in 0..items.len() {
            let mut rest = items.to_vec();
            let head = rest.remove(i);
            for mut tail in permutations(&rest) {
                tail.insert(0, head.clone());
                out.push(tail);
            }
        }
        out
    }

    /// A spread of requirements touching every combination rule.
    fn sample_requirements() -> Vec<AccessRequirement> {
        let mut out = Vec::new();
        for perms in [&[][..], &["user_manage"][..], &["user_view_all", "user_manage"][..]] {
            for roles in [&[][..], &["Manager"][..], &["Manager", "Auditor"][..]] {
                for require_all in [false, true] {
                    out.push(req(perms, roles, require_all));
                }
            }
        }
        out
    }

    fn sample_snapshots() -> Vec<PermissionSnapshot> {
        vec![
            PermissionSnapshot::unauthenticated(),
            snap(&[], &[]),
            snap(&["user_view_all"], &[]),
            snap(&["user_view_all", "user_manage"], &[]),
            snap(&["role_view"], &["Manager"]),
            snap(&[], &["Manager", "Auditor"]),
            snap(&["user_manage"], &["Auditor"]),
        ]
    }

    // ── Scenarios ─────────────────────────────────────────────────────────────

    /// Scenario A: one of two listed permissions is enough without require_all.
    #[test]
    fn scenario_a_or_match_on_one_permission() {
        let s = snap(&["user_view_all"], &[]);
        let r = req(&["user_view_all", "user_manage"], &[], false);
        assert!(evaluate(&s, &r));
    }

    /// Scenario B: require_all demands every listed permission.
    #[test]
    fn scenario_b_require_all_missing_one() {
        let s = snap(&["user_view_all"], &[]);
        let r = req(&["user_view_all", "user_manage"], &[], true);
        assert!(!evaluate(&s, &r));
    }

    /// Scenario C: the Administrator role overrides everything.
    #[test]
    fn scenario_c_privileged_bypass() {
        let s = snap(&[], &["Administrator"]);
        let r = req(&["nonexistent_code"], &[], true);
        assert!(evaluate(&s, &r));
    }

    /// Scenario D: the default snapshot is denied every non-empty requirement.
    #[test]
    fn scenario_d_unauthenticated_fail_closed() {
        let s = PermissionSnapshot::default();
        for r in sample_requirements() {
            if !r.is_unconstrained() {
                assert!(!evaluate(&s, &r), "unauthenticated passed {:?}", r);
            }
        }
    }

    /// Scenario E: the role list can satisfy a requirement whose permission
    /// list fails.
    #[test]
    fn scenario_e_role_list_or_match() {
        let s = snap(&["role_view"], &["Manager"]);
        let r = req(&["role_assign"], &["Manager"], false);
        assert!(evaluate(&s, &r));
    }

    // ── Properties ────────────────────────────────────────────────────────────

    #[test]
    fn privileged_passes_every_requirement() {
        let admins = [
            snap(&[], &["Administrator"]),
            snap(&["user_view_all"], &["Administrator", "Manager"]),
        ];
        for s in &admins {
            for r in sample_requirements() {
                assert!(evaluate(s, &r), "admin denied {:?}", r);
            }
            assert!(Gate::admin_only().allows(s));
        }
    }

    #[test]
    fn unauthenticated_is_never_privileged() {
        let anon = PermissionSnapshot::unauthenticated();
        assert!(!is_privileged(&anon));
        assert!(!evaluate(&anon, &AccessRequirement::none()));
    }

    /// An unconstrained requirement renders for any authenticated user.
    #[test]
    fn empty_requirement_is_permissive_when_authenticated() {
        for s in sample_snapshots() {
            let expected = s.is_authenticated();
            assert_eq!(evaluate(&s, &AccessRequirement::none()), expected);
            assert_eq!(
                evaluate(&s, &AccessRequirement::none().require_all(true)),
                expected
            );
        }
    }

    #[test]
    fn has_all_implies_has_any_for_non_empty_lists() {
        let lists: [&[&str]; 4] = [
            &["user_view_all"],
            &["user_view_all", "user_manage"],
            &["user_manage", "role_view"],
            &["x", "y", "z"],
        ];
        for s in sample_snapshots() {
            for list in lists {
                if has_all_permissions(&s, list) {
                    assert!(has_any_permission(&s, list));
                }
            }
        }
    }

    #[test]
    fn empty_lists_in_predicates() {
        let s = snap(&["user_manage"], &["Manager"]);
        let empty: &[&str] = &[];
        assert!(!has_any_permission(&s, empty));
        assert!(has_all_permissions(&s, empty));
        assert!(!has_any_role(&s, empty));
        assert!(has_all_roles(&s, empty));

        let anon = PermissionSnapshot::unauthenticated();
        assert!(!has_all_permissions(&anon, empty));
        assert!(!has_all_roles(&anon, empty));
    }

    #[test]
    fn predicates_are_exact_and_case_sensitive() {
        let s = snap(&["user_manage"], &["Manager"]);
        assert!(has_permission(&s, "user_manage"));
        assert!(!has_permission(&s, "User_Manage"));
        assert!(!has_permission(&s, "user_manage "));
        assert!(has_role(&s, "Manager"));
        assert!(!has_role(&s, "manager"));
        assert!(!is_privileged(&snap(&[], &["administrator"])));
    }

    #[test]
    fn order_independence() {
        let perms = ["user_view_all", "user_manage", "role_view"];
        let roles = ["Manager", "Auditor"];
        let reference_snap = snap(&perms, &roles);

        for r in sample_requirements() {
            let expected = evaluate(&reference_snap, &r);

            // Shuffle the snapshot.
            for p in permutations(&perms) {
                for q in permutations(&roles) {
                    assert_eq!(evaluate(&snap(&p, &q), &r), expected);
                }
            }

            // Shuffle the requirement.
            for p in permutations(&r.permissions) {
                for q in permutations(&r.roles) {
                    let shuffled = AccessRequirement {
                        permissions: p.clone(),
                        roles: q,
                        require_all: r.require_all,
                    };
                    assert_eq!(evaluate(&reference_snap, &shuffled), expected);
                }
            }
        }
    }

    #[test]
    fn duplicate_entries_do_not_change_outcomes() {
        let once = snap(&["user_manage"], &["Manager"]);
        let twice = snap(&["user_manage", "user_manage"], &["Manager", "Manager"]);
        for r in sample_requirements() {
            assert_eq!(evaluate(&once, &r), evaluate(&twice, &r));
            let mut doubled = r.clone();
            doubled.permissions.extend(r.permissions.iter().cloned());
            doubled.roles.extend(r.roles.iter().cloned());
            assert_eq!(evaluate(&once, &r), evaluate(&once, &doubled));
        }
    }

    #[test]
    fn set_snapshot_is_idempotent() {
        let once = SnapshotStore::new();
        once.set_snapshot(["user_manage", "role_view"], ["Manager"]);

        let twice = SnapshotStore::new();
        twice.set_snapshot(["user_manage", "role_view"], ["Manager"]);
        twice.set_snapshot(["user_manage", "role_view"], ["Manager"]);

        let (a, b) = (once.get_snapshot(), twice.get_snapshot());
        assert!(a.same_grants(&b));
        for r in sample_requirements() {
            assert_eq!(evaluate(&a, &r), evaluate(&b, &r));
        }
    }

    /// require_all only governs each list internally; the lists are OR'ed.
    #[test]
    fn lists_combine_with_or_even_under_require_all() {
        let s = snap(&["user_view_all"], &["Manager", "Auditor"]);

        // Permission list fails under AND, role list passes under AND.
        let both = ["user_view_all", "user_manage"];
        assert!(evaluate(&s, &req(&both, &["Manager", "Auditor"], true)));

        // Both fail under AND.
        assert!(!evaluate(&s, &req(&both, &["Manager", "Underwriter"], true)));

        // Permission-only requirement ignores roles entirely.
        assert!(!evaluate(&s, &req(&["user_manage"], &[], false)));

        // Role-only requirement ignores permissions entirely.
        assert!(!evaluate(&snap(&["user_manage"], &[]), &req(&[], &["Manager"], false)));
    }

    #[test]
    fn store_replace_is_seen_immediately() {
        let store = SnapshotStore::new();
        let r = req(&["user_manage"], &[], false);

        assert!(!evaluate(&store.get_snapshot(), &r));
        store.set_snapshot(["user_manage"], Vec::<&str>::new());
        assert!(evaluate(&store.get_snapshot(), &r));
        store.clear();
        assert!(!evaluate(&store.get_snapshot(), &r));
    }

    // ── Gate wrapper ──────────────────────────────────────────────────────────

    #[test]
    fn gate_renders_children_or_fallback() {
        let gate = Gate::permission("user_manage");
        let allowed = snap(&["user_manage"], &[]);
        let denied = snap(&["user_view_all"], &[]);

        assert_eq!(gate.render(&allowed, "delete", "read-only"), "delete");
        assert_eq!(gate.render(&denied, "delete", "read-only"), "read-only");
        assert_eq!(gate.render_or_nothing(&allowed, 7), Some(7));
        assert_eq!(gate.render_or_nothing(&denied, 7), None);
        assert_eq!(gate.decision(&denied), GateDecision::Fallback);
    }

    #[test]
    fn gate_lazy_variants_build_only_the_shown_branch() {
        let gate = Gate::role_only(["Manager"]);
        let s = snap(&[], &["Manager"]);

        let shown = gate.render_with(&s, || "children".to_string(), || panic!("fallback built"));
        assert_eq!(shown, "children");

        let auditor = snap(&[], &["Auditor"]);
        let hidden = gate.show_with(&auditor, || -> u32 { panic!("children built") });
        assert_eq!(hidden, None);
    }

    #[test]
    fn admin_only_gate_denies_non_admins() {
        let gate = Gate::admin_only();
        assert!(!gate.allows(&snap(&["user_manage", "role_manage"], &["Manager"])));
        assert!(!gate.allows(&PermissionSnapshot::default()));
        assert!(gate.allows(&snap(&[], &["Administrator"])));
    }
}
