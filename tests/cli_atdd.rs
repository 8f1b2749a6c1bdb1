#![allow(deprecated)]

use assert_cmd::Command;
use chrono::{Duration, Utc};
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const POLICY: &str = r#"
min_account_age_in_days = 365
label_filters = ["Solidity"]

[xp_tiers]
Junior = 5
Mid = 20
Pro = 50

[stat_thresholds]
stars = 1
min_commits = 1
prs = 1
issues = 1

[retry]
attempts = 2
backoff_ms = 0
"#;

struct Workspace {
    root: TempDir,
    home: TempDir,
}

impl Workspace {
    fn new(policy: Option<&str>) -> Self {
        let root = TempDir::new().expect("temp dir should be created");
        let home = TempDir::new().expect("home dir should be created");
        if let Some(policy) = policy {
            fs::write(root.path().join("xpguard.toml"), policy).expect("policy should write");
        }
        fs::write(root.path().join("signals.json"), snapshot()).expect("signals should write");
        Self { root, home }
    }

    fn path(&self) -> &Path {
        self.root.path()
    }

    fn work_item(&self, assignees: &[&str], labels: &[&str]) {
        let item = serde_json::json!({
            "number": 42,
            "assignees": assignees,
            "labels": labels,
        });
        fs::write(self.path().join("item.json"), item.to_string()).expect("work item should write");
    }

    fn command(&self) -> Command {
        let mut cmd = Command::cargo_bin("xpguard").expect("binary should compile");
        cmd.env("HOME", self.home.path()).env_remove("RUST_LOG");
        cmd
    }

    fn evaluate(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("evaluate")
            .arg(self.path())
            .arg("--work-item")
            .arg(self.path().join("item.json"))
            .arg("--signals")
            .arg(self.path().join("signals.json"));
        cmd
    }
}

fn days_ago(days: i64) -> String {
    (Utc::now() - Duration::days(days)).to_rfc3339()
}

fn snapshot() -> String {
    serde_json::json!({
        "users": {
            "veteran": {
                "created_at": days_ago(400),
                "languages": [
                    { "size": 100, "name": "Solidity", "color": "#AA6746" },
                    { "size": 1000, "name": "TypeScript", "color": "#3178c6" },
                    { "size": 100, "name": "Shell" }
                ],
                "counters": { "total_commits": 120, "total_prs": 8, "total_issues": 5, "total_stars": 3 }
            },
            "auditor": {
                "created_at": days_ago(2000),
                "languages": [{ "size": 900, "name": "Solidity" }, { "size": 100, "name": "Rust" }],
                "counters": { "total_commits": 800, "total_prs": 40, "total_issues": 12, "total_stars": 60 }
            },
            "newbie": {
                "created_at": days_ago(30),
                "counters": { "total_commits": 2, "total_prs": 1, "total_issues": 1, "total_stars": 1 }
            },
            "lead": { "role": "owner" },
            "flaky": { "error": "502 Bad Gateway" }
        }
    })
    .to_string()
}

#[test]
fn evaluate_passes_qualified_assignee() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["auditor"], &["Solidity: (Pro)"]);

    ws.evaluate()
        .arg("--format")
        .arg("json")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("\"user\": \"auditor\""))
        .stdout(predicate::str::contains("\"passed\": true"));
}

#[test]
fn evaluate_blocks_when_tier_is_not_met() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["veteran"], &["Solidity: (Mid)"]);

    ws.evaluate()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[failed] veteran"))
        .stdout(predicate::str::contains(
            "veteran does not meet the required tier for solidity",
        ));
}

#[test]
fn evaluate_skips_language_gate_for_untagged_item() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["veteran"], &["Priority: (High)"]);

    ws.evaluate()
        .assert()
        .code(0)
        .stdout(predicate::str::contains("none (language gate skipped)"))
        .stdout(predicate::str::contains("[passed] veteran"));
}

#[test]
fn evaluate_rejects_item_without_assignees() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&[], &["Solidity: (Mid)"]);

    ws.evaluate()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("has no assignees"));
}

#[test]
fn evaluate_isolates_failing_users() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["flaky", "ghost", "auditor", "lead"], &["Solidity: (Junior)"]);

    ws.evaluate()
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[failed] flaky"))
        .stdout(predicate::str::contains("giving up after 2 attempts"))
        .stdout(predicate::str::contains("[failed] ghost"))
        .stdout(predicate::str::contains("user not found: ghost"))
        .stdout(predicate::str::contains("[passed] auditor"))
        .stdout(predicate::str::contains("[bypassed] lead"));
}

#[test]
fn evaluate_apply_unassigns_failing_users() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["newbie", "auditor"], &["Solidity: (Junior)"]);

    ws.evaluate()
        .arg("--apply")
        .assert()
        .code(2)
        .stdout(predicate::str::contains("notice: @newbie"))
        .stdout(predicate::str::contains("minimum account age requirement of 365 days"))
        .stdout(predicate::str::contains("unassign: newbie"))
        .stdout(predicate::str::contains("unassign: auditor").not());
}

#[test]
fn evaluate_warns_without_policy_file() {
    let ws = Workspace::new(None);
    ws.work_item(&["auditor"], &["Solidity: (Mid)"]);

    ws.evaluate()
        .assert()
        .code(1)
        .stderr(predicate::str::contains("no xpguard.toml found"));
}

#[test]
fn evaluate_reports_missing_snapshot() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["auditor"], &[]);

    ws.command()
        .arg("evaluate")
        .arg(ws.path())
        .arg("--work-item")
        .arg(ws.path().join("item.json"))
        .arg("--signals")
        .arg(ws.path().join("absent.json"))
        .assert()
        .code(3)
        .stderr(predicate::str::contains("path does not exist"));
}

#[test]
fn labels_collapses_duplicates() {
    let ws = Workspace::new(Some(POLICY));

    ws.command()
        .arg("labels")
        .arg(ws.path())
        .arg("Solidity: (Junior)")
        .arg("Solidity: (Pro)")
        .arg("Time: (1 Week)")
        .assert()
        .code(0)
        .stdout(predicate::str::contains("- solidity (pro)"))
        .stdout(predicate::str::contains("time").not())
        .stdout(predicate::str::contains("dropped junior"));
}

#[test]
fn lint_prints_effective_policy() {
    let ws = Workspace::new(Some(POLICY));

    ws.command()
        .arg("lint")
        .arg(ws.path())
        .assert()
        .code(0)
        .stdout(predicate::str::contains("tier mid: 20%"))
        .stdout(predicate::str::contains("label_filters: Solidity"))
        .stdout(predicate::str::contains("tier junior: 5%"))
        .stdout(predicate::str::contains("layers: repo"));
}

#[test]
fn lint_falls_back_to_defaults_with_warning() {
    let ws = Workspace::new(None);

    ws.command()
        .arg("lint")
        .arg(ws.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("layers: defaults"))
        .stdout(predicate::str::contains("tier pro: 50%"))
        .stderr(predicate::str::contains("no xpguard.toml found"));
}

#[test]
fn evaluate_rejects_snapshot_with_case_colliding_logins() {
    let ws = Workspace::new(Some(POLICY));
    ws.work_item(&["auditor"], &[]);
    fs::write(
        ws.path().join("signals.json"),
        r#"{ "users": { "Auditor": {}, "auditor": {} } }"#,
    )
    .expect("signals should write");

    ws.evaluate()
        .assert()
        .code(3)
        .stderr(predicate::str::contains("more than once"));
}

#[test]
fn lint_rejects_invalid_policy() {
    let ws = Workspace::new(Some(
        r#"
[xp_tiers]
Mid = 20
MID = 30
"#,
    ));

    ws.command()
        .arg("lint")
        .arg(ws.path())
        .assert()
        .code(3)
        .stderr(predicate::str::contains("config parse error"));
}
