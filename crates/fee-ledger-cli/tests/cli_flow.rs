use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

fn bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_feeledger"))
}

/// Isolated XDG homes so tests never see the user's config or ledger.
struct Sandbox {
    root: TempDir,
}

impl Sandbox {
    fn new() -> Self {
        Self {
            root: tempfile::tempdir().expect("tempdir"),
        }
    }

    fn config_home(&self) -> PathBuf {
        self.root.path().join("config")
    }

    fn data_home(&self) -> PathBuf {
        self.root.path().join("data")
    }

    fn path(&self, name: &str) -> PathBuf {
        self.root.path().join(name)
    }

    fn run(&self, args: &[&str]) -> Output {
        Command::new(bin())
            .args(args)
            .env("XDG_CONFIG_HOME", self.config_home())
            .env("XDG_DATA_HOME", self.data_home())
            .env("NO_COLOR", "1")
            .env_remove("FEELEDGER_PATH")
            .env_remove("FEELEDGER_CONFIG")
            .env_remove("RUST_LOG")
            .stdin(Stdio::null())
            .output()
            .expect("run feeledger")
    }

    fn ok(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            output.status.success(),
            "feeledger {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).expect("utf8 stdout")
    }
}

fn add_student(sandbox: &Sandbox, name: &str, room: &str) -> String {
    sandbox
        .ok(&[
            "-q",
            "student",
            "add",
            "--name",
            name,
            "--room",
            room,
            "--lunch-type",
            "veg",
        ])
        .trim()
        .to_string()
}

fn add_payment(sandbox: &Sandbox, student: &str, total: &str, paid: &str, date: &str) -> String {
    sandbox
        .ok(&[
            "-q",
            "payment",
            "add",
            "--student",
            student,
            "--total-fees",
            total,
            "--paid",
            paid,
            "--date",
            date,
        ])
        .trim()
        .to_string()
}

fn read_json(path: &Path) -> serde_json::Value {
    let contents = std::fs::read_to_string(path).expect("read json");
    serde_json::from_str(&contents).expect("parse json")
}

#[test]
fn test_init_creates_config_and_database() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);

    let config = sandbox.config_home().join("feeledger").join("config.toml");
    let database = sandbox.data_home().join("feeledger").join("fees.db");
    assert!(config.exists(), "config file should exist");
    assert!(database.exists(), "database should exist");

    let contents = std::fs::read_to_string(&config).expect("read config");
    assert!(contents.contains("[ledger]"));
    assert!(contents.contains("currency_symbol"));

    let again = sandbox.run(&["init"]);
    assert_eq!(again.status.code(), Some(4), "re-init must not overwrite");
}

#[test]
fn test_dashboard_flow() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);

    let asha = add_student(&sandbox, "Asha", "101");
    let bilal = add_student(&sandbox, "Bilal", "102");
    add_payment(&sandbox, &asha, "1000", "1000", "2024-06-01");
    add_payment(&sandbox, &asha, "500", "200", "2024-06-02");
    add_payment(&sandbox, &bilal, "800", "800", "2024-06-03");

    let summary = sandbox.ok(&["summary"]);
    assert!(summary.contains("students=2"), "summary: {}", summary);
    assert!(summary.contains("payments=3"), "summary: {}", summary);
    assert!(summary.contains("total_pending=300.00"), "summary: {}", summary);

    let pending: serde_json::Value =
        serde_json::from_str(&sandbox.ok(&["pending", "--json"])).expect("pending json");
    let pending = pending.as_array().expect("array");
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0]["student"]["name"], "Asha");
    assert_eq!(pending[0]["pending"], "300");

    let listed = sandbox.ok(&["list", "ASH"]);
    assert!(listed.contains("Asha"));
    assert!(!listed.contains("Bilal"));

    let rows: serde_json::Value =
        serde_json::from_str(&sandbox.ok(&["list", "--json"])).expect("list json");
    assert_eq!(rows.as_array().expect("array").len(), 2);
    assert_eq!(rows[0]["last_payment"], "2024-06-02");

    let payments: serde_json::Value =
        serde_json::from_str(&sandbox.ok(&["payments", &asha, "--json"])).expect("payments json");
    assert_eq!(payments["payments"].as_array().expect("array").len(), 2);
    assert_eq!(payments["totals"]["total_balance"], "300");
}

#[test]
fn test_student_id_prefix_is_accepted() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);
    let asha = add_student(&sandbox, "Asha", "101");

    let prefix = &asha[..asha.len() - 4];
    add_payment(&sandbox, prefix, "100", "40", "2024-06-01");

    let summary = sandbox.ok(&["summary"]);
    assert!(summary.contains("total_pending=60.00"), "summary: {}", summary);
}

#[test]
fn test_cascade_delete_flow() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);

    let s1 = add_student(&sandbox, "Asha", "101");
    let s2 = add_student(&sandbox, "Bilal", "102");
    add_payment(&sandbox, &s1, "100", "50", "2024-01-01");
    add_payment(&sandbox, &s1, "100", "50", "2024-01-02");
    let p3 = add_payment(&sandbox, &s2, "100", "50", "2024-01-03");

    let refused = sandbox.run(&["delete", &s1]);
    assert_eq!(
        refused.status.code(),
        Some(4),
        "delete without --yes and without a TTY must refuse"
    );

    let out = sandbox.ok(&["delete", &s1, "--yes"]);
    assert!(out.contains("payments_deleted=2"), "delete: {}", out);

    let second = sandbox.run(&["delete", &s1, "--yes"]);
    assert_eq!(second.status.code(), Some(3));

    let export_path = sandbox.path("export.json");
    sandbox.ok(&["export", "--output", export_path.to_str().expect("utf8 path")]);
    let export = read_json(&export_path);
    let students = export["students"].as_array().expect("students");
    let payments = export["payments"].as_array().expect("payments");
    assert_eq!(students.len(), 1);
    assert_eq!(students[0]["id"], s2.as_str());
    assert_eq!(payments.len(), 1);
    assert_eq!(payments[0]["id"], p3.as_str());

    sandbox.ok(&["check"]);
    let sweep = sandbox.ok(&["sweep"]);
    assert!(sweep.contains("No orphan payments"), "sweep: {}", sweep);
}

#[test]
fn test_payment_for_missing_student_is_not_found() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);

    let output = sandbox.run(&[
        "payment",
        "add",
        "--student",
        "no-such-student",
        "--total-fees",
        "10",
        "--paid",
        "5",
    ]);
    assert_eq!(output.status.code(), Some(3));
}

#[test]
fn test_negative_amount_is_rejected_and_garbage_is_zero() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);
    let asha = add_student(&sandbox, "Asha", "101");

    let negative = sandbox.run(&[
        "payment",
        "add",
        "--student",
        &asha,
        "--total-fees",
        "-10",
        "--paid",
        "0",
    ]);
    assert_eq!(negative.status.code(), Some(4));

    add_payment(&sandbox, &asha, "abc", "100", "2024-06-01");
    let summary = sandbox.ok(&["summary"]);
    assert!(summary.contains("total_pending=-100.00"), "summary: {}", summary);
}

#[test]
fn test_balance_preview_needs_no_ledger() {
    let sandbox = Sandbox::new();
    let out = sandbox.ok(&["balance", "--total-fees", "500", "--paid", "300"]);
    assert_eq!(out.trim(), "balance=200.00");

    let out = sandbox.ok(&["balance", "--paid", "100"]);
    assert_eq!(out.trim(), "balance=-100.00");
}

#[test]
fn test_out_of_range_amounts_are_invalid_input() {
    let sandbox = Sandbox::new();
    let preview = sandbox.run(&[
        "balance",
        "--total-fees",
        "79228162514264337593543950335",
        "--paid",
        "-1",
    ]);
    assert_eq!(preview.status.code(), Some(4));

    sandbox.ok(&["init"]);
    let asha = add_student(&sandbox, "Asha", "101");
    let output = sandbox.run(&[
        "payment",
        "add",
        "--student",
        &asha,
        "--total-fees",
        "79228162514264337593543950335",
        "--paid",
        "0",
    ]);
    assert_eq!(output.status.code(), Some(4));

    let summary = sandbox.ok(&["summary"]);
    assert!(summary.contains("payments=0"), "summary: {}", summary);
}

#[test]
fn test_missing_ledger_is_not_found() {
    let sandbox = Sandbox::new();
    let output = sandbox.run(&["summary"]);
    assert_eq!(output.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("feeledger init"), "stderr: {}", stderr);
}

#[test]
fn test_explicit_ledger_flag_and_backup() {
    let sandbox = Sandbox::new();
    let ledger = sandbox.path("custom.db");
    let ledger_arg = ledger.to_str().expect("utf8 path");
    sandbox.ok(&["init", ledger_arg]);
    assert!(ledger.exists());

    add_student(&sandbox, "Asha", "101");

    let backup = sandbox.path("backups").join("fees-copy.db");
    let backup_arg = backup.to_str().expect("utf8 path");
    sandbox.ok(&["backup", backup_arg]);
    assert!(backup.exists());

    let listed = sandbox.ok(&["--ledger", backup_arg, "list"]);
    assert!(listed.contains("Asha"));
}

#[test]
fn test_invalid_date_is_rejected() {
    let sandbox = Sandbox::new();
    sandbox.ok(&["init"]);
    let asha = add_student(&sandbox, "Asha", "101");

    let output = sandbox.run(&[
        "payment",
        "add",
        "--student",
        &asha,
        "--total-fees",
        "10",
        "--paid",
        "5",
        "--date",
        "01/06/2024",
    ]);
    assert_eq!(output.status.code(), Some(4));
}
