mod harness;

use harness::TestContext;
use predicates::prelude::*;

#[test]
fn provision_runs_every_step_and_patches_config() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["provision", "--yes"])
        .assert()
        .success()
        .stdout(predicate::str::contains("9 step(s) completed, 1 skipped"));

    assert!(ctx.runtime_dir().is_dir());
    assert_eq!(
        ctx.line_after("[database]").as_deref(),
        Some("connection = sqlite:////home/mistral/mistral.sqlite")
    );
    assert_eq!(ctx.line_after("[oslo_messaging_rabbit]").as_deref(), Some("rabbit_host = rabbitmq"));
    assert_eq!(ctx.line_after("[pecan]").as_deref(), Some("auth_enable = false"));
}

#[test]
fn provision_invokes_tools_in_order() {
    let ctx = TestContext::new();

    ctx.cli().args(["provision", "--yes"]).assert().success();

    let programs: Vec<String> = ctx
        .tools
        .log_lines()
        .iter()
        .map(|line| line.split_whitespace().next().unwrap_or_default().to_string())
        .collect();
    assert_eq!(
        programs,
        ["apt-get", "apt-get", "pip", "pip", "pip", "oslo-config-generator", "python"]
    );

    let log = ctx.tools.log();
    assert!(log.contains("apt-get [frontend=noninteractive] update"));
    assert!(log.contains(
        "apt-get [frontend=noninteractive] install -y build-essential libssl-dev git"
    ));
    assert!(log.contains("pip [frontend=unset] install pbr==1.10.0 tox==2.3.1"));
    assert!(log.contains("pip [frontend=unset] install -r requirements.txt"));
    assert!(log.contains("python [frontend=unset] tools/sync_db.py --config-file"));
}

#[test]
fn package_failure_stops_the_run_with_its_exit_code() {
    let ctx = TestContext::new();
    ctx.tools.fail("apt-get", 100);

    ctx.cli()
        .args(["provision", "--yes"])
        .assert()
        .code(100)
        .stderr(predicate::str::contains("install-packages"));

    assert_eq!(ctx.tools.log_lines().len(), 1);
    assert!(!ctx.runtime_dir().exists());
}

#[test]
fn missing_generated_config_fails_before_schema_sync() {
    let ctx = TestContext::new();
    ctx.tools.noop("oslo-config-generator");

    ctx.cli()
        .args(["provision", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("was not generated"));

    assert!(!ctx.tools.log().contains("python "));
}

#[test]
fn missing_source_checkout_is_reported() {
    let ctx = TestContext::new();
    std::fs::remove_dir_all(ctx.source_dir()).unwrap();

    ctx.cli()
        .args(["provision", "--yes"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Source directory not found"));
}

#[test]
fn second_run_does_not_duplicate_settings() {
    let ctx = TestContext::new();
    ctx.cli().args(["provision", "--yes"]).assert().success();
    let first = ctx.read_config();

    // Keep the patched file in place so the second run patches it again.
    ctx.tools.noop("oslo-config-generator");
    ctx.cli().args(["provision", "--yes"]).assert().success();

    assert_eq!(ctx.read_config(), first);
    assert_eq!(first.matches("rabbit_host = rabbitmq").count(), 1);
}

#[test]
fn provision_refuses_without_confirmation_when_not_interactive() {
    let ctx = TestContext::new();

    ctx.cli()
        .arg("provision")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--yes"));

    assert!(ctx.tools.log().is_empty());
}

#[test]
fn dry_run_touches_nothing() {
    let ctx = TestContext::new();

    ctx.cli()
        .args(["provision", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Provisioning plan (10 steps):"));

    assert!(ctx.tools.log().is_empty());
    assert!(!ctx.runtime_dir().exists());
}

#[test]
fn json_report_lists_step_states() {
    let ctx = TestContext::new();

    let output = ctx.cli().args(["provision", "--yes", "--format", "json"]).output().unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let steps = report["steps"].as_array().unwrap();
    assert_eq!(steps.len(), 10);
    assert_eq!(steps[0]["name"], "install-packages");
    assert_eq!(steps[0]["status"]["state"], "completed");
    assert_eq!(steps[9]["status"]["state"], "skipped");
    assert_eq!(report["dry_run"], false);
}
