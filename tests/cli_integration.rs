//! End-to-end runs of the `home-grid` binary.

use std::process::Command;

fn run(args: &[&str]) -> (bool, String, String) {
    let output = Command::new(env!("CARGO_BIN_EXE_home-grid"))
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .expect("home-grid process should run");
    (
        output.status.success(),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}

#[test]
fn default_run_prints_demo_state_and_report() {
    let (ok, stdout, stderr) = run(&[]);
    assert!(ok, "stderr={stderr}");
    assert!(stdout.contains("battery= 85%"), "stdout={stdout}");
    assert!(stdout.contains("zones allowed=4"));
    assert!(stdout.contains("total=370 W"));
    assert!(stdout.contains("--- Energy Report ---"));
}

#[test]
fn scenario_file_drives_the_household() {
    let (ok, stdout, stderr) = run(&["--scenario", "scenarios/apartment.toml"]);
    assert!(ok, "stderr={stderr}");
    assert!(stdout.contains("battery= 45%"), "stdout={stdout}");
    assert!(stdout.contains("zones allowed=3"));
    assert!(stdout.contains("total=330 W"));
}

#[test]
fn battery_override_is_clamped_with_a_warning() {
    let (ok, stdout, stderr) = run(&["--preset", "empty", "--battery", "-20"]);
    assert!(ok, "stderr={stderr}");
    assert!(stdout.contains("battery=  0%"), "stdout={stdout}");
    assert!(stdout.contains("zones allowed=1"));
    assert!(stdout.contains("Autonomy at   0%:      ∞"));
    assert!(stderr.contains("clamping"), "stderr={stderr}");
}

#[test]
fn unknown_preset_fails() {
    let (ok, _, stderr) = run(&["--preset", "mansion"]);
    assert!(!ok);
    assert!(stderr.contains("unknown preset"), "stderr={stderr}");
}

#[test]
fn report_out_writes_csv() {
    let path = std::env::temp_dir().join(format!("home-grid-report-{}.csv", std::process::id()));
    let path_str = path.to_string_lossy().into_owned();
    let (ok, _, stderr) = run(&["--report-out", &path_str]);
    assert!(ok, "stderr={stderr}");

    let csv = std::fs::read_to_string(&path).expect("report should exist");
    let _ = std::fs::remove_file(&path);
    assert!(csv.starts_with("zone_id,zone,admitted,device_id"));
    assert_eq!(csv.lines().count(), 8);
}
