use std::hash::Hasher;
use std::process::Command;

use twox_hash::XxHash64;

fn temp_path(label: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!(
        "carpet-cli-{label}-{}",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos()
    ))
}

#[test]
fn cli_list_scenarios_writes_output() {
    let exe = env!("CARGO_BIN_EXE_carpet-tester");
    let output_path = temp_path("list");
    let status = Command::new(exe)
        .args(["--list-scenarios", "--output"])
        .arg(&output_path)
        .status()
        .expect("run cli");
    assert!(status.success());
    let content = std::fs::read_to_string(output_path).expect("read output");
    assert!(content.contains("Available scenarios"));
    assert!(content.contains("resolver-sweep"));
}

#[test]
fn cli_runs_all_scenarios_with_json_report() {
    let exe = env!("CARGO_BIN_EXE_carpet-tester");
    let output_path = temp_path("run");
    let output = Command::new(exe)
        .args([
            "--report",
            "json",
            "--scenarios",
            "all",
            "--iterations",
            "2",
            "--seeds",
            "1,0x2A",
            "--output",
        ])
        .arg(&output_path)
        .output()
        .expect("run cli");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Magic Carpet Customizer Tester"));

    let content = std::fs::read_to_string(output_path).expect("read report");
    let report: serde_json::Value = serde_json::from_str(&content).expect("report is json");
    let runs = report.as_array().expect("array of results");
    assert_eq!(runs.len(), 7 * 2);
    assert!(runs.iter().all(|run| run["passed"] == true));
    assert!(runs.iter().any(|run| run["seed"] == 42));
}

#[test]
fn cli_rejects_bad_seed() {
    let exe = env!("CARGO_BIN_EXE_carpet-tester");
    let output = Command::new(exe)
        .args(["--seeds", "forty-two"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("forty-two"));
}

#[test]
fn cli_renders_placeholder_svg() {
    let exe = env!("CARGO_BIN_EXE_carpet-tester");
    let first_path = temp_path("render-a");
    let second_path = temp_path("render-b");
    for path in [&first_path, &second_path] {
        let status = Command::new(exe)
            .args([
                "--render-key",
                "images/patterns/floral.svg",
                "--color",
                "#58CC02",
                "--output",
            ])
            .arg(path)
            .status()
            .expect("run cli");
        assert!(status.success());
    }

    let first = std::fs::read_to_string(first_path).expect("read svg");
    let second = std::fs::read_to_string(second_path).expect("read svg");
    assert!(first.starts_with("<svg"));
    assert!(first.contains("#58CC02"));

    let digest = |markup: &str| {
        let mut hasher = XxHash64::with_seed(0);
        hasher.write(markup.as_bytes());
        hasher.finish()
    };
    assert_eq!(digest(&first), digest(&second));
}

#[test]
fn cli_render_alt_requires_key() {
    let exe = env!("CARGO_BIN_EXE_carpet-tester");
    let output = Command::new(exe)
        .args(["--render-alt", "Duo the owl"])
        .output()
        .expect("run cli");
    assert!(!output.status.success());
}
