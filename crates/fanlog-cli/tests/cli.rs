use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;

fn fanlog() -> Command {
    let mut cmd = Command::cargo_bin("fanlog").unwrap();
    cmd.env_remove("FANLOG_CONFIG")
        .env_remove("FANLOG_DEFAULT_LOGGER")
        .arg("--no-color");
    cmd
}

#[test]
fn test_levels_in_order() {
    let output = fanlog().arg("levels").assert().success().get_output().stdout.clone();
    let stdout = String::from_utf8(output).unwrap();
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().nth(2))
        .collect();

    assert_eq!(
        names,
        vec!["verbose", "debug", "info", "warning", "error", "fatal", "wtf"]
    );
}

#[test]
fn test_emit_defaults_to_stdout() {
    fanlog()
        .args(["emit", "--level", "warning", "disk almost full"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[WARN] default: disk almost full"));
}

#[test]
fn test_emit_through_configured_file_sink() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let config_path = dir.path().join("fanlog.yml");
    fs::write(
        &config_path,
        format!(
            "default_logger: service\nsinks:\n  - type: file\n    path: {}\n    level: info\n",
            log_path.display()
        ),
    )
    .unwrap();

    fanlog()
        .args(["emit", "--config"])
        .arg(&config_path)
        .args(["--level", "error", "--error", "connection reset", "request failed"])
        .assert()
        .success();

    fanlog()
        .args(["emit", "--config"])
        .arg(&config_path)
        .args(["--logger", "Db", "--level", "debug", "filtered out"])
        .assert()
        .success();

    let contents = fs::read_to_string(&log_path).unwrap();
    assert_eq!(contents.lines().count(), 1);
    assert!(contents.contains("ERRO service request failed | error: connection reset"));
}

#[test]
fn test_emit_reports_failed_sink() {
    let dir = tempfile::tempdir().unwrap();
    let log_path = dir.path().join("app.log");
    let config_path = dir.path().join("fanlog.yml");
    // Port 9 (discard) is closed on loopback
    fs::write(
        &config_path,
        format!(
            "sinks:\n  - type: http\n    name: remote\n    url: http://127.0.0.1:9/ingest\n    timeout_secs: 2\n  - type: file\n    path: {}\n",
            log_path.display()
        ),
    )
    .unwrap();

    fanlog()
        .args(["emit", "--config"])
        .arg(&config_path)
        .arg("still delivered locally")
        .assert()
        .failure()
        .stderr(predicate::str::contains("sink 'remote' failed"))
        .stderr(predicate::str::contains("1 of 2 sinks failed"));

    assert!(fs::read_to_string(&log_path)
        .unwrap()
        .contains("still delivered locally"));
}

#[test]
fn test_emit_rejects_unknown_level() {
    fanlog()
        .args(["emit", "--level", "loud", "hi"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("loud"));
}

#[test]
fn test_check_config() {
    let dir = tempfile::tempdir().unwrap();
    let good = dir.path().join("good.yml");
    fs::write(
        &good,
        "default_logger: api\nsinks:\n  - type: console\n    level: warning\n  - type: http\n    name: collector\n    url: https://logs.example.com/v1\n",
    )
    .unwrap();

    fanlog()
        .arg("check-config")
        .arg(&good)
        .assert()
        .success()
        .stdout(predicate::str::contains("default logger: api"))
        .stdout(predicate::str::contains("console (console, level >= warning)"))
        .stdout(predicate::str::contains("collector (http, level >= verbose)"));

    let bad = dir.path().join("bad.yml");
    fs::write(&bad, "sinks:\n  - type: file\n    path: \"\"\n").unwrap();
    fanlog()
        .arg("check-config")
        .arg(&bad)
        .assert()
        .failure()
        .stderr(predicate::str::contains("file sink requires a path"));

    fanlog()
        .arg("check-config")
        .arg(dir.path().join("missing.yml"))
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}
