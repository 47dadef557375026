use std::path::Path;
use std::process::{Command, Output};

fn rsyncer(config: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_rsyncer"))
        .arg("--no-log-files")
        .arg("--config")
        .arg(config)
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

fn write_config(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("rsyncer.json");
    std::fs::write(&path, r#"{"read_ssh_config": false}"#).unwrap();
    path
}

#[test]
fn resolve_prints_port_and_hosts() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    let output = rsyncer(&config, &["resolve", "user:2222@web1 web2:/srv/data"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let text = stdout(&output);
    assert!(text.contains("login: user"));
    assert!(text.contains("port:  2222"));
    assert!(text.contains("host:  web1"));
    assert!(text.contains("host:  web2"));
    assert!(text.contains("path:  /srv/data"));
}

#[test]
fn resolve_json_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    let output = rsyncer(&config, &["resolve", "--json", "ddn@10.1.1.1"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));

    let value: serde_json::Value = serde_json::from_str(&stdout(&output)).unwrap();
    assert_eq!(value["port"], 22);
    assert_eq!(value["path"], "~/");
}

#[test]
fn resolve_numeric_login_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    let output = rsyncer(&config, &["resolve", "22@host"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("22@host"));
    assert!(stdout(&output).is_empty());
}

#[test]
fn resolve_without_at_fails() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    let output = rsyncer(&config, &["resolve", "host-only"]);
    assert!(!output.status.success());
    assert!(stderr(&output).contains("host-only"));
}

#[test]
fn ips_lists_unique_addresses() {
    let tmp = tempfile::tempdir().unwrap();
    let config = write_config(tmp.path());

    let output = rsyncer(
        &config,
        &["ips", "a 192.168.0.10 b", "192.168.0.10 10.0.0.1"],
    );
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert_eq!(stdout(&output), "10.0.0.1\n192.168.0.10\n");
}

#[test]
fn invalid_config_is_rejected() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("rsyncer.json");
    std::fs::write(&config, r#"{"run_name": "bad name!"}"#).unwrap();

    let output = rsyncer(&config, &["ips", "10.0.0.1"]);
    assert!(!output.status.success());
    assert!(stderr(&output).starts_with("error:"));
}

#[test]
fn init_config_writes_defaults() {
    let tmp = tempfile::tempdir().unwrap();
    let config = tmp.path().join("fresh.json");

    let output = rsyncer(&config, &["init-config"]);
    assert!(output.status.success(), "stderr: {}", stderr(&output));
    assert!(config.exists());

    let written: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&config).unwrap()).unwrap();
    assert_eq!(written["run_name"], "run");
}
