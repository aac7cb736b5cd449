use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use tempfile::TempDir;

pub const API_KEY: &str = "cli-test-key";

/// Write a config file pointing both APIs at `host`.
pub fn write_config(dir: &TempDir, host: &str, surface: &str) -> PathBuf {
    let path = dir.path().join("config.json");
    let config = serde_json::json!({
        "management_host": host,
        "recognition_host": host,
        "surface": surface,
    });
    std::fs::write(&path, config.to_string()).expect("Failed to write config");
    path
}

/// Run the CLI binary with an isolated home and the given config.
pub fn run_cli(args: &[&str], config: &Path, api_key: Option<&str>) -> Output {
    let home = config.parent().expect("config has a parent directory");

    let mut cmd = Command::new(env!("CARGO_BIN_EXE_craftar"));
    cmd.arg("--config").arg(config);
    cmd.args(args);
    cmd.env("HOME", home);
    cmd.env("XDG_CONFIG_HOME", home.join("config"));
    cmd.env("NO_COLOR", "1");
    cmd.env_remove("RUST_LOG");
    match api_key {
        Some(key) => cmd.env("CRAFTAR_API_KEY", key),
        None => cmd.env_remove("CRAFTAR_API_KEY"),
    };
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI off the async runtime so the mock server keeps serving.
pub async fn run_cli_async(args: &[&str], config: &Path, api_key: Option<&str>) -> Output {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let config = config.to_path_buf();
    let api_key = api_key.map(str::to_string);

    tokio::task::spawn_blocking(move || {
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        run_cli(&args, &config, api_key.as_deref())
    })
    .await
    .expect("CLI task panicked")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}

/// Assert success and return stdout.
pub fn expect_success(output: &Output, args: &[&str]) -> String {
    if !output.status.success() {
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr(output));
    }
    stdout(output)
}
