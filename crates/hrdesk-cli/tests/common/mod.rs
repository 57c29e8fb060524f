use std::path::Path;
use std::process::{Command, Output};

/// Run the CLI against `api_url` with an isolated session file.
pub fn run_cli(args: &[&str], session_file: &Path, api_url: &str) -> Output {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_hrdesk"));
    cmd.args(args);
    cmd.env("HRDESK_API_URL", api_url);
    cmd.env("HRDESK_SESSION_FILE", session_file);
    cmd.env_remove("RUST_LOG");
    cmd.output().expect("Failed to execute CLI")
}

/// Run the CLI and expect success.
pub fn run_cli_success(args: &[&str], session_file: &Path, api_url: &str) -> String {
    let output = run_cli(args, session_file, api_url);
    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        panic!("CLI command failed: {:?}\nstderr: {}", args, stderr);
    }
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Write a session file holding the given tokens.
pub fn write_session(session_file: &Path, access: &str, refresh: &str) {
    let json = serde_json::json!({"accessToken": access, "refreshToken": refresh});
    std::fs::write(session_file, json.to_string()).unwrap();
}

/// Read the tokens stored in a session file.
pub fn read_session(session_file: &Path) -> Option<serde_json::Value> {
    let raw = std::fs::read_to_string(session_file).ok()?;
    serde_json::from_str(&raw).ok()
}
