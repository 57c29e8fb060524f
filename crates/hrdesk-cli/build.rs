//! Build script to capture git version information at compile time.

use std::process::Command;

fn main() {
    // Rerun when the checked-out commit or tags move
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-env-changed=HRDESK_VERSION");

    // Packagers building from a source tarball have no git metadata and can
    // pin the version explicitly; otherwise ask git, then fall back to the
    // crate version
    let version = std::env::var("HRDESK_VERSION")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .or_else(get_git_version)
        .unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string());

    println!("cargo:rustc-env=HRDESK_VERSION={}", version);
}

fn get_git_version() -> Option<String> {
    // Nearest tag plus commit distance, or a bare hash when untagged
    let output = Command::new("git")
        .args(["describe", "--tags", "--always"])
        .output()
        .ok()?;

    if !output.status.success() {
        return None;
    }

    let version = String::from_utf8(output.stdout).ok()?;
    let version = version.trim();

    if version.is_empty() {
        return None;
    }

    // Release tags are `v1.2.3`; `hrdesk --version` shows `1.2.3`
    let version = version.strip_prefix('v').unwrap_or(version);

    Some(version.to_string())
}
