//! Embeds the version reported by `craftar --version` as `CRAFTAR_VERSION`.
//!
//! Builds from a git checkout append the abbreviated commit to the package
//! version (`0.1.0+3f2a9c1`); anything else reports the package version.

use std::path::Path;
use std::process::Command;

fn main() {
    let git_dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../.git");
    for watched in ["HEAD", "index"] {
        let path = git_dir.join(watched);
        if path.exists() {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    let package = env!("CARGO_PKG_VERSION");
    let version = match head_commit() {
        Some(commit) => format!("{package}+{commit}"),
        None => package.to_string(),
    };

    println!("cargo:rustc-env=CRAFTAR_VERSION={version}");
}

fn head_commit() -> Option<String> {
    let output = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())?;

    let commit = String::from_utf8(output.stdout).ok()?;
    let commit = commit.trim();
    (!commit.is_empty()).then(|| commit.to_string())
}
