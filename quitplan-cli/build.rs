use std::process::Command;

// Stamp the binary with the short commit it was built from, for `quitplan --version`.
fn main() {
    println!("cargo:rerun-if-changed=../.git/HEAD");

    let sha = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=QUITPLAN_BUILD_SHA={sha}");
}
