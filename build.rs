use std::process::Command;

fn git(args: &[&str]) -> String {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn main() {
    // Re-run if git HEAD changes
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/index");

    let hash = git(&["rev-parse", "--short", "HEAD"]);
    let commit_date = git(&["log", "-1", "--format=%cd", "--date=format:%Y-%m-%d"]);

    println!(
        "cargo:rustc-env=GIT_HASH={}",
        if hash.is_empty() { "unknown" } else { &hash }
    );
    println!(
        "cargo:rustc-env=GIT_COMMIT_DATE={}",
        if commit_date.is_empty() { "undated" } else { &commit_date }
    );
}
