//! Build script for rayframe
//!
//! Sets compile-time environment variables for build identification and,
//! with the `raylib` feature, points the linker at `RAYLIB_LIB_DIR`.

use std::env;
use std::process::Command;

fn command_output(program: &str, args: &[&str]) -> Option<String> {
    Command::new(program)
        .args(args)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
}

fn main() {
    let date = command_output("date", &["+%Y-%m-%d"]).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=BUILD_DATE={}", date);

    let time = command_output("date", &["+%H:%M:%S"]).unwrap_or_default();
    println!("cargo:rustc-env=BUILD_TIME={}", time);

    let git_hash = command_output("git", &["rev-parse", "--short", "HEAD"])
        .unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=GIT_HASH={}", git_hash);

    if env::var_os("CARGO_FEATURE_RAYLIB").is_some() {
        if let Some(dir) = env::var_os("RAYLIB_LIB_DIR") {
            println!("cargo:rustc-link-search=native={}", dir.to_string_lossy());
        }
        println!("cargo:rerun-if-env-changed=RAYLIB_LIB_DIR");
    }

    println!("cargo:rerun-if-changed=.git/HEAD");
}
