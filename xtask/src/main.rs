// Bible Guide - Task Runner
// cargo xtask <command>

use anyhow::{Context, Result};
use xshell::{cmd, Shell};

fn main() -> Result<()> {
    let sh = Shell::new()?;
    let args: Vec<_> = std::env::args().skip(1).collect();
    sh.change_dir(project_root());

    match args.first().map(|s| s.as_str()) {
        Some("build") => build(&sh, args.iter().any(|a| a == "--release")),
        Some("test") => test(&sh),
        Some("format") => format(&sh, args.iter().any(|a| a == "--check")),
        Some("clippy") => clippy(&sh),
        Some("run") => run(&sh, &args[1..]),
        Some("ci") => ci(&sh),
        _ => {
            print_help();
            Ok(())
        }
    }
}

fn print_help() {
    println!("Bible Guide - Developer Commands:");
    println!();
    println!("Usage: cargo xtask <COMMAND> [OPTIONS]");
    println!();
    println!("Commands:");
    println!("  build [--release]   Build the backend");
    println!("  test                Run all tests");
    println!("  format [--check]    Format code (check mode doesn't modify)");
    println!("  clippy              Run clippy checks");
    println!("  run [ARGS...]       Run the server, passing ARGS through");
    println!("  ci                  Run all CI checks (format + clippy + test)");
}

fn build(sh: &Shell, release: bool) -> Result<()> {
    if release {
        cmd!(sh, "cargo build --release -p bible-guide").run().context("Release build failed")?;
    } else {
        cmd!(sh, "cargo build -p bible-guide").run().context("Build failed")?;
    }
    Ok(())
}

fn test(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo test --workspace").run().context("Tests failed")?;
    println!("✅ All tests passed!");
    Ok(())
}

fn format(sh: &Shell, check: bool) -> Result<()> {
    if check {
        cmd!(sh, "cargo fmt --all -- --check").run().context("Rust code is not formatted")?;
    } else {
        cmd!(sh, "cargo fmt --all").run().context("Failed to format Rust code")?;
    }
    Ok(())
}

fn clippy(sh: &Shell) -> Result<()> {
    cmd!(sh, "cargo clippy --all-targets -- --deny warnings --allow clippy::uninlined-format-args")
        .run()
        .context("Clippy checks failed")?;
    Ok(())
}

fn run(sh: &Shell, args: &[String]) -> Result<()> {
    cmd!(sh, "cargo run -p bible-guide -- {args...}").run().context("Failed to run application")?;
    Ok(())
}

fn ci(sh: &Shell) -> Result<()> {
    format(sh, true)?;
    clippy(sh)?;
    test(sh)?;
    println!("✅ CI checks passed");
    Ok(())
}

/// Workspace root (parent of xtask/)
fn project_root() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| std::path::PathBuf::from("."))
}
