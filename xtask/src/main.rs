//! Development automation tasks for the `BotPub` workspace.
//!
//! Run with: `cargo xtask <command>`
//!
//! This is a CLI tool for developers, so `println!` and `eprintln!` are
//! intentionally used for user-facing output rather than structured logging.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::ffi::OsStr;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};
use std::{env, fs};

use anyhow::{anyhow, Context};

mod features;

const DEFAULT_TYPES_DIR: &str = "bindings/typescript";

fn main() -> ExitCode {
    let task = env::args().nth(1);

    let result = match task.as_deref() {
        Some("ci") => run_ci(),
        Some("fmt") => run_fmt(),
        Some("clippy") => run_clippy(),
        Some("test") => run_test(),
        Some("deny") => run_deny(),
        Some("audit") => run_audit(),
        Some("codegen") => run_codegen(env::args().nth(2)),
        Some("test-features") => features::test_feature_matrix(),
        Some("help") | None => {
            print_help();
            Ok(())
        }
        Some(unknown) => {
            eprintln!("Unknown task: {unknown}");
            eprintln!();
            print_help();
            Err(anyhow::anyhow!("Unknown task"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Task failed: {e}");
            ExitCode::FAILURE
        }
    }
}

fn print_help() {
    println!("BotPub Development Tasks");
    println!();
    println!("USAGE:");
    println!("    cargo xtask <TASK>");
    println!();
    println!("TASKS:");
    println!("    ci        Run all CI checks (fmt, clippy, test, test-features, deny, audit)");
    println!("    fmt       Check Rust code formatting");
    println!("    clippy    Run Clippy lints");
    println!("    test      Run all tests");
    println!("    codegen [DIR]  Generate TypeScript types for the API records (default: {DEFAULT_TYPES_DIR})");
    println!("    test-features  Verify the crate feature matrix compiles");
    println!("    deny      Check dependencies with cargo-deny");
    println!("    audit     Audit dependencies for security vulnerabilities");
    println!("    help      Show this help message");
}

/// Run all CI checks in sequence
fn run_ci() -> anyhow::Result<()> {
    println!("==> Running CI checks...\n");

    println!("==> Step 1/6: Checking Rust format...");
    run_fmt()?;

    println!("\n==> Step 2/6: Running Clippy...");
    run_clippy()?;

    println!("\n==> Step 3/6: Running tests...");
    run_test()?;

    println!("\n==> Step 4/6: Checking feature combinations...");
    features::test_feature_matrix()?;

    println!("\n==> Step 5/6: Checking dependencies...");
    run_deny()?;

    println!("\n==> Step 6/6: Auditing dependencies...");
    run_audit()?;

    println!("\n✓ All CI checks passed!");
    Ok(())
}

/// Check Rust code formatting
fn run_fmt() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["fmt", "--all", "--", "--check"]).status()?;

    if !status.success() {
        anyhow::bail!("Format check failed. Run 'cargo fmt --all' to fix.");
    }

    Ok(())
}

/// Run Clippy lints
fn run_clippy() -> anyhow::Result<()> {
    let status = Command::new("cargo")
        .args(["clippy", "--workspace", "--all-targets", "--all-features", "--", "-D", "warnings"])
        .status()?;

    if status.success() {
        Ok(())
    } else {
        Err(anyhow!("Clippy run failed. See output above."))
    }
}

/// Run all workspace tests
fn run_test() -> anyhow::Result<()> {
    let status = Command::new("cargo").args(["test", "--workspace", "--all-features"]).status()?;

    if !status.success() {
        anyhow::bail!("Tests failed");
    }

    Ok(())
}

/// Check dependencies with cargo-deny
fn run_deny() -> anyhow::Result<()> {
    // Check if cargo-deny is installed
    let check_installed = Command::new("cargo").args(["deny", "--version"]).output();

    if check_installed.is_err() || !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-deny is not installed.");
        eprintln!("Install it with: cargo install cargo-deny");
        anyhow::bail!("cargo-deny not found");
    }

    let status = Command::new("cargo").args(["deny", "check"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-deny found issues");
    }

    Ok(())
}

/// Audit dependencies for security vulnerabilities
fn run_audit() -> anyhow::Result<()> {
    // Check if cargo-audit is installed
    let check_installed = Command::new("cargo").args(["audit", "--version"]).output();

    if check_installed.is_err() || !check_installed.as_ref().is_ok_and(|o| o.status.success()) {
        eprintln!("cargo-audit is not installed.");
        eprintln!("Install it with: cargo install cargo-audit");
        anyhow::bail!("cargo-audit not found");
    }

    let status = Command::new("cargo").args(["audit"]).status()?;

    if !status.success() {
        anyhow::bail!("cargo-audit found vulnerabilities");
    }

    Ok(())
}

/// Generate TypeScript types for the API records and sync them to `dest`
fn run_codegen(dest: Option<String>) -> anyhow::Result<()> {
    println!("==> Generating TypeScript types from Rust...\n");

    // ts-rs writes one file per exported type while the tests run
    println!("Step 1/3: Running ts-gen tests to generate TypeScript files...");
    let status = Command::new("cargo")
        .args(["test", "-p", "botpub-domain", "--features", "ts-gen", "--lib"])
        .status()
        .context("Failed to run cargo test")?;

    if !status.success() {
        anyhow::bail!("TypeScript generation tests failed");
    }

    let bindings_dir = PathBuf::from("crates/domain/bindings");
    if !bindings_dir.exists() {
        anyhow::bail!(
            "Bindings directory not found at {}. TypeScript generation may have failed.",
            bindings_dir.display()
        );
    }

    let types_dir = PathBuf::from(dest.unwrap_or_else(|| DEFAULT_TYPES_DIR.to_string()));
    println!(
        "\nStep 2/3: Syncing {} TypeScript files to {}...",
        count_ts_files(&bindings_dir)?,
        types_dir.display()
    );

    sync_bindings(&bindings_dir, &types_dir)?;

    println!("\nStep 3/3: Generating index.ts...");
    generate_index_ts(&types_dir)?;

    println!("\n✓ TypeScript type generation complete!");
    println!("  Generated files: {}", types_dir.display());

    Ok(())
}

/// `.ts` files directly inside `dir`, sorted by name
fn ts_files(dir: &Path) -> anyhow::Result<Vec<PathBuf>> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut files: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(OsStr::to_str) == Some("ts"))
        .collect();
    files.sort();
    Ok(files)
}

fn count_ts_files(dir: &Path) -> anyhow::Result<usize> {
    Ok(ts_files(dir)?.len())
}

/// Copy every generated binding into `dest`, replacing older copies
fn sync_bindings(src: &Path, dest: &Path) -> anyhow::Result<()> {
    fs::create_dir_all(dest).context("Failed to create types directory")?;

    let files = ts_files(src)?;
    for path in &files {
        let file_name = path.file_name().ok_or_else(|| anyhow!("Invalid file name"))?;
        let dest_path = dest.join(file_name);

        fs::copy(path, &dest_path).with_context(|| {
            format!("Failed to copy {} to {}", path.display(), dest_path.display())
        })?;
    }

    println!("  Synced {} files", files.len());
    Ok(())
}

/// Write `index.ts` re-exporting every type module in `types_dir`
fn generate_index_ts(types_dir: &Path) -> anyhow::Result<()> {
    let index_path = types_dir.join("index.ts");

    let type_names: Vec<String> = ts_files(types_dir)?
        .iter()
        .filter_map(|path| path.file_stem()?.to_str().map(str::to_owned))
        .filter(|name| name != "index" && !name.ends_with(".test"))
        .collect();

    let mut content = String::from(
        "// Auto-generated BotPub API types\n\
         // Generated by ts-rs via: cargo xtask codegen\n\
         // DO NOT EDIT MANUALLY - changes will be overwritten\n\n",
    );
    for name in &type_names {
        let _ = writeln!(content, "export type {{ {name} }} from './{name}';");
    }

    fs::write(&index_path, content)
        .with_context(|| format!("Failed to write {}", index_path.display()))?;

    println!("  Generated index.ts with {} exports", type_names.len());
    Ok(())
}
