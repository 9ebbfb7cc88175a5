use std::process::Command;

use anyhow::{Context, Result};

/// `(package, features)` pairs that must compile on their own.
const FEATURE_COMBINATIONS: &[(&str, &[&str])] = &[
    ("botpub-domain", &[]),
    ("botpub-domain", &["ts-gen"]),
    ("botpub-infra", &[]),
    ("botpub-infra", &["ts-gen"]),
];

/// Check that all required feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, (package, features)) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let label = if features.is_empty() { "default" } else { joined.as_str() };

        println!(
            "\n[{}/{}] cargo check -p {package} --no-default-features{}",
            index + 1,
            FEATURE_COMBINATIONS.len(),
            if features.is_empty() { String::new() } else { format!(" --features {joined}") }
        );

        let mut command = Command::new("cargo");
        command.args(["check", "--all-targets", "-p", package, "--no-default-features"]);
        if !features.is_empty() {
            command.arg("--features").arg(&joined);
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to run cargo check for {package} '{label}'"))?;

        if !status.success() {
            anyhow::bail!("{package} with features '{label}' failed to compile");
        }

        println!("✅ {package} '{label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
