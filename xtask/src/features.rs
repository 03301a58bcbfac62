use std::process::Command;

use anyhow::{Context, Result};

/// `profilebox-common` is split into opt-in tiers; each must build alone.
const FEATURE_COMBINATIONS: &[&[&str]] = &[
    &[], // default
    &["foundation"],
    &["observability"],
    &["platform"],
    &["test-utils"],
    &["platform", "test-utils"],
];

/// Check that all required feature combinations compile successfully.
pub fn test_feature_matrix() -> Result<()> {
    println!("Testing {} profilebox-common feature combinations...", FEATURE_COMBINATIONS.len());

    for (index, features) in FEATURE_COMBINATIONS.iter().enumerate() {
        let joined = features.join(",");
        let display_label = if features.is_empty() { "default".to_string() } else { joined.clone() };

        println!(
            "\n[{}/{}] cargo check -p profilebox-common ({display_label})",
            index + 1,
            FEATURE_COMBINATIONS.len()
        );

        let mut command = Command::new("cargo");
        command.args(["check", "-p", "profilebox-common"]);
        if !features.is_empty() {
            command.arg("--features").arg(&joined);
        }

        let status = command
            .status()
            .with_context(|| format!("Failed to run cargo check for '{display_label}'"))?;

        if !status.success() {
            anyhow::bail!("Feature combination '{display_label}' failed to compile");
        }

        println!("✅ Features '{display_label}' compiled successfully");
    }

    println!("\n✅ All {} feature combinations compile successfully!", FEATURE_COMBINATIONS.len());

    Ok(())
}
