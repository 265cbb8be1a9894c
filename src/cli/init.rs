use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::presets::{PRESET_CI, PRESET_COMPACT, PRESET_DEMO};

pub fn run_init(preset: &str, force: bool) -> Result<()> {
    let config_path = PathBuf::from("chainsmith.toml");

    if config_path.exists() && !force {
        anyhow::bail!(
            "chainsmith.toml already exists. Use --force to overwrite the existing configuration."
        );
    }

    let contents = match preset {
        "ci" => PRESET_CI,
        "compact" => PRESET_COMPACT,
        _ => PRESET_DEMO,
    };

    fs::write(&config_path, contents)
        .with_context(|| format!("Failed to write configuration to {}", config_path.display()))?;

    println!(
        "chainsmith.toml created with '{}' preset at {}",
        preset,
        config_path.display()
    );

    Ok(())
}
