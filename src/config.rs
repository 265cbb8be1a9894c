use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::GenerateOptions;
use crate::error::{ChainsmithError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
pub struct ChainsmithConfig {
    #[serde(default)]
    pub generate: GenerateConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GenerateConfig {
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_chains_min")]
    pub chains_min: u32,
    #[serde(default = "default_chains_max")]
    pub chains_max: u32,
    #[serde(default = "default_standalone_min")]
    pub standalone_min: u32,
    #[serde(default = "default_standalone_max")]
    pub standalone_max: u32,
    #[serde(default = "default_runtime_probability")]
    pub runtime_probability: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_output_dirs")]
    pub dirs: Vec<String>,
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub services_file: Option<PathBuf>,
}

fn default_chains_min() -> u32 {
    1
}

fn default_chains_max() -> u32 {
    3
}

fn default_standalone_min() -> u32 {
    2
}

fn default_standalone_max() -> u32 {
    5
}

fn default_runtime_probability() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_output_dirs() -> Vec<String> {
    vec![
        "data/generated".to_string(),
        "output".to_string(),
        "react-dashboard/public/data".to_string(),
    ]
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            seed: None,
            chains_min: default_chains_min(),
            chains_max: default_chains_max(),
            standalone_min: default_standalone_min(),
            standalone_max: default_standalone_max(),
            runtime_probability: default_runtime_probability(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dirs: default_output_dirs(),
            pretty: default_true(),
        }
    }
}

impl ChainsmithConfig {
    pub fn load() -> Result<Self> {
        let config_path = std::path::Path::new("chainsmith.toml");
        if !config_path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(config_path)
    }

    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        let content = std::fs::read_to_string(config_path)?;
        let config: ChainsmithConfig =
            toml::from_str(&content).map_err(|e| ChainsmithError::Toml(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        let generate = &self.generate;
        if generate.chains_min > generate.chains_max {
            return Err(ChainsmithError::Config(format!(
                "chains_min ({}) exceeds chains_max ({})",
                generate.chains_min, generate.chains_max
            )));
        }
        if generate.standalone_min > generate.standalone_max {
            return Err(ChainsmithError::Config(format!(
                "standalone_min ({}) exceeds standalone_max ({})",
                generate.standalone_min, generate.standalone_max
            )));
        }
        if !(0.0..=1.0).contains(&generate.runtime_probability) {
            return Err(ChainsmithError::Config(format!(
                "runtime_probability must be within [0, 1], got {}",
                generate.runtime_probability
            )));
        }
        if self.output.dirs.is_empty() {
            return Err(ChainsmithError::Config(
                "output.dirs must name at least one directory".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            seed: self.generate.seed,
            chains_min: self.generate.chains_min,
            chains_max: self.generate.chains_max,
            standalone_min: self.generate.standalone_min,
            standalone_max: self.generate.standalone_max,
            runtime_probability: self.generate.runtime_probability,
        }
    }

    #[must_use]
    pub fn output_dirs(&self) -> Vec<PathBuf> {
        self.output.dirs.iter().map(PathBuf::from).collect()
    }
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ChainsmithConfig::default();
        assert_eq!(config.generate.chains_min, 1);
        assert_eq!(config.generate.chains_max, 3);
        assert_eq!(config.generate.runtime_probability, 0.5);
        assert!(config.output.pretty);
        assert!(config
            .output
            .dirs
            .contains(&"react-dashboard/public/data".to_string()));
        assert!(config.catalog.services_file.is_none());
    }

    #[test]
    fn test_load_from_valid_toml() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("chainsmith.toml");
        std::fs::write(
            &config_path,
            r#"
[generate]
seed = 1337
runtime_probability = 1.0

[output]
dirs = ["out"]
pretty = false
"#,
        )
        .unwrap();
        let config = ChainsmithConfig::load_from(&config_path).unwrap();
        assert_eq!(config.generate.seed, Some(1337));
        assert_eq!(config.generate.runtime_probability, 1.0);
        assert_eq!(config.output.dirs, vec!["out".to_string()]);
        assert!(!config.output.pretty);
    }

    #[test]
    fn test_load_from_rejects_inverted_chain_range() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("chainsmith.toml");
        std::fs::write(
            &config_path,
            r#"
[generate]
chains_min = 5
chains_max = 2
"#,
        )
        .unwrap();
        assert!(ChainsmithConfig::load_from(&config_path).is_err());
    }

    #[test]
    fn test_load_from_rejects_out_of_range_probability() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("chainsmith.toml");
        std::fs::write(
            &config_path,
            r#"
[generate]
runtime_probability = 1.5
"#,
        )
        .unwrap();
        assert!(ChainsmithConfig::load_from(&config_path).is_err());
    }

    #[test]
    fn test_load_from_rejects_empty_output_dirs() {
        let temp = tempfile::TempDir::new().unwrap();
        let config_path = temp.path().join("chainsmith.toml");
        std::fs::write(
            &config_path,
            r#"
[output]
dirs = []
"#,
        )
        .unwrap();
        assert!(ChainsmithConfig::load_from(&config_path).is_err());
    }

    #[test]
    fn test_options_mirror_generate_section() {
        let mut config = ChainsmithConfig::default();
        config.generate.seed = Some(7);
        config.generate.chains_max = 2;
        let options = config.options();
        assert_eq!(options.seed, Some(7));
        assert_eq!(options.chains_max, 2);
    }
}
