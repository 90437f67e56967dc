//! sortvis configuration file handling

use anyhow::{Context, Result};
use sortvis_core::{AlgorithmKind, VisualizerConfig};
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in a directory
pub const CONFIG_FILE: &str = "sortvis.toml";

/// Command-line values that take precedence over the file
#[derive(Debug, Default)]
pub struct Overrides {
    pub algorithm: Option<AlgorithmKind>,
    pub speed: Option<f64>,
    pub array_size: Option<usize>,
    pub min: Option<u32>,
    pub max: Option<u32>,
}

/// Load configuration from a file or a directory containing sortvis.toml
pub fn load(path: &Path) -> Result<VisualizerConfig> {
    let config_path = if path.is_dir() {
        path.join(CONFIG_FILE)
    } else {
        path.to_path_buf()
    };

    if !config_path.exists() {
        anyhow::bail!(
            "No {} found at {}. Run `sortvis init` to create one.",
            CONFIG_FILE,
            config_path.display()
        );
    }

    let content = fs::read_to_string(&config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;

    VisualizerConfig::from_toml_str(&content)
        .with_context(|| format!("Failed to parse {}", config_path.display()))
}

/// Apply overrides and validate the result
pub fn apply(mut config: VisualizerConfig, overrides: &Overrides) -> Result<VisualizerConfig> {
    if let Some(algorithm) = overrides.algorithm {
        config.algorithm = algorithm;
    }
    if let Some(speed) = overrides.speed {
        config.speed = speed;
    }
    if let Some(array_size) = overrides.array_size {
        config.data.array_size = array_size;
    }
    if let Some(min) = overrides.min {
        config.data.value_range.min = min;
    }
    if let Some(max) = overrides.max {
        config.data.value_range.max = max;
    }

    config.validate().context("Invalid configuration")?;
    Ok(config)
}

/// Write a default sortvis.toml into `dir`
pub fn init(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILE);
    if config_path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite it.",
            config_path.display()
        );
    }

    fs::create_dir_all(dir).with_context(|| format!("Failed to create {}", dir.display()))?;
    let content = VisualizerConfig::default()
        .to_toml()
        .context("Failed to serialize config")?;
    fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    tracing::info!("Wrote {}", config_path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> std::path::PathBuf {
        let dir = std::env::temp_dir().join(format!("sortvis-{}-{}", name, std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_init_then_load() {
        let dir = scratch_dir("init");
        init(&dir, false).unwrap();

        let config = load(&dir).unwrap();
        assert_eq!(config, VisualizerConfig::default());

        assert!(init(&dir, false).is_err());
        assert!(init(&dir, true).is_ok());
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = scratch_dir("missing");
        let err = load(&dir.join(CONFIG_FILE)).unwrap_err();
        assert!(err.to_string().contains("sortvis init"));
    }

    #[test]
    fn test_overrides_take_precedence() {
        let overrides = Overrides {
            algorithm: Some(AlgorithmKind::QuickSort),
            speed: Some(8.0),
            array_size: Some(12),
            min: Some(3),
            max: Some(4),
        };
        let config = apply(VisualizerConfig::default(), &overrides).unwrap();

        assert_eq!(config.algorithm, AlgorithmKind::QuickSort);
        assert_eq!(config.speed, 8.0);
        assert_eq!(config.data.array_size, 12);
        assert_eq!(config.data.value_range.min, 3);
        assert_eq!(config.data.value_range.max, 4);
    }

    #[test]
    fn test_overrides_are_validated() {
        let overrides = Overrides {
            speed: Some(0.0),
            ..Overrides::default()
        };
        assert!(apply(VisualizerConfig::default(), &overrides).is_err());
    }
}
