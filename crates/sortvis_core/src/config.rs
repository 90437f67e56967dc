//! Visualizer configuration (sortvis.toml) and random data generation

use std::time::Duration;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::trace::AlgorithmKind;

/// Inclusive bounds for generated bar values
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ValueRange {
    pub min: u32,
    pub max: u32,
}

impl Default for ValueRange {
    fn default() -> Self {
        Self { min: 1, max: 100 }
    }
}

/// Shape of the array-under-sort
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DataConfig {
    /// Number of bars
    #[serde(default = "default_array_size")]
    pub array_size: usize,
    #[serde(default)]
    pub value_range: ValueRange,
}

fn default_array_size() -> usize {
    50
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            array_size: default_array_size(),
            value_range: ValueRange::default(),
        }
    }
}

impl DataConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.array_size == 0 {
            return Err(ConfigError::InvalidArraySize);
        }
        let ValueRange { min, max } = self.value_range;
        if min > max {
            return Err(ConfigError::InvalidValueRange { min, max });
        }
        Ok(())
    }
}

/// Top-level visualizer configuration
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct VisualizerConfig {
    #[serde(default)]
    pub algorithm: AlgorithmKind,
    /// Playback speed multiplier
    #[serde(default = "default_speed")]
    pub speed: f64,
    /// Delay between steps at speed 1.0, in milliseconds
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
    #[serde(default)]
    pub data: DataConfig,
}

fn default_speed() -> f64 {
    1.0
}

fn default_base_delay_ms() -> u64 {
    100
}

impl Default for VisualizerConfig {
    fn default() -> Self {
        Self {
            algorithm: AlgorithmKind::default(),
            speed: default_speed(),
            base_delay_ms: default_base_delay_ms(),
            data: DataConfig::default(),
        }
    }
}

impl VisualizerConfig {
    /// Parse a TOML document and validate it.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: VisualizerConfig =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_speed(self.speed)?;
        if self.base_delay_ms == 0 {
            return Err(ConfigError::InvalidBaseDelay);
        }
        self.data.validate()
    }

    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    pub fn with_algorithm(mut self, algorithm: AlgorithmKind) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_speed(mut self, speed: f64) -> Self {
        self.speed = speed;
        self
    }
}

/// Reject speeds that cannot produce a finite positive step delay.
pub fn validate_speed(speed: f64) -> Result<(), ConfigError> {
    if speed.is_finite() && speed > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::InvalidSpeed(speed))
    }
}

/// Generate `array_size` values uniformly from the inclusive value range.
pub fn generate_data<R: Rng + ?Sized>(
    config: &DataConfig,
    rng: &mut R,
) -> Result<Vec<u32>, ConfigError> {
    config.validate()?;
    let ValueRange { min, max } = config.value_range;
    Ok((0..config.array_size)
        .map(|_| rng.gen_range(min..=max))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_defaults_are_valid() {
        let config = VisualizerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.data.array_size, 50);
        assert_eq!(config.base_delay(), Duration::from_millis(100));
    }

    #[test]
    fn test_rejects_bad_speed() {
        for speed in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let config = VisualizerConfig::default().with_speed(speed);
            assert!(matches!(
                config.validate(),
                Err(ConfigError::InvalidSpeed(_))
            ));
        }
    }

    #[test]
    fn test_rejects_bad_data_shape() {
        let empty = DataConfig {
            array_size: 0,
            ..DataConfig::default()
        };
        assert_eq!(empty.validate(), Err(ConfigError::InvalidArraySize));

        let inverted = DataConfig {
            value_range: ValueRange { min: 10, max: 1 },
            ..DataConfig::default()
        };
        assert_eq!(
            inverted.validate(),
            Err(ConfigError::InvalidValueRange { min: 10, max: 1 })
        );
    }

    #[test]
    fn test_parse_partial_toml() {
        let config = VisualizerConfig::from_toml_str(
            r#"
            algorithm = "quick-sort"
            speed = 4.0

            [data]
            array_size = 12
            "#,
        )
        .unwrap();

        assert_eq!(config.algorithm, AlgorithmKind::QuickSort);
        assert_eq!(config.speed, 4.0);
        assert_eq!(config.base_delay_ms, 100);
        assert_eq!(config.data.array_size, 12);
        assert_eq!(config.data.value_range, ValueRange::default());
    }

    #[test]
    fn test_parse_rejects_unknown_algorithm() {
        let result = VisualizerConfig::from_toml_str(r#"algorithm = "merge-sort""#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = VisualizerConfig::default().with_algorithm(AlgorithmKind::QuickSort);
        let text = config.to_toml().unwrap();
        assert_eq!(VisualizerConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_generate_data_in_range() {
        let config = DataConfig {
            array_size: 200,
            value_range: ValueRange { min: 5, max: 9 },
        };
        let mut rng = StdRng::seed_from_u64(7);
        let data = generate_data(&config, &mut rng).unwrap();

        assert_eq!(data.len(), 200);
        assert!(data.iter().all(|v| (5..=9).contains(v)));
    }

    #[test]
    fn test_generate_data_is_seeded() {
        let config = DataConfig::default();
        let a = generate_data(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        let b = generate_data(&config, &mut StdRng::seed_from_u64(1)).unwrap();
        assert_eq!(a, b);
    }
}
