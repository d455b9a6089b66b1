use std::{path::Path, time::Duration};

use serde::{Deserialize, Serialize};

use crate::{Result, VisualiserError};

/// Top-level configuration structure for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub playback: PlaybackConfig,
    pub input: InputConfig,
}

impl AppConfig {
    /// Loads a JSON config file. Missing fields fall back to their defaults.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: Self = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.input.validate()
    }
}

/// Timing of the auto-advance loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between steps at 1x speed.
    pub base_delay_ms: u64,
    pub speed: f32,
    pub min_speed: f32,
    pub max_speed: f32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            base_delay_ms: 1000,
            speed: 1.0,
            min_speed: 0.25,
            max_speed: 4.0,
        }
    }
}

impl PlaybackConfig {
    pub fn base_delay(&self) -> Duration {
        Duration::from_millis(self.base_delay_ms)
    }

    /// Clamps a speed multiplier into the configured range.
    pub fn clamp_speed(&self, speed: f32) -> Result<f32> {
        if !speed.is_finite() || speed <= 0.0 {
            return Err(VisualiserError::invalid_input(format!(
                "speed multiplier must be a positive number, got {speed}"
            )));
        }
        Ok(speed.clamp(self.min_speed, self.max_speed))
    }

    /// Per-step delay for the given multiplier. Saturates at
    /// [`Duration::MAX`] when the quotient does not fit.
    pub fn delay_for(&self, speed: f32) -> Duration {
        self.checked_delay_for(speed).unwrap_or(Duration::MAX)
    }

    fn checked_delay_for(&self, speed: f32) -> Option<Duration> {
        Duration::try_from_secs_f64(self.base_delay().as_secs_f64() / f64::from(speed)).ok()
    }

    fn validate(&self) -> Result<()> {
        if self.base_delay_ms == 0 {
            return Err(VisualiserError::invalid_input(
                "playback.base_delay_ms must be greater than zero",
            ));
        }
        if !(self.min_speed.is_finite() && self.max_speed.is_finite())
            || self.min_speed <= 0.0
            || self.min_speed > self.max_speed
        {
            return Err(VisualiserError::invalid_input(format!(
                "playback speed range {}..={} is invalid",
                self.min_speed, self.max_speed
            )));
        }
        if self.checked_delay_for(self.min_speed).is_none() {
            return Err(VisualiserError::invalid_input(format!(
                "playback.min_speed {} makes the step delay too long",
                self.min_speed
            )));
        }
        self.clamp_speed(self.speed).map(|_| ())
    }
}

/// Defaults for the array input and the search target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    pub array_size: usize,
    pub min_array_size: usize,
    pub max_array_size: usize,
    pub min_value: i64,
    pub max_value: i64,
    pub search_target: i64,
    /// Fixed seed for reproducible random arrays.
    pub seed: Option<u64>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            array_size: 10,
            min_array_size: 1,
            max_array_size: 50,
            min_value: 1,
            max_value: 100,
            search_target: 5,
            seed: None,
        }
    }
}

impl InputConfig {
    pub fn clamp_size(&self, size: usize) -> usize {
        size.clamp(self.min_array_size, self.max_array_size)
    }

    fn validate(&self) -> Result<()> {
        if self.min_array_size > self.max_array_size {
            return Err(VisualiserError::invalid_input(format!(
                "input array size range {}..={} is empty",
                self.min_array_size, self.max_array_size
            )));
        }
        if self.min_value > self.max_value {
            return Err(VisualiserError::invalid_input(format!(
                "input value range {}..={} is empty",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        AppConfig::default().validate().unwrap();
        assert_eq!(
            PlaybackConfig::default().delay_for(1.0),
            Duration::from_secs(1)
        );
    }

    #[test]
    fn delay_divides_base_by_speed() {
        let playback = PlaybackConfig::default();
        assert_eq!(playback.delay_for(2.0), Duration::from_millis(500));
        assert_eq!(playback.delay_for(0.5), Duration::from_millis(2000));
    }

    #[test]
    fn clamps_speed_into_range() {
        let playback = PlaybackConfig::default();
        assert_eq!(playback.clamp_speed(10.0).unwrap(), 4.0);
        assert_eq!(playback.clamp_speed(0.01).unwrap(), 0.25);
        assert!(playback.clamp_speed(f32::NAN).is_err());
        assert!(playback.clamp_speed(-1.0).is_err());
    }

    #[test]
    fn partial_json_uses_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "input": { "seed": 3, "array_size": 4 } }"#).unwrap();

        assert_eq!(config.input.seed, Some(3));
        assert_eq!(config.input.array_size, 4);
        assert_eq!(config.playback, PlaybackConfig::default());
    }

    #[test]
    fn rejects_inverted_ranges() {
        let mut config = AppConfig::default();
        config.input.min_value = 10;
        config.input.max_value = 1;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.playback.base_delay_ms = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_min_speed_with_unrepresentable_delay() {
        let mut config = AppConfig::default();
        config.playback.min_speed = 1e-30;
        config.playback.speed = 1e-30;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, VisualiserError::InvalidInput(_)));

        let json = r#"{ "playback": { "min_speed": 1e-30 } }"#;
        let config: AppConfig = serde_json::from_str(json).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn tiny_but_representable_min_speed_is_accepted() {
        let mut config = AppConfig::default();
        config.playback.min_speed = 0.125;
        config.validate().unwrap();
        assert_eq!(config.playback.delay_for(0.125), Duration::from_secs(8));
    }

    #[test]
    fn delay_saturates_instead_of_overflowing() {
        let playback = PlaybackConfig::default();
        assert_eq!(playback.delay_for(1e-30), Duration::MAX);
        assert_eq!(playback.delay_for(0.0), Duration::MAX);
    }
}
