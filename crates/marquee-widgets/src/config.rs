//! Runtime-tunable marquee timing.

use crate::error::MarqueeError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Speed and pause settings for a marquee.
///
/// Missing fields fall back to their defaults, so a host config file only
/// needs to name what it changes:
///
/// ```
/// use marquee_widgets::MarqueeConfig;
///
/// let config = MarqueeConfig::from_yaml("halt_time_ms: 1200").expect("valid config");
/// assert_eq!(config.halt_time_ms, 1200);
/// assert_eq!(config.unit_duration_ms, MarqueeConfig::DEFAULT_UNIT_DURATION_MS);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarqueeConfig {
    /// Pause between the end of one cycle and the start of the next
    pub halt_time_ms: u32,
    /// Time to scroll 100 logical pixels
    pub unit_duration_ms: u32,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            halt_time_ms: Self::DEFAULT_HALT_TIME_MS,
            unit_duration_ms: Self::DEFAULT_UNIT_DURATION_MS,
        }
    }
}

impl MarqueeConfig {
    /// Default pause between cycles.
    pub const DEFAULT_HALT_TIME_MS: u32 = 500;
    /// Default time per 100 pixels.
    pub const DEFAULT_UNIT_DURATION_MS: u32 = 1000;
    /// Pixels of text covered by one unit duration.
    pub const UNIT_PX: u32 = 100;

    /// Parse and validate a YAML config document.
    pub fn from_yaml(yaml: &str) -> Result<Self, MarqueeError> {
        let config: Self = serde_yaml_ng::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the controller cannot run with.
    pub fn validate(&self) -> Result<(), MarqueeError> {
        if self.unit_duration_ms == 0 {
            return Err(MarqueeError::InvalidUnitDuration(self.unit_duration_ms));
        }
        Ok(())
    }

    /// Set the pause between cycles.
    #[must_use]
    pub const fn halt_time_ms(mut self, ms: u32) -> Self {
        self.halt_time_ms = ms;
        self
    }

    /// Set the time per 100 pixels.
    #[must_use]
    pub const fn unit_duration_ms(mut self, ms: u32) -> Self {
        self.unit_duration_ms = ms;
        self
    }

    /// Pause between cycles as a [`Duration`].
    #[must_use]
    pub const fn halt_time(&self) -> Duration {
        Duration::from_millis(self.halt_time_ms as u64)
    }

    /// Time per 100 pixels as a [`Duration`].
    #[must_use]
    pub const fn unit_duration(&self) -> Duration {
        Duration::from_millis(self.unit_duration_ms as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = MarqueeConfig::default();
        assert_eq!(config.halt_time(), Duration::from_millis(500));
        assert_eq!(config.unit_duration(), Duration::from_millis(1000));
    }

    #[test]
    fn test_config_builder() {
        let config = MarqueeConfig::default()
            .halt_time_ms(0)
            .unit_duration_ms(250);
        assert_eq!(config.halt_time_ms, 0);
        assert_eq!(config.unit_duration_ms, 250);
    }

    #[test]
    fn test_config_from_yaml_full() {
        let config = MarqueeConfig::from_yaml("halt_time_ms: 0\nunit_duration_ms: 40\n")
            .expect("valid config");
        assert_eq!(config, MarqueeConfig::default().halt_time_ms(0).unit_duration_ms(40));
    }

    #[test]
    fn test_config_from_yaml_empty_mapping_uses_defaults() {
        let config = MarqueeConfig::from_yaml("{}").expect("valid config");
        assert_eq!(config, MarqueeConfig::default());
    }

    #[test]
    fn test_config_rejects_zero_unit_duration() {
        let err = MarqueeConfig::from_yaml("unit_duration_ms: 0").unwrap_err();
        assert!(matches!(err, MarqueeError::InvalidUnitDuration(0)));
    }

    #[test]
    fn test_config_rejects_negative_values() {
        let err = MarqueeConfig::from_yaml("halt_time_ms: -5").unwrap_err();
        assert!(matches!(err, MarqueeError::Yaml(_)));
    }

    #[test]
    fn test_config_rejects_unknown_fields() {
        assert!(MarqueeConfig::from_yaml("speed: 3").is_err());
    }

    #[test]
    fn test_config_json_shape() {
        let json = serde_json::to_value(MarqueeConfig::default()).expect("serializable");
        assert_eq!(json["halt_time_ms"], 500);
        assert_eq!(json["unit_duration_ms"], 1000);
    }
}
