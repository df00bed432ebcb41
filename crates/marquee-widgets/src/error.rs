//! Error types for marquee configuration.

use thiserror::Error;

/// Errors raised while loading a [`MarqueeConfig`](crate::MarqueeConfig).
///
/// The controller itself never fails: refusals such as starting while a run
/// is in flight are logged and ignored.
#[derive(Debug, Error)]
pub enum MarqueeError {
    /// Config document is not valid YAML for the config schema.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    /// Unit duration of zero would make the marquee infinitely fast.
    #[error("unit duration must be at least 1ms, got {0}ms")]
    InvalidUnitDuration(u32),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_unit_duration_message() {
        let err = MarqueeError::InvalidUnitDuration(0);
        assert_eq!(err.to_string(), "unit duration must be at least 1ms, got 0ms");
    }

    #[test]
    fn test_yaml_error_converts() {
        let yaml_err = serde_yaml_ng::from_str::<u32>("[").unwrap_err();
        let err: MarqueeError = yaml_err.into();
        assert!(matches!(err, MarqueeError::Yaml(_)));
        assert!(err.to_string().starts_with("YAML error"));
    }
}
