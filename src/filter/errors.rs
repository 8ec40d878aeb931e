//! Error types for filter configuration
//!
//! Per-frame filtering is infallible; everything that can go wrong is
//! caught when a configuration is built or loaded.

use thiserror::Error;

/// Errors that can occur while building or loading a tracker configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Target class string did not name a known class
    #[error("unknown target class '{0}' (expected 'car' or 'ped')")]
    UnknownTargetClass(String),

    /// A threshold is NaN, infinite, or out of its allowed domain
    #[error("invalid value for {name}: {value} ({reason})")]
    InvalidValue {
        /// Name of the offending parameter
        name: &'static str,
        /// Value that was supplied
        value: f64,
        /// What the value must satisfy
        reason: &'static str,
    },

    /// A lower bound exceeds its upper bound
    #[error("inverted range for {name}: lower bound {lower} exceeds upper bound {upper}")]
    InvertedRange {
        /// Name of the range
        name: &'static str,
        /// Lower bound
        lower: f64,
        /// Upper bound
        upper: f64,
    },

    /// Configuration JSON could not be decoded
    #[error("failed to decode configuration: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::UnknownTargetClass("truck".to_string());
        assert!(err.to_string().contains("truck"));

        let err = ConfigError::InvertedRange {
            name: "depth",
            lower: 2.0,
            upper: 1.0,
        };
        assert!(err.to_string().contains("depth"));
        assert!(err.to_string().contains('2'));
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<f64>("not json").unwrap_err();
        let err: ConfigError = json_err.into();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
