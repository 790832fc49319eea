//! Crate-wide error type.
//!
//! Combat resolution itself is total: every encounter ends in victory or
//! defeat. Errors only surface from lookups, configuration and I/O.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, AutofighterError>;

#[derive(Debug, Error)]
pub enum AutofighterError {
    #[error("unknown damage type `{0}`")]
    UnknownDamageType(String),

    #[error("unknown foe `{0}`")]
    UnknownFoe(String),

    #[error("unknown player `{0}`")]
    UnknownPlayer(String),

    #[error("invalid simulation config: {0}")]
    InvalidConfig(String),

    #[error("{stat} cannot hold {value}")]
    UnrepresentableStat {
        stat: crate::character::StatKey,
        value: f64,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = AutofighterError::UnknownDamageType("Plasma".to_string());
        assert_eq!(err.to_string(), "unknown damage type `Plasma`");

        let err = AutofighterError::InvalidConfig("num_runs must be positive".to_string());
        assert_eq!(
            err.to_string(),
            "invalid simulation config: num_runs must be positive"
        );
    }

    #[test]
    fn test_json_error_converts() {
        let parse: std::result::Result<u32, _> = serde_json::from_str("not json");
        let err: AutofighterError = parse.unwrap_err().into();
        assert!(matches!(err, AutofighterError::Json(_)));
    }
}
