use thiserror::Error;

/// A check that did not hold.
///
/// This is the only failure a check can signal. The runner converts it into a
/// [`FailureRecord`](crate::results::FailureRecord) and moves on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message}")]
pub struct CheckError {
    message: String,
}

impl CheckError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub type CheckResult<T = ()> = Result<T, CheckError>;

/// Fail the current check with `message` unless `condition` holds.
pub fn ensure(condition: bool, message: impl Into<String>) -> CheckResult {
    if condition {
        Ok(())
    } else {
        Err(CheckError::new(message))
    }
}

/// Errors raised while setting up a run, before any check executes.
#[derive(Error, Debug)]
pub enum HarnessError {
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Failed to read config file '{path}': {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type HarnessResult<T> = Result<T, HarnessError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_error_displays_message_verbatim() {
        let err = CheckError::new("Viewport meta tag not found");
        assert_eq!(err.to_string(), "Viewport meta tag not found");
        assert_eq!(err.message(), "Viewport meta tag not found");
    }

    #[test]
    fn test_ensure() {
        assert!(ensure(true, "unused").is_ok());
        let err = ensure(false, "Expected at least 3 dashboard cards").unwrap_err();
        assert_eq!(err.message(), "Expected at least 3 dashboard cards");
    }

    #[test]
    fn test_harness_error_messages() {
        let err = HarnessError::InvalidConfig {
            message: "min_cards must be greater than 0".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid configuration: min_cards must be greater than 0"
        );

        let toml_err = toml::from_str::<toml::Value>("= broken").unwrap_err();
        let err: HarnessError = toml_err.into();
        assert!(err.to_string().starts_with("Failed to parse config file"));
    }
}
