//! Configuration error types.

use thiserror::Error;

/// Configuration operation result type.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Configuration error types.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Validation error.
    #[error("Validation error: {field}: {message}")]
    Validation {
        /// Field that failed validation.
        field: String,
        /// Validation error message.
        message: String,
    },

    /// Multiple validation errors.
    #[error("Multiple validation errors: {0:?}")]
    MultipleValidationErrors(Vec<ValidationError>),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Deserialization error.
    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    /// Field that failed validation.
    pub field: String,
    /// Validation error message.
    pub message: String,
    /// Validation rule that was violated.
    pub rule: Option<String>,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: None,
        }
    }

    /// Creates a validation error with a rule name.
    pub fn with_rule(
        field: impl Into<String>,
        message: impl Into<String>,
        rule: impl Into<String>,
    ) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            rule: Some(rule.into()),
        }
    }

    /// Prefixes the field with the name of the enclosing section.
    #[must_use]
    pub fn nested(mut self, section: &str) -> Self {
        self.field = format!("{section}.{}", self.field);
        self
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if let Some(ref rule) = self.rule {
            write!(f, "{}: {} (rule: {})", self.field, self.message, rule)
        } else {
            write!(f, "{}: {}", self.field, self.message)
        }
    }
}

impl From<serde_json::Error> for ConfigError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            ConfigError::Deserialization(err.to_string())
        } else {
            ConfigError::Serialization(err.to_string())
        }
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Deserialization(err.to_string())
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(err: toml::ser::Error) -> Self {
        ConfigError::Serialization(err.to_string())
    }
}

/// Trait for validatable configurations.
pub trait Validate {
    /// Validates the configuration.
    ///
    /// Returns a list of validation errors, or an empty vector if valid.
    fn validate(&self) -> Vec<ValidationError>;

    /// Returns true if the configuration is valid.
    fn is_valid(&self) -> bool {
        self.validate().is_empty()
    }

    /// Validates and returns an error if invalid.
    fn validate_or_error(&self) -> ConfigResult<()> {
        let mut errors = self.validate();
        match errors.len() {
            0 => Ok(()),
            1 => {
                let err = errors.remove(0);
                Err(ConfigError::Validation {
                    field: err.field,
                    message: err.message,
                })
            }
            _ => Err(ConfigError::MultipleValidationErrors(errors)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Steps(usize);

    impl Validate for Steps {
        fn validate(&self) -> Vec<ValidationError> {
            (0..self.0)
                .map(|i| ValidationError::with_rule(format!("field{i}"), "bad", "always"))
                .collect()
        }
    }

    #[test]
    fn test_validate_or_error_variants() {
        assert!(Steps(0).validate_or_error().is_ok());
        assert!(matches!(
            Steps(1).validate_or_error(),
            Err(ConfigError::Validation { ref field, .. }) if field == "field0"
        ));
        assert!(matches!(
            Steps(3).validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(ref errors)) if errors.len() == 3
        ));
    }

    #[test]
    fn test_display_and_nesting() {
        let err = ValidationError::with_rule("steps", "must be odd", "odd_steps").nested("lattice");
        assert_eq!(err.to_string(), "lattice.steps: must be odd (rule: odd_steps)");
        assert_eq!(ValidationError::new("name", "empty").to_string(), "name: empty");
    }

    #[test]
    fn test_json_error_is_deserialization() {
        let err: ConfigError = serde_json::from_str::<u32>("\"x\"").unwrap_err().into();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }
}
