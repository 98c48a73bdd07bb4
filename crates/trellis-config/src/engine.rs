//! Top-level engine configuration.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigResult, Validate, ValidationError};
use crate::futures::FuturesConfig;
use crate::lattice::LatticeConfig;

/// Settings for both engines, loadable from JSON or TOML.
///
/// # Example
///
/// ```rust
/// use trellis_config::EngineConfig;
/// use trellis_lattice::LatticeSpecification;
///
/// let config = EngineConfig::from_toml_str(
///     r#"
///     name = "DESK"
///
///     [lattice]
///     specification = "TIAN"
///     steps = 500
///     "#,
/// )
/// .unwrap();
/// assert_eq!(config.lattice.specification, LatticeSpecification::Tian);
/// assert_eq!(config.futures.nb_points, 81);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Configuration name.
    #[serde(default = "default_name")]
    pub name: String,

    /// Description of this configuration.
    #[serde(default)]
    pub description: Option<String>,

    /// Lattice engine settings.
    #[serde(default)]
    pub lattice: LatticeConfig,

    /// Bond futures engine settings.
    #[serde(default)]
    pub futures: FuturesConfig,
}

fn default_name() -> String {
    "DEFAULT".to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            description: None,
            lattice: LatticeConfig::default(),
            futures: FuturesConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Default settings under `name`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the lattice settings.
    #[must_use]
    pub fn with_lattice(mut self, lattice: LatticeConfig) -> Self {
        self.lattice = lattice;
        self
    }

    /// Sets the bond futures settings.
    #[must_use]
    pub fn with_futures(mut self, futures: FuturesConfig) -> Self {
        self.futures = futures;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(document: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(document)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(ValidationError::new("name", "Name cannot be empty"));
        }

        errors.extend(
            self.lattice
                .validate()
                .into_iter()
                .map(|e| e.nested("lattice")),
        );
        errors.extend(
            self.futures
                .validate()
                .into_iter()
                .map(|e| e.nested("futures")),
        );

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConfigError;
    use trellis_lattice::LatticeSpecification;

    #[test]
    fn test_empty_json_uses_defaults() {
        let config = EngineConfig::from_json_str("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = EngineConfig::new("RATES")
            .with_description("Rates desk")
            .with_lattice(LatticeConfig::new(LatticeSpecification::CrrTrinomial, 400));
        let json = config.to_json_string().unwrap();
        assert!(json.contains("\"CRR_TRINOMIAL\""));
        assert_eq!(EngineConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::new("FUTURES")
            .with_futures(FuturesConfig::default().with_nb_points(161));
        let document = config.to_toml_string().unwrap();
        assert_eq!(EngineConfig::from_toml_str(&document).unwrap(), config);
    }

    #[test]
    fn test_invalid_nested_field_is_reported() {
        let err = EngineConfig::from_json_str(r#"{"lattice": {"steps": 100}}"#).unwrap_err();
        match err {
            ConfigError::Validation { field, .. } => assert_eq!(field, "lattice.steps"),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn test_unknown_specification() {
        let err = EngineConfig::from_json_str(r#"{"lattice": {"specification": "BLACK"}}"#)
            .unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            EngineConfig::from_toml_str("lattice = ["),
            Err(ConfigError::Deserialization(_))
        ));
    }
}
