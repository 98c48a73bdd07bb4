//! # Trellis Configuration
//!
//! Serde configuration for the Trellis engines:
//!
//! - **Lattice**: specification and number of steps
//! - **Bond futures**: integration points and crossing search settings
//! - **Validation**: every rule checked at once through [`Validate`]
//!
//! Documents load from JSON or TOML; every field has a default.
//!
//! # Example
//!
//! ```rust
//! use trellis_config::{EngineConfig, Validate};
//!
//! let config = EngineConfig::from_json_str(
//!     r#"{ "name": "DESK", "futures": { "nb_points": 161 } }"#,
//! )
//! .unwrap();
//! assert!(config.is_valid());
//! assert_eq!(config.lattice.steps, 301);
//! assert_eq!(config.futures.method().nb_points(), 161);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]

pub mod engine;
pub mod error;
pub mod futures;
pub mod lattice;

pub use engine::EngineConfig;
pub use error::{ConfigError, ConfigResult, Validate, ValidationError};
pub use futures::FuturesConfig;
pub use lattice::LatticeConfig;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::engine::EngineConfig;
    pub use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};
    pub use crate::futures::FuturesConfig;
    pub use crate::lattice::LatticeConfig;
}
