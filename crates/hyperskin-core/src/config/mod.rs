//! # Configuration System
//!
//! Hierarchical TOML configuration for HyperSkin, plus the resolved
//! [`Paths`] context handed to every file operation.
//!
//! ## Configuration Hierarchy
//!
//! 1. **Hardcoded defaults**
//! 2. **User config** - `~/.hyperskin/config.toml`
//! 3. **Project config** - `./.hyperskin/config.toml`
//! 4. **CLI arguments** - explicit path flags (highest priority)
//!
//! ## Loading Configuration
//!
//! ```rust,no_run
//! use hyperskin_core::config::{HyperskinConfig, Paths};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = HyperskinConfig::load_hierarchy()?;
//!     let paths = Paths::resolve(&config)?;
//!     println!("{}", paths.hyper_config.display());
//!     Ok(())
//! }
//! ```

pub mod defaults;
pub mod loading;
pub mod paths;
pub mod types;
pub mod validation;

pub use paths::Paths;
pub use types::{HistoryConfig, HyperskinConfig, PathsConfig};
pub use validation::validate_config;

impl HyperskinConfig {
    /// Load configuration from the hierarchy of config files.
    ///
    /// See [`loading::load_hierarchy`] for details.
    pub fn load_hierarchy() -> Result<Self, crate::errors::ConfigError> {
        loading::load_hierarchy()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), crate::errors::ConfigError> {
        validation::validate_config(self)
    }
}
