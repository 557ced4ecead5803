//! Configuration system for dinocage.
//!
//! # Configuration Precedence
//!
//! Configuration is merged from multiple sources with the following precedence
//! (highest to lowest):
//!
//! 1. Programmatic overrides (via `ConfigBuilder::with_config`)
//! 2. Environment variables (`DINOCAGE_*`)
//! 3. User config (`{data_dir}/config.yaml`)
//! 4. Built-in defaults
//!
//! # Examples
//!
//! ```no_run
//! use dinocage::config::ConfigBuilder;
//! use std::path::Path;
//!
//! let config = ConfigBuilder::new()
//!     .with_data_dir(Path::new("/srv/dinocage"))
//!     .build()
//!     .unwrap();
//!
//! println!("new cages hold {}", config.cage_capacity().unwrap());
//! ```

pub mod builder;
pub mod environment;
pub mod loader;
pub mod merger;
pub mod schema;
pub mod validator;

// Re-export key types at module root
pub use builder::ConfigBuilder;
pub use environment::EnvironmentConfig;
pub use loader::{ConfigLoader, ConfigSource, CONFIG_FILE_NAME};
pub use merger::ConfigMerger;
pub use schema::{Config, OutputFormat, DEFAULT_LOCK_WAIT_SECONDS};
pub use validator::ConfigValidator;
