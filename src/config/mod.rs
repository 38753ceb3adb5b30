//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! autochat.toml (optional)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → AppConfig (validated, immutable)
//!     → sections cloned into each component at construction
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults so the file may be absent or partial
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_or_default, ConfigError, DEFAULT_CONFIG_PATH};
pub use schema::AppConfig;
pub use schema::{
    BrowserConfig, EndpointConfig, FilesConfig, HttpConfig, ModelConfig, PacingConfig,
    PromptConfig, RetryConfig,
};
