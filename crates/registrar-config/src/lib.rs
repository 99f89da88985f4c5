//! # Registrar Config
//!
//! Configuration types for the Registrar admin client.
//!
//! This crate provides configuration structures loaded from environment variables:
//!
//! - [`api`]: REST backend location and request timeout
//! - [`screen`]: Feature flags and table defaults for the student screen
//!
//! Nothing here is process-wide state: callers build a config and pass it
//! explicitly to the client and the screen.
//!
//! # Example
//!
//! ```ignore
//! use registrar_config::{ApiConfig, ScreenConfig};
//!
//! let api_config = ApiConfig::from_env();
//! let screen_config = ScreenConfig::from_env();
//! ```

pub mod api;
pub mod screen;

// Re-export commonly used types at crate root
pub use api::ApiConfig;
pub use screen::ScreenConfig;
