//! # Registrar
//!
//! Administrative client for registering students and their family members
//! against a REST backend.
//!
//! ## Architecture
//!
//! ```text
//! crates/
//! ├── registrar-core/     # Error taxonomy, notices, pagination, serde helpers
//! ├── registrar-config/   # API and screen configuration from the environment
//! ├── registrar-models/   # Students, family members, countries, roles
//! ├── registrar-client/   # StudentApi trait and its reqwest implementation
//! └── registrar-form/     # Draft editor, roster, student form, submission
//! src/
//! ├── cli/                # `registrar` subcommands and interactive prompts
//! └── logging.rs          # tracing-subscriber setup
//! ```
//!
//! ## Roles
//!
//! | Role | Create | Edit existing | Delete / accept / reject |
//! |------|--------|---------------|--------------------------|
//! | User | no | no | no |
//! | Admin Staff | yes | no | no |
//! | Registrar | yes | yes | yes |
//!
//! Roles only decide which controls are offered. The backend is expected
//! to authorize every request on its own.
//!
//! ## Environment Variables
//!
//! ```bash
//! REGISTRAR_API_URL=http://localhost:8200/api
//! REGISTRAR_API_TIMEOUT_SECS=30
//! REGISTRAR_SEARCH_ENABLED=true
//! REGISTRAR_STATUS_WORKFLOW=true
//! REGISTRAR_PAGE_SIZE=5
//! RUST_LOG=registrar=debug
//! ```

pub mod cli;
pub mod logging;

// Re-export workspace crates for convenience
pub use registrar_client;
pub use registrar_config;
pub use registrar_core;
pub use registrar_form;
pub use registrar_models;
