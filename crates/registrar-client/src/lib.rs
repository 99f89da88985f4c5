//! # Registrar Client
//!
//! REST client for the student registry backend.
//!
//! This crate provides:
//! - [`StudentApi`]: the seam between the screen and the backend
//! - [`HttpStudentApi`]: the `reqwest` implementation of that seam
//! - [`wire`]: response envelopes and the family-lookup compatibility parser
//!
//! # Example
//!
//! ```ignore
//! use registrar_client::{HttpStudentApi, StudentApi};
//! use registrar_config::ApiConfig;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = HttpStudentApi::new(&ApiConfig::from_env()).unwrap();
//!     let students = api.list_students().await.unwrap();
//! }
//! ```

pub mod api;
pub mod error;
pub mod http;
pub mod wire;

pub use api::{AttachMode, StudentApi};
pub use error::ApiError;
pub use http::HttpStudentApi;
pub use wire::FamilyLookup;
