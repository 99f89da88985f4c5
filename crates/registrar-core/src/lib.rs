//! # Registrar Core
//!
//! Core types, errors, and utilities for the Registrar admin client.
//!
//! This crate provides foundational types used throughout the workspace:
//!
//! - [`errors`]: The error taxonomy surfaced at handler boundaries
//! - [`notice`]: User-visible success and failure notifications
//! - [`pagination`]: Client-side pagination for the student table
//! - [`serde`]: Lenient serde helpers for backend payloads
//!
//! # Example
//!
//! ```ignore
//! use registrar_core::errors::AppError;
//! use registrar_core::notice::Notice;
//! use registrar_core::pagination::PageRequest;
//!
//! let error = AppError::network(anyhow::anyhow!("connection refused"));
//! let notice = Notice::from(&error);
//!
//! let request = PageRequest::default();
//! let page = request.paginate(&rows);
//! ```

pub mod errors;
pub mod notice;
pub mod pagination;
pub mod serde;

// Re-export commonly used types at crate root
pub use errors::{AppError, ErrorKind, ValidationError};
pub use notice::Notice;
pub use pagination::{Page, PageRequest, PaginationMeta};
