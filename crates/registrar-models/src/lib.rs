//! # Registrar Models
//!
//! Domain models and request payloads for the Registrar admin client.
//!
//! # Modules
//!
//! - [`countries`]: Countries and the nationality selector sentinel
//! - [`family`]: Family member records, relations and payloads
//! - [`ids`]: Strongly-typed backend ids
//! - [`roles`]: Client-side roles and their capabilities
//! - [`students`]: Students, statuses and payloads
//! - [`validation`]: Declarative payload validation
//!
//! # Example
//!
//! ```ignore
//! use registrar_models::{Role, StudentPayload, validation::check};
//!
//! if Role::AdminStaff.can_create() {
//!     check(&payload)?;
//! }
//! ```

pub mod countries;
pub mod family;
pub mod ids;
pub mod roles;
pub mod students;
pub mod validation;

// Re-export commonly used types at crate root for convenience
pub use countries::{Country, Nationality, UNSELECTED_NATIONALITY};
pub use family::{FamilyMemberPayload, FamilyMemberRecord, Relation};
pub use ids::{CountryId, FamilyMemberId, StudentId};
pub use roles::Role;
pub use students::{
    Gender, StatusDecision, Student, StudentPayload, StudentStatus, StudentWithFamily,
};
