//! Strongly-typed ID newtypes for backend entities.
//!
//! The backend hands out opaque string ids (its `_id` field). Each entity
//! gets its own wrapper so a `CountryId` can never be passed where a
//! `StudentId` is expected.
//!
//! # Example
//!
//! ```ignore
//! use registrar_models::ids::{StudentId, FamilyMemberId};
//!
//! fn delete_student(id: &StudentId) { /* ... */ }
//!
//! let id = StudentId::new("65a1f0c2e4b0a1b2c3d4e5f6");
//! delete_student(&id);
//! // delete_student(&FamilyMemberId::new("fm1")); // Compile error! Type mismatch.
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro to define a strongly-typed string ID newtype.
macro_rules! define_id {
    (
        $(#[$meta:meta])*
        $name:ident
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            #[inline]
            pub fn new<S: Into<String>>(id: S) -> Self {
                Self(id.into())
            }

            #[inline]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            #[inline]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<String> for $name {
            #[inline]
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            #[inline]
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            #[inline]
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(
    /// Backend id of a student.
    StudentId
);

define_id!(
    /// Backend id of a persisted family member.
    FamilyMemberId
);

define_id!(
    /// Backend id of a country.
    CountryId
);
