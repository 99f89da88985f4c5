//! Student domain models and payloads.
//!
//! This module contains the student entity as the backend returns it, the
//! combined student-plus-family lookup, status values and the request body
//! used for both create and update calls.

use crate::countries::Nationality;
use crate::family::FamilyMemberRecord;
use crate::ids::{CountryId, StudentId};
use chrono::NaiveDate;
use registrar_core::serde::{deserialize_lenient_date, deserialize_lenient_from_str};
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

/// Display format for dates of birth in the student table.
pub const DATE_DISPLAY_FORMAT: &str = "%d-%m-%Y";

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Gender {
    Male,
    Female,
    Other,
}

/// Position of a student in the approval workflow.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum StudentStatus {
    #[default]
    Pending,
    Accepted,
    Rejected,
}

/// A registrar's decision on a pending student.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusDecision {
    Accept,
    Reject,
}

impl StatusDecision {
    /// Status the student ends up in.
    pub fn target(&self) -> StudentStatus {
        match self {
            StatusDecision::Accept => StudentStatus::Accepted,
            StatusDecision::Reject => StudentStatus::Rejected,
        }
    }

    /// Trailing path segment of the transition endpoint.
    pub fn path_segment(&self) -> &'static str {
        match self {
            StatusDecision::Accept => "Accepted",
            StatusDecision::Reject => "Rejected",
        }
    }
}

fn deserialize_status<'de, D>(deserializer: D) -> Result<StudentStatus, D::Error>
where
    D: Deserializer<'de>,
{
    let status: Option<StudentStatus> = deserialize_lenient_from_str(deserializer)?;
    Ok(status.unwrap_or_default())
}

/// A student as stored by the backend.
///
/// Only `_id` is strict. Scalar fields the backend sends in an unexpected
/// shape fall back to empty so one bad row does not fail a whole list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Student {
    #[serde(rename = "_id")]
    pub id: StudentId,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default, deserialize_with = "deserialize_lenient_from_str")]
    pub gender: Option<Gender>,
    #[serde(default, deserialize_with = "deserialize_lenient_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(rename = "nationalityId", default)]
    pub nationality: Nationality,
    #[serde(default, deserialize_with = "deserialize_status")]
    pub status: StudentStatus,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Date of birth as `DD-MM-YYYY`, empty when unknown.
    pub fn date_of_birth_display(&self) -> String {
        self.date_of_birth
            .map(|d| d.format(DATE_DISPLAY_FORMAT).to_string())
            .unwrap_or_default()
    }

    /// Case-insensitive substring match on first or last name.
    pub fn matches_name(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.first_name.to_lowercase().contains(&needle)
            || self.last_name.to_lowercase().contains(&needle)
    }
}

/// A student together with its family members.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentWithFamily {
    pub student: Student,
    pub family_members: Vec<FamilyMemberRecord>,
}

/// Scalar student fields sent on create and update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct StudentPayload {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(required(message = "Gender is required"))]
    pub gender: Option<Gender>,
    #[validate(required(message = "Date of birth is required"))]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality_id: Option<CountryId>,
}
