//! Response envelopes and shape compatibility.
//!
//! The family lookup endpoint has answered in several shapes over time. The
//! contract this client targets is an array whose first element is the
//! student with a `familyMembers` list. A bare object and the older
//! `foundRelations` field name are still accepted.

use crate::error::ApiError;
use registrar_models::{FamilyMemberRecord, Student, StudentId, StudentWithFamily};
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

pub const FAMILY_MEMBERS_FIELD: &str = "familyMembers";
pub const LEGACY_FAMILY_MEMBERS_FIELD: &str = "foundRelations";

/// `{ "data": ... }` wrapper used by list and create responses.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

/// Body of `POST /students`.
#[derive(Debug, Deserialize)]
pub struct CreatedStudent {
    #[serde(rename = "_id")]
    pub id: StudentId,
}

/// Result of a family lookup.
///
/// `degraded` is set when the nested member list was missing or malformed,
/// or when some of its rows could not be read. Unreadable rows are left out
/// instead of failing the whole lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FamilyLookup {
    pub record: StudentWithFamily,
    pub degraded: Option<String>,
}

/// Parse a `GET /students/{id}/FamilyMembers` body.
pub fn parse_family_lookup(value: Value) -> Result<FamilyLookup, ApiError> {
    let mut object = match value {
        Value::Array(items) => items.into_iter().next().ok_or_else(|| {
            ApiError::DataShape("family lookup returned an empty list".to_string())
        })?,
        other => other,
    };

    let members = object.as_object_mut().and_then(|map| {
        map.remove(FAMILY_MEMBERS_FIELD)
            .or_else(|| map.remove(LEGACY_FAMILY_MEMBERS_FIELD))
    });

    let student: Student = serde_json::from_value(object)
        .map_err(|e| ApiError::DataShape(format!("family lookup has no valid student: {e}")))?;

    let (family_members, degraded) = match members {
        None | Some(Value::Null) => (
            Vec::new(),
            Some("response has no family member list".to_string()),
        ),
        Some(Value::Array(rows)) => parse_member_rows(rows),
        Some(_) => (
            Vec::new(),
            Some("family member list is malformed: expected an array".to_string()),
        ),
    };

    if let Some(reason) = &degraded {
        warn!(student_id = %student.id, reason = %reason, "Family lookup degraded");
    }

    Ok(FamilyLookup {
        record: StudentWithFamily {
            student,
            family_members,
        },
        degraded,
    })
}

/// Parse members one at a time; rows that do not parse are dropped and
/// reported in the degraded reason.
fn parse_member_rows(rows: Vec<Value>) -> (Vec<FamilyMemberRecord>, Option<String>) {
    let total = rows.len();
    let mut members = Vec::with_capacity(total);
    let mut first_error = None;

    for row in rows {
        match serde_json::from_value::<FamilyMemberRecord>(row) {
            Ok(member) => members.push(member),
            Err(e) => {
                first_error.get_or_insert(e);
            }
        }
    }

    let degraded = first_error.map(|e| {
        format!(
            "skipped {} of {total} malformed family members: {e}",
            total - members.len()
        )
    });
    (members, degraded)
}
