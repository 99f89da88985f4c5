//! Family member models and payloads.

use crate::countries::Nationality;
use crate::ids::{CountryId, FamilyMemberId};
use registrar_core::serde::deserialize_optional_from_str;
use serde::{Deserialize, Deserializer, Serialize};
use strum::{Display, EnumIter, EnumString};
use validator::Validate;

/// Relationship of a family member to the student.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[strum(ascii_case_insensitive)]
pub enum Relation {
    Father,
    Mother,
    Uncle,
    Sibling,
}

/// Accepts any casing the backend sends, e.g. `"father"` for [`Relation::Father`].
fn deserialize_relation<'de, D>(deserializer: D) -> Result<Relation, D::Error>
where
    D: Deserializer<'de>,
{
    let relation: Option<Relation> = deserialize_optional_from_str(deserializer)?;
    relation.ok_or_else(|| serde::de::Error::custom("relation is required"))
}

/// A family member attached to a student.
///
/// `id` is absent until the backend has persisted the member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyMemberRecord {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<FamilyMemberId>,
    pub name: String,
    #[serde(deserialize_with = "deserialize_relation")]
    pub relation: Relation,
    #[serde(rename = "nationalityId", default)]
    pub nationality: Nationality,
}

impl FamilyMemberRecord {
    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }
}

/// Body for attaching or updating a family member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMemberPayload {
    #[validate(length(min = 1, message = "Family member name is required"))]
    pub name: String,
    pub relation: Relation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nationality_id: Option<CountryId>,
}

impl From<&FamilyMemberRecord> for FamilyMemberPayload {
    fn from(record: &FamilyMemberRecord) -> Self {
        Self {
            name: record.name.clone(),
            relation: record.relation,
            nationality_id: record.nationality.country_id().cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_relation_parse_case_insensitive() {
        assert_eq!("sibling".parse::<Relation>().unwrap(), Relation::Sibling);
        assert_eq!("Father".parse::<Relation>().unwrap(), Relation::Father);
        assert!("Cousin".parse::<Relation>().is_err());
        assert!("".parse::<Relation>().is_err());
    }

    #[test]
    fn test_relation_options_in_order() {
        let options: Vec<String> = Relation::iter().map(|r| r.to_string()).collect();
        assert_eq!(options, ["Father", "Mother", "Uncle", "Sibling"]);
    }

    #[test]
    fn test_record_deserialize_with_and_without_id() {
        let record: FamilyMemberRecord = serde_json::from_str(
            r#"{"_id": "fm1", "name": "Bo", "relation": "Sibling", "nationalityId": "C2"}"#,
        )
        .unwrap();
        assert!(record.is_persisted());
        assert_eq!(record.nationality, Nationality::Country(CountryId::new("C2")));

        let record: FamilyMemberRecord =
            serde_json::from_str(r#"{"name": "Bo", "relation": "Mother"}"#).unwrap();
        assert!(!record.is_persisted());
        assert_eq!(record.nationality, Nationality::Unselected);
    }

    #[test]
    fn test_record_relation_any_case() {
        let record: FamilyMemberRecord =
            serde_json::from_str(r#"{"name": "Bo", "relation": "father"}"#).unwrap();
        assert_eq!(record.relation, Relation::Father);

        let missing: Result<FamilyMemberRecord, _> =
            serde_json::from_str(r#"{"name": "Bo", "relation": ""}"#);
        assert!(missing.is_err());
        let unknown: Result<FamilyMemberRecord, _> =
            serde_json::from_str(r#"{"name": "Bo", "relation": "Cousin"}"#);
        assert!(unknown.is_err());
    }

    #[test]
    fn test_payload_from_record() {
        let record = FamilyMemberRecord {
            id: Some(FamilyMemberId::new("fm1")),
            name: "Bo".to_string(),
            relation: Relation::Sibling,
            nationality: Nationality::Country(CountryId::new("C2")),
        };
        let payload = FamilyMemberPayload::from(&record);
        assert_eq!(
            serde_json::to_value(&payload).unwrap(),
            serde_json::json!({"name": "Bo", "relation": "Sibling", "nationalityId": "C2"})
        );
    }

    #[test]
    fn test_payload_empty_name_invalid() {
        let payload = FamilyMemberPayload {
            name: String::new(),
            relation: Relation::Uncle,
            nationality_id: None,
        };
        assert!(payload.validate().is_err());
    }
}
