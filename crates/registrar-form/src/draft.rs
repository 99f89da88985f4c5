//! The family member being typed.

use registrar_core::errors::ValidationError;
use registrar_models::{FamilyMemberId, FamilyMemberRecord, Nationality, Relation};

/// Attribute of a [`FamilyMemberDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Relation,
    Nationality,
}

/// The single in-progress family member.
///
/// Holds raw selector state only; nothing is persisted until the draft is
/// accepted into the roster. When editing an existing row the draft carries
/// that row's backend id so the replacement keeps it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilyMemberDraft {
    id: Option<FamilyMemberId>,
    name: String,
    relation: Option<Relation>,
    nationality: Nationality,
}

impl FamilyMemberDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate from an existing roster row.
    pub fn from_record(record: &FamilyMemberRecord) -> Self {
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            relation: Some(record.relation),
            nationality: record.nationality.clone(),
        }
    }

    pub fn id(&self) -> Option<&FamilyMemberId> {
        self.id.as_ref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn relation(&self) -> Option<Relation> {
        self.relation
    }

    pub fn nationality(&self) -> &Nationality {
        &self.nationality
    }

    /// Replace one attribute, leaving the others untouched.
    ///
    /// An unrecognized relation clears the relation rather than failing;
    /// [`is_complete`](Self::is_complete) then reports the draft incomplete.
    pub fn set(&mut self, field: DraftField, value: &str) {
        match field {
            DraftField::Name => self.name = value.to_string(),
            DraftField::Relation => self.relation = value.trim().parse().ok(),
            DraftField::Nationality => self.nationality = Nationality::parse(value),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing_fields().is_empty()
    }

    fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("Family member name is required");
        }
        if self.relation.is_none() {
            missing.push("Relationship is required");
        }
        if !self.nationality.is_selected() {
            missing.push("Nationality is required");
        }
        missing
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        let missing = self.missing_fields();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::from_messages(missing))
        }
    }

    /// The record this draft becomes on acceptance, `None` while incomplete.
    pub fn to_record(&self) -> Option<FamilyMemberRecord> {
        let relation = self.relation?;
        if !self.is_complete() {
            return None;
        }
        Some(FamilyMemberRecord {
            id: self.id.clone(),
            name: self.name.trim().to_string(),
            relation,
            nationality: self.nationality.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_models::{CountryId, UNSELECTED_NATIONALITY};

    fn complete_draft() -> FamilyMemberDraft {
        let mut draft = FamilyMemberDraft::new();
        draft.set(DraftField::Name, "Bo");
        draft.set(DraftField::Relation, "Sibling");
        draft.set(DraftField::Nationality, "C2");
        draft
    }

    #[test]
    fn test_new_draft_is_incomplete() {
        let draft = FamilyMemberDraft::new();
        assert!(!draft.is_complete());
        assert_eq!(draft.validate().unwrap_err().messages().len(), 3);
    }

    #[test]
    fn test_complete_draft() {
        let draft = complete_draft();
        assert!(draft.is_complete());
        let record = draft.to_record().unwrap();
        assert_eq!(record.name, "Bo");
        assert_eq!(record.relation, Relation::Sibling);
        assert_eq!(record.nationality, Nationality::Country(CountryId::new("C2")));
        assert!(record.id.is_none());
    }

    #[test]
    fn test_each_missing_field_makes_draft_incomplete() {
        let mut draft = complete_draft();
        draft.set(DraftField::Name, "   ");
        assert!(!draft.is_complete());

        let mut draft = complete_draft();
        draft.set(DraftField::Relation, "");
        assert!(!draft.is_complete());

        let mut draft = complete_draft();
        draft.set(DraftField::Relation, "Neighbour");
        assert!(!draft.is_complete());

        let mut draft = complete_draft();
        draft.set(DraftField::Nationality, UNSELECTED_NATIONALITY);
        assert!(!draft.is_complete());
        assert!(draft.to_record().is_none());
    }

    #[test]
    fn test_set_leaves_other_fields_untouched() {
        let mut draft = complete_draft();
        draft.set(DraftField::Name, "Cy");
        assert_eq!(draft.name(), "Cy");
        assert_eq!(draft.relation(), Some(Relation::Sibling));
        assert_eq!(draft.nationality(), &Nationality::parse("C2"));
    }

    #[test]
    fn test_from_record_keeps_id() {
        let record = FamilyMemberRecord {
            id: Some(FamilyMemberId::new("fm1")),
            name: "Bo".to_string(),
            relation: Relation::Father,
            nationality: Nationality::parse("C2"),
        };
        let draft = FamilyMemberDraft::from_record(&record);
        assert_eq!(draft.id().map(FamilyMemberId::as_str), Some("fm1"));
        assert_eq!(draft.to_record().unwrap(), record);
    }
}
