//! Ordered list of family members attached to the student being edited.

use crate::draft::FamilyMemberDraft;
use registrar_core::errors::ValidationError;
use registrar_models::{FamilyMemberId, FamilyMemberRecord};

/// Family members in display order.
///
/// Insertion order is display order. Replacements and removals are
/// positional and never reorder the remaining rows. A roster may mix
/// persisted rows (with an id) and local-only rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    members: Vec<FamilyMemberRecord>,
}

impl Roster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(members: Vec<FamilyMemberRecord>) -> Self {
        Self { members }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FamilyMemberRecord> {
        self.members.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FamilyMemberRecord> {
        self.members.iter()
    }

    pub fn as_slice(&self) -> &[FamilyMemberRecord] {
        &self.members
    }

    /// Rows the backend already holds, with their ids.
    pub fn persisted(&self) -> impl Iterator<Item = (&FamilyMemberId, &FamilyMemberRecord)> {
        self.members
            .iter()
            .filter_map(|member| member.id.as_ref().map(|id| (id, member)))
    }

    /// Rows added locally and not yet persisted.
    pub fn unpersisted(&self) -> impl Iterator<Item = &FamilyMemberRecord> {
        self.members.iter().filter(|member| member.id.is_none())
    }

    /// Append an accepted draft, returning its row index.
    ///
    /// # Errors
    ///
    /// Returns the draft's validation failure if it is incomplete; the roster is unchanged.
    pub fn add(&mut self, draft: &FamilyMemberDraft) -> Result<usize, ValidationError> {
        draft.validate()?;
        let record = draft
            .to_record()
            .ok_or_else(|| ValidationError::new("Please fill in all required fields for the family member."))?;
        self.members.push(record);
        Ok(self.members.len() - 1)
    }

    /// Overwrite the row at `index` in place.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`. Callers only pass indices of rows they
    /// selected from this roster, so an out-of-range index is a bug.
    pub fn replace_at(&mut self, index: usize, record: FamilyMemberRecord) {
        assert!(
            index < self.members.len(),
            "roster replace_at index {index} out of range (len {})",
            self.members.len()
        );
        self.members[index] = record;
    }

    /// Remove the row at `index`, shifting later rows left.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len()`.
    pub fn remove_at(&mut self, index: usize) -> FamilyMemberRecord {
        assert!(
            index < self.members.len(),
            "roster remove_at index {index} out of range (len {})",
            self.members.len()
        );
        self.members.remove(index)
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }
}
