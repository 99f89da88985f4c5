//! Family section of the student form: roster, draft editor and row selection.

use crate::draft::{DraftField, FamilyMemberDraft};
use crate::error::FormError;
use crate::roster::Roster;
use registrar_core::ValidationError;
use registrar_models::FamilyMemberRecord;
use tracing::debug;

/// Which half of the family section is interactable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FamilyView {
    #[default]
    Roster,
    DraftEditor,
}

/// What accepting the draft did to the roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftOutcome {
    Added(usize),
    Replaced(usize),
}

impl DraftOutcome {
    pub fn index(&self) -> usize {
        match self {
            DraftOutcome::Added(index) | DraftOutcome::Replaced(index) => *index,
        }
    }
}

/// Roster plus the single draft editor that feeds it.
///
/// A selected index always points at a valid roster row. Exactly one of the
/// roster's add control and the draft editor is visible at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FamilySection {
    roster: Roster,
    draft: FamilyMemberDraft,
    selected: Option<usize>,
    view: FamilyView,
}

impl FamilySection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    pub fn draft(&self) -> &FamilyMemberDraft {
        &self.draft
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn view(&self) -> FamilyView {
        self.view
    }

    pub fn add_control_visible(&self) -> bool {
        self.view == FamilyView::Roster
    }

    pub fn draft_editor_visible(&self) -> bool {
        self.view == FamilyView::DraftEditor
    }

    /// Open an empty draft that will be appended on acceptance.
    pub fn open_draft(&mut self) -> Result<(), FormError> {
        if self.draft_editor_visible() {
            return Err(FormError::DraftEditorOpen);
        }
        self.draft = FamilyMemberDraft::new();
        self.selected = None;
        self.view = FamilyView::DraftEditor;
        Ok(())
    }

    /// Load row `index` into the draft editor for edit-in-place.
    pub fn select(&mut self, index: usize) -> Result<(), FormError> {
        let record = self
            .roster
            .get(index)
            .ok_or(FormError::NoSuchRow { index })?;
        self.draft = FamilyMemberDraft::from_record(record);
        self.selected = Some(index);
        self.view = FamilyView::DraftEditor;
        debug!(index, "Selected family member");
        Ok(())
    }

    pub fn set_draft_field(&mut self, field: DraftField, value: &str) -> Result<(), FormError> {
        if !self.draft_editor_visible() {
            return Err(FormError::DraftEditorClosed);
        }
        self.draft.set(field, value);
        Ok(())
    }

    /// Accept the draft: replace the selected row, or append when nothing is selected.
    ///
    /// On success the editor closes and the selection clears. An incomplete
    /// draft leaves everything as it was.
    pub fn submit_draft(&mut self) -> Result<DraftOutcome, FormError> {
        if !self.draft_editor_visible() {
            return Err(FormError::DraftEditorClosed);
        }
        self.draft.validate()?;

        let outcome = match self.selected {
            Some(index) => {
                let record = self.draft.to_record().ok_or_else(|| {
                    FormError::Validation(ValidationError::new(
                        "Please fill in all required fields for the family member.",
                    ))
                })?;
                self.roster.replace_at(index, record);
                DraftOutcome::Replaced(index)
            }
            None => DraftOutcome::Added(self.roster.add(&self.draft)?),
        };

        self.close_editor();
        Ok(outcome)
    }

    /// Close the editor without touching the roster.
    pub fn cancel_draft(&mut self) {
        self.close_editor();
    }

    /// Remove row `index` locally.
    ///
    /// A selection after the removed row shifts left with it; removing the
    /// selected row itself clears the selection and closes the editor.
    pub fn remove_at(&mut self, index: usize) -> Result<FamilyMemberRecord, FormError> {
        if index >= self.roster.len() {
            return Err(FormError::NoSuchRow { index });
        }
        let removed = self.roster.remove_at(index);
        match self.selected {
            Some(selected) if selected == index => self.close_editor(),
            Some(selected) if selected > index => self.selected = Some(selected - 1),
            _ => {}
        }
        Ok(removed)
    }

    /// Swap in an authoritative roster, e.g. after a load or re-fetch.
    pub fn replace_roster(&mut self, records: Vec<FamilyMemberRecord>) {
        self.roster = Roster::from_records(records);
        self.close_editor();
    }

    pub fn reset(&mut self) {
        self.roster.clear();
        self.close_editor();
    }

    fn close_editor(&mut self) {
        self.draft = FamilyMemberDraft::new();
        self.selected = None;
        self.view = FamilyView::Roster;
    }
}
