//! Student draft form.
//!
//! [`StudentForm`] is a plain state machine: it never performs I/O. Each
//! network round trip is split into a `begin_*` call that hands out a
//! [`SessionTicket`] and a matching `finish_*` call that applies the
//! response only if the ticket still belongs to the current session.

use crate::draft::DraftField;
use crate::error::FormError;
use crate::family::{DraftOutcome, FamilySection};
use chrono::NaiveDate;
use registrar_core::serde::parse_date;
use registrar_models::validation::check;
use registrar_models::{
    FamilyMemberId, FamilyMemberPayload, FamilyMemberRecord, Gender, Nationality, Role, Student,
    StudentId, StudentPayload, StudentStatus, StudentWithFamily,
};
use tracing::{debug, warn};

/// Scalar attribute of a [`StudentDraft`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StudentField {
    FirstName,
    LastName,
    Gender,
    DateOfBirth,
    Nationality,
}

impl StudentField {
    pub fn label(&self) -> &'static str {
        match self {
            StudentField::FirstName => "first name",
            StudentField::LastName => "last name",
            StudentField::Gender => "gender",
            StudentField::DateOfBirth => "date of birth",
            StudentField::Nationality => "nationality",
        }
    }
}

/// The student's own fields while the form is open.
///
/// `id` is present iff the student already exists on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentDraft {
    pub id: Option<StudentId>,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub nationality: Nationality,
    pub status: StudentStatus,
}

impl StudentDraft {
    pub fn from_student(student: &Student) -> Self {
        Self {
            id: Some(student.id.clone()),
            first_name: student.first_name.clone(),
            last_name: student.last_name.clone(),
            gender: student.gender,
            date_of_birth: student.date_of_birth,
            nationality: student.nationality.clone(),
            status: student.status,
        }
    }

    pub fn is_persisted(&self) -> bool {
        self.id.is_some()
    }

    /// Assign one scalar attribute from raw input.
    ///
    /// Empty input clears gender and date of birth. Dates accept
    /// `YYYY-MM-DD` or `DD/MM/YYYY`.
    pub fn set(&mut self, field: StudentField, value: &str) -> Result<(), FormError> {
        let trimmed = value.trim();
        match field {
            StudentField::FirstName => self.first_name = value.to_string(),
            StudentField::LastName => self.last_name = value.to_string(),
            StudentField::Gender => {
                self.gender = if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.parse().map_err(|_| invalid(field, value))?)
                };
            }
            StudentField::DateOfBirth => {
                self.date_of_birth = if trimmed.is_empty() {
                    None
                } else {
                    Some(parse_date(trimmed).ok_or_else(|| invalid(field, value))?)
                };
            }
            StudentField::Nationality => self.nationality = Nationality::parse(value),
        }
        Ok(())
    }

    pub fn to_payload(&self) -> StudentPayload {
        StudentPayload {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            gender: self.gender,
            date_of_birth: self.date_of_birth,
            nationality_id: self.nationality.country_id().cloned(),
        }
    }
}

fn invalid(field: StudentField, value: &str) -> FormError {
    FormError::InvalidValue {
        field: field.label(),
        value: value.to_string(),
    }
}

/// Identifies the form session a request was issued from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionTicket(u64);

impl SessionTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

/// Calls the submission controller must make, captured at confirm time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitPlan {
    Create {
        ticket: SessionTicket,
        student: StudentPayload,
        members: Vec<FamilyMemberPayload>,
    },
    Update {
        ticket: SessionTicket,
        id: StudentId,
        student: StudentPayload,
        existing: Vec<(FamilyMemberId, FamilyMemberPayload)>,
        added: Vec<FamilyMemberPayload>,
    },
}

impl SubmitPlan {
    pub fn ticket(&self) -> SessionTicket {
        match self {
            SubmitPlan::Create { ticket, .. } | SubmitPlan::Update { ticket, .. } => *ticket,
        }
    }

    pub fn is_create(&self) -> bool {
        matches!(self, SubmitPlan::Create { .. })
    }
}

/// A pending family member removal.
///
/// When `record.id` is set the caller deletes it on the backend before
/// calling [`StudentForm::apply_removal`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalPlan {
    pub ticket: SessionTicket,
    pub index: usize,
    pub record: FamilyMemberRecord,
}

/// One modal session of the student form.
#[derive(Debug, Clone, Default)]
pub struct StudentForm {
    role: Role,
    open: bool,
    loading: bool,
    in_flight: bool,
    generation: u64,
    draft: StudentDraft,
    family: FamilySection,
}

impl StudentForm {
    pub fn new(role: Role) -> Self {
        Self {
            role,
            ..Self::default()
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight
    }

    pub fn draft(&self) -> &StudentDraft {
        &self.draft
    }

    pub fn family(&self) -> &FamilySection {
        &self.family
    }

    pub fn is_editable(&self) -> bool {
        self.ensure_editable().is_ok()
    }

    pub fn confirm_enabled(&self) -> bool {
        self.is_editable()
    }

    fn ensure_editable(&self) -> Result<(), FormError> {
        if !self.open {
            return Err(FormError::NotOpen);
        }
        if self.loading {
            return Err(FormError::Loading);
        }
        if self.in_flight {
            return Err(FormError::SubmissionInFlight);
        }
        if !self.role.can_edit(self.draft.is_persisted()) {
            return Err(FormError::ReadOnly { role: self.role });
        }
        Ok(())
    }

    fn is_current(&self, ticket: SessionTicket) -> bool {
        self.open && ticket.0 == self.generation
    }

    fn next_session(&mut self) -> SessionTicket {
        self.generation += 1;
        self.reset();
        self.open = true;
        self.loading = false;
        self.in_flight = false;
        SessionTicket(self.generation)
    }

    /// Restore the draft and the family section to their defaults.
    pub fn reset(&mut self) {
        self.draft = StudentDraft::default();
        self.family.reset();
    }

    /// Open a fresh form for a new student.
    pub fn open_create(&mut self) -> Result<SessionTicket, FormError> {
        if !self.role.can_create() {
            return Err(FormError::ReadOnly { role: self.role });
        }
        Ok(self.next_session())
    }

    /// Open the form for an existing student whose record is being fetched.
    pub fn begin_load(&mut self, id: StudentId) -> SessionTicket {
        let ticket = self.next_session();
        self.draft.id = Some(id);
        self.loading = true;
        ticket
    }

    /// Populate the draft and roster from a fetched record.
    ///
    /// Returns `false` and changes nothing when the ticket is stale.
    pub fn finish_load(&mut self, ticket: SessionTicket, record: StudentWithFamily) -> bool {
        if !self.is_current(ticket) || !self.loading {
            debug!(generation = ticket.0, "Discarding stale load response");
            return false;
        }
        self.draft = StudentDraft::from_student(&record.student);
        self.family.replace_roster(record.family_members);
        self.loading = false;
        true
    }

    /// Close the form after a failed load.
    pub fn abort_load(&mut self, ticket: SessionTicket) -> bool {
        if !self.is_current(ticket) || !self.loading {
            return false;
        }
        self.close();
        true
    }

    pub fn close(&mut self) {
        self.generation += 1;
        self.reset();
        self.open = false;
        self.loading = false;
        self.in_flight = false;
    }

    pub fn set_field(&mut self, field: StudentField, value: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.draft.set(field, value)
    }

    pub fn open_family_draft(&mut self) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.family.open_draft()
    }

    pub fn select_family_member(&mut self, index: usize) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.family.select(index)
    }

    pub fn set_family_field(&mut self, field: DraftField, value: &str) -> Result<(), FormError> {
        self.ensure_editable()?;
        self.family.set_draft_field(field, value)
    }

    pub fn submit_family_draft(&mut self) -> Result<DraftOutcome, FormError> {
        self.ensure_editable()?;
        self.family.submit_draft()
    }

    pub fn cancel_family_draft(&mut self) {
        self.family.cancel_draft();
    }

    /// Check that row `index` may be removed and capture it.
    pub fn plan_removal(&self, index: usize) -> Result<RemovalPlan, FormError> {
        self.ensure_editable()?;
        let record = self
            .family
            .roster()
            .get(index)
            .cloned()
            .ok_or(FormError::NoSuchRow { index })?;
        Ok(RemovalPlan {
            ticket: SessionTicket(self.generation),
            index,
            record,
        })
    }

    /// Remove the planned row locally, whatever the backend said.
    pub fn apply_removal(&mut self, plan: &RemovalPlan) -> bool {
        if !self.is_current(plan.ticket) {
            debug!(generation = plan.ticket.0, "Discarding stale removal");
            return false;
        }
        if self.family.roster().get(plan.index) != Some(&plan.record) {
            warn!(index = plan.index, "Family roster changed before removal was applied");
            return false;
        }
        self.family.remove_at(plan.index).is_ok()
    }

    /// Validate the draft and lock the form for submission.
    ///
    /// The lock holds until [`end_submit`](Self::end_submit) or
    /// [`close`](Self::close); a second confirm meanwhile is refused.
    pub fn begin_submit(&mut self) -> Result<SubmitPlan, FormError> {
        self.ensure_editable()?;
        let student = self.draft.to_payload();
        check(&student)?;

        let ticket = SessionTicket(self.generation);
        let plan = match &self.draft.id {
            None => SubmitPlan::Create {
                ticket,
                student,
                members: self
                    .family
                    .roster()
                    .iter()
                    .map(FamilyMemberPayload::from)
                    .collect(),
            },
            Some(id) => SubmitPlan::Update {
                ticket,
                id: id.clone(),
                student,
                existing: self
                    .family
                    .roster()
                    .persisted()
                    .map(|(id, record)| (id.clone(), FamilyMemberPayload::from(record)))
                    .collect(),
                added: self
                    .family
                    .roster()
                    .unpersisted()
                    .map(FamilyMemberPayload::from)
                    .collect(),
            },
        };

        self.in_flight = true;
        Ok(plan)
    }

    /// Release the submission lock. Returns `false` when the ticket is stale.
    pub fn end_submit(&mut self, ticket: SessionTicket) -> bool {
        if !self.is_current(ticket) {
            debug!(generation = ticket.0, "Discarding stale submission result");
            return false;
        }
        self.in_flight = false;
        true
    }

    /// Replace the roster with the backend's after a reconciliation fetch.
    pub fn refresh_family(&mut self, ticket: SessionTicket, records: Vec<FamilyMemberRecord>) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        self.family.replace_roster(records);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use registrar_models::Relation;

    fn fill_student(form: &mut StudentForm) {
        form.set_field(StudentField::FirstName, "Ana").unwrap();
        form.set_field(StudentField::LastName, "Li").unwrap();
        form.set_field(StudentField::Gender, "female").unwrap();
        form.set_field(StudentField::DateOfBirth, "2010-05-01").unwrap();
        form.set_field(StudentField::Nationality, "C1").unwrap();
    }

    fn add_member(form: &mut StudentForm, name: &str) {
        form.open_family_draft().unwrap();
        form.set_family_field(DraftField::Name, name).unwrap();
        form.set_family_field(DraftField::Relation, "Sibling").unwrap();
        form.set_family_field(DraftField::Nationality, "C2").unwrap();
        form.submit_family_draft().unwrap();
    }

    fn existing_record() -> StudentWithFamily {
        StudentWithFamily {
            student: sample_student(),
            family_members: vec![FamilyMemberRecord {
                id: Some(FamilyMemberId::new("fm1")),
                name: "Bo".to_string(),
                relation: Relation::Father,
                nationality: Nationality::parse("C2"),
            }],
        }
    }

    fn sample_student() -> Student {
        Student {
            id: StudentId::new("s1"),
            first_name: "Ana".to_string(),
            last_name: "Li".to_string(),
            gender: Some(Gender::Female),
            date_of_birth: NaiveDate::from_ymd_opt(2010, 5, 1),
            nationality: Nationality::parse("C1"),
            status: StudentStatus::Pending,
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut form = StudentForm::new(Role::Registrar);
        form.open_create().unwrap();
        fill_student(&mut form);
        add_member(&mut form, "Bo");
        form.select_family_member(0).unwrap();

        form.reset();
        let draft = form.draft();
        assert!(draft.first_name.is_empty());
        assert!(draft.last_name.is_empty());
        assert_eq!(draft.gender, None);
        assert_eq!(draft.date_of_birth, None);
        assert_eq!(draft.nationality, Nationality::Unselected);
        assert_eq!(draft.status, StudentStatus::Pending);
        assert!(form.family().roster().is_empty());
        assert_eq!(form.family().selected(), None);
        assert!(form.family().add_control_visible());
    }

    #[test]
    fn test_set_field_parses_values() {
        let mut draft = StudentDraft::default();
        draft.set(StudentField::DateOfBirth, "01/05/2010").unwrap();
        assert_eq!(draft.date_of_birth, NaiveDate::from_ymd_opt(2010, 5, 1));
        draft.set(StudentField::DateOfBirth, "").unwrap();
        assert_eq!(draft.date_of_birth, None);

        assert!(matches!(
            draft.set(StudentField::Gender, "robot"),
            Err(FormError::InvalidValue { field: "gender", .. })
        ));
        assert!(draft.set(StudentField::DateOfBirth, "yesterday").is_err());
        draft.set(StudentField::Gender, "Male").unwrap();
        assert_eq!(draft.gender, Some(Gender::Male));
    }

    #[test]
    fn test_create_plan_carries_whole_roster() {
        let mut form = StudentForm::new(Role::AdminStaff);
        form.open_create().unwrap();
        fill_student(&mut form);
        add_member(&mut form, "Bo");

        let plan = form.begin_submit().unwrap();
        match plan {
            SubmitPlan::Create { student, members, .. } => {
                assert_eq!(student.last_name, "Li");
                assert_eq!(members.len(), 1);
                assert_eq!(members[0].name, "Bo");
            }
            other => panic!("expected create plan, got {other:?}"),
        }
        assert!(form.is_submitting());
    }

    #[test]
    fn test_validation_blocks_submit() {
        let mut form = StudentForm::new(Role::Registrar);
        form.open_create().unwrap();
        fill_student(&mut form);
        form.set_field(StudentField::LastName, "  ").unwrap();

        let err = form.begin_submit().unwrap_err();
        assert!(matches!(err, FormError::Validation(_)));
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_second_confirm_is_refused_while_in_flight() {
        let mut form = StudentForm::new(Role::Registrar);
        form.open_create().unwrap();
        fill_student(&mut form);

        let plan = form.begin_submit().unwrap();
        assert!(!form.confirm_enabled());
        assert_eq!(form.begin_submit(), Err(FormError::SubmissionInFlight));
        assert_eq!(
            form.set_field(StudentField::FirstName, "Bo"),
            Err(FormError::SubmissionInFlight)
        );

        assert!(form.end_submit(plan.ticket()));
        assert!(form.confirm_enabled());
    }

    #[test]
    fn test_admin_staff_cannot_edit_existing() {
        let mut form = StudentForm::new(Role::AdminStaff);
        let ticket = form.begin_load(StudentId::new("s1"));
        assert!(form.finish_load(ticket, existing_record()));

        assert!(!form.is_editable());
        assert!(!form.confirm_enabled());
        let read_only = Err(FormError::ReadOnly {
            role: Role::AdminStaff,
        });
        assert_eq!(form.set_field(StudentField::FirstName, "X"), read_only);
        assert_eq!(form.open_family_draft(), read_only);
        assert_eq!(form.select_family_member(0).map(|_| ()), read_only);
        assert_eq!(form.plan_removal(0).map(|_| ()), read_only);
        assert_eq!(form.begin_submit().map(|_| ()), read_only);
        assert_eq!(form.draft().first_name, "Ana");
    }

    #[test]
    fn test_user_role_cannot_open_create() {
        let mut form = StudentForm::new(Role::User);
        assert_eq!(
            form.open_create(),
            Err(FormError::ReadOnly { role: Role::User })
        );
        assert!(!form.is_open());
    }

    #[test]
    fn test_loading_form_is_not_editable() {
        let mut form = StudentForm::new(Role::Registrar);
        form.begin_load(StudentId::new("s1"));
        assert!(form.is_loading());
        assert_eq!(
            form.set_field(StudentField::FirstName, "X"),
            Err(FormError::Loading)
        );
        assert!(!form.confirm_enabled());
    }

    #[test]
    fn test_stale_load_is_discarded() {
        let mut form = StudentForm::new(Role::Registrar);
        let stale = form.begin_load(StudentId::new("s1"));
        form.close();
        form.open_create().unwrap();

        assert!(!form.finish_load(stale, existing_record()));
        assert!(form.draft().id.is_none());
        assert!(form.family().roster().is_empty());
    }

    #[test]
    fn test_abort_load_closes_form() {
        let mut form = StudentForm::new(Role::Registrar);
        let ticket = form.begin_load(StudentId::new("s1"));
        assert!(form.abort_load(ticket));
        assert!(!form.is_open());
    }

    #[test]
    fn test_update_plan_splits_persisted_and_added() {
        let mut form = StudentForm::new(Role::Registrar);
        let ticket = form.begin_load(StudentId::new("s1"));
        form.finish_load(ticket, existing_record());
        add_member(&mut form, "Cy");

        match form.begin_submit().unwrap() {
            SubmitPlan::Update {
                id, existing, added, ..
            } => {
                assert_eq!(id.as_str(), "s1");
                assert_eq!(existing.len(), 1);
                assert_eq!(existing[0].0.as_str(), "fm1");
                assert_eq!(added.len(), 1);
                assert_eq!(added[0].name, "Cy");
            }
            other => panic!("expected update plan, got {other:?}"),
        }
    }

    #[test]
    fn test_removal_plan_and_apply() {
        let mut form = StudentForm::new(Role::Registrar);
        let ticket = form.begin_load(StudentId::new("s1"));
        form.finish_load(ticket, existing_record());

        let plan = form.plan_removal(0).unwrap();
        assert_eq!(plan.record.id.as_ref().map(FamilyMemberId::as_str), Some("fm1"));
        assert!(form.apply_removal(&plan));
        assert!(form.family().roster().is_empty());
        assert!(!form.apply_removal(&plan));
    }

    #[test]
    fn test_end_submit_with_stale_ticket() {
        let mut form = StudentForm::new(Role::Registrar);
        form.open_create().unwrap();
        fill_student(&mut form);
        let plan = form.begin_submit().unwrap();
        form.close();
        assert!(!form.end_submit(plan.ticket()));
    }
}
