//! Student screen driver.
//!
//! [`StudentScreen`] owns the backend client, the student list and the one
//! open [`StudentForm`]. Every handler catches its own failures and records
//! them as [`Notice`]s; nothing propagates to the caller.

use crate::controller::{SubmissionController, SubmitOutcome};
use crate::draft::DraftField;
use crate::error::FormError;
use crate::family::DraftOutcome;
use crate::reference::CountryDirectory;
use crate::student::{SessionTicket, StudentField, StudentForm, SubmitPlan};
use futures::future::join;
use registrar_client::{ApiError, StudentApi};
use registrar_config::ScreenConfig;
use registrar_core::errors::{AppError, ErrorKind};
use registrar_core::notice::Notice;
use registrar_core::pagination::{PageRequest, PaginationMeta};
use registrar_models::{Role, StatusDecision, Student, StudentId};
use tracing::{info, instrument, warn};

/// Result of pressing confirm.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmOutcome {
    Created(StudentId),
    Updated(StudentId),
    /// The student was saved but `failed` family member calls were not.
    /// The form stays open showing the re-fetched roster. If that re-fetch
    /// fails after new members were attached, the form closes instead so
    /// they cannot be attached twice.
    PartiallyUpdated { id: StudentId, failed: usize },
    /// Refused before any call was made.
    Rejected(ErrorKind),
    /// The backend refused or could not be reached; the draft is intact.
    Failed(ErrorKind),
}

/// Per-row controls offered to the active role.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowActions {
    pub edit: bool,
    pub delete: bool,
    pub change_status: bool,
}

/// One student as displayed in the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRow {
    pub id: StudentId,
    pub first_name: String,
    pub last_name: String,
    pub gender: String,
    pub date_of_birth: String,
    pub nationality: String,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentTable {
    pub rows: Vec<StudentRow>,
    pub meta: PaginationMeta,
    pub actions: RowActions,
}

pub struct StudentScreen<A> {
    api: A,
    config: ScreenConfig,
    countries: CountryDirectory,
    students: Vec<Student>,
    search: String,
    page: PageRequest,
    form: StudentForm,
    notices: Vec<Notice>,
}

impl<A: StudentApi> StudentScreen<A> {
    pub fn new(api: A, config: ScreenConfig, role: Role) -> Self {
        let page = PageRequest {
            per_page: Some(config.page_size),
            page: Some(1),
        };
        Self {
            api,
            config,
            countries: CountryDirectory::default(),
            students: Vec::new(),
            search: String::new(),
            page,
            form: StudentForm::new(role),
            notices: Vec::new(),
        }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn config(&self) -> &ScreenConfig {
        &self.config
    }

    pub fn role(&self) -> Role {
        self.form.role()
    }

    pub fn form(&self) -> &StudentForm {
        &self.form
    }

    pub fn countries(&self) -> &CountryDirectory {
        &self.countries
    }

    pub fn students(&self) -> &[Student] {
        &self.students
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn notify_error<E: Into<AppError>>(&mut self, err: E) {
        let err: AppError = err.into();
        warn!(kind = %err.kind, error = %err, "Operation failed");
        self.notices.push(Notice::from(&err));
    }

    fn notify_success<S: Into<String>>(&mut self, message: S) {
        self.notices.push(Notice::success(message));
    }

    fn notify_degraded(&mut self, reason: &str) {
        self.notify_error(AppError::data_shape(anyhow::anyhow!(
            "Family members could not be fully loaded: {reason}"
        )));
    }

    fn guard<T>(&mut self, result: Result<T, FormError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                self.notify_error(e);
                None
            }
        }
    }

    /// Load reference data and the student list.
    #[instrument(skip(self))]
    pub async fn activate(&mut self) {
        let (countries, students) = join(self.api.list_countries(), self.api.list_students()).await;

        match countries {
            Ok(countries) => self.countries = CountryDirectory::new(countries),
            Err(e) => self.notify_error(e),
        }
        match students {
            Ok(students) => self.students = students,
            Err(e) => self.notify_error(e),
        }
    }

    pub async fn refresh_list(&mut self) -> bool {
        match self.api.list_students().await {
            Ok(students) => {
                self.students = students;
                true
            }
            Err(e) => {
                self.notify_error(e);
                false
            }
        }
    }

    pub fn set_role(&mut self, role: Role) {
        info!(role = %role, "Role changed");
        self.form.set_role(role);
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    /// Filter rows by first or last name; ignored when search is switched off.
    pub fn set_search(&mut self, text: &str) -> bool {
        if !self.config.search_enabled {
            self.notify_error(AppError::disabled(anyhow::anyhow!("search is not enabled")));
            return false;
        }
        self.search = text.trim().to_string();
        self.page = self.page.first_page();
        true
    }

    pub fn set_page(&mut self, page: usize) {
        self.page.page = Some(page.max(1));
    }

    pub fn set_per_page(&mut self, per_page: usize) {
        self.page = PageRequest {
            per_page: Some(per_page),
            page: Some(1),
        };
    }

    pub fn row_actions(&self) -> RowActions {
        let role = self.form.role();
        let manage = role.can_manage_records() && self.config.status_workflow_enabled;
        RowActions {
            edit: true,
            delete: manage,
            change_status: manage,
        }
    }

    /// The visible page of the student table.
    pub fn table(&self) -> StudentTable {
        let filtered: Vec<&Student> = self
            .students
            .iter()
            .filter(|s| !self.config.search_enabled || s.matches_name(&self.search))
            .collect();
        let page = self.page.paginate(&filtered);

        let rows = page
            .items
            .iter()
            .map(|student| StudentRow {
                id: student.id.clone(),
                first_name: student.first_name.clone(),
                last_name: student.last_name.clone(),
                gender: student.gender.map(|g| g.to_string()).unwrap_or_default(),
                date_of_birth: student.date_of_birth_display(),
                nationality: self.countries.name_of(&student.nationality).to_string(),
                status: student.status.to_string(),
            })
            .collect();

        StudentTable {
            rows,
            meta: page.meta,
            actions: self.row_actions(),
        }
    }

    pub fn can_create(&self) -> bool {
        self.form.role().can_create()
    }

    pub fn open_create(&mut self) -> bool {
        let result = self.form.open_create().map(|_| ());
        self.guard(result).is_some()
    }

    /// Open the form for an existing student and load it with its family.
    #[instrument(skip(self), fields(student_id = %id))]
    pub async fn open_edit(&mut self, id: StudentId) -> bool {
        let ticket = self.form.begin_load(id.clone());
        match self.api.fetch_family(&id).await {
            Ok(lookup) => {
                if let Some(reason) = &lookup.degraded {
                    self.notify_degraded(reason);
                }
                self.form.finish_load(ticket, lookup.record)
            }
            Err(e) => {
                self.form.abort_load(ticket);
                self.notify_error(AppError::from(e).context("Failed to load student"));
                false
            }
        }
    }

    pub fn close_form(&mut self) {
        self.form.close();
    }

    pub fn set_field(&mut self, field: StudentField, value: &str) -> bool {
        let result = self.form.set_field(field, value);
        self.guard(result).is_some()
    }

    pub fn open_family_draft(&mut self) -> bool {
        let result = self.form.open_family_draft();
        self.guard(result).is_some()
    }

    pub fn select_family_member(&mut self, index: usize) -> bool {
        let result = self.form.select_family_member(index);
        self.guard(result).is_some()
    }

    pub fn set_family_field(&mut self, field: DraftField, value: &str) -> bool {
        let result = self.form.set_family_field(field, value);
        self.guard(result).is_some()
    }

    pub fn submit_family_draft(&mut self) -> Option<DraftOutcome> {
        let result = self.form.submit_family_draft();
        self.guard(result)
    }

    pub fn cancel_family_draft(&mut self) {
        self.form.cancel_family_draft();
    }

    /// Remove a roster row, deleting it on the backend first if it was persisted.
    ///
    /// The local row goes away whether or not the delete call succeeds.
    pub async fn remove_family_member(&mut self, index: usize) -> bool {
        let result = self.form.plan_removal(index);
        let Some(plan) = self.guard(result) else {
            return false;
        };

        if let Some(member_id) = &plan.record.id {
            match self.api.delete_family_member(member_id).await {
                Ok(()) => {
                    info!(family_member_id = %member_id, "Family member deleted");
                    self.notify_success("Family member deleted");
                }
                Err(e) => {
                    self.notify_error(AppError::from(e).context("Failed to delete family member"))
                }
            }
        }

        self.form.apply_removal(&plan)
    }

    /// Confirm the open form: create or update, then refresh.
    pub async fn confirm(&mut self) -> ConfirmOutcome {
        let plan = match self.form.begin_submit() {
            Ok(plan) => plan,
            Err(e) => {
                let kind = e.kind();
                self.notify_error(e);
                return ConfirmOutcome::Rejected(kind);
            }
        };
        let ticket = plan.ticket();
        let adds_members = matches!(&plan, SubmitPlan::Update { added, .. } if !added.is_empty());

        let outcome = SubmissionController::new(&self.api).run(&plan).await;

        // The session cannot change while `confirm` borrows the screen.
        if !self.form.end_submit(ticket) {
            warn!("Submission finished after its form session ended");
        }

        match outcome {
            SubmitOutcome::Created { id } => {
                self.notify_success("Student created");
                self.form.close();
                self.refresh_list().await;
                ConfirmOutcome::Created(id)
            }
            SubmitOutcome::CreateFailed { error, student_id } => {
                let kind = error.kind();
                let context = match student_id {
                    Some(id) => format!("Student {id} created but family members were not saved"),
                    None => "Failed to create student".to_string(),
                };
                self.notify_error(AppError::from(error).context(context));
                ConfirmOutcome::Failed(kind)
            }
            SubmitOutcome::UpdateFailed { error } => {
                let kind = error.kind();
                self.notify_error(AppError::from(error).context("Failed to update student"));
                ConfirmOutcome::Failed(kind)
            }
            SubmitOutcome::Updated { id, failures } if failures.is_empty() => {
                self.notify_success("Student updated");
                self.form.close();
                self.refresh_list().await;
                ConfirmOutcome::Updated(id)
            }
            SubmitOutcome::Updated { id, failures } => {
                let failed = failures.len();
                let attached = adds_members && failures.iter().all(|f| f.id.is_some());
                for failure in failures {
                    let label = failure.label();
                    self.notify_error(AppError::from(failure.error).context(label));
                }

                if !self.reconcile(ticket, &id).await && attached {
                    // Attached members have no local id; a second confirm would add them again.
                    warn!(student_id = %id, "Closing form with an unknown family roster");
                    self.form.close();
                    self.notify_error(AppError::network(anyhow::anyhow!(
                        "New family members were saved but the roster could not be reloaded; reopen the student to continue"
                    )));
                }
                self.refresh_list().await;
                ConfirmOutcome::PartiallyUpdated { id, failed }
            }
        }
    }

    /// Replace the local roster with the backend's after a partial failure.
    ///
    /// Returns false when the backend roster could not be fetched.
    async fn reconcile(&mut self, ticket: SessionTicket, id: &StudentId) -> bool {
        match self.api.fetch_family(id).await {
            Ok(lookup) => {
                if let Some(reason) = &lookup.degraded {
                    self.notify_degraded(reason);
                }
                self.form.refresh_family(ticket, lookup.record.family_members)
            }
            Err(e) => {
                self.notify_error(AppError::from(e).context("Failed to reload family members"));
                false
            }
        }
    }

    fn ensure_manage(&mut self, action: &str) -> bool {
        let role = self.form.role();
        if !role.can_manage_records() {
            self.notify_error(AppError::disabled(anyhow::anyhow!(
                "the {role} role cannot {action} students"
            )));
            return false;
        }
        true
    }

    #[instrument(skip(self), fields(student_id = %id))]
    pub async fn delete_student(&mut self, id: &StudentId) -> bool {
        if !self.ensure_manage("delete") {
            return false;
        }
        match self.api.delete_student(id).await {
            Ok(()) => {
                self.notify_success("Student deleted");
                self.refresh_list().await;
                true
            }
            Err(e) => {
                self.notify_error(AppError::from(e).context("Failed to delete student"));
                false
            }
        }
    }

    #[instrument(skip(self), fields(student_id = %id))]
    pub async fn change_status(&mut self, id: &StudentId, decision: StatusDecision) -> bool {
        if !self.config.status_workflow_enabled {
            self.notify_error(AppError::disabled(anyhow::anyhow!(
                "the status workflow is not enabled"
            )));
            return false;
        }
        if !self.ensure_manage("accept or reject") {
            return false;
        }
        match self.api.change_status(id, decision).await {
            Ok(()) => {
                self.notify_success(format!("Student {}", decision.target()));
                self.refresh_list().await;
                true
            }
            Err(e) => {
                self.notify_error(status_error(e, decision));
                false
            }
        }
    }
}

fn status_error(err: ApiError, decision: StatusDecision) -> AppError {
    let action = match decision {
        StatusDecision::Accept => "accept",
        StatusDecision::Reject => "reject",
    };
    AppError::from(err).context(format!("Failed to {action} student"))
}
