//! Submission controller: turns a [`SubmitPlan`] into backend calls.

use crate::student::SubmitPlan;
use futures::future::{join, join_all};
use registrar_client::{ApiError, AttachMode, StudentApi};
use registrar_models::{FamilyMemberId, FamilyMemberPayload, StudentId, StudentPayload};
use std::fmt;
use tracing::{error, info, instrument, warn};

/// A family member call that failed during an update.
///
/// `id` is `None` for the batch attaching members added in this session;
/// `name` then lists every member of the batch.
#[derive(Debug)]
pub struct MemberFailure {
    pub id: Option<FamilyMemberId>,
    pub name: String,
    pub error: ApiError,
}

impl MemberFailure {
    /// What was being attempted, without the underlying error.
    pub fn label(&self) -> String {
        match &self.id {
            Some(_) => format!("Failed to update family member {}", self.name),
            None => format!("Failed to add family members {}", self.name),
        }
    }
}

impl fmt::Display for MemberFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label(), self.error)
    }
}

#[derive(Debug)]
pub enum SubmitOutcome {
    Created {
        id: StudentId,
    },
    /// `student_id` is set when the student was persisted but attaching
    /// the roster failed. Nothing is rolled back.
    CreateFailed {
        error: ApiError,
        student_id: Option<StudentId>,
    },
    /// The student update succeeded; `failures` lists member calls that did not.
    Updated {
        id: StudentId,
        failures: Vec<MemberFailure>,
    },
    UpdateFailed {
        error: ApiError,
    },
}

impl SubmitOutcome {
    pub fn is_success(&self) -> bool {
        match self {
            SubmitOutcome::Created { .. } => true,
            SubmitOutcome::Updated { failures, .. } => failures.is_empty(),
            SubmitOutcome::CreateFailed { .. } | SubmitOutcome::UpdateFailed { .. } => false,
        }
    }
}

pub struct SubmissionController<'a, A> {
    api: &'a A,
}

impl<'a, A: StudentApi> SubmissionController<'a, A> {
    pub fn new(api: &'a A) -> Self {
        Self { api }
    }

    pub async fn run(&self, plan: &SubmitPlan) -> SubmitOutcome {
        match plan {
            SubmitPlan::Create {
                student, members, ..
            } => self.create(student, members).await,
            SubmitPlan::Update {
                id,
                student,
                existing,
                added,
                ..
            } => self.update(id, student, existing, added).await,
        }
    }

    /// Create the student, then attach the whole roster in one batch.
    #[instrument(skip_all, fields(members = members.len()))]
    async fn create(
        &self,
        student: &StudentPayload,
        members: &[FamilyMemberPayload],
    ) -> SubmitOutcome {
        let id = match self.api.create_student(student).await {
            Ok(id) => id,
            Err(e) => {
                error!(error = %e, "Failed to create student");
                return SubmitOutcome::CreateFailed {
                    error: e,
                    student_id: None,
                };
            }
        };

        if !members.is_empty() {
            if let Err(e) = self
                .api
                .attach_family_members(&id, members, AttachMode::Create)
                .await
            {
                error!(student_id = %id, error = %e, "Student created but family members were not attached");
                return SubmitOutcome::CreateFailed {
                    error: e,
                    student_id: Some(id),
                };
            }
        }

        info!(student_id = %id, "Student created");
        SubmitOutcome::Created { id }
    }

    /// Update the student first, then every member concurrently.
    ///
    /// Member calls do not block each other; each failure is reported on
    /// its own and nothing already applied is undone.
    #[instrument(skip_all, fields(student_id = %id, existing = existing.len(), added = added.len()))]
    async fn update(
        &self,
        id: &StudentId,
        student: &StudentPayload,
        existing: &[(FamilyMemberId, FamilyMemberPayload)],
        added: &[FamilyMemberPayload],
    ) -> SubmitOutcome {
        if let Err(e) = self.api.update_student(id, student).await {
            error!(error = %e, "Failed to update student");
            return SubmitOutcome::UpdateFailed { error: e };
        }

        let member_updates = join_all(existing.iter().map(|(member_id, payload)| async move {
            self.api
                .update_family_member(member_id, payload)
                .await
                .map_err(|error| MemberFailure {
                    id: Some(member_id.clone()),
                    name: payload.name.clone(),
                    error,
                })
        }));

        let batch = async {
            if added.is_empty() {
                return Ok(());
            }
            self.api
                .attach_family_members(id, added, AttachMode::Update)
                .await
                .map_err(|error| MemberFailure {
                    id: None,
                    name: added
                        .iter()
                        .map(|m| m.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                    error,
                })
        };

        let (updates, batch) = join(member_updates, batch).await;

        let mut failures: Vec<MemberFailure> = updates.into_iter().filter_map(Result::err).collect();
        if let Err(failure) = batch {
            failures.push(failure);
        }

        if failures.is_empty() {
            info!("Student updated");
        } else {
            warn!(failed = failures.len(), "Student updated with family member failures");
        }

        SubmitOutcome::Updated {
            id: id.clone(),
            failures,
        }
    }
}
