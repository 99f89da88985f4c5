use crate::error::ApiError;
use crate::wire::FamilyLookup;
use registrar_models::{
    Country, FamilyMemberId, FamilyMemberPayload, StatusDecision, Student, StudentId,
    StudentPayload,
};
use std::future::Future;

/// Which verb attaches a batch of family members to a student.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachMode {
    /// `POST /students/{id}/FamilyMembers`, used right after creating the student.
    Create,
    /// `PUT /students/{id}/FamilyMembers`, used when editing an existing student.
    Update,
}

/// Operations the student screen needs from the backend.
///
/// Each method is one HTTP call. Implementations report failures as
/// [`ApiError`]; callers decide how to surface them.
pub trait StudentApi {
    /// `GET /students`
    fn list_students(&self) -> impl Future<Output = Result<Vec<Student>, ApiError>> + Send;

    /// `GET /students/countries`
    fn list_countries(&self) -> impl Future<Output = Result<Vec<Country>, ApiError>> + Send;

    /// `GET /students/{id}/FamilyMembers`
    fn fetch_family(
        &self,
        id: &StudentId,
    ) -> impl Future<Output = Result<FamilyLookup, ApiError>> + Send;

    /// `POST /students`, returning the assigned id.
    fn create_student(
        &self,
        payload: &StudentPayload,
    ) -> impl Future<Output = Result<StudentId, ApiError>> + Send;

    /// `PUT /students/{id}`
    fn update_student(
        &self,
        id: &StudentId,
        payload: &StudentPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `DELETE /students/{id}`
    fn delete_student(&self, id: &StudentId) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST` or `PUT /students/{id}/FamilyMembers` with the whole batch.
    fn attach_family_members(
        &self,
        id: &StudentId,
        members: &[FamilyMemberPayload],
        mode: AttachMode,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `PUT /familyMember/{id}`
    fn update_family_member(
        &self,
        id: &FamilyMemberId,
        payload: &FamilyMemberPayload,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `DELETE /familyMember/{id}`
    fn delete_family_member(
        &self,
        id: &FamilyMemberId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// `POST /students/{id}/Accepted` or `/Rejected`
    fn change_status(
        &self,
        id: &StudentId,
        decision: StatusDecision,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}

/// Request paths relative to the configured base URL.
pub mod paths {
    use registrar_models::{FamilyMemberId, StatusDecision, StudentId};

    pub const STUDENTS: &str = "/students";
    pub const COUNTRIES: &str = "/students/countries";

    pub fn student(id: &StudentId) -> String {
        format!("/students/{id}")
    }

    pub fn student_family(id: &StudentId) -> String {
        format!("/students/{id}/FamilyMembers")
    }

    pub fn family_member(id: &FamilyMemberId) -> String {
        format!("/familyMember/{id}")
    }

    pub fn student_status(id: &StudentId, decision: StatusDecision) -> String {
        format!("/students/{id}/{}", decision.path_segment())
    }
}

#[cfg(test)]
mod tests {
    use super::paths;
    use registrar_models::{FamilyMemberId, StatusDecision, StudentId};

    #[test]
    fn test_paths() {
        let id = StudentId::new("s1");
        assert_eq!(paths::student(&id), "/students/s1");
        assert_eq!(paths::student_family(&id), "/students/s1/FamilyMembers");
        assert_eq!(
            paths::family_member(&FamilyMemberId::new("fm1")),
            "/familyMember/fm1"
        );
        assert_eq!(
            paths::student_status(&id, StatusDecision::Reject),
            "/students/s1/Rejected"
        );
    }
}
