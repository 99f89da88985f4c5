#![allow(dead_code)]

use chrono::NaiveDate;
use registrar_client::{ApiError, AttachMode, FamilyLookup, StudentApi, api::paths};
use registrar_models::{
    Country, CountryId, FamilyMemberId, FamilyMemberPayload, FamilyMemberRecord, Gender,
    Nationality, Relation, StatusDecision, Student, StudentId, StudentPayload, StudentStatus,
    StudentWithFamily,
};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// One backend call as seen by [`RecordingApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    ListStudents,
    ListCountries,
    FetchFamily(String),
    CreateStudent(StudentPayload),
    UpdateStudent(String, StudentPayload),
    DeleteStudent(String),
    AttachFamily {
        student_id: String,
        members: Vec<FamilyMemberPayload>,
        mode: AttachMode,
    },
    UpdateFamilyMember(String, FamilyMemberPayload),
    DeleteFamilyMember(String),
    ChangeStatus(String, StatusDecision),
}

impl Call {
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Call::ListStudents | Call::ListCountries | Call::FetchFamily(_)
        )
    }
}

/// In-memory backend that records every call and fails the ones it is told to.
///
/// Failure keys are the method name, optionally followed by `:` and the id,
/// e.g. `"create_student"` or `"update_family_member:fm2"`.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    students: Mutex<Vec<Student>>,
    families: Mutex<HashMap<String, Vec<FamilyMemberRecord>>>,
    countries: Vec<Country>,
    failing: Mutex<HashSet<String>>,
    degraded: Mutex<bool>,
    next_id: Mutex<u32>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self {
            countries: countries(),
            ..Self::default()
        }
    }

    pub fn with_student(self, student: Student, members: Vec<FamilyMemberRecord>) -> Self {
        self.families
            .lock()
            .unwrap()
            .insert(student.id.to_string(), members);
        self.students.lock().unwrap().push(student);
        self
    }

    pub fn with_students(self, students: Vec<Student>) -> Self {
        self.students.lock().unwrap().extend(students);
        self
    }

    pub fn fail(&self, key: &str) {
        self.failing.lock().unwrap().insert(key.to_string());
    }

    pub fn degrade_family_lookups(&self) {
        *self.degraded.lock().unwrap() = true;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls that change backend state, in order.
    pub fn writes(&self) -> Vec<Call> {
        self.calls().into_iter().filter(|c| !c.is_read()).collect()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn family_of(&self, id: &str) -> Vec<FamilyMemberRecord> {
        self.families
            .lock()
            .unwrap()
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }

    fn check(&self, method: &str, id: Option<&str>, path: &str) -> Result<(), ApiError> {
        let failing = self.failing.lock().unwrap();
        let keyed = id.map(|id| format!("{method}:{id}"));
        if failing.contains(method) || keyed.is_some_and(|k| failing.contains(&k)) {
            return Err(ApiError::status(path, 500));
        }
        Ok(())
    }

    fn next_id(&self, prefix: &str) -> String {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        format!("{prefix}-{next}")
    }
}

fn record_from_payload(id: String, payload: &FamilyMemberPayload) -> FamilyMemberRecord {
    FamilyMemberRecord {
        id: Some(FamilyMemberId::new(id)),
        name: payload.name.clone(),
        relation: payload.relation,
        nationality: Nationality::from(payload.nationality_id.clone()),
    }
}

impl StudentApi for RecordingApi {
    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.record(Call::ListStudents);
        self.check("list_students", None, paths::STUDENTS)?;
        Ok(self.students.lock().unwrap().clone())
    }

    async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.record(Call::ListCountries);
        self.check("list_countries", None, paths::COUNTRIES)?;
        Ok(self.countries.clone())
    }

    async fn fetch_family(&self, id: &StudentId) -> Result<FamilyLookup, ApiError> {
        let path = paths::student_family(id);
        self.record(Call::FetchFamily(id.to_string()));
        self.check("fetch_family", Some(id.as_str()), &path)?;

        let student = self
            .students
            .lock()
            .unwrap()
            .iter()
            .find(|s| &s.id == id)
            .cloned()
            .ok_or_else(|| ApiError::status(&path, 404))?;

        if *self.degraded.lock().unwrap() {
            return Ok(FamilyLookup {
                record: StudentWithFamily {
                    student,
                    family_members: Vec::new(),
                },
                degraded: Some("response has no family member list".to_string()),
            });
        }

        Ok(FamilyLookup {
            record: StudentWithFamily {
                student,
                family_members: self.family_of(id.as_str()),
            },
            degraded: None,
        })
    }

    async fn create_student(&self, payload: &StudentPayload) -> Result<StudentId, ApiError> {
        self.record(Call::CreateStudent(payload.clone()));
        self.check("create_student", None, paths::STUDENTS)?;

        let id = StudentId::new(self.next_id("new"));
        self.students.lock().unwrap().push(Student {
            id: id.clone(),
            first_name: payload.first_name.clone(),
            last_name: payload.last_name.clone(),
            gender: payload.gender,
            date_of_birth: payload.date_of_birth,
            nationality: Nationality::from(payload.nationality_id.clone()),
            status: StudentStatus::Pending,
        });
        Ok(id)
    }

    async fn update_student(&self, id: &StudentId, payload: &StudentPayload) -> Result<(), ApiError> {
        self.record(Call::UpdateStudent(id.to_string(), payload.clone()));
        self.check("update_student", Some(id.as_str()), &paths::student(id))?;

        if let Some(student) = self.students.lock().unwrap().iter_mut().find(|s| &s.id == id) {
            student.first_name = payload.first_name.clone();
            student.last_name = payload.last_name.clone();
            student.gender = payload.gender;
            student.date_of_birth = payload.date_of_birth;
            student.nationality = Nationality::from(payload.nationality_id.clone());
        }
        Ok(())
    }

    async fn delete_student(&self, id: &StudentId) -> Result<(), ApiError> {
        self.record(Call::DeleteStudent(id.to_string()));
        self.check("delete_student", Some(id.as_str()), &paths::student(id))?;
        self.students.lock().unwrap().retain(|s| &s.id != id);
        Ok(())
    }

    async fn attach_family_members(
        &self,
        id: &StudentId,
        members: &[FamilyMemberPayload],
        mode: AttachMode,
    ) -> Result<(), ApiError> {
        self.record(Call::AttachFamily {
            student_id: id.to_string(),
            members: members.to_vec(),
            mode,
        });
        self.check(
            "attach_family_members",
            Some(id.as_str()),
            &paths::student_family(id),
        )?;

        let records: Vec<_> = members
            .iter()
            .map(|m| record_from_payload(self.next_id("fm"), m))
            .collect();
        self.families
            .lock()
            .unwrap()
            .entry(id.to_string())
            .or_default()
            .extend(records);
        Ok(())
    }

    async fn update_family_member(
        &self,
        id: &FamilyMemberId,
        payload: &FamilyMemberPayload,
    ) -> Result<(), ApiError> {
        self.record(Call::UpdateFamilyMember(id.to_string(), payload.clone()));
        self.check(
            "update_family_member",
            Some(id.as_str()),
            &paths::family_member(id),
        )?;

        for members in self.families.lock().unwrap().values_mut() {
            if let Some(member) = members.iter_mut().find(|m| m.id.as_ref() == Some(id)) {
                *member = record_from_payload(id.to_string(), payload);
            }
        }
        Ok(())
    }

    async fn delete_family_member(&self, id: &FamilyMemberId) -> Result<(), ApiError> {
        self.record(Call::DeleteFamilyMember(id.to_string()));
        self.check(
            "delete_family_member",
            Some(id.as_str()),
            &paths::family_member(id),
        )?;

        for members in self.families.lock().unwrap().values_mut() {
            members.retain(|m| m.id.as_ref() != Some(id));
        }
        Ok(())
    }

    async fn change_status(&self, id: &StudentId, decision: StatusDecision) -> Result<(), ApiError> {
        self.record(Call::ChangeStatus(id.to_string(), decision));
        self.check(
            "change_status",
            Some(id.as_str()),
            &paths::student_status(id, decision),
        )?;

        if let Some(student) = self.students.lock().unwrap().iter_mut().find(|s| &s.id == id) {
            student.status = decision.target();
        }
        Ok(())
    }
}

pub fn countries() -> Vec<Country> {
    vec![
        Country {
            id: CountryId::new("C1"),
            name: "Kenya".to_string(),
        },
        Country {
            id: CountryId::new("C2"),
            name: "Ghana".to_string(),
        },
    ]
}

pub fn student(id: &str, first_name: &str, last_name: &str) -> Student {
    Student {
        id: StudentId::new(id),
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        gender: Some(Gender::Female),
        date_of_birth: NaiveDate::from_ymd_opt(2010, 5, 1),
        nationality: Nationality::parse("C1"),
        status: StudentStatus::Pending,
    }
}

pub fn member(id: &str, name: &str, relation: Relation) -> FamilyMemberRecord {
    FamilyMemberRecord {
        id: Some(FamilyMemberId::new(id)),
        name: name.to_string(),
        relation,
        nationality: Nationality::parse("C2"),
    }
}
