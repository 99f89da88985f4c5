//! `reqwest` implementation of [`StudentApi`].

use crate::api::{AttachMode, StudentApi, paths};
use crate::error::ApiError;
use crate::wire::{CreatedStudent, Envelope, FamilyLookup, parse_family_lookup};
use registrar_config::ApiConfig;
use registrar_models::{
    Country, FamilyMemberId, FamilyMemberPayload, StatusDecision, Student, StudentId,
    StudentPayload,
};
use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Instant;
use tracing::{error, info, instrument, warn};

/// HTTP client for the student registry backend.
#[derive(Clone)]
pub struct HttpStudentApi {
    client: Client,
    config: ApiConfig,
}

impl std::fmt::Debug for HttpStudentApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpStudentApi")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl HttpStudentApi {
    /// Creates a client for the configured base URL.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Client` if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client.request(method, self.config.url(path))
    }

    /// Sends one request and returns the body of a 2xx response.
    async fn send(&self, builder: RequestBuilder, path: &str) -> Result<String, ApiError> {
        let request_id = uuid::Uuid::new_v4().to_string();
        let request = builder
            .header("x-request-id", &request_id)
            .build()
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;
        let method = request.method().clone();
        let start = Instant::now();

        let response = match self.client.execute(request).await {
            Ok(response) => response,
            Err(source) => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    error = %source,
                    "Request failed"
                );
                return Err(ApiError::Transport {
                    path: path.to_string(),
                    source,
                });
            }
        };

        let status = response.status();
        let latency = start.elapsed();

        match status.as_u16() {
            200..=299 => {
                info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
            }
            400..=499 => {
                warn!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Client error"
                );
            }
            500..=599 => {
                error!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Server error"
                );
            }
            _ => {
                info!(
                    request_id = %request_id,
                    method = %method,
                    path = %path,
                    status = %status.as_u16(),
                    latency_ms = %latency.as_millis(),
                    "Request completed"
                );
            }
        }

        let body = response
            .text()
            .await
            .map_err(|source| ApiError::Transport {
                path: path.to_string(),
                source,
            })?;

        if !status.is_success() {
            return Err(ApiError::Status {
                path: path.to_string(),
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let body = self.send(self.request(Method::GET, path), path).await?;
        decode(path, &body)
    }

    async fn get_list<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>, ApiError> {
        let envelope: Envelope<Vec<T>> = self.get_json(path).await?;
        Ok(envelope.data.unwrap_or_default())
    }
}

fn decode<T: DeserializeOwned>(path: &str, body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|source| ApiError::Decode {
        path: path.to_string(),
        source,
    })
}

impl StudentApi for HttpStudentApi {
    #[instrument(skip(self))]
    async fn list_students(&self) -> Result<Vec<Student>, ApiError> {
        self.get_list(paths::STUDENTS).await
    }

    #[instrument(skip(self))]
    async fn list_countries(&self) -> Result<Vec<Country>, ApiError> {
        self.get_list(paths::COUNTRIES).await
    }

    #[instrument(skip(self), fields(student_id = %id))]
    async fn fetch_family(&self, id: &StudentId) -> Result<FamilyLookup, ApiError> {
        let value: Value = self.get_json(&paths::student_family(id)).await?;
        parse_family_lookup(value)
    }

    #[instrument(skip(self, payload))]
    async fn create_student(&self, payload: &StudentPayload) -> Result<StudentId, ApiError> {
        let path = paths::STUDENTS;
        let body = self
            .send(self.request(Method::POST, path).json(payload), path)
            .await?;
        let envelope: Envelope<CreatedStudent> = decode(path, &body)?;
        envelope
            .data
            .map(|created| created.id)
            .ok_or_else(|| ApiError::DataShape("create response has no student id".to_string()))
    }

    #[instrument(skip(self, payload), fields(student_id = %id))]
    async fn update_student(&self, id: &StudentId, payload: &StudentPayload) -> Result<(), ApiError> {
        let path = paths::student(id);
        self.send(self.request(Method::PUT, &path).json(payload), &path)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(student_id = %id))]
    async fn delete_student(&self, id: &StudentId) -> Result<(), ApiError> {
        let path = paths::student(id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        Ok(())
    }

    #[instrument(skip(self, members), fields(student_id = %id, count = members.len()))]
    async fn attach_family_members(
        &self,
        id: &StudentId,
        members: &[FamilyMemberPayload],
        mode: AttachMode,
    ) -> Result<(), ApiError> {
        let path = paths::student_family(id);
        let method = match mode {
            AttachMode::Create => Method::POST,
            AttachMode::Update => Method::PUT,
        };
        self.send(self.request(method, &path).json(members), &path)
            .await?;
        Ok(())
    }

    #[instrument(skip(self, payload), fields(family_member_id = %id))]
    async fn update_family_member(
        &self,
        id: &FamilyMemberId,
        payload: &FamilyMemberPayload,
    ) -> Result<(), ApiError> {
        let path = paths::family_member(id);
        self.send(self.request(Method::PUT, &path).json(payload), &path)
            .await?;
        Ok(())
    }

    #[instrument(skip(self), fields(family_member_id = %id))]
    async fn delete_family_member(&self, id: &FamilyMemberId) -> Result<(), ApiError> {
        let path = paths::family_member(id);
        self.send(self.request(Method::DELETE, &path), &path).await?;
        Ok(())
    }

    #[instrument(skip(self), fields(student_id = %id))]
    async fn change_status(&self, id: &StudentId, decision: StatusDecision) -> Result<(), ApiError> {
        let path = paths::student_status(id, decision);
        self.send(
            self.request(Method::POST, &path)
                .json(&serde_json::json!({})),
            &path,
        )
        .await?;
        Ok(())
    }
}
