use registrar_core::errors::{AppError, ErrorKind, ValidationError};
use registrar_models::Role;

/// Why a form operation was refused.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("invalid {field}: {value:?}")]
    InvalidValue { field: &'static str, value: String },

    #[error("the {role} role cannot change this record")]
    ReadOnly { role: Role },

    #[error("a submission is already in progress")]
    SubmissionInFlight,

    #[error("the student record is still loading")]
    Loading,

    #[error("no student form is open")]
    NotOpen,

    #[error("the family member editor is not open")]
    DraftEditorClosed,

    #[error("finish or cancel the family member being edited first")]
    DraftEditorOpen,

    #[error("there is no family member at row {}", .index + 1)]
    NoSuchRow { index: usize },
}

impl FormError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            FormError::Validation(_) | FormError::InvalidValue { .. } => ErrorKind::Validation,
            FormError::ReadOnly { .. }
            | FormError::SubmissionInFlight
            | FormError::Loading
            | FormError::NotOpen
            | FormError::DraftEditorClosed
            | FormError::DraftEditorOpen
            | FormError::NoSuchRow { .. } => ErrorKind::Disabled,
        }
    }
}

impl From<FormError> for AppError {
    fn from(err: FormError) -> Self {
        AppError::new(err.kind(), err)
    }
}
