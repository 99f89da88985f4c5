//! User-visible notifications.
//!
//! Handlers never let an error escape; they turn each outcome into a
//! [`Notice`] that the presentation layer shows as a toast, a status line,
//! or a printed message.

use crate::errors::{AppError, ErrorKind};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Failure { kind: ErrorKind, message: String },
}

impl Notice {
    pub fn success<S: Into<String>>(message: S) -> Self {
        Notice::Success(message.into())
    }

    pub fn failure<S: Into<String>>(kind: ErrorKind, message: S) -> Self {
        Notice::Failure {
            kind,
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Notice::Success(_))
    }

    /// Kind of failure, `None` for success notices.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Notice::Success(_) => None,
            Notice::Failure { kind, .. } => Some(*kind),
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Notice::Success(message) => message,
            Notice::Failure { message, .. } => message,
        }
    }
}

impl From<&AppError> for Notice {
    fn from(err: &AppError) -> Self {
        Notice::failure(err.kind, err.to_string())
    }
}

impl From<AppError> for Notice {
    fn from(err: AppError) -> Self {
        Notice::from(&err)
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::Success(message) => write!(f, "ok: {message}"),
            Notice::Failure { kind, message } => write!(f, "error ({kind}): {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_from_app_error() {
        let err = AppError::data_shape(anyhow::anyhow!("missing family members"));
        let notice = Notice::from(&err);
        assert!(!notice.is_success());
        assert_eq!(notice.kind(), Some(ErrorKind::DataShape));
        assert_eq!(notice.message(), "missing family members");
    }

    #[test]
    fn test_notice_display() {
        assert_eq!(Notice::success("Student deleted").to_string(), "ok: Student deleted");
        assert_eq!(
            Notice::failure(ErrorKind::Validation, "Last name is required").to_string(),
            "error (validation): Last name is required"
        );
    }
}
