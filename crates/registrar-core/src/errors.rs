use anyhow::Error;
use std::fmt;

/// Category of a failure surfaced to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// A required field is missing; nothing was sent.
    Validation,
    /// The request failed or the response was not ok; treated as not applied.
    Network,
    /// The backend answered with an unexpected shape.
    DataShape,
    /// The action is not available right now (role gating, submission in flight).
    Disabled,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "validation",
            ErrorKind::Network => "network",
            ErrorKind::DataShape => "data_shape",
            ErrorKind::Disabled => "disabled",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One or more required fields are missing or invalid.
///
/// Fully recoverable: the user re-edits and confirms again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    messages: Vec<String>,
}

impl ValidationError {
    pub fn new<S: Into<String>>(message: S) -> Self {
        Self {
            messages: vec![message.into()],
        }
    }

    pub fn from_messages<I, S>(messages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            messages: messages.into_iter().map(Into::into).collect(),
        }
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.messages.is_empty() {
            return f.write_str("Please fill in all required fields.");
        }
        f.write_str(&self.messages.join(", "))
    }
}

impl std::error::Error for ValidationError {}

/// Boundary error carried from a failed operation to the notification layer.
#[derive(Debug)]
pub struct AppError {
    pub kind: ErrorKind,
    pub error: Error,
}

impl AppError {
    pub fn new<E>(kind: ErrorKind, err: E) -> Self
    where
        E: Into<Error>,
    {
        Self {
            kind,
            error: err.into(),
        }
    }

    pub fn validation<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Validation, err)
    }

    pub fn network<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Network, err)
    }

    pub fn data_shape<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::DataShape, err)
    }

    pub fn disabled<E>(err: E) -> Self
    where
        E: Into<Error>,
    {
        Self::new(ErrorKind::Disabled, err)
    }

    /// Prefix the message with what the user was trying to do.
    pub fn context<C>(self, context: C) -> Self
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        Self {
            kind: self.kind,
            error: self.error.context(context),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#}", self.error)
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::validation(err)
    }
}
