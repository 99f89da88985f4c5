use registrar_core::errors::{AppError, ErrorKind};

/// Error type for backend calls.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("request to {path} failed: {source}")]
    Transport {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{path} responded with status {status}")]
    Status {
        path: String,
        status: u16,
        body: String,
    },

    #[error("could not decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unexpected response shape: {0}")]
    DataShape(String),
}

impl ApiError {
    pub fn status<P: Into<String>>(path: P, status: u16) -> Self {
        ApiError::Status {
            path: path.into(),
            status,
            body: String::new(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Client(_) | ApiError::Transport { .. } | ApiError::Status { .. } => {
                ErrorKind::Network
            }
            ApiError::Decode { .. } | ApiError::DataShape(_) => ErrorKind::DataShape,
        }
    }
}

impl From<ApiError> for AppError {
    fn from(err: ApiError) -> Self {
        AppError::new(err.kind(), err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_is_network() {
        let err = ApiError::status("/students", 500);
        assert_eq!(err.kind(), ErrorKind::Network);
        assert_eq!(err.to_string(), "/students responded with status 500");
    }

    #[test]
    fn test_decode_error_is_data_shape() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Decode {
            path: "/students".to_string(),
            source,
        };
        let app: AppError = err.into();
        assert_eq!(app.kind, ErrorKind::DataShape);
    }
}
