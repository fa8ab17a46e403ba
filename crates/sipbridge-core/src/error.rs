use thiserror::Error;

/// Failure reported back to the bridge host.
///
/// `status` is an HTTP status code. Remote failures carry the provider's
/// status; failures without one are reported as 500.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("service error ({status}): {message}")]
pub struct ServiceError {
    pub status: u16,
    pub message: String,
}

impl ServiceError {
    pub const INTERNAL_STATUS: u16 = 500;

    pub fn new(status: u16, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Builds an error from an optional remote status, defaulting to 500.
    pub fn from_status(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::new(status.unwrap_or(Self::INTERNAL_STATUS), message)
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_defaults_to_internal() {
        let err = ServiceError::from_status(None, "boom");
        assert_eq!(err.status, 500);
        assert_eq!(err.to_string(), "service error (500): boom");
    }

    #[test]
    fn from_status_keeps_remote_status() {
        let err = ServiceError::from_status(Some(404), "not found");
        assert_eq!(err.status, 404);
    }
}
