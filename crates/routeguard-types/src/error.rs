use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RouteGuardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Relay error: {0}")]
    Relay(String),

    #[error("Relay error: timeout while {0}; transaction outcome unknown, re-query ledger state before retrying")]
    RelayTimeout(String),

    #[error("Ledger error: {0}")]
    Ledger(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Unavailable: {0}")]
    Unavailable(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl RouteGuardError {
    /// Errors caused by the caller's input rather than by the relayer or the ledger.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            RouteGuardError::Validation(_)
                | RouteGuardError::InvalidInput(_)
                | RouteGuardError::InvalidArgument(_)
        )
    }

    pub fn is_relay_error(&self) -> bool {
        matches!(self, RouteGuardError::Relay(_) | RouteGuardError::RelayTimeout(_))
    }

    /// Human-readable reason without the variant prefix, as surfaced to API callers.
    pub fn reason(&self) -> String {
        match self {
            RouteGuardError::Validation(m)
            | RouteGuardError::InvalidInput(m)
            | RouteGuardError::InvalidArgument(m)
            | RouteGuardError::Relay(m)
            | RouteGuardError::Ledger(m)
            | RouteGuardError::Network(m)
            | RouteGuardError::Unavailable(m)
            | RouteGuardError::Config(m)
            | RouteGuardError::Serialization(m)
            | RouteGuardError::Internal(m) => m.clone(),
            RouteGuardError::RelayTimeout(_) => self.to_string(),
        }
    }
}

pub type RouteGuardResult<T> = Result<T, RouteGuardError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_classification() {
        assert!(RouteGuardError::Validation("x".into()).is_client_error());
        assert!(RouteGuardError::InvalidInput("x".into()).is_client_error());
        assert!(!RouteGuardError::Relay("x".into()).is_client_error());
        assert!(RouteGuardError::RelayTimeout("waiting".into()).is_relay_error());
    }

    #[test]
    fn test_reason_strips_prefix() {
        let err = RouteGuardError::Validation("Missing required fields".into());
        assert_eq!(err.reason(), "Missing required fields");
        assert_eq!(err.to_string(), "Validation error: Missing required fields");

        let timeout = RouteGuardError::RelayTimeout("confirming transaction".into());
        assert!(timeout.reason().contains("outcome unknown"));
    }
}
