//! Error types for anslookup
//!
//! Every failure the lookup client can hit, from an empty query to a
//! malformed payload coming back from the registry API.

use thiserror::Error;

/// Main error type for lookup operations
#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Search term is empty")]
    EmptyQuery,

    #[error("Lookup service returned {status}: {}", .message.as_deref().unwrap_or("no error message"))]
    Server {
        status: u16,
        message: Option<String>,
    },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Malformed response payload: {0}")]
    Decode(String),

    #[error("Invalid API base URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Terminal error: {0}")]
    Terminal(#[from] std::io::Error),
}

/// Result type alias for lookup operations
pub type Result<T> = std::result::Result<T, LookupError>;

impl LookupError {
    /// Message the service embedded in its error payload, if any
    pub fn server_message(&self) -> Option<&str> {
        match self {
            LookupError::Server { message, .. } => message.as_deref(),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(e: serde_json::Error) -> Self {
        LookupError::Decode(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_only_for_server_errors() {
        let err = LookupError::Server {
            status: 400,
            message: Some("O parâmetro \"termo\" é obrigatório".to_string()),
        };
        assert_eq!(
            err.server_message(),
            Some("O parâmetro \"termo\" é obrigatório")
        );

        let err = LookupError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.server_message(), None);
        assert_eq!(
            err.to_string(),
            "Lookup service returned 500: no error message"
        );

        assert_eq!(LookupError::EmptyQuery.server_message(), None);
    }

    #[test]
    fn test_decode_from_serde() {
        let err: LookupError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, LookupError::Decode(_)));
    }
}
