// src/igdb/error.rs
// =============================================================================
// Error types for IGDB requests.
//
// Status failures are split so commands can tell a rejected API key apart
// from IGDB not answering at all.
// =============================================================================

use thiserror::Error;

/// Result type alias for IGDB operations.
pub type IgdbResult<T> = Result<T, IgdbError>;

#[derive(Debug, Error)]
pub enum IgdbError {
    /// IGDB rejected the `user-key` header.
    #[error("IGDB rejected the API key (HTTP {status})")]
    Unauthorized { status: u16 },

    /// Any other non-success status.
    #[error("IGDB request to {endpoint} failed with status {status}")]
    ApiRequestFailed { status: u16, endpoint: String },

    /// A success status with nothing in the body.
    #[error("IGDB returned an empty response for {endpoint}")]
    EmptyResponse { endpoint: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON parsing error: {0}")]
    JsonParse(#[from] serde_json::Error),
}

impl IgdbError {
    // Failures where IGDB never gave us a usable answer, as opposed to an
    // answer we couldn't read.
    pub fn is_no_response(&self) -> bool {
        matches!(
            self,
            IgdbError::ApiRequestFailed { .. }
                | IgdbError::EmptyResponse { .. }
                | IgdbError::Network(_)
                | IgdbError::InvalidUrl(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let error = IgdbError::ApiRequestFailed {
            status: 500,
            endpoint: "games".to_string(),
        };
        let msg = error.to_string();
        assert!(msg.contains("500"));
        assert!(msg.contains("games"));

        let error = IgdbError::Unauthorized { status: 401 };
        assert!(error.to_string().contains("API key"));
    }

    #[test]
    fn test_no_response_classification() {
        assert!(IgdbError::EmptyResponse {
            endpoint: "games".to_string()
        }
        .is_no_response());
        assert!(!IgdbError::Unauthorized { status: 401 }.is_no_response());

        let json_error = serde_json::from_str::<Vec<u8>>("nope").unwrap_err();
        assert!(!IgdbError::JsonParse(json_error).is_no_response());
    }
}
