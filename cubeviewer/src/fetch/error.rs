//! Transport and decoding errors raised by a [`JsonFetcher`](super::JsonFetcher).

use thiserror::Error;

/// Errors that can occur while downloading a JSON document.
///
/// The variants carry plain strings so the error can be cloned and replayed by
/// test doubles.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FetchError {
    /// The request could not be sent or the body could not be read.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The server answered with a non-success status.
    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    /// The body was not valid JSON.
    #[error("malformed JSON from {url}: {reason}")]
    Parse { url: String, reason: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_display() {
        let err = FetchError::Status {
            status: 404,
            url: "http://api.example.org/cubes/x/model".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "HTTP 404 from http://api.example.org/cubes/x/model"
        );
    }

    #[test]
    fn test_parse_display_mentions_reason() {
        let err = FetchError::Parse {
            url: "settings.json".to_string(),
            reason: "expected value at line 1 column 1".to_string(),
        };
        assert!(err.to_string().contains("settings.json"));
        assert!(err.to_string().contains("expected value"));
    }
}
