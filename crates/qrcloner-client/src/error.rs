//! Error types for API requests.

use thiserror::Error;

use crate::validate::ValidationError;

/// Primary error type for requests issued against the QR Cloner API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The API answered 401; the caller must log in.
    #[error("authentication required")]
    Unauthenticated,
    /// The API answered 404.
    #[error("resource not found")]
    NotFound {
        /// Server-provided detail, when present.
        detail: Option<String>,
    },
    /// The API answered 429 (quota or rate limit exceeded).
    #[error("quota exceeded")]
    RateLimited {
        /// Server-provided detail, when present.
        detail: Option<String>,
    },
    /// The API rejected the request body (400/409/422).
    #[error("request rejected: {detail}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-provided explanation.
        detail: String,
    },
    /// Any other non-2xx response.
    #[error("request failed with status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Server-provided detail, when present.
        detail: Option<String>,
    },
    /// The request never produced a response (DNS, connect, reset).
    #[error("network request failed")]
    Network {
        /// Transport error.
        #[source]
        source: reqwest::Error,
    },
    /// A 2xx response carried a body that did not match the expected shape.
    #[error("failed to decode {what} response")]
    Decode {
        /// Resource being decoded.
        what: &'static str,
        /// Decoder error.
        #[source]
        source: serde_json::Error,
    },
    /// A checkout or portal response carried no usable redirect.
    #[error("{what} response did not include a redirect URL")]
    MissingRedirect {
        /// Endpoint that answered.
        what: &'static str,
    },
    /// The request URL could not be constructed.
    #[error("invalid request URL: {reason}")]
    InvalidUrl {
        /// Why the URL was rejected.
        reason: String,
    },
    /// Client-side validation failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ApiError {
    /// Whether the failure happened before any HTTP response was received.
    #[must_use]
    pub const fn is_network(&self) -> bool {
        matches!(self, Self::Network { .. })
    }

    /// HTTP status associated with the failure, when one was received.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Unauthenticated => Some(401),
            Self::NotFound { .. } => Some(404),
            Self::RateLimited { .. } => Some(429),
            Self::Rejected { status, .. } | Self::Status { status, .. } => Some(*status),
            Self::Network { .. }
            | Self::Decode { .. }
            | Self::MissingRedirect { .. }
            | Self::InvalidUrl { .. }
            | Self::Validation(_) => None,
        }
    }

    /// Single-line message suitable for inline display.
    #[must_use]
    pub fn display_message(&self) -> String {
        match self {
            Self::NotFound {
                detail: Some(detail),
            }
            | Self::RateLimited {
                detail: Some(detail),
            }
            | Self::Status {
                detail: Some(detail),
                ..
            } => format!("{self}: {detail}"),
            Self::Network { source } => format!("{self}: {source}"),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_variants() {
        assert_eq!(ApiError::Unauthenticated.status(), Some(401));
        assert_eq!(ApiError::NotFound { detail: None }.status(), Some(404));
        assert_eq!(ApiError::RateLimited { detail: None }.status(), Some(429));
        assert_eq!(
            ApiError::Status {
                status: 503,
                detail: None
            }
            .status(),
            Some(503)
        );
        assert_eq!(ApiError::from(ValidationError::InvalidId).status(), None);
    }

    #[test]
    fn display_message_appends_detail() {
        let err = ApiError::RateLimited {
            detail: Some("QR quota exceeded".into()),
        };
        assert_eq!(err.display_message(), "quota exceeded: QR quota exceeded");
        assert_eq!(
            ApiError::from(ValidationError::InvalidId).display_message(),
            "Invalid ID"
        );
    }
}
