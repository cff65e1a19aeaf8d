//! Per-request session context: API base URL and bearer token.

use std::fmt;

use url::Url;

use crate::error::ApiError;

/// Token sent when no user session exists.
pub const GUEST_TOKEN: &str = "guest-token";

/// Where requests go and who they are issued for.
///
/// Passed explicitly to every request-issuing function; nothing in the crate
/// reads a token from ambient storage.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionContext {
    base_url: Url,
    token: Option<String>,
}

impl SessionContext {
    /// Build a context; a blank token is treated as absent.
    #[must_use]
    pub fn new(base_url: Url, token: Option<String>) -> Self {
        let token = token
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty());
        Self { base_url, token }
    }

    /// Context without a user token.
    #[must_use]
    pub const fn guest(base_url: Url) -> Self {
        Self {
            base_url,
            token: None,
        }
    }

    /// API base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// User token, if one was supplied.
    #[must_use]
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether requests fall back to [`GUEST_TOKEN`].
    #[must_use]
    pub const fn is_guest(&self) -> bool {
        self.token.is_none()
    }

    /// Value of the `Authorization` header.
    #[must_use]
    pub fn authorization(&self) -> String {
        format!("Bearer {}", self.token().unwrap_or(GUEST_TOKEN))
    }

    /// Resolve an endpoint below the base URL.
    ///
    /// Each segment is percent-encoded on its own, so identifiers containing
    /// `/`, `?` or `#` stay inside one path segment.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::InvalidUrl`] when the base URL cannot carry a path
    /// (for example `mailto:` URLs).
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);
        {
            let mut path = url.path_segments_mut().map_err(|()| ApiError::InvalidUrl {
                reason: format!("base URL '{}' cannot carry a path", self.base_url),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("SessionContext")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}
