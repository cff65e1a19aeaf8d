//! Resource client: issues authenticated requests and classifies responses.

use qrcloner_api_models::ApiErrorBody;
use reqwest::header::AUTHORIZATION;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use crate::error::ApiError;
use crate::session::SessionContext;

/// Whether a request carries the session's bearer token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Auth {
    /// Send `Authorization: Bearer <token | guest-token>`.
    Bearer,
    /// Send no credentials (public catalog endpoints).
    Anonymous,
}

/// Thin wrapper around a shared `reqwest::Client`.
#[derive(Debug, Clone, Default)]
pub struct ResourceClient {
    http: reqwest::Client,
}

impl ResourceClient {
    /// Wrap an existing HTTP client.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Start a request against `url` with the requested credentials.
    #[must_use]
    pub fn request(
        &self,
        session: &SessionContext,
        method: Method,
        url: Url,
        auth: Auth,
    ) -> RequestBuilder {
        let builder = self.http.request(method, url);
        match auth {
            Auth::Bearer => builder.header(AUTHORIZATION, session.authorization()),
            Auth::Anonymous => builder,
        }
    }

    /// Send a request and decode a JSON body from a 2xx response.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for transport failures, non-2xx
    /// statuses and undecodable bodies.
    pub async fn fetch_json<T>(
        &self,
        builder: RequestBuilder,
        what: &'static str,
    ) -> Result<T, ApiError>
    where
        T: DeserializeOwned + Send,
    {
        let response = send(builder, what).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|source| ApiError::Network { source })?;
        serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { what, source })
    }

    /// Send a request whose successful response body is ignored.
    ///
    /// # Errors
    ///
    /// Returns the classified [`ApiError`] for transport failures and non-2xx
    /// statuses.
    pub async fn fetch_empty(
        &self,
        builder: RequestBuilder,
        what: &'static str,
    ) -> Result<(), ApiError> {
        send(builder, what).await.map(drop)
    }
}

async fn send(builder: RequestBuilder, what: &'static str) -> Result<Response, ApiError> {
    let response = builder.send().await.map_err(|source| {
        tracing::debug!(what, error = %source, "request did not reach the API");
        ApiError::Network { source }
    })?;
    let status = response.status();
    tracing::debug!(what, status = status.as_u16(), "API responded");
    if status.is_success() {
        return Ok(response);
    }
    let body = response.bytes().await.unwrap_or_default();
    Err(classify_status(status, &body))
}

/// Map a non-2xx status and its body onto an [`ApiError`].
#[must_use]
pub fn classify_status(status: StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.message());
    match status {
        StatusCode::UNAUTHORIZED => ApiError::Unauthenticated,
        StatusCode::NOT_FOUND => ApiError::NotFound { detail },
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { detail },
        StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
            ApiError::Rejected {
                status: status.as_u16(),
                detail: detail.unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("request rejected")
                        .to_string()
                }),
            }
        }
        _ => ApiError::Status {
            status: status.as_u16(),
            detail,
        },
    }
}
