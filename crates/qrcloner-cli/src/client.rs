//! Shared client utilities, error types, and controller construction for the CLI.

use std::fmt::{self, Display, Formatter};
use std::io::{self, BufRead, Write};

use anyhow::anyhow;
use qrcloner_client::{
    AnalyticsController, ApiError, BillingClient, ClientConfig, EditorController,
    ItemDetailController, LibraryOrganizer, Navigation, QuotaMonitor, ResourceClient,
    SessionContext, TemplateAdmin, TemplateGallery, ValidationError,
};
use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue};

pub(crate) const HEADER_REQUEST_ID: &str = "x-request-id";

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ValidationError> for CliError {
    fn from(err: ValidationError) -> Self {
        Self::Validation(err.to_string())
    }
}

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Validation(inner) => inner.into(),
            ApiError::Rejected { detail, .. } => Self::Validation(detail),
            ApiError::Unauthenticated => Self::Failure(anyhow!(
                "{} (set --token or QRCLONER_TOKEN)",
                err.display_message()
            )),
            other => Self::Failure(anyhow!(other.display_message())),
        }
    }
}

/// Dependencies constructed from environment flags and CLI options.
#[derive(Clone)]
pub(crate) struct CliDependencies {
    pub(crate) client: Client,
}

impl CliDependencies {
    /// Construct the configured HTTP client tagging every request with `trace_id`.
    pub(crate) fn from_config(config: &ClientConfig, trace_id: &str) -> CliResult<Self> {
        let mut default_headers = HeaderMap::new();
        let request_id = HeaderValue::from_str(trace_id).map_err(|_| {
            CliError::failure(anyhow!("trace identifier contains invalid characters"))
        })?;
        default_headers.insert(HEADER_REQUEST_ID, request_id);

        let client = config
            .http_client(default_headers)
            .map_err(CliError::failure)?;
        Ok(Self { client })
    }
}

/// Application context passed to command handlers.
#[derive(Clone)]
pub(crate) struct AppContext {
    pub(crate) client: ResourceClient,
    pub(crate) config: ClientConfig,
}

impl AppContext {
    pub(crate) fn session(&self) -> SessionContext {
        self.config.session()
    }

    pub(crate) fn detail(&self) -> ItemDetailController {
        ItemDetailController::new(self.client.clone(), self.session(), self.config.offline)
    }

    pub(crate) fn editor(&self) -> EditorController {
        EditorController::new(self.client.clone(), self.session())
    }

    pub(crate) fn billing(&self) -> BillingClient {
        BillingClient::new(
            self.client.clone(),
            self.session(),
            self.config.app_origin.clone(),
        )
    }

    pub(crate) fn quota(&self) -> QuotaMonitor {
        QuotaMonitor::new(self.billing())
    }

    pub(crate) fn gallery(&self) -> TemplateGallery {
        TemplateGallery::new(self.client.clone(), self.session(), self.config.offline)
    }

    pub(crate) fn admin(&self) -> TemplateAdmin {
        TemplateAdmin::new(self.client.clone(), self.session())
    }

    pub(crate) fn organizer(&self) -> LibraryOrganizer {
        LibraryOrganizer::new(self.client.clone(), self.session())
    }

    pub(crate) fn analytics(&self) -> AnalyticsController {
        AnalyticsController::new(self.client.clone(), self.session(), self.config.offline)
    }

    /// Absolute front-end URL for a navigation target.
    pub(crate) fn link(&self, target: &Navigation) -> String {
        target.to_url(&self.config.app_origin).to_string()
    }
}

/// Error reported when a view needs a login.
pub(crate) fn login_required(ctx: &AppContext) -> CliError {
    CliError::failure(anyhow!(
        "authentication required; log in at {} or pass --token",
        ctx.link(&Navigation::Login)
    ))
}

/// Ask for confirmation on the terminal unless `assume_yes` is set.
pub(crate) fn confirm_prompt(message: &str, assume_yes: bool) -> bool {
    if assume_yes {
        return true;
    }
    let mut stderr = io::stderr();
    if write!(stderr, "{message} [y/N] ").is_err() || stderr.flush().is_err() {
        return false;
    }
    let mut answer = String::new();
    if io::stdin().lock().read_line(&mut answer).is_err() {
        return false;
    }
    is_affirmative(&answer)
}

fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

/// Context pointing at a mock server with a fixed token.
#[cfg(test)]
pub(crate) fn context_with(server: &httpmock::MockServer) -> AppContext {
    let base = server.base_url().parse().expect("valid URL");
    AppContext {
        client: ResourceClient::new(Client::new()),
        config: ClientConfig {
            api_base: base,
            token: Some("token-123".to_string()),
            app_origin: "http://app.test".parse().expect("valid URL"),
            offline: qrcloner_client::OfflineMode::Strict,
            timeout: None,
        },
    }
}
