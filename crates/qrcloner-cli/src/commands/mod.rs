//! Command handlers grouped by page.

use anyhow::anyhow;
use qrcloner_client::{ListPage, ListState};

use crate::client::{AppContext, CliError, CliResult, login_required};

pub(crate) mod analytics;
pub(crate) mod billing;
pub(crate) mod library;
pub(crate) mod organize;
pub(crate) mod templates;

/// Unwrap a settled list state into its page.
pub(crate) fn list_page<T>(ctx: &AppContext, state: ListState<T>) -> CliResult<ListPage<T>> {
    match state {
        ListState::Ready(page) => Ok(page),
        ListState::Unauthenticated => Err(login_required(ctx)),
        ListState::Failed(message) => Err(CliError::failure(anyhow!(message))),
        ListState::Idle | ListState::Loading => {
            Err(CliError::failure(anyhow!("list request did not complete")))
        }
    }
}

/// Trimmed search text, or `None` when blank.
pub(crate) fn search_term(search: Option<String>) -> Option<String> {
    search
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
}
