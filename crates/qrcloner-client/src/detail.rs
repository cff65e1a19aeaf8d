//! Single-item view: load, delete, duplicate and restore.

use qrcloner_api_models::QrItem;
use reqwest::Method;

use crate::config::OfflineMode;
use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::placeholder;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::validate_item_id;

/// Prompt shown before an item is deleted.
pub const DELETE_CONFIRMATION: &str = "Are you sure you want to delete this QR code?";

const ITEMS_PATH: [&str; 2] = ["library", "qr-items"];

/// Render state of the detail view.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailState {
    /// The item loaded.
    Ready {
        /// Loaded item.
        item: QrItem,
        /// Set when the item is placeholder data.
        degraded: bool,
    },
    /// The identifier failed validation; nothing was requested.
    InvalidId,
    /// The API requires a login.
    Unauthenticated,
    /// The item does not exist.
    NotFound,
    /// Any other failure.
    Failed {
        /// Underlying error text, for logs and verbose output.
        detail: String,
    },
}

impl DetailState {
    /// User-facing message for non-ready states.
    #[must_use]
    pub const fn message(&self) -> Option<&'static str> {
        match self {
            Self::Ready { .. } => None,
            Self::InvalidId => Some("Invalid QR code ID"),
            Self::Unauthenticated => Some("Please log in to view this QR code"),
            Self::NotFound => Some("QR code not found"),
            Self::Failed { .. } => Some("Failed to load QR code"),
        }
    }
}

/// Controller for `/library/qr-items/{id}` and its actions.
#[derive(Debug, Clone)]
pub struct ItemDetailController {
    client: ResourceClient,
    session: SessionContext,
    offline: OfflineMode,
}

impl ItemDetailController {
    /// Build a controller for one session.
    #[must_use]
    pub const fn new(
        client: ResourceClient,
        session: SessionContext,
        offline: OfflineMode,
    ) -> Self {
        Self {
            client,
            session,
            offline,
        }
    }

    /// Fetch the item without translating failures into view states.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn fetch(&self, id: &str) -> Result<QrItem, ApiError> {
        let id = validate_item_id(id)?;
        let url = self.item_url(id, None)?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        self.client.fetch_json(request, "QR item").await
    }

    /// Load the item and map the outcome to a view state.
    pub async fn load(&self, id: &str) -> DetailState {
        match self.fetch(id).await {
            Ok(item) => DetailState::Ready {
                item,
                degraded: false,
            },
            Err(ApiError::Validation(_)) => DetailState::InvalidId,
            Err(ApiError::Unauthenticated) => DetailState::Unauthenticated,
            Err(ApiError::NotFound { .. }) => DetailState::NotFound,
            Err(err) if err.is_network() && self.offline.allows_placeholder() => {
                tracing::warn!(id, error = %err, "API unreachable; showing placeholder item");
                DetailState::Ready {
                    item: placeholder::qr_item(id),
                    degraded: true,
                }
            }
            Err(err) => DetailState::Failed {
                detail: err.display_message(),
            },
        }
    }

    /// Delete the item after `confirm` accepts [`DELETE_CONFIRMATION`].
    ///
    /// The identifier is validated before the prompt. Returns `Ok(None)` when
    /// the prompt is declined; nothing is sent in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn delete<F>(&self, id: &str, confirm: F) -> Result<Option<Navigation>, ApiError>
    where
        F: FnOnce(&str) -> bool + Send,
    {
        let id = validate_item_id(id)?;
        if !confirm(DELETE_CONFIRMATION) {
            tracing::debug!(id, "delete cancelled");
            return Ok(None);
        }
        let url = self.item_url(id, None)?;
        let request = self
            .client
            .request(&self.session, Method::DELETE, url, Auth::Bearer);
        self.client.fetch_empty(request, "QR item delete").await?;
        tracing::info!(id, "QR item deleted");
        Ok(Some(Navigation::Dashboard))
    }

    /// Duplicate the item and return navigation to the copy.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn duplicate(&self, id: &str) -> Result<Navigation, ApiError> {
        self.item_action(id, "duplicate").await
    }

    /// Restore a soft-deleted item and return navigation to it.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn restore(&self, id: &str) -> Result<Navigation, ApiError> {
        self.item_action(id, "restore").await
    }

    async fn item_action(&self, id: &str, action: &'static str) -> Result<Navigation, ApiError> {
        let id = validate_item_id(id)?;
        let url = self.item_url(id, Some(action))?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer);
        let item: QrItem = self.client.fetch_json(request, action).await?;
        tracing::info!(source = id, target = %item.id, action, "QR item updated");
        Ok(Navigation::ItemDetail { id: item.id })
    }

    fn item_url(&self, id: &str, action: Option<&str>) -> Result<url::Url, ApiError> {
        let mut segments: Vec<&str> = ITEMS_PATH.to_vec();
        segments.push(id);
        segments.extend(action);
        self.session.endpoint(&segments)
    }
}
