//! Usage analytics: headline summary and time series.

use qrcloner_api_models::{AnalyticsPeriod, AnalyticsSummary, TimeSeriesResponse};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;

use crate::config::OfflineMode;
use crate::error::ApiError;
use crate::placeholder;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::{ValidationError, validate_days};

/// Default time-series window, in days.
pub const DEFAULT_DAYS: u32 = 30;

/// Render state of an analytics panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalyticsView<T> {
    /// Data loaded.
    Ready {
        /// Panel data.
        data: T,
        /// Set when the data is placeholder data.
        degraded: bool,
    },
    /// The API requires a login.
    Unauthenticated,
    /// The request failed.
    Failed(String),
}

/// Analytics endpoints for one session.
#[derive(Debug, Clone)]
pub struct AnalyticsController {
    client: ResourceClient,
    session: SessionContext,
    offline: OfflineMode,
}

impl AnalyticsController {
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

    /// Totals plus weekly and monthly counts.
    pub async fn summary(&self) -> AnalyticsView<AnalyticsSummary> {
        let result = match self.session.endpoint(&["analytics", "summary"]) {
            Ok(url) => self.fetch(url, "analytics summary").await,
            Err(err) => Err(err),
        };
        self.view(result, placeholder::analytics_summary)
    }

    /// Bucketed counts over the last `days` days.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::DaysOutOfRange`] outside `1..=365`; nothing
    /// is sent in that case.
    pub async fn timeseries(
        &self,
        period: AnalyticsPeriod,
        days: u32,
    ) -> Result<AnalyticsView<TimeSeriesResponse>, ValidationError> {
        let days = validate_days(days)?;
        let result = match self.session.endpoint(&["analytics", "timeseries"]) {
            Ok(mut url) => {
                url.query_pairs_mut()
                    .append_pair("period", period.as_str())
                    .append_pair("days", &days.to_string());
                self.fetch(url, "analytics timeseries").await
            }
            Err(err) => Err(err),
        };
        Ok(self.view(result, placeholder::analytics_timeseries))
    }

    async fn fetch<T: DeserializeOwned + Send>(
        &self,
        url: Url,
        what: &'static str,
    ) -> Result<T, ApiError> {
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        self.client.fetch_json(request, what).await
    }

    fn view<T>(&self, result: Result<T, ApiError>, fallback: fn() -> T) -> AnalyticsView<T> {
        match result {
            Ok(data) => AnalyticsView::Ready {
                data,
                degraded: false,
            },
            Err(ApiError::Unauthenticated) => AnalyticsView::Unauthenticated,
            Err(err) if err.is_network() && self.offline.allows_placeholder() => {
                tracing::warn!(error = %err, "API unreachable; showing placeholder analytics");
                AnalyticsView::Ready {
                    data: fallback(),
                    degraded: true,
                }
            }
            Err(err) => AnalyticsView::Failed(format!(
                "Failed to load analytics: {}",
                err.display_message()
            )),
        }
    }
}
