//! Plan catalog, checkout, billing portal and subscription lookups.

use qrcloner_api_models::{
    CheckoutRequest, Plan, PlanCatalog, PlanTier, PortalRequest, RedirectResponse,
    SubscriptionStatus, UsageReport,
};
use reqwest::Method;
use url::Url;

use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::ValidationError;

/// Billing endpoints for one session.
#[derive(Debug, Clone)]
pub struct BillingClient {
    client: ResourceClient,
    session: SessionContext,
    app_origin: Url,
}

impl BillingClient {
    /// Build a billing client; `app_origin` anchors the return URLs.
    #[must_use]
    pub const fn new(client: ResourceClient, session: SessionContext, app_origin: Url) -> Self {
        Self {
            client,
            session,
            app_origin,
        }
    }

    /// Public plan catalog; sent without credentials.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn plans(&self) -> Result<PlanCatalog, ApiError> {
        let url = self.session.endpoint(&["billing", "plans"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Anonymous);
        self.client.fetch_json(request, "plan catalog").await
    }

    /// Current plan, limits and usage counters.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn subscription(&self) -> Result<SubscriptionStatus, ApiError> {
        let url = self.session.endpoint(&["billing", "subscription"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        self.client.fetch_json(request, "subscription").await
    }

    /// Metered usage for the current billing period.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn usage(&self) -> Result<UsageReport, ApiError> {
        let url = self.session.endpoint(&["billing", "usage"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        self.client.fetch_json(request, "usage").await
    }

    /// Start a hosted checkout for a paid plan.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::FreePlanCheckout`] for the free tier,
    /// [`ApiError::MissingRedirect`] when no URL comes back, otherwise the
    /// classified request error.
    pub async fn checkout(&self, plan: PlanTier) -> Result<Navigation, ApiError> {
        if !plan.is_paid() {
            return Err(ValidationError::FreePlanCheckout.into());
        }
        let body = CheckoutRequest {
            plan_id: plan,
            success_url: self.return_url(&["dashboard"], Some(("checkout", "success"))),
            cancel_url: self.return_url(&["pricing"], Some(("checkout", "canceled"))),
        };
        let url = self.session.endpoint(&["billing", "checkout"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(&body);
        let response: RedirectResponse = self.client.fetch_json(request, "checkout").await?;
        tracing::info!(plan = %plan, "checkout session created");
        redirect(response, "checkout")
    }

    /// Open the billing portal; the portal returns to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::MissingRedirect`] when no URL comes back,
    /// otherwise the classified request error.
    pub async fn portal(&self) -> Result<Navigation, ApiError> {
        let body = PortalRequest {
            return_url: self.return_url(&["dashboard"], None),
        };
        let url = self.session.endpoint(&["billing", "portal"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(&body);
        let response: RedirectResponse = self.client.fetch_json(request, "portal").await?;
        redirect(response, "portal")
    }

    fn return_url(&self, segments: &[&str], query: Option<(&str, &str)>) -> String {
        let mut url = self.app_origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        if let Some((key, value)) = query {
            url.query_pairs_mut().append_pair(key, value);
        }
        url.into()
    }
}

fn redirect(response: RedirectResponse, what: &'static str) -> Result<Navigation, ApiError> {
    let raw = response
        .url
        .filter(|url| !url.is_empty())
        .ok_or(ApiError::MissingRedirect { what })?;
    let target = Url::parse(&raw).map_err(|err| ApiError::InvalidUrl {
        reason: format!("{what} redirect '{raw}': {err}"),
    })?;
    Ok(Navigation::External(target))
}

/// Render a plan price as `$9.90/month`; whole amounts drop the cents.
#[must_use]
pub fn format_price(plan: &Plan) -> String {
    let dollars = plan.price / 100;
    let cents = plan.price % 100;
    let amount = if cents == 0 {
        format!("${dollars}")
    } else {
        format!("${dollars}.{cents:02}")
    };
    match plan.interval.as_deref() {
        Some(interval) if plan.id.is_paid() => format!("{amount}/{interval}"),
        _ => amount,
    }
}
