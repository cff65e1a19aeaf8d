//! Quota evaluation for the dashboard banner.
//!
//! Each fetch recomputes the report from scratch: there is no hysteresis and
//! no memory of a dismissed warning.

use std::fmt::{self, Display, Formatter};

use qrcloner_api_models::{PlanTier, SubscriptionStatus};

use crate::billing::BillingClient;
use crate::error::ApiError;
use crate::navigation::Navigation;

/// Usage share, in percent, at which a warning is raised.
pub const WARNING_THRESHOLD_PERCENT: u64 = 80;

/// Plan upgraded to from the free tier.
pub const UPGRADE_PLAN: PlanTier = PlanTier::Pro;

/// Metered dimension shown on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDimension {
    /// QR codes generated this billing month.
    MonthlyGenerations,
    /// Exports performed today.
    DailyExports,
}

impl QuotaDimension {
    /// Noun phrase used in usage lines and warnings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::MonthlyGenerations => "QR codes this month",
            Self::DailyExports => "exports today",
        }
    }
}

/// Consumption of one dimension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DimensionUsage {
    /// Which meter.
    pub dimension: QuotaDimension,
    /// Units consumed.
    pub used: u64,
    /// Units allowed.
    pub limit: u64,
}

impl DimensionUsage {
    /// Consumption in whole percent (floored). A zero limit reads as 100 when
    /// anything was used and 0 otherwise.
    #[must_use]
    pub fn percent(&self) -> u64 {
        if self.limit == 0 {
            return if self.used > 0 { 100 } else { 0 };
        }
        let ratio = u128::from(self.used) * 100 / u128::from(self.limit);
        u64::try_from(ratio).unwrap_or(u64::MAX)
    }

    /// Whether consumption is at or above [`WARNING_THRESHOLD_PERCENT`].
    #[must_use]
    pub fn is_warning(&self) -> bool {
        if self.limit == 0 {
            return self.used > 0;
        }
        u128::from(self.used) * 100
            >= u128::from(WARNING_THRESHOLD_PERCENT) * u128::from(self.limit)
    }

    /// `"{used} / {limit} {label}"`.
    #[must_use]
    pub fn display_line(&self) -> String {
        format!("{} / {} {}", self.used, self.limit, self.dimension.label())
    }
}

/// Warning raised when one or more dimensions cross the threshold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaWarning {
    /// Dimensions at or above the threshold, in display order.
    pub triggered: Vec<QuotaDimension>,
}

impl Display for QuotaWarning {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.triggered.iter().map(|dim| dim.label()).collect();
        write!(
            formatter,
            "You are approaching your plan limits: {}",
            names.join(", ")
        )
    }
}

/// Call to action shown next to the usage meters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscriptionAction {
    /// Free tier: start checkout for [`UPGRADE_PLAN`].
    Upgrade,
    /// Paid tier: open the billing portal.
    ManageSubscription,
}

impl SubscriptionAction {
    /// Button label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Upgrade => "Upgrade",
            Self::ManageSubscription => "Manage Subscription",
        }
    }
}

/// Everything the dashboard banner needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuotaReport {
    /// Current tier.
    pub plan: PlanTier,
    /// Payment-provider status, when reported.
    pub status: Option<String>,
    /// Monthly generation meter.
    pub generations: DimensionUsage,
    /// Daily export meter.
    pub exports: DimensionUsage,
    /// Present iff a meter is at or above the threshold.
    pub warning: Option<QuotaWarning>,
    /// Offered call to action.
    pub action: SubscriptionAction,
}

/// Derive the banner from a subscription snapshot.
#[must_use]
pub fn evaluate(status: &SubscriptionStatus) -> QuotaReport {
    let generations = DimensionUsage {
        dimension: QuotaDimension::MonthlyGenerations,
        used: status.usage.qr_generated,
        limit: status.quota_limits.qr_month,
    };
    let exports = DimensionUsage {
        dimension: QuotaDimension::DailyExports,
        used: status.usage.exports_today,
        limit: status.quota_limits.exports_day,
    };
    let triggered: Vec<QuotaDimension> = [generations, exports]
        .into_iter()
        .filter(DimensionUsage::is_warning)
        .map(|usage| usage.dimension)
        .collect();
    let warning = (!triggered.is_empty()).then_some(QuotaWarning { triggered });
    let action = if status.plan.is_paid() {
        SubscriptionAction::ManageSubscription
    } else {
        SubscriptionAction::Upgrade
    };
    QuotaReport {
        plan: status.plan,
        status: status.status.clone(),
        generations,
        exports,
        warning,
        action,
    }
}

/// Render state of the quota banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuotaState {
    /// Report computed from a fresh snapshot.
    Ready(QuotaReport),
    /// The API requires a login.
    Unauthenticated,
    /// The subscription could not be loaded.
    Failed(String),
}

/// Fetches subscription status and follows the call to action.
#[derive(Debug, Clone)]
pub struct QuotaMonitor {
    billing: BillingClient,
}

impl QuotaMonitor {
    /// Wrap a billing client.
    #[must_use]
    pub const fn new(billing: BillingClient) -> Self {
        Self { billing }
    }

    /// Fetch the subscription and recompute the report.
    pub async fn refresh(&self) -> QuotaState {
        match self.billing.subscription().await {
            Ok(status) => {
                let report = evaluate(&status);
                if let Some(warning) = &report.warning {
                    tracing::warn!(
                        plan = %report.plan,
                        triggered = ?warning.triggered,
                        "quota threshold reached"
                    );
                }
                QuotaState::Ready(report)
            }
            Err(ApiError::Unauthenticated) => QuotaState::Unauthenticated,
            Err(err) => QuotaState::Failed(format!(
                "Failed to load subscription: {}",
                err.display_message()
            )),
        }
    }

    /// Perform `action`: checkout for an upgrade or the billing portal.
    ///
    /// # Errors
    ///
    /// Propagates the billing request error.
    pub async fn follow(&self, action: SubscriptionAction) -> Result<Navigation, ApiError> {
        match action {
            SubscriptionAction::Upgrade => self.billing.checkout(UPGRADE_PLAN).await,
            SubscriptionAction::ManageSubscription => self.billing.portal().await,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SessionContext;
    use crate::transport::ResourceClient;
    use httpmock::prelude::*;
    use qrcloner_api_models::{QuotaLimits, UsageCounters};
    use serde_json::json;
    use url::Url;

    fn status(plan: PlanTier, qr: (u64, u64), exports: (u64, u64)) -> SubscriptionStatus {
        SubscriptionStatus {
            plan,
            status: None,
            current_period_end: None,
            quota_limits: QuotaLimits {
                qr_month: qr.1,
                exports_day: exports.1,
                templates_apply: 5,
            },
            usage: UsageCounters {
                qr_generated: qr.0,
                exports_today: exports.0,
                templates_applied: 0,
            },
        }
    }

    #[test]
    fn warning_starts_at_eighty_percent() {
        let below = evaluate(&status(PlanTier::Free, (79, 100), (0, 10)));
        assert!(below.warning.is_none());
        assert_eq!(below.generations.percent(), 79);

        let at = evaluate(&status(PlanTier::Free, (80, 100), (0, 10)));
        assert_eq!(
            at.warning.map(|warning| warning.triggered),
            Some(vec![QuotaDimension::MonthlyGenerations])
        );

        let exports = evaluate(&status(PlanTier::Free, (10, 50), (8, 10)));
        let warning = exports.warning.expect("exports warning");
        assert_eq!(warning.triggered, [QuotaDimension::DailyExports]);
        assert!(warning.to_string().contains("exports today"));
    }

    #[test]
    fn fractional_shares_just_below_threshold_do_not_warn() {
        let usage = DimensionUsage {
            dimension: QuotaDimension::MonthlyGenerations,
            used: 39,
            limit: 49,
        };
        assert!(!usage.is_warning());
        assert_eq!(usage.percent(), 79);
    }

    #[test]
    fn zero_limits_saturate_when_used() {
        let used = DimensionUsage {
            dimension: QuotaDimension::DailyExports,
            used: 1,
            limit: 0,
        };
        assert_eq!(used.percent(), 100);
        assert!(used.is_warning());

        let idle = DimensionUsage { used: 0, ..used };
        assert_eq!(idle.percent(), 0);
        assert!(!idle.is_warning());
    }

    #[test]
    fn plan_tier_selects_call_to_action() {
        assert_eq!(
            evaluate(&status(PlanTier::Free, (0, 50), (0, 10))).action,
            SubscriptionAction::Upgrade
        );
        assert_eq!(
            evaluate(&status(PlanTier::Team, (0, 10_000), (0, 1000))).action,
            SubscriptionAction::ManageSubscription
        );
    }

    #[test]
    fn usage_lines_match_dashboard_copy() {
        let report = evaluate(&status(PlanTier::Free, (10, 50), (2, 10)));
        assert_eq!(report.generations.display_line(), "10 / 50 QR codes this month");
        assert_eq!(report.exports.display_line(), "2 / 10 exports today");
    }

    #[tokio::test]
    async fn paid_plan_opens_portal() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/billing/subscription");
            then.status(200).json_body(json!({
                "plan": "pro",
                "status": "active",
                "quota_limits": {"qr_month": 1000, "exports_day": 100, "templates_apply": 100},
                "usage": {"qr_generated": 900, "exports_today": 3, "templates_applied": 0}
            }));
        });
        let portal = server.mock(|when, then| {
            when.method(POST).path("/billing/portal");
            then.status(200)
                .json_body(json!({"url": "https://billing.stripe.com/p/session/abc"}));
        });

        let base = Url::parse(&server.base_url()).expect("base url");
        let monitor = QuotaMonitor::new(BillingClient::new(
            ResourceClient::default(),
            SessionContext::guest(base),
            Url::parse("http://localhost:3000").expect("origin"),
        ));
        let QuotaState::Ready(report) = monitor.refresh().await else {
            panic!("expected report");
        };
        assert_eq!(report.generations.percent(), 90);
        assert!(report.warning.is_some());
        let next = monitor.follow(report.action).await.expect("portal");
        portal.assert();
        assert!(matches!(next, Navigation::External(_)));
    }

    #[tokio::test]
    async fn unauthorized_subscription_lookup() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/billing/subscription");
            then.status(401);
        });

        let base = Url::parse(&server.base_url()).expect("base url");
        let monitor = QuotaMonitor::new(BillingClient::new(
            ResourceClient::default(),
            SessionContext::guest(base),
            Url::parse("http://localhost:3000").expect("origin"),
        ));
        assert_eq!(monitor.refresh().await, QuotaState::Unauthenticated);
    }
}
