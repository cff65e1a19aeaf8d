//! Plan, subscription and checkout commands.

use anyhow::anyhow;
use qrcloner_client::QuotaState;

use crate::cli::{CheckoutArgs, OutputFormat, QuotaArgs};
use crate::client::{AppContext, CliError, CliResult, login_required};
use crate::output::{render_plans, render_quota, render_usage};

pub(crate) async fn handle_quota(
    ctx: &AppContext,
    args: QuotaArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let monitor = ctx.quota();
    let report = match monitor.refresh().await {
        QuotaState::Ready(report) => report,
        QuotaState::Unauthenticated => return Err(login_required(ctx)),
        QuotaState::Failed(message) => return Err(CliError::failure(anyhow!(message))),
    };
    render_quota(&report, format)?;
    if args.act {
        let target = monitor.follow(report.action).await?;
        println!("{}: {}", report.action.label(), ctx.link(&target));
    }
    Ok(())
}

pub(crate) async fn handle_plans(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let catalog = ctx.billing().plans().await?;
    render_plans(&catalog, format)
}

pub(crate) async fn handle_usage(ctx: &AppContext, format: OutputFormat) -> CliResult<()> {
    let report = ctx.billing().usage().await?;
    render_usage(&report, format)
}

pub(crate) async fn handle_checkout(ctx: &AppContext, args: CheckoutArgs) -> CliResult<()> {
    let target = ctx.billing().checkout(args.plan).await?;
    println!("Continue checkout at {}", ctx.link(&target));
    Ok(())
}

pub(crate) async fn handle_portal(ctx: &AppContext) -> CliResult<()> {
    let target = ctx.billing().portal().await?;
    println!("Manage your subscription at {}", ctx.link(&target));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::context_with;
    use httpmock::prelude::*;
    use qrcloner_api_models::PlanTier;
    use serde_json::json;

    fn subscription(plan: &str, generated: u64) -> serde_json::Value {
        json!({
            "plan": plan,
            "status": "active",
            "quota_limits": {"qr_month": 100, "exports_day": 20, "templates_apply": 10},
            "usage": {"qr_generated": generated, "exports_today": 2, "templates_applied": 0}
        })
    }

    #[tokio::test]
    async fn quota_act_on_free_plan_starts_pro_checkout() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/billing/subscription");
            then.status(200).json_body(subscription("free", 85));
        });
        let checkout = server.mock(|when, then| {
            when.method(POST)
                .path("/billing/checkout")
                .json_body(json!({
                    "plan_id": "pro",
                    "success_url": "http://app.test/dashboard?checkout=success",
                    "cancel_url": "http://app.test/pricing?checkout=canceled"
                }));
            then.status(200)
                .json_body(json!({"id": "cs_1", "url": "https://pay.test/cs_1"}));
        });

        let ctx = context_with(&server);
        handle_quota(&ctx, QuotaArgs { act: true }, OutputFormat::Table)
            .await
            .expect("quota renders");
        checkout.assert();
    }

    #[tokio::test]
    async fn quota_act_on_paid_plan_opens_portal() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/billing/subscription");
            then.status(200).json_body(subscription("team", 3));
        });
        let portal = server.mock(|when, then| {
            when.method(POST)
                .path("/billing/portal")
                .json_body(json!({"return_url": "http://app.test/dashboard"}));
            then.status(200).json_body(json!({"url": "https://pay.test/portal"}));
        });

        let ctx = context_with(&server);
        handle_quota(&ctx, QuotaArgs { act: true }, OutputFormat::Json)
            .await
            .expect("portal link");
        portal.assert();
    }

    #[tokio::test]
    async fn free_plan_checkout_is_rejected_locally() {
        let ctx = context_with(&MockServer::start_async().await);
        let err = handle_checkout(
            &ctx,
            CheckoutArgs {
                plan: PlanTier::Free,
            },
        )
        .await
        .expect_err("free plan");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn checkout_without_redirect_fails() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/billing/checkout");
            then.status(200).json_body(json!({"id": "cs_2"}));
        });

        let ctx = context_with(&server);
        let err = handle_checkout(
            &ctx,
            CheckoutArgs {
                plan: PlanTier::Team,
            },
        )
        .await
        .expect_err("no redirect");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("redirect"));
    }

    #[tokio::test]
    async fn plans_render_catalog() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/billing/plans")
                .header_missing("authorization");
            then.status(200).json_body(json!({"plans": [{
                "id": "pro",
                "name": "Pro",
                "price": 990,
                "currency": "usd",
                "interval": "month",
                "quota": {"qr_month": 500, "exports_day": 100, "templates_apply": 50},
                "features": ["Custom logos"]
            }]}));
        });

        let ctx = context_with(&server);
        handle_plans(&ctx, OutputFormat::Table)
            .await
            .expect("plans render");
        mock.assert();
    }
}
