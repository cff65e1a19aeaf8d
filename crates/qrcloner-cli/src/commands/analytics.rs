//! Usage analytics commands.

use anyhow::anyhow;
use qrcloner_client::AnalyticsView;

use crate::cli::{OutputFormat, TimeseriesArgs};
use crate::client::{AppContext, CliError, CliResult, login_required};
use crate::output::{render_summary, render_timeseries};

pub(crate) async fn handle_analytics_summary(
    ctx: &AppContext,
    format: OutputFormat,
) -> CliResult<()> {
    match ctx.analytics().summary().await {
        AnalyticsView::Ready { data, degraded } => render_summary(&data, degraded, format),
        AnalyticsView::Unauthenticated => Err(login_required(ctx)),
        AnalyticsView::Failed(message) => Err(CliError::failure(anyhow!(message))),
    }
}

pub(crate) async fn handle_analytics_timeseries(
    ctx: &AppContext,
    args: TimeseriesArgs,
    format: OutputFormat,
) -> CliResult<()> {
    let view = ctx
        .analytics()
        .timeseries(args.period.into(), args.days)
        .await?;
    match view {
        AnalyticsView::Ready { data, degraded } => render_timeseries(&data, degraded, format),
        AnalyticsView::Unauthenticated => Err(login_required(ctx)),
        AnalyticsView::Failed(message) => Err(CliError::failure(anyhow!(message))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::PeriodArg;
    use crate::client::context_with;
    use httpmock::prelude::*;
    use qrcloner_client::OfflineMode;
    use serde_json::json;

    #[tokio::test]
    async fn summary_renders_counts() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/analytics/summary")
                .header("authorization", "Bearer token-123");
            then.status(200).json_body(json!({
                "total_creates": 12,
                "total_exports": 4,
                "total_scans": 40,
                "creates_this_week": 2,
                "exports_this_week": 1,
                "scans_this_week": 9,
                "creates_this_month": 6,
                "exports_this_month": 3,
                "scans_this_month": 25
            }));
        });

        let ctx = context_with(&server);
        handle_analytics_summary(&ctx, OutputFormat::Table)
            .await
            .expect("summary renders");
        mock.assert();
    }

    #[tokio::test]
    async fn summary_unauthorized_points_at_login() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/analytics/summary");
            then.status(401);
        });

        let ctx = context_with(&server);
        let err = handle_analytics_summary(&ctx, OutputFormat::Json)
            .await
            .expect_err("unauthorized");
        assert_eq!(err.exit_code(), 3);
        assert!(err.display_message().contains("http://app.test/login"));
    }

    #[tokio::test]
    async fn timeseries_out_of_range_days_is_a_validation_error() {
        let ctx = context_with(&MockServer::start_async().await);
        let err = handle_analytics_timeseries(
            &ctx,
            TimeseriesArgs {
                period: PeriodArg::Daily,
                days: 400,
            },
            OutputFormat::Table,
        )
        .await
        .expect_err("days out of range");
        assert_eq!(err.exit_code(), 2);
    }

    #[tokio::test]
    async fn timeseries_sends_weekly_window() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/analytics/timeseries")
                .query_param("period", "weekly")
                .query_param("days", "90");
            then.status(200).json_body(json!({
                "data": [{"date": "2025-10-20", "creates": 3, "exports": 2, "scans": 8}]
            }));
        });

        let ctx = context_with(&server);
        handle_analytics_timeseries(
            &ctx,
            TimeseriesArgs {
                period: PeriodArg::Weekly,
                days: 90,
            },
            OutputFormat::Json,
        )
        .await
        .expect("timeseries renders");
        mock.assert();
    }

    #[tokio::test]
    async fn unreachable_api_falls_back_to_sample_data() {
        let mut ctx = context_with(&MockServer::start_async().await);
        ctx.config.api_base = "http://127.0.0.1:9".parse().expect("valid URL");
        ctx.config.offline = OfflineMode::Placeholder;
        handle_analytics_summary(&ctx, OutputFormat::Table)
            .await
            .expect("placeholder summary");
    }
}
