//! Output renderers and formatting helpers for CLI commands.

use anyhow::anyhow;
use qrcloner_api_models::{
    AnalyticsSummary, Folder, PlanCatalog, QrItem, Tag, Template, TemplateCategory,
    TimeSeriesResponse, UsageReport,
};
use qrcloner_client::quota::DimensionUsage;
use qrcloner_client::{ListPage, QuotaReport, format_price};
use serde::Serialize;
use serde_json::json;

use crate::cli::OutputFormat;
use crate::client::{CliError, CliResult};

const NAME_WIDTH: usize = 32;

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> CliResult<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|err| CliError::failure(anyhow!("failed to format JSON: {err}")))?;
    println!("{text}");
    Ok(())
}

/// Note printed to stderr when a view shows sample data.
pub(crate) fn degraded_notice(degraded: bool) {
    if degraded {
        eprintln!("note: API unreachable; showing sample data");
    }
}

pub(crate) fn render_item_page(page: &ListPage<QrItem>, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&page_json(page)),
        OutputFormat::Table => {
            degraded_notice(page.degraded);
            if page.items.is_empty() {
                println!("No QR codes yet. Create one with `qrcloner save`.");
                return Ok(());
            }
            println!("{:<36} {:<6} {:<20} NAME", "ID", "TYPE", "CREATED");
            for item in &page.items {
                println!(
                    "{:<36} {:<6} {:<20} {}",
                    item.id,
                    item.qr_type.as_str(),
                    item.created_at.format("%Y-%m-%d %H:%M").to_string(),
                    truncate(&item.name, NAME_WIDTH)
                );
            }
            print_pagination(page);
            Ok(())
        }
    }
}

pub(crate) fn render_item_detail(
    item: &QrItem,
    degraded: bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({"item": item, "degraded": degraded})),
        OutputFormat::Table => {
            degraded_notice(degraded);
            println!("id: {}", item.id);
            println!("name: {}", item.name);
            println!("type: {}", item.qr_type);
            if let Some(folder) = &item.folder_id {
                println!("folder: {folder}");
            }
            if !item.tags.is_empty() {
                let names: Vec<&str> = item.tags.iter().map(|tag| tag.name.as_str()).collect();
                println!("tags: {}", names.join(", "));
            }
            println!("created: {}", item.created_at);
            println!("updated: {}", item.updated_at);
            if let Some(deleted) = item.deleted_at {
                println!("deleted: {deleted}");
            }
            println!("payload:");
            for (key, value) in &item.payload {
                println!("  {key}: {value}");
            }
            Ok(())
        }
    }
}

pub(crate) fn render_template_page(
    page: &ListPage<Template>,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&page_json(page)),
        OutputFormat::Table => {
            degraded_notice(page.degraded);
            if page.items.is_empty() {
                println!("No templates found.");
                return Ok(());
            }
            println!("{:<36} {:<6} {:<9} NAME", "ID", "TYPE", "STATUS");
            for template in &page.items {
                println!(
                    "{:<36} {:<6} {:<9} {}",
                    template.id,
                    template.qr_type.as_str(),
                    publication_label(template.is_published),
                    truncate(&template.name, NAME_WIDTH)
                );
            }
            print_pagination(page);
            Ok(())
        }
    }
}

pub(crate) fn render_template(template: &Template, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(template),
        OutputFormat::Table => {
            println!("id: {}", template.id);
            println!("name: {}", template.name);
            if let Some(description) = &template.description {
                println!("description: {description}");
            }
            let category = template
                .category
                .as_ref()
                .map(|category| category.name.as_str())
                .or(template.category_id.as_deref());
            if let Some(category) = category {
                println!("category: {category}");
            }
            println!("type: {}", template.qr_type);
            println!("status: {}", publication_label(template.is_published));
            if let Some(preview) = &template.preview_url {
                println!("preview: {preview}");
            }
            for asset in &template.assets {
                println!(
                    "asset: {} {} ({}, {} bytes)",
                    asset.asset_type.as_str(),
                    asset.file_name,
                    asset.mime_type,
                    asset.file_size
                );
            }
            println!("updated: {}", template.updated_at);
            Ok(())
        }
    }
}

pub(crate) fn render_categories(
    categories: &[TemplateCategory],
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(categories),
        OutputFormat::Table => {
            println!("{:<36} {:<24} NAME", "ID", "SLUG");
            for category in categories {
                println!("{:<36} {:<24} {}", category.id, category.slug, category.name);
            }
            Ok(())
        }
    }
}

pub(crate) fn render_folders(folders: &[Folder], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(folders),
        OutputFormat::Table => {
            if folders.is_empty() {
                println!("No folders yet. Create one with `qrcloner folders create`.");
                return Ok(());
            }
            println!("{:<36} {:<36} NAME", "ID", "PARENT");
            for folder in folders {
                println!(
                    "{:<36} {:<36} {}",
                    folder.id,
                    folder.parent_id.as_deref().unwrap_or("-"),
                    truncate(&folder.name, NAME_WIDTH)
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_tags(tags: &[Tag], format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(tags),
        OutputFormat::Table => {
            if tags.is_empty() {
                println!("No tags yet. Create one with `qrcloner tags create`.");
                return Ok(());
            }
            println!("{:<36} {:<8} NAME", "ID", "COLOR");
            for tag in tags {
                println!("{:<36} {:<8} {}", tag.id, tag.color, tag.name);
            }
            Ok(())
        }
    }
}

pub(crate) fn render_dashboard(
    page: &ListPage<QrItem>,
    quota: Option<&QuotaReport>,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({
            "items": page_json(page),
            "quota": quota.map(quota_json),
        })),
        OutputFormat::Table => {
            if let Some(report) = quota {
                render_quota(report, format)?;
                println!();
            }
            render_item_page(page, format)
        }
    }
}

pub(crate) fn render_quota(report: &QuotaReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&quota_json(report)),
        OutputFormat::Table => {
            let status = report
                .status
                .as_deref()
                .map(|status| format!(" ({status})"))
                .unwrap_or_default();
            println!("plan: {}{status}", report.plan);
            println!(
                "{} ({}%)",
                report.generations.display_line(),
                report.generations.percent()
            );
            println!(
                "{} ({}%)",
                report.exports.display_line(),
                report.exports.percent()
            );
            if let Some(warning) = &report.warning {
                println!("warning: {warning}");
            }
            println!("action: {}", report.action.label());
            Ok(())
        }
    }
}

pub(crate) fn render_plans(catalog: &PlanCatalog, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(catalog),
        OutputFormat::Table => {
            println!("{:<6} {:<14} {:>8} {:>8} NAME", "ID", "PRICE", "QR/MO", "EXP/DAY");
            for plan in &catalog.plans {
                println!(
                    "{:<6} {:<14} {:>8} {:>8} {}",
                    plan.id.as_str(),
                    format_price(plan),
                    plan.quota.qr_month,
                    plan.quota.exports_day,
                    plan.name
                );
                for feature in &plan.features {
                    println!("       - {feature}");
                }
            }
            Ok(())
        }
    }
}

pub(crate) fn render_usage(report: &UsageReport, format: OutputFormat) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(report),
        OutputFormat::Table => {
            println!("period: {} .. {}", report.period_start, report.period_end);
            let meters = [
                ("qr generated", &report.usage.qr_generated),
                ("exports today", &report.usage.exports_today),
                ("templates applied", &report.usage.templates_applied),
            ];
            for (label, meter) in meters {
                println!(
                    "{label:<18} {:>6} / {:<6} {:>5.1}%",
                    meter.count, meter.limit, meter.percentage
                );
            }
            Ok(())
        }
    }
}

pub(crate) fn render_summary(
    summary: &AnalyticsSummary,
    degraded: bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({"summary": summary, "degraded": degraded})),
        OutputFormat::Table => {
            degraded_notice(degraded);
            println!("{:<8} {:>8} {:>8} {:>8}", "", "CREATES", "EXPORTS", "SCANS");
            let rows = [
                (
                    "total",
                    summary.total_creates,
                    summary.total_exports,
                    summary.total_scans,
                ),
                (
                    "week",
                    summary.creates_this_week,
                    summary.exports_this_week,
                    summary.scans_this_week,
                ),
                (
                    "month",
                    summary.creates_this_month,
                    summary.exports_this_month,
                    summary.scans_this_month,
                ),
            ];
            for (label, creates, exports, scans) in rows {
                println!("{label:<8} {creates:>8} {exports:>8} {scans:>8}");
            }
            Ok(())
        }
    }
}

pub(crate) fn render_timeseries(
    series: &TimeSeriesResponse,
    degraded: bool,
    format: OutputFormat,
) -> CliResult<()> {
    match format {
        OutputFormat::Json => print_json(&json!({"data": series.data, "degraded": degraded})),
        OutputFormat::Table => {
            degraded_notice(degraded);
            println!("{:<10} {:>8} {:>8} {:>8}", "DATE", "CREATES", "EXPORTS", "SCANS");
            for point in &series.data {
                println!(
                    "{:<10} {:>8} {:>8} {:>8}",
                    point.date.to_string(),
                    point.creates,
                    point.exports,
                    point.scans
                );
            }
            Ok(())
        }
    }
}

#[must_use]
pub(crate) const fn publication_label(published: bool) -> &'static str {
    if published { "published" } else { "draft" }
}

/// Shorten `text` to at most `width` characters, marking the cut with `...`.
#[must_use]
pub(crate) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{kept}...")
}

fn page_json<T: Serialize>(page: &ListPage<T>) -> serde_json::Value {
    json!({
        "items": page.items,
        "total": page.total,
        "page": page.page,
        "per_page": page.per_page,
        "page_count": page.page_count(),
        "degraded": page.degraded,
    })
}

fn quota_json(report: &QuotaReport) -> serde_json::Value {
    json!({
        "plan": report.plan,
        "status": report.status,
        "generations": meter_json(&report.generations),
        "exports": meter_json(&report.exports),
        "warning": report.warning.as_ref().map(ToString::to_string),
        "action": report.action.label(),
    })
}

fn meter_json(usage: &DimensionUsage) -> serde_json::Value {
    json!({
        "used": usage.used,
        "limit": usage.limit,
        "percent": usage.percent(),
        "warning": usage.is_warning(),
    })
}

fn print_pagination<T>(page: &ListPage<T>) {
    println!(
        "page {} of {} ({} total)",
        page.page,
        page.page_count(),
        page.total
    );
    if page.has_next() {
        println!("next: --page {}", page.page.saturating_add(1));
    }
}
