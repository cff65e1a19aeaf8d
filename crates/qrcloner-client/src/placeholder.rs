//! Fixed data shown when the API is unreachable and offline mode is enabled.

use chrono::{DateTime, NaiveDate, Utc};
use qrcloner_api_models::{
    AnalyticsSummary, JsonObject, QrItem, QrItemListResponse, QrItemType, Template,
    TemplateListResponse, TimeSeriesPoint, TimeSeriesResponse,
};
use serde_json::{Value, json};

/// Saved items shown on the dashboard when offline.
#[must_use]
pub fn qr_items() -> QrItemListResponse {
    let items = vec![
        sample_item(
            "1",
            "Company Website",
            QrItemType::Url,
            json!({"url": "https://example.com"}),
            1_760_918_400,
        ),
        sample_item(
            "2",
            "Business Card",
            QrItemType::Vcard,
            json!({"name": "Jane Doe", "email": "jane@example.com"}),
            1_760_745_600,
        ),
        sample_item(
            "3",
            "Product Page",
            QrItemType::Url,
            json!({"url": "https://example.com/product"}),
            1_760_486_400,
        ),
    ];
    QrItemListResponse {
        total: u64::try_from(items.len()).unwrap_or(u64::MAX),
        items,
        page: Some(1),
        per_page: None,
    }
}

/// Detail view shown for `id` when offline.
#[must_use]
pub fn qr_item(id: &str) -> QrItem {
    let now = Utc::now();
    QrItem {
        id: id.to_string(),
        name: "Sample QR Code".to_string(),
        qr_type: QrItemType::Url,
        payload: object(json!({"url": "https://example.com"})),
        options: JsonObject::new(),
        folder_id: None,
        tags: Vec::new(),
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// Gallery presets shown when offline.
#[must_use]
pub fn templates() -> TemplateListResponse {
    let presets = [
        ("Business Card", "Professional vCard template", "business", QrItemType::Vcard),
        ("Website URL", "Simple URL QR code", "general", QrItemType::Url),
        ("Wi-Fi Access", "Network credentials", "network", QrItemType::Wifi),
        ("Event Invite", "Calendar event details", "event", QrItemType::Event),
        ("Social Media", "Link to social profiles", "social", QrItemType::Url),
        ("Product Info", "Product details and links", "business", QrItemType::Url),
    ];
    let templates: Vec<Template> = presets
        .into_iter()
        .zip(1_u32..)
        .map(|((name, description, category, qr_type), id)| Template {
            id: id.to_string(),
            name: name.to_string(),
            description: Some(description.to_string()),
            category_id: Some(category.to_string()),
            category: None,
            qr_type,
            payload_template: JsonObject::new(),
            options_template: JsonObject::new(),
            variables: JsonObject::new(),
            tags: Vec::new(),
            preview_url: None,
            is_published: true,
            assets: Vec::new(),
            created_at: DateTime::<Utc>::UNIX_EPOCH,
            updated_at: DateTime::<Utc>::UNIX_EPOCH,
        })
        .collect();
    TemplateListResponse {
        total: u64::try_from(templates.len()).unwrap_or(u64::MAX),
        templates,
        page: Some(1),
        per_page: None,
    }
}

/// Analytics headline numbers shown when offline.
#[must_use]
pub const fn analytics_summary() -> AnalyticsSummary {
    AnalyticsSummary {
        total_creates: 42,
        total_exports: 28,
        total_scans: 156,
        creates_this_week: 7,
        exports_this_week: 5,
        scans_this_week: 23,
        creates_this_month: 15,
        exports_this_month: 12,
        scans_this_month: 78,
    }
}

/// Eight days of analytics shown when offline.
#[must_use]
pub fn analytics_timeseries() -> TimeSeriesResponse {
    const POINTS: [(u32, u64, u64, u64); 8] = [
        (20, 3, 2, 8),
        (21, 5, 4, 12),
        (22, 2, 1, 5),
        (23, 4, 3, 15),
        (24, 6, 5, 20),
        (25, 3, 2, 9),
        (26, 4, 3, 14),
        (27, 7, 5, 23),
    ];
    let data = POINTS
        .into_iter()
        .filter_map(|(day, creates, exports, scans)| {
            NaiveDate::from_ymd_opt(2025, 10, day).map(|date| TimeSeriesPoint {
                date,
                creates,
                exports,
                scans,
            })
        })
        .collect();
    TimeSeriesResponse { data }
}

fn sample_item(id: &str, name: &str, qr_type: QrItemType, payload: Value, created: i64) -> QrItem {
    let created_at = DateTime::from_timestamp(created, 0).unwrap_or_default();
    QrItem {
        id: id.to_string(),
        name: name.to_string(),
        qr_type,
        payload: object(payload),
        options: JsonObject::new(),
        folder_id: None,
        tags: Vec::new(),
        deleted_at: None,
        created_at,
        updated_at: created_at,
    }
}

fn object(value: Value) -> JsonObject {
    match value {
        Value::Object(map) => map,
        _ => JsonObject::new(),
    }
}
