#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
//! Shared HTTP DTOs for the QR Cloner API.
//!
//! The API server lives outside this workspace; these types describe the
//! request and response bodies the client exchanges with it so encoding stays
//! deterministic across the client library and the CLI.

use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Opaque JSON object used for QR payloads, options and template variables.
pub type JsonObject = Map<String, Value>;

/// Error body returned by the API on non-2xx responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ApiErrorBody {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Either a human-readable message or a structured validation report.
    pub detail: Option<Value>,
}

impl ApiErrorBody {
    /// Render the `detail` field as a single line of text.
    #[must_use]
    pub fn message(&self) -> Option<String> {
        match self.detail.as_ref()? {
            Value::String(text) => Some(text.clone()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}

/// Raised when a wire enum receives an unknown label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVariant {
    /// Kind of value that failed to parse (for example `qr type`).
    pub kind: &'static str,
    /// Offending input.
    pub value: String,
}

impl Display for UnknownVariant {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        write!(formatter, "unknown {} '{}'", self.kind, self.value)
    }
}

impl std::error::Error for UnknownVariant {}

/// Content kinds a QR item can encode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum QrItemType {
    /// A web address.
    #[default]
    Url,
    /// Free-form text.
    Text,
    /// Wi-Fi network credentials.
    Wifi,
    /// Contact card.
    Vcard,
    /// Calendar event.
    Event,
}

impl QrItemType {
    /// Every supported item type in display order.
    pub const ALL: [Self; 5] = [Self::Url, Self::Text, Self::Wifi, Self::Vcard, Self::Event];

    /// Wire label for the item type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Url => "url",
            Self::Text => "text",
            Self::Wifi => "wifi",
            Self::Vcard => "vcard",
            Self::Event => "event",
        }
    }
}

impl Display for QrItemType {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for QrItemType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| UnknownVariant {
                kind: "qr type",
                value: value.to_string(),
            })
    }
}

/// Sort direction accepted by list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    /// Ascending order.
    Asc,
    /// Descending order (API default).
    #[default]
    Desc,
}

impl SortOrder {
    /// Wire label for the direction.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Sort keys accepted by the QR item list endpoint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum QrSortKey {
    /// Sort by item name.
    Name,
    /// Sort by creation time (API default).
    #[default]
    CreatedAt,
    /// Sort by last update time.
    UpdatedAt,
    /// Sort by item type.
    Type,
}

impl QrSortKey {
    /// Wire label for the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
            Self::Type => "type",
        }
    }
}

/// Sort keys accepted by the template list endpoints.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum TemplateSortKey {
    /// Sort by template name.
    Name,
    /// Sort by creation time (API default).
    #[default]
    CreatedAt,
    /// Sort by last update time.
    UpdatedAt,
}

impl TemplateSortKey {
    /// Wire label for the sort key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::CreatedAt => "created_at",
            Self::UpdatedAt => "updated_at",
        }
    }
}

/// User-defined label attached to QR items.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tag {
    /// Tag identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Display colour as `#rrggbb`.
    pub color: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Tag list returned by `GET /library/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TagListResponse {
    #[serde(default)]
    /// Tags owned by the caller, sorted by name.
    pub tags: Vec<Tag>,
}

/// Body for `POST /library/tags`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TagCreate {
    /// Display name.
    pub name: String,
    /// Display colour as `#rrggbb`.
    pub color: String,
}

/// Folder used to file QR items; folders may nest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Folder {
    /// Folder identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Enclosing folder, if nested.
    pub parent_id: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Folder list returned by `GET /library/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct FolderListResponse {
    #[serde(default)]
    /// Folders owned by the caller, sorted by name.
    pub folders: Vec<Folder>,
}

/// Body for `POST /library/folders`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolderCreate {
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Enclosing folder, if nested.
    pub parent_id: Option<String>,
}

/// Saved QR code configuration owned by a user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrItem {
    /// Opaque identifier assigned by the API.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(rename = "type")]
    /// Content kind.
    pub qr_type: QrItemType,
    /// Type-dependent payload fields.
    pub payload: JsonObject,
    #[serde(default)]
    /// Rendering options (colours, error correction, etc.).
    pub options: JsonObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Folder the item is filed under.
    pub folder_id: Option<String>,
    #[serde(default)]
    /// Tags attached to the item.
    pub tags: Vec<Tag>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Soft-delete timestamp when the item sits in the trash.
    pub deleted_at: Option<DateTime<Utc>>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Page of QR items returned by `GET /library/qr-items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QrItemListResponse {
    #[serde(default)]
    /// Items on the requested page.
    pub items: Vec<QrItem>,
    #[serde(default)]
    /// Total number of items matching the query.
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page echoed by the server.
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page size echoed by the server.
    pub per_page: Option<u32>,
}

/// Body for `POST /library/qr-items`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QrItemCreate {
    /// Display name.
    pub name: String,
    #[serde(rename = "type")]
    /// Content kind.
    pub qr_type: QrItemType,
    /// Type-dependent payload fields.
    pub payload: JsonObject,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    /// Rendering options.
    pub options: JsonObject,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Folder to file the item under.
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    /// Tags to attach.
    pub tag_ids: Vec<String>,
}

/// Body for `PUT /library/qr-items/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct QrItemUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement name.
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement payload.
    pub payload: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement options.
    pub options: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement folder.
    pub folder_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement tag set.
    pub tag_ids: Option<Vec<String>>,
}

/// Body for the best-effort `POST /qr` preview endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QrPreviewRequest {
    /// Raw editor content.
    pub data: String,
    #[serde(rename = "type")]
    /// Content kind.
    pub qr_type: QrItemType,
}

/// Grouping used to organise the template gallery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateCategory {
    /// Category identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// URL-safe slug (`[a-z0-9-]+`).
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional description.
    pub description: Option<String>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Category list returned by `GET /templates/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateCategoryListResponse {
    #[serde(default)]
    /// Known categories.
    pub categories: Vec<TemplateCategory>,
}

/// Body for `POST /admin/templates/categories`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CategoryCreate {
    /// Display name.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional description.
    pub description: Option<String>,
}

/// Role an uploaded image plays for a template.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AssetType {
    /// Brand logo embedded in the code.
    #[default]
    Logo,
    /// Decorative image.
    Image,
    /// Small icon.
    Icon,
}

impl AssetType {
    /// Wire label for the asset type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::Image => "image",
            Self::Icon => "icon",
        }
    }
}

impl FromStr for AssetType {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "logo" => Ok(Self::Logo),
            "image" => Ok(Self::Image),
            "icon" => Ok(Self::Icon),
            _ => Err(UnknownVariant {
                kind: "asset type",
                value: value.to_string(),
            }),
        }
    }
}

/// Stored image associated with a template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TemplateAsset {
    /// Asset identifier.
    pub id: String,
    /// Role of the asset.
    pub asset_type: AssetType,
    /// Original file name.
    pub file_name: String,
    /// File size as reported by the server.
    pub file_size: String,
    /// MIME type of the stored object.
    pub mime_type: String,
    /// Public URL of the stored object.
    pub s3_url: String,
    /// Upload timestamp.
    pub created_at: DateTime<Utc>,
}

/// Admin-curated preset customers can apply to a new QR item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Template {
    /// Template identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional description.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Category reference.
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Embedded category, when the server expands it.
    pub category: Option<TemplateCategory>,
    #[serde(rename = "type")]
    /// Content kind produced by the template.
    pub qr_type: QrItemType,
    #[serde(default)]
    /// Payload skeleton.
    pub payload_template: JsonObject,
    #[serde(default)]
    /// Rendering options skeleton.
    pub options_template: JsonObject,
    #[serde(default)]
    /// Variables the customer fills in.
    pub variables: JsonObject,
    #[serde(default)]
    /// Free-form tags.
    pub tags: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Preview image URL.
    pub preview_url: Option<String>,
    /// Publication flag; drafts are hidden from the public gallery.
    pub is_published: bool,
    #[serde(default)]
    /// Uploaded assets.
    pub assets: Vec<TemplateAsset>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Page of templates returned by the public and admin list endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TemplateListResponse {
    #[serde(default)]
    /// Templates on the requested page.
    pub templates: Vec<Template>,
    #[serde(default)]
    /// Total number of templates matching the query.
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page echoed by the server.
    pub page: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Page size echoed by the server.
    pub per_page: Option<u32>,
}

/// Body for `POST /admin/templates`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplateCreate {
    /// Display name.
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional description.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Category reference.
    pub category_id: Option<String>,
    #[serde(rename = "type")]
    /// Content kind produced by the template.
    pub qr_type: QrItemType,
    /// Payload skeleton.
    pub payload_template: JsonObject,
    #[serde(default)]
    /// Rendering options skeleton.
    pub options_template: JsonObject,
    #[serde(default)]
    /// Variables the customer fills in.
    pub variables: JsonObject,
    #[serde(default)]
    /// Free-form tags.
    pub tags: Vec<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Preview image URL.
    pub preview_url: Option<String>,
    #[serde(default)]
    /// Publish immediately.
    pub is_published: bool,
}

/// Body for `PUT /admin/templates/{id}`; absent fields are left untouched.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct TemplateUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement name.
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement description.
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement category.
    pub category_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement payload skeleton.
    pub payload_template: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement options skeleton.
    pub options_template: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement variables.
    pub variables: Option<JsonObject>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement tags.
    pub tags: Option<Vec<Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement preview URL.
    pub preview_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Replacement publication flag.
    pub is_published: Option<bool>,
}

/// Response from `POST /admin/templates/upload`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    /// Stored asset identifier.
    pub id: String,
    /// Public URL of the stored object.
    pub s3_url: String,
    /// File name recorded for the asset.
    pub file_name: String,
}

/// Subscription tiers offered by the billing catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum PlanTier {
    /// No-cost tier.
    #[default]
    Free,
    /// Individual paid tier.
    Pro,
    /// Multi-seat paid tier.
    Team,
}

impl PlanTier {
    /// Wire label for the tier.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Free => "free",
            Self::Pro => "pro",
            Self::Team => "team",
        }
    }

    /// Whether the tier is billed through the payment provider.
    #[must_use]
    pub const fn is_paid(self) -> bool {
        !matches!(self, Self::Free)
    }
}

impl Display for PlanTier {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for PlanTier {
    type Err = UnknownVariant;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free" => Ok(Self::Free),
            "pro" => Ok(Self::Pro),
            "team" => Ok(Self::Team),
            _ => Err(UnknownVariant {
                kind: "plan",
                value: value.to_string(),
            }),
        }
    }
}

/// Quota ceilings attached to a plan.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct QuotaLimits {
    /// QR codes that may be generated per billing month.
    pub qr_month: u64,
    /// Exports allowed per day.
    pub exports_day: u64,
    /// Template applications allowed per billing month.
    pub templates_apply: u64,
}

/// Plan entry from the public billing catalog.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Plan {
    /// Tier identifier.
    pub id: PlanTier,
    /// Display name.
    pub name: String,
    /// Price in the smallest currency unit (cents).
    pub price: u64,
    /// ISO currency code.
    pub currency: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Billing interval for paid tiers.
    pub interval: Option<String>,
    /// Quota ceilings granted by the plan.
    pub quota: QuotaLimits,
    #[serde(default)]
    /// Marketing feature list.
    pub features: Vec<String>,
}

/// Catalog returned by `GET /billing/plans`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PlanCatalog {
    #[serde(default)]
    /// Available plans.
    pub plans: Vec<Plan>,
}

/// Raw usage counters for the current period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct UsageCounters {
    #[serde(default)]
    /// QR codes generated this billing month.
    pub qr_generated: u64,
    #[serde(default)]
    /// Exports performed today.
    pub exports_today: u64,
    #[serde(default)]
    /// Templates applied this billing month.
    pub templates_applied: u64,
}

/// Response from `GET /billing/subscription`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SubscriptionStatus {
    /// Current tier.
    pub plan: PlanTier,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Payment-provider status (`active`, `past_due`, ...).
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// End of the paid period.
    pub current_period_end: Option<DateTime<Utc>>,
    /// Ceilings for the current tier.
    pub quota_limits: QuotaLimits,
    #[serde(default)]
    /// Counters for the current period.
    pub usage: UsageCounters,
}

/// One metered dimension inside a [`UsageReport`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct UsageMeter {
    /// Units consumed.
    pub count: u64,
    /// Units allowed.
    pub limit: u64,
    /// Server-computed consumption, capped at 100.
    pub percentage: f64,
}

/// Per-dimension meters inside a [`UsageReport`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Default)]
pub struct UsageMeters {
    /// Monthly QR generation meter.
    pub qr_generated: UsageMeter,
    /// Daily export meter.
    pub exports_today: UsageMeter,
    /// Monthly template application meter.
    pub templates_applied: UsageMeter,
}

/// Response from `GET /billing/usage`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UsageReport {
    /// Start of the billing period (server local time).
    pub period_start: NaiveDateTime,
    /// End of the billing period (server local time).
    pub period_end: NaiveDateTime,
    /// Meters for the period.
    pub usage: UsageMeters,
}

/// Body for `POST /billing/checkout`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckoutRequest {
    /// Tier to subscribe to.
    pub plan_id: PlanTier,
    /// Where the provider sends the browser after payment.
    pub success_url: String,
    /// Where the provider sends the browser on abandonment.
    pub cancel_url: String,
}

/// Body for `POST /billing/portal`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PortalRequest {
    /// Where the portal sends the browser when the customer is done.
    pub return_url: String,
}

/// Redirect returned by the checkout and portal endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct RedirectResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Provider session identifier.
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Hosted page to redirect the browser to.
    pub url: Option<String>,
}

/// Aggregation bucket for analytics time series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsPeriod {
    /// One point per day.
    #[default]
    Daily,
    /// One point per week.
    Weekly,
}

impl AnalyticsPeriod {
    /// Wire label for the period.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }
}

/// Response from `GET /analytics/summary`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct AnalyticsSummary {
    /// QR codes created overall.
    pub total_creates: u64,
    /// Exports overall.
    pub total_exports: u64,
    /// Scans overall.
    pub total_scans: u64,
    /// QR codes created in the last seven days.
    pub creates_this_week: u64,
    /// Exports in the last seven days.
    pub exports_this_week: u64,
    /// Scans in the last seven days.
    pub scans_this_week: u64,
    /// QR codes created in the last thirty days.
    pub creates_this_month: u64,
    /// Exports in the last thirty days.
    pub exports_this_month: u64,
    /// Scans in the last thirty days.
    pub scans_this_month: u64,
}

/// One bucket of the analytics time series.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimeSeriesPoint {
    /// Bucket date.
    pub date: NaiveDate,
    #[serde(default)]
    /// QR codes created in the bucket.
    pub creates: u64,
    #[serde(default)]
    /// Exports in the bucket.
    pub exports: u64,
    #[serde(default)]
    /// Scans in the bucket.
    pub scans: u64,
}

/// Response from `GET /analytics/timeseries`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TimeSeriesResponse {
    #[serde(default)]
    /// Buckets in chronological order.
    pub data: Vec<TimeSeriesPoint>,
}
