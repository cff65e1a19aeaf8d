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
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]

//! Session-aware client and view controllers for the QR Cloner API.
//!
//! Layout:
//! - `session.rs`, `config.rs`: who requests are issued for and where they go
//! - `transport.rs`, `error.rs`: request execution and status classification
//! - `validate.rs`: checks run before anything is sent
//! - `list.rs`, `detail.rs`, `editor.rs`, `quota.rs`: dashboard view controllers
//! - `templates.rs`, `billing.rs`, `analytics.rs`: remaining page controllers
//! - `folders.rs`: folders and tags for organising saved items
//! - `placeholder.rs`: data shown when the API is unreachable in offline mode
//!
//! No request is retried; a failure is reported once and the caller decides
//! whether to try again.

pub mod analytics;
pub mod billing;
pub mod config;
pub mod detail;
pub mod editor;
pub mod error;
pub mod folders;
pub mod list;
pub mod navigation;
pub mod placeholder;
pub mod quota;
pub mod session;
pub mod templates;
pub mod transport;
pub mod validate;

pub use analytics::{AnalyticsController, AnalyticsView};
pub use billing::{BillingClient, format_price};
pub use config::{ClientConfig, ConfigError, OfflineMode};
pub use detail::{DetailState, ItemDetailController};
pub use editor::{EditorController, EditorMode, EditorState, Preview};
pub use error::ApiError;
pub use folders::LibraryOrganizer;
pub use list::{
    AdminTemplates, FetchOutcome, ListPage, ListQuery, ListState, ListViewController,
    PublishedTemplates, QrItems,
};
pub use navigation::Navigation;
pub use quota::{QuotaMonitor, QuotaReport, QuotaState, SubscriptionAction};
pub use session::{GUEST_TOKEN, SessionContext};
pub use templates::{AssetUpload, TemplateAdmin, TemplateGallery};
pub use transport::{Auth, ResourceClient};
pub use validate::ValidationError;
