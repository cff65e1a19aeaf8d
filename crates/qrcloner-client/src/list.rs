//! Paginated, sortable, searchable list views.
//!
//! # Design
//! - Every effective parameter change issues exactly one full re-fetch; nothing
//!   is cached across queries.
//! - Changing search, sort or any filter resets to page 1.
//! - Each fetch takes a sequence number; a response that is no longer the
//!   newest issued is discarded (last request wins).
//! - Placeholder data replaces a network failure only in offline mode and only
//!   for resources that define one.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

use qrcloner_api_models::{
    QrItem, QrItemListResponse, QrSortKey, SortOrder, Template, TemplateListResponse,
    TemplateSortKey,
};
use reqwest::Method;
use serde::de::DeserializeOwned;
use url::Url;
use url::form_urlencoded::{Serializer, Target};

use crate::config::OfflineMode;
use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::placeholder;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::ValidationError;

/// Page size for the saved item list.
pub const QR_ITEMS_PAGE_SIZE: u32 = 20;
/// Page size for the public template gallery.
pub const TEMPLATES_PAGE_SIZE: u32 = 12;
/// Page size for the admin template table.
pub const ADMIN_TEMPLATES_PAGE_SIZE: u32 = 50;

/// Sort key accepted by a list endpoint.
pub trait SortKey: Copy + Debug + Default + PartialEq + Send + Sync + 'static {
    /// Wire label sent as `sort_by`.
    fn label(self) -> &'static str;
}

impl SortKey for QrSortKey {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

impl SortKey for TemplateSortKey {
    fn label(self) -> &'static str {
        self.as_str()
    }
}

/// Parameters of one list request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery<K> {
    /// 1-based page number.
    pub page: u32,
    /// Items per page.
    pub per_page: u32,
    /// Sort key.
    pub sort_by: K,
    /// Sort direction.
    pub sort_order: SortOrder,
    /// Free-text search, omitted when absent.
    pub search: Option<String>,
    /// Category filter, omitted when absent.
    pub category_id: Option<String>,
    /// Publication filter for admin listings, omitted when absent.
    pub published: Option<bool>,
    /// Template tag filter, omitted when absent.
    pub tag: Option<String>,
    /// Folder filter for QR items, omitted when absent.
    pub folder_id: Option<String>,
    /// Tag identifier filter for QR items, omitted when absent.
    pub tag_id: Option<String>,
    /// List soft-deleted QR items instead of active ones; sent only when set.
    pub deleted: bool,
}

impl<K: SortKey> ListQuery<K> {
    /// First page, default sort (`created_at desc`), no filters.
    #[must_use]
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page,
            sort_by: K::default(),
            sort_order: SortOrder::default(),
            search: None,
            category_id: None,
            published: None,
            tag: None,
            folder_id: None,
            tag_id: None,
            deleted: false,
        }
    }

    /// Append the query parameters to `url` in their canonical order.
    pub fn apply_to(&self, url: &mut Url) {
        self.append_pairs(&mut url.query_pairs_mut());
    }

    /// Encoded query string, without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        let mut pairs = Serializer::new(String::new());
        self.append_pairs(&mut pairs);
        pairs.finish()
    }

    fn append_pairs<T: Target>(&self, pairs: &mut Serializer<'_, T>) {
        pairs
            .append_pair("page", &self.page.to_string())
            .append_pair("per_page", &self.per_page.to_string())
            .append_pair("sort_by", self.sort_by.label())
            .append_pair("sort_order", self.sort_order.as_str());
        if let Some(search) = &self.search {
            pairs.append_pair("search", search);
        }
        if let Some(category) = &self.category_id {
            pairs.append_pair("category_id", category);
        }
        if let Some(published) = self.published {
            pairs.append_pair("is_published", if published { "true" } else { "false" });
        }
        if let Some(tag) = &self.tag {
            pairs.append_pair("tag", tag);
        }
        if let Some(folder) = &self.folder_id {
            pairs.append_pair("folder_id", folder);
        }
        if let Some(tag_id) = &self.tag_id {
            pairs.append_pair("tag_id", tag_id);
        }
        if self.deleted {
            pairs.append_pair("deleted", "true");
        }
    }
}

/// An endpoint the list controller can page through.
pub trait ListResource: Debug + Send + Sync + 'static {
    /// Row type.
    type Item: Clone + Debug + Send + Sync;
    /// Sort key type.
    type Key: SortKey;
    /// Decoded response body.
    type Response: DeserializeOwned + Send;

    /// Path segments below the API base.
    const PATH: &'static [&'static str];
    /// Default page size.
    const PAGE_SIZE: u32;
    /// Resource name used in logs and error messages.
    const LABEL: &'static str;
    /// Whether requests carry the bearer token.
    const AUTH: Auth;

    /// Split a response into its rows and the total match count.
    fn into_page(response: Self::Response) -> (Vec<Self::Item>, u64);

    /// Data shown on network failure in offline mode, if any.
    fn placeholder() -> Option<Self::Response>;
}

/// Saved QR items (`/library/qr-items`).
#[derive(Debug)]
pub struct QrItems;

impl ListResource for QrItems {
    type Item = QrItem;
    type Key = QrSortKey;
    type Response = QrItemListResponse;

    const PATH: &'static [&'static str] = &["library", "qr-items"];
    const PAGE_SIZE: u32 = QR_ITEMS_PAGE_SIZE;
    const LABEL: &'static str = "QR codes";
    const AUTH: Auth = Auth::Bearer;

    fn into_page(response: Self::Response) -> (Vec<Self::Item>, u64) {
        (response.items, response.total)
    }

    fn placeholder() -> Option<Self::Response> {
        Some(placeholder::qr_items())
    }
}

/// Published templates (`/templates`).
#[derive(Debug)]
pub struct PublishedTemplates;

impl ListResource for PublishedTemplates {
    type Item = Template;
    type Key = TemplateSortKey;
    type Response = TemplateListResponse;

    const PATH: &'static [&'static str] = &["templates"];
    const PAGE_SIZE: u32 = TEMPLATES_PAGE_SIZE;
    const LABEL: &'static str = "templates";
    const AUTH: Auth = Auth::Bearer;

    fn into_page(response: Self::Response) -> (Vec<Self::Item>, u64) {
        (response.templates, response.total)
    }

    fn placeholder() -> Option<Self::Response> {
        Some(placeholder::templates())
    }
}

/// Every template including drafts (`/admin/templates`).
#[derive(Debug)]
pub struct AdminTemplates;

impl ListResource for AdminTemplates {
    type Item = Template;
    type Key = TemplateSortKey;
    type Response = TemplateListResponse;

    const PATH: &'static [&'static str] = &["admin", "templates"];
    const PAGE_SIZE: u32 = ADMIN_TEMPLATES_PAGE_SIZE;
    const LABEL: &'static str = "admin templates";
    const AUTH: Auth = Auth::Bearer;

    fn into_page(response: Self::Response) -> (Vec<Self::Item>, u64) {
        (response.templates, response.total)
    }

    fn placeholder() -> Option<Self::Response> {
        None
    }
}

/// One page of rows.
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<T> {
    /// Rows on the page.
    pub items: Vec<T>,
    /// Total rows matching the query.
    pub total: u64,
    /// Page number the rows belong to.
    pub page: u32,
    /// Page size used for the request.
    pub per_page: u32,
    /// Set when the rows are placeholder data.
    pub degraded: bool,
}

impl<T> ListPage<T> {
    /// Number of pages needed for `total` rows; at least one.
    #[must_use]
    pub fn page_count(&self) -> u64 {
        self.total.div_ceil(u64::from(self.per_page.max(1))).max(1)
    }

    /// Whether a later page exists.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.page_count()
    }
}

/// Render state of a list view.
#[derive(Debug, Clone, PartialEq)]
pub enum ListState<T> {
    /// Nothing requested yet.
    Idle,
    /// A request is in flight.
    Loading,
    /// Rows are available.
    Ready(ListPage<T>),
    /// The API requires a login; no automatic retry.
    Unauthenticated,
    /// The request failed.
    Failed(String),
}

impl<T> ListState<T> {
    /// Navigation offered by the state (login when unauthenticated).
    #[must_use]
    pub const fn navigation(&self) -> Option<Navigation> {
        match self {
            Self::Unauthenticated => Some(Navigation::Login),
            _ => None,
        }
    }
}

/// What happened to a fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    /// The response was applied to the view state.
    Applied,
    /// A newer request was issued meanwhile; the response was discarded.
    Superseded,
    /// The parameters did not change; nothing was requested.
    Unchanged,
}

/// Controller owning the query and render state of one list view.
#[derive(Debug)]
pub struct ListViewController<R: ListResource> {
    client: ResourceClient,
    session: SessionContext,
    offline: OfflineMode,
    query: Mutex<ListQuery<R::Key>>,
    state: Mutex<ListState<R::Item>>,
    issued: AtomicU64,
    resource: PhantomData<R>,
}

impl<R: ListResource> ListViewController<R> {
    /// Controller starting at page 1 with default sort.
    #[must_use]
    pub fn new(client: ResourceClient, session: SessionContext, offline: OfflineMode) -> Self {
        Self::with_query(client, session, offline, ListQuery::new(R::PAGE_SIZE))
    }

    /// Controller starting from an explicit query.
    #[must_use]
    pub const fn with_query(
        client: ResourceClient,
        session: SessionContext,
        offline: OfflineMode,
        query: ListQuery<R::Key>,
    ) -> Self {
        Self {
            client,
            session,
            offline,
            query: Mutex::new(query),
            state: Mutex::new(ListState::Idle),
            issued: AtomicU64::new(0),
            resource: PhantomData,
        }
    }

    /// Snapshot of the current query.
    #[must_use]
    pub fn query(&self) -> ListQuery<R::Key> {
        self.query
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Snapshot of the current render state.
    #[must_use]
    pub fn state(&self) -> ListState<R::Item> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Re-fetch the current query.
    pub async fn refresh(&self) -> FetchOutcome {
        let sequence = self.issued.fetch_add(1, Ordering::SeqCst) + 1;
        let query = self.query();
        self.replace_state(ListState::Loading);
        tracing::debug!(
            resource = R::LABEL,
            sequence,
            page = query.page,
            "fetching list page"
        );

        let next = match self.fetch(&query).await {
            Ok(response) => ready::<R>(response, &query, false),
            Err(ApiError::Unauthenticated) => ListState::Unauthenticated,
            Err(err) if err.is_network() && self.offline.allows_placeholder() => {
                match R::placeholder() {
                    Some(response) => {
                        tracing::warn!(
                            resource = R::LABEL,
                            error = %err,
                            "API unreachable; showing placeholder data"
                        );
                        ready::<R>(response, &query, true)
                    }
                    None => failed::<R>(&err),
                }
            }
            Err(err) => failed::<R>(&err),
        };

        let applied = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let newest = self.issued.load(Ordering::SeqCst) == sequence;
            if newest {
                *state = next;
            }
            newest
        };
        if !applied {
            tracing::warn!(
                resource = R::LABEL,
                sequence,
                "discarding superseded list response"
            );
            return FetchOutcome::Superseded;
        }
        FetchOutcome::Applied
    }

    /// Move to `page`.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidPage`] for page 0.
    pub async fn set_page(&self, page: u32) -> Result<FetchOutcome, ValidationError> {
        if page == 0 {
            return Err(ValidationError::InvalidPage);
        }
        Ok(self.update(|query| query.page = page).await)
    }

    /// Change sort key and direction; resets to page 1.
    pub async fn set_sort(&self, sort_by: R::Key, sort_order: SortOrder) -> FetchOutcome {
        self.update(|query| {
            if query.sort_by != sort_by || query.sort_order != sort_order {
                query.sort_by = sort_by;
                query.sort_order = sort_order;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the search text; blank text clears it. Resets to page 1.
    pub async fn set_search(&self, search: Option<String>) -> FetchOutcome {
        let search = search.filter(|text| !text.trim().is_empty());
        self.update(|query| {
            if query.search != search {
                query.search = search;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the category filter. Resets to page 1.
    pub async fn set_category(&self, category_id: Option<String>) -> FetchOutcome {
        self.update(|query| {
            if query.category_id != category_id {
                query.category_id = category_id;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the publication filter. Resets to page 1.
    pub async fn set_published(&self, published: Option<bool>) -> FetchOutcome {
        self.update(|query| {
            if query.published != published {
                query.published = published;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the template tag filter. Resets to page 1.
    pub async fn set_tag(&self, tag: Option<String>) -> FetchOutcome {
        self.update(|query| {
            if query.tag != tag {
                query.tag = tag;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the folder filter. Resets to page 1.
    pub async fn set_folder(&self, folder_id: Option<String>) -> FetchOutcome {
        self.update(|query| {
            if query.folder_id != folder_id {
                query.folder_id = folder_id;
                query.page = 1;
            }
        })
        .await
    }

    /// Change the item tag filter. Resets to page 1.
    pub async fn set_tag_id(&self, tag_id: Option<String>) -> FetchOutcome {
        self.update(|query| {
            if query.tag_id != tag_id {
                query.tag_id = tag_id;
                query.page = 1;
            }
        })
        .await
    }

    /// Switch between active and soft-deleted items. Resets to page 1.
    pub async fn set_deleted(&self, deleted: bool) -> FetchOutcome {
        self.update(|query| {
            if query.deleted != deleted {
                query.deleted = deleted;
                query.page = 1;
            }
        })
        .await
    }

    async fn update<F>(&self, change: F) -> FetchOutcome
    where
        F: FnOnce(&mut ListQuery<R::Key>) + Send,
    {
        let changed = {
            let mut query = self.query.lock().unwrap_or_else(PoisonError::into_inner);
            let before = query.clone();
            change(&mut query);
            *query != before
        };
        if !changed {
            return FetchOutcome::Unchanged;
        }
        self.refresh().await
    }

    async fn fetch(&self, query: &ListQuery<R::Key>) -> Result<R::Response, ApiError> {
        let mut url = self.session.endpoint(R::PATH)?;
        query.apply_to(&mut url);
        let request = self
            .client
            .request(&self.session, Method::GET, url, R::AUTH);
        self.client.fetch_json(request, R::LABEL).await
    }

    fn replace_state(&self, next: ListState<R::Item>) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = next;
    }
}

fn ready<R: ListResource>(
    response: R::Response,
    query: &ListQuery<R::Key>,
    degraded: bool,
) -> ListState<R::Item> {
    let (items, total) = R::into_page(response);
    ListState::Ready(ListPage {
        items,
        total,
        page: query.page,
        per_page: query.per_page,
        degraded,
    })
}

fn failed<R: ListResource>(err: &ApiError) -> ListState<R::Item> {
    ListState::Failed(format!("Failed to load {}: {}", R::LABEL, err.display_message()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use httpmock::prelude::*;
    use serde_json::{Value, json};
    use std::time::Duration;

    fn item_json(id: &str, name: &str) -> Value {
        json!({
            "id": id,
            "name": name,
            "type": "url",
            "payload": {"url": "https://example.com"},
            "options": {},
            "created_at": "2025-10-20T00:00:00Z",
            "updated_at": "2025-10-20T00:00:00Z"
        })
    }

    fn controller(server: &MockServer, offline: OfflineMode) -> ListViewController<QrItems> {
        let base = Url::parse(&server.base_url()).expect("base url");
        ListViewController::new(
            ResourceClient::default(),
            SessionContext::new(base, Some("tok".into())),
            offline,
        )
    }

    fn ready_names(state: &ListState<QrItem>) -> Vec<String> {
        match state {
            ListState::Ready(page) => page.items.iter().map(|item| item.name.clone()).collect(),
            other => panic!("expected ready state, got {other:?}"),
        }
    }

    #[test]
    fn query_string_follows_canonical_order() {
        let mut query = ListQuery::<QrSortKey>::new(QR_ITEMS_PAGE_SIZE);
        query.page = 2;
        query.sort_by = QrSortKey::Name;
        query.sort_order = SortOrder::Asc;
        query.search = Some("business".into());
        assert_eq!(
            query.to_query_string(),
            "page=2&per_page=20&sort_by=name&sort_order=asc&search=business"
        );

        let mut templates = ListQuery::<TemplateSortKey>::new(TEMPLATES_PAGE_SIZE);
        templates.category_id = Some("cat 1".into());
        assert_eq!(
            templates.to_query_string(),
            "page=1&per_page=12&sort_by=created_at&sort_order=desc&category_id=cat+1"
        );
    }

    #[test]
    fn item_filters_follow_search() {
        let mut query = ListQuery::<QrSortKey>::new(QR_ITEMS_PAGE_SIZE);
        query.search = Some("menu".into());
        query.folder_id = Some("f-1".into());
        query.tag_id = Some("t-9".into());
        query.deleted = true;
        assert_eq!(
            query.to_query_string(),
            "page=1&per_page=20&sort_by=created_at&sort_order=desc&search=menu\
             &folder_id=f-1&tag_id=t-9&deleted=true"
        );

        query.deleted = false;
        query.folder_id = None;
        query.tag_id = None;
        assert!(!query.to_query_string().contains("deleted"));

        let mut templates = ListQuery::<TemplateSortKey>::new(TEMPLATES_PAGE_SIZE);
        templates.tag = Some("wifi".into());
        assert!(templates.to_query_string().ends_with("&tag=wifi"));
    }

    #[test]
    fn page_count_rounds_up() {
        let page = ListPage::<()> {
            items: Vec::new(),
            total: 41,
            page: 2,
            per_page: 20,
            degraded: false,
        };
        assert_eq!(page.page_count(), 3);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn page_change_issues_one_request_with_exact_query() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .header("authorization", "Bearer tok")
                .query_param("page", "2")
                .query_param("per_page", "20")
                .query_param("sort_by", "created_at")
                .query_param("sort_order", "desc");
            then.status(200).json_body(json!({
                "items": [item_json("21", "Menu")],
                "total": 21
            }));
        });

        let list = controller(&server, OfflineMode::Strict);
        assert_eq!(list.set_page(2).await, Ok(FetchOutcome::Applied));
        assert_eq!(list.set_page(2).await, Ok(FetchOutcome::Unchanged));
        mock.assert();
        assert_eq!(ready_names(&list.state()), ["Menu"]);
        assert_eq!(list.set_page(0).await, Err(ValidationError::InvalidPage));
    }

    #[tokio::test]
    async fn search_change_resets_to_first_page() {
        let server = MockServer::start_async().await;
        let page_three = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "3");
            then.status(200).json_body(json!({"items": [], "total": 60}));
        });
        let search = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "1")
                .query_param("search", "business");
            then.status(200)
                .json_body(json!({"items": [item_json("1", "Business Card")], "total": 1}));
        });

        let list = controller(&server, OfflineMode::Strict);
        list.set_page(3).await.expect("valid page");
        assert_eq!(
            list.set_search(Some("business".into())).await,
            FetchOutcome::Applied
        );
        page_three.assert();
        search.assert();
        assert_eq!(list.query().page, 1);
        assert_eq!(ready_names(&list.state()), ["Business Card"]);
    }

    #[tokio::test]
    async fn trash_view_lists_deleted_items_from_first_page() {
        let server = MockServer::start_async().await;
        let page_two = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "2");
            then.status(200).json_body(json!({"items": [], "total": 40}));
        });
        let trash = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "1")
                .query_param("deleted", "true");
            then.status(200)
                .json_body(json!({"items": [item_json("gone-1", "Old Flyer")], "total": 1}));
        });

        let list = controller(&server, OfflineMode::Strict);
        list.set_page(2).await.expect("valid page");
        assert_eq!(list.set_deleted(true).await, FetchOutcome::Applied);
        assert_eq!(list.set_deleted(true).await, FetchOutcome::Unchanged);
        page_two.assert();
        trash.assert();
        assert_eq!(list.query().page, 1);
        assert_eq!(ready_names(&list.state()), ["Old Flyer"]);
    }

    #[tokio::test]
    async fn folder_filter_is_sent_as_query_parameter() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("folder_id", "f-1")
                .query_param_missing("deleted");
            then.status(200)
                .json_body(json!({"items": [item_json("1", "Menu")], "total": 1}));
        });

        let list = controller(&server, OfflineMode::Strict);
        assert_eq!(list.set_folder(Some("f-1".into())).await, FetchOutcome::Applied);
        mock.assert();
    }

    #[tokio::test]
    async fn unauthorized_offers_login() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/library/qr-items");
            then.status(401).json_body(json!({"detail": "Not authenticated"}));
        });

        let list = controller(&server, OfflineMode::Placeholder);
        list.refresh().await;
        let state = list.state();
        assert_eq!(state, ListState::Unauthenticated);
        assert_eq!(state.navigation(), Some(Navigation::Login));
    }

    #[tokio::test]
    async fn server_errors_never_fall_back_to_placeholders() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/library/qr-items");
            then.status(500).json_body(json!({"detail": "boom"}));
        });

        let list = controller(&server, OfflineMode::Placeholder);
        list.refresh().await;
        assert!(matches!(list.state(), ListState::Failed(message) if message.contains("boom")));
    }

    #[tokio::test]
    async fn network_failure_uses_placeholders_only_in_offline_mode() {
        let base = Url::parse("http://127.0.0.1:9").expect("base url");
        let offline = ListViewController::<QrItems>::new(
            ResourceClient::default(),
            SessionContext::guest(base.clone()),
            OfflineMode::Placeholder,
        );
        assert_eq!(offline.refresh().await, FetchOutcome::Applied);
        match offline.state() {
            ListState::Ready(page) => {
                assert_eq!(page.items.len(), 3);
                assert_eq!(page.total, 3);
                assert!(page.degraded);
            }
            other => panic!("expected placeholder page, got {other:?}"),
        }

        let strict = ListViewController::<QrItems>::new(
            ResourceClient::default(),
            SessionContext::guest(base),
            OfflineMode::Strict,
        );
        strict.refresh().await;
        assert!(matches!(strict.state(), ListState::Failed(_)));
    }

    #[tokio::test]
    async fn stale_response_is_discarded() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "2");
            then.status(200)
                .delay(Duration::from_millis(400))
                .json_body(json!({"items": [item_json("slow", "Slow")], "total": 60}));
        });
        server.mock(|when, then| {
            when.method(GET)
                .path("/library/qr-items")
                .query_param("page", "3");
            then.status(200)
                .json_body(json!({"items": [item_json("fast", "Fast")], "total": 60}));
        });

        let list = controller(&server, OfflineMode::Strict);
        let (slow, fast) = tokio::join!(list.set_page(2), async {
            tokio::time::sleep(Duration::from_millis(50)).await;
            list.set_page(3).await
        });
        assert_eq!(slow, Ok(FetchOutcome::Superseded));
        assert_eq!(fast, Ok(FetchOutcome::Applied));
        assert_eq!(ready_names(&list.state()), ["Fast"]);
    }

    #[tokio::test]
    async fn admin_listing_sends_publication_filter() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/templates")
                .query_param("per_page", "50")
                .query_param("is_published", "false");
            then.status(200).json_body(json!({"templates": [], "total": 0}));
        });

        let base = Url::parse(&server.base_url()).expect("base url");
        let admin = ListViewController::<AdminTemplates>::new(
            ResourceClient::default(),
            SessionContext::guest(base),
            OfflineMode::Placeholder,
        );
        assert_eq!(admin.set_published(Some(false)).await, FetchOutcome::Applied);
        mock.assert();
    }
}
