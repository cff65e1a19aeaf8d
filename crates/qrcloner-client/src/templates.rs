//! Template gallery (public) and template administration.

use qrcloner_api_models::{
    AssetType, CategoryCreate, Template, TemplateCategory, TemplateCategoryListResponse,
    TemplateCreate, TemplateSortKey, TemplateUpdate, UploadResponse,
};
use reqwest::Method;
use reqwest::multipart::{Form, Part};
use url::Url;

use crate::config::OfflineMode;
use crate::error::ApiError;
use crate::list::{AdminTemplates, ListQuery, ListViewController, PublishedTemplates};
use crate::navigation::Navigation;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::{ValidationError, validate_category, validate_item_id, validate_upload};

/// Prompt shown before a template is deleted.
pub const DELETE_TEMPLATE_CONFIRMATION: &str = "Are you sure you want to delete this template?";

/// Public, published-only template endpoints.
#[derive(Debug, Clone)]
pub struct TemplateGallery {
    client: ResourceClient,
    session: SessionContext,
    offline: OfflineMode,
}

impl TemplateGallery {
    /// Build a gallery for one session.
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

    /// List controller over published templates (12 per page).
    #[must_use]
    pub fn list(&self) -> ListViewController<PublishedTemplates> {
        ListViewController::new(self.client.clone(), self.session.clone(), self.offline)
    }

    /// List controller starting from `query` instead of the first page.
    #[must_use]
    pub fn list_with(
        &self,
        query: ListQuery<TemplateSortKey>,
    ) -> ListViewController<PublishedTemplates> {
        ListViewController::with_query(
            self.client.clone(),
            self.session.clone(),
            self.offline,
            query,
        )
    }

    /// All categories, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn categories(&self) -> Result<Vec<TemplateCategory>, ApiError> {
        let url = self.session.endpoint(&["templates", "categories"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Anonymous);
        let response: TemplateCategoryListResponse =
            self.client.fetch_json(request, "template categories").await?;
        Ok(response.categories)
    }

    /// One published template.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn get(&self, id: &str) -> Result<Template, ApiError> {
        let id = validate_item_id(id)?;
        let url = self.session.endpoint(&["templates", id])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Anonymous);
        self.client.fetch_json(request, "template").await
    }

    /// Navigation to the editor pre-filled from a template.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::InvalidId`] for a bad identifier.
    pub fn use_template(&self, id: &str) -> Result<Navigation, ValidationError> {
        let id = validate_item_id(id)?;
        Ok(Navigation::Editor {
            edit: None,
            template: Some(id.to_string()),
        })
    }
}

/// File to attach to a template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetUpload {
    /// Owning template.
    pub template_id: String,
    /// Role of the asset.
    pub asset_type: AssetType,
    /// File name sent with the part.
    pub file_name: String,
    /// MIME type of the file.
    pub mime_type: String,
    /// File contents.
    pub bytes: Vec<u8>,
}

impl AssetUpload {
    /// Check target, size and MIME type.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingUploadTarget`],
    /// [`ValidationError::FileTooLarge`] or
    /// [`ValidationError::UnsupportedFileType`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.template_id.trim().is_empty() || self.file_name.is_empty() {
            return Err(ValidationError::MissingUploadTarget);
        }
        let size = u64::try_from(self.bytes.len()).unwrap_or(u64::MAX);
        validate_upload(size, &self.mime_type)
    }
}

/// Administrative template endpoints (`/admin/templates`).
#[derive(Debug, Clone)]
pub struct TemplateAdmin {
    client: ResourceClient,
    session: SessionContext,
}

impl TemplateAdmin {
    /// Build an admin client for one session.
    #[must_use]
    pub const fn new(client: ResourceClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// List controller over every template (50 per page), drafts included.
    #[must_use]
    pub fn list(&self) -> ListViewController<AdminTemplates> {
        ListViewController::new(self.client.clone(), self.session.clone(), OfflineMode::Strict)
    }

    /// Admin list controller starting from `query`.
    #[must_use]
    pub fn list_with(
        &self,
        query: ListQuery<TemplateSortKey>,
    ) -> ListViewController<AdminTemplates> {
        ListViewController::with_query(
            self.client.clone(),
            self.session.clone(),
            OfflineMode::Strict,
            query,
        )
    }

    /// One template regardless of publication state.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn get(&self, id: &str) -> Result<Template, ApiError> {
        let url = self.template_url(id, None)?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        self.client.fetch_json(request, "template").await
    }

    /// Create a template.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn create(&self, body: &TemplateCreate) -> Result<Template, ApiError> {
        let url = self.session.endpoint(&["admin", "templates"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(body);
        let template: Template = self.client.fetch_json(request, "template create").await?;
        tracing::info!(id = %template.id, "template created");
        Ok(template)
    }

    /// Apply a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn update(&self, id: &str, body: &TemplateUpdate) -> Result<Template, ApiError> {
        let url = self.template_url(id, None)?;
        let request = self
            .client
            .request(&self.session, Method::PUT, url, Auth::Bearer)
            .json(body);
        self.client.fetch_json(request, "template update").await
    }

    /// Delete after `confirm` accepts [`DELETE_TEMPLATE_CONFIRMATION`].
    /// Returns `false` when declined; nothing is sent in that case.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn delete<F>(&self, id: &str, confirm: F) -> Result<bool, ApiError>
    where
        F: FnOnce(&str) -> bool + Send,
    {
        let url = self.template_url(id, None)?;
        if !confirm(DELETE_TEMPLATE_CONFIRMATION) {
            return Ok(false);
        }
        let request = self
            .client
            .request(&self.session, Method::DELETE, url, Auth::Bearer);
        self.client.fetch_empty(request, "template delete").await?;
        tracing::info!(id, "template deleted");
        Ok(true)
    }

    /// Make a template visible in the public gallery.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn publish(&self, id: &str) -> Result<Template, ApiError> {
        self.set_published(id, true).await
    }

    /// Hide a template from the public gallery.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn unpublish(&self, id: &str) -> Result<Template, ApiError> {
        self.set_published(id, false).await
    }

    /// Flip the publication flag of `template`.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn toggle_publish(&self, template: &Template) -> Result<Template, ApiError> {
        self.set_published(&template.id, !template.is_published).await
    }

    /// Create a category after checking name and slug.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad name or slug, otherwise the
    /// classified request error.
    pub async fn create_category(
        &self,
        body: &CategoryCreate,
    ) -> Result<TemplateCategory, ApiError> {
        validate_category(&body.name, &body.slug)?;
        let url = self
            .session
            .endpoint(&["admin", "templates", "categories"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(body);
        self.client.fetch_json(request, "category create").await
    }

    /// Upload an image asset for a template.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] when the upload is rejected locally,
    /// otherwise the classified request error.
    pub async fn upload(&self, upload: AssetUpload) -> Result<UploadResponse, ApiError> {
        upload.validate()?;
        let AssetUpload {
            template_id,
            asset_type,
            file_name,
            mime_type,
            bytes,
        } = upload;
        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(|_| ValidationError::UnsupportedFileType { mime: mime_type })?;
        let form = Form::new()
            .part("file", part)
            .text("template_id", template_id)
            .text("asset_type", asset_type.as_str());
        let url = self
            .session
            .endpoint(&["admin", "templates", "upload"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .multipart(form);
        let uploaded: UploadResponse = self.client.fetch_json(request, "asset upload").await?;
        tracing::info!(asset = %uploaded.id, url = %uploaded.s3_url, "asset uploaded");
        Ok(uploaded)
    }

    async fn set_published(&self, id: &str, published: bool) -> Result<Template, ApiError> {
        let action = if published { "publish" } else { "unpublish" };
        let url = self.template_url(id, Some(action))?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer);
        let template: Template = self.client.fetch_json(request, action).await?;
        tracing::info!(id, published = template.is_published, "template publication changed");
        Ok(template)
    }

    fn template_url(&self, id: &str, action: Option<&str>) -> Result<Url, ApiError> {
        let id = validate_item_id(id)?;
        let mut segments: Vec<&str> = vec!["admin", "templates", id];
        segments.extend(action);
        self.session.endpoint(&segments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::MAX_UPLOAD_BYTES;
    use httpmock::prelude::*;
    use serde_json::{Value, json};

    fn template_json(id: &str, published: bool) -> Value {
        json!({
            "id": id,
            "name": "Business Card",
            "type": "vcard",
            "payload_template": {"name": ""},
            "is_published": published,
            "created_at": "2025-10-20T00:00:00Z",
            "updated_at": "2025-10-20T00:00:00Z"
        })
    }

    fn session(server: &MockServer) -> SessionContext {
        let base = Url::parse(&server.base_url()).expect("base url");
        SessionContext::new(base, Some("admin-token".into()))
    }

    fn upload(bytes: Vec<u8>, mime: &str) -> AssetUpload {
        AssetUpload {
            template_id: "t-1".into(),
            asset_type: AssetType::Logo,
            file_name: "logo.png".into(),
            mime_type: mime.into(),
            bytes,
        }
    }

    #[test]
    fn use_template_opens_editor() {
        let gallery = TemplateGallery::new(
            ResourceClient::default(),
            SessionContext::guest(Url::parse("http://localhost:8000").expect("url")),
            OfflineMode::Strict,
        );
        assert_eq!(
            gallery.use_template("t-1"),
            Ok(Navigation::Editor {
                edit: None,
                template: Some("t-1".into())
            })
        );
        assert_eq!(gallery.use_template(""), Err(ValidationError::InvalidId));
    }

    #[test]
    fn upload_validation_runs_before_sending() {
        assert!(upload(vec![0; 16], "image/png").validate().is_ok());
        let oversized = usize::try_from(MAX_UPLOAD_BYTES + 1).expect("fits");
        assert!(matches!(
            upload(vec![0; oversized], "image/png").validate(),
            Err(ValidationError::FileTooLarge { .. })
        ));
        assert!(matches!(
            upload(vec![0; 16], "text/html").validate(),
            Err(ValidationError::UnsupportedFileType { .. })
        ));
        let mut missing = upload(vec![0; 16], "image/png");
        missing.template_id.clear();
        assert_eq!(missing.validate(), Err(ValidationError::MissingUploadTarget));
    }

    #[tokio::test]
    async fn toggle_chooses_endpoint_from_current_flag() {
        let server = MockServer::start_async().await;
        let unpublish = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/templates/t-1/unpublish")
                .header("authorization", "Bearer admin-token");
            then.status(200).json_body(template_json("t-1", false));
        });

        let admin = TemplateAdmin::new(ResourceClient::default(), session(&server));
        let published: Template =
            serde_json::from_value(template_json("t-1", true)).expect("template");
        let updated = admin.toggle_publish(&published).await.expect("toggle");
        unpublish.assert();
        assert!(!updated.is_published);
    }

    #[tokio::test]
    async fn invalid_category_slug_is_rejected_locally() {
        let server = MockServer::start_async().await;
        let admin = TemplateAdmin::new(ResourceClient::default(), session(&server));
        let err = admin
            .create_category(&CategoryCreate {
                name: "Business".into(),
                slug: "Business Cards".into(),
                description: None,
            })
            .await
            .expect_err("slug");
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::InvalidSlug { .. })
        ));
    }

    #[tokio::test]
    async fn upload_sends_multipart_form() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/admin/templates/upload")
                .header("authorization", "Bearer admin-token");
            then.status(201).json_body(json!({
                "id": "asset-1",
                "s3_url": "http://minio:9000/qr-assets/templates/t-1/logo.png",
                "file_name": "logo.png"
            }));
        });

        let admin = TemplateAdmin::new(ResourceClient::default(), session(&server));
        let uploaded = admin
            .upload(upload(b"\x89PNG".to_vec(), "image/png"))
            .await
            .expect("upload");
        mock.assert();
        assert_eq!(uploaded.file_name, "logo.png");
        assert!(uploaded.s3_url.ends_with("logo.png"));
    }

    #[tokio::test]
    async fn declined_template_delete_sends_nothing() {
        let server = MockServer::start_async().await;
        let admin = TemplateAdmin::new(ResourceClient::default(), session(&server));
        assert!(!admin.delete("t-1", |_| false).await.expect("declined"));
    }

    #[tokio::test]
    async fn gallery_categories_decode() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/templates/categories");
            then.status(200).json_body(json!({
                "categories": [{
                    "id": "c-1",
                    "name": "Business",
                    "slug": "business",
                    "created_at": "2025-10-20T00:00:00Z"
                }]
            }));
        });

        let gallery = TemplateGallery::new(
            ResourceClient::default(),
            session(&server),
            OfflineMode::Strict,
        );
        let categories = gallery.categories().await.expect("categories");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].slug, "business");
    }

    #[tokio::test]
    async fn admin_list_with_filters_drafts() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/admin/templates")
                .query_param("per_page", "50")
                .query_param("is_published", "false");
            then.status(200).json_body(json!({
                "templates": [template_json("t-2", false)],
                "total": 1
            }));
        });

        let admin = TemplateAdmin::new(ResourceClient::default(), session(&server));
        let mut query = ListQuery::new(crate::list::ADMIN_TEMPLATES_PAGE_SIZE);
        query.published = Some(false);
        let list = admin.list_with(query);
        list.refresh().await;
        mock.assert();
        match list.state() {
            crate::list::ListState::Ready(page) => {
                assert_eq!(page.items.len(), 1);
                assert!(!page.items[0].is_published);
            }
            other => panic!("unexpected state: {other:?}"),
        }
    }
}
