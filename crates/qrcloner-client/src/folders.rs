//! Folders and tags used to organise saved QR items.

use qrcloner_api_models::{
    Folder, FolderCreate, FolderListResponse, Tag, TagCreate, TagListResponse,
};
use reqwest::Method;

use crate::error::ApiError;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::{DEFAULT_TAG_COLOR, validate_folder_name, validate_item_id, validate_tag};

/// Folder and tag endpoints under `/library`.
#[derive(Debug, Clone)]
pub struct LibraryOrganizer {
    client: ResourceClient,
    session: SessionContext,
}

impl LibraryOrganizer {
    /// Build an organizer for one session.
    #[must_use]
    pub const fn new(client: ResourceClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// Folders owned by the caller, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn folders(&self) -> Result<Vec<Folder>, ApiError> {
        let url = self.session.endpoint(&["library", "folders"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        let response: FolderListResponse = self.client.fetch_json(request, "folders").await?;
        Ok(response.folders)
    }

    /// Create a folder, optionally nested under `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad name or parent identifier
    /// (nothing is sent), otherwise the classified request error. A duplicate
    /// name comes back as [`ApiError::Rejected`].
    pub async fn create_folder(
        &self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Folder, ApiError> {
        let name = validate_folder_name(name)?;
        let parent_id = parent_id.map(validate_item_id).transpose()?;
        let body = FolderCreate {
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        let url = self.session.endpoint(&["library", "folders"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(&body);
        let folder: Folder = self.client.fetch_json(request, "folder create").await?;
        tracing::info!(id = %folder.id, "folder created");
        Ok(folder)
    }

    /// Tags owned by the caller, sorted by name.
    ///
    /// # Errors
    ///
    /// Returns the classified request error.
    pub async fn tags(&self) -> Result<Vec<Tag>, ApiError> {
        let url = self.session.endpoint(&["library", "tags"])?;
        let request = self
            .client
            .request(&self.session, Method::GET, url, Auth::Bearer);
        let response: TagListResponse = self.client.fetch_json(request, "tags").await?;
        Ok(response.tags)
    }

    /// Create a tag; the colour defaults to [`DEFAULT_TAG_COLOR`].
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad name or colour (nothing is
    /// sent), otherwise the classified request error.
    pub async fn create_tag(&self, name: &str, color: Option<&str>) -> Result<Tag, ApiError> {
        let color = color.unwrap_or(DEFAULT_TAG_COLOR);
        let name = validate_tag(name, color)?;
        let body = TagCreate {
            name: name.to_string(),
            color: color.to_string(),
        };
        let url = self.session.endpoint(&["library", "tags"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(&body);
        let tag: Tag = self.client.fetch_json(request, "tag create").await?;
        tracing::info!(id = %tag.id, "tag created");
        Ok(tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::ValidationError;
    use httpmock::prelude::*;
    use serde_json::json;
    use url::Url;

    fn organizer(server: &MockServer) -> LibraryOrganizer {
        let base = Url::parse(&server.base_url()).expect("base url");
        LibraryOrganizer::new(
            ResourceClient::default(),
            SessionContext::new(base, Some("tok".into())),
        )
    }

    #[tokio::test]
    async fn folders_are_listed_with_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(GET)
                .path("/library/folders")
                .header("authorization", "Bearer tok");
            then.status(200).json_body(json!({
                "folders": [{
                    "id": "f1",
                    "name": "Clients",
                    "created_at": "2025-10-20T00:00:00Z",
                    "updated_at": "2025-10-20T00:00:00Z"
                }]
            }));
        });

        let folders = organizer(&server).folders().await.expect("folders");
        mock.assert();
        assert_eq!(folders.len(), 1);
        assert_eq!(folders[0].name, "Clients");
    }

    #[tokio::test]
    async fn nested_folder_create_sends_parent() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/library/folders")
                .json_body(json!({"name": "Acme", "parent_id": "f1"}));
            then.status(201).json_body(json!({
                "id": "f2",
                "name": "Acme",
                "parent_id": "f1",
                "created_at": "2025-10-20T00:00:00Z",
                "updated_at": "2025-10-20T00:00:00Z"
            }));
        });

        let folder = organizer(&server)
            .create_folder(" Acme ", Some("f1"))
            .await
            .expect("create folder");
        mock.assert();
        assert_eq!(folder.parent_id.as_deref(), Some("f1"));
    }

    #[tokio::test]
    async fn duplicate_folder_name_is_rejected() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST).path("/library/folders");
            then.status(400)
                .json_body(json!({"detail": "Folder with this name already exists"}));
        });

        let err = organizer(&server)
            .create_folder("Clients", None)
            .await
            .expect_err("duplicate");
        assert!(matches!(
            err,
            ApiError::Rejected { status: 400, ref detail }
                if detail == "Folder with this name already exists"
        ));
    }

    #[tokio::test]
    async fn tag_create_defaults_colour() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/library/tags")
                .json_body(json!({"name": "work", "color": "#0070f3"}));
            then.status(201).json_body(json!({
                "id": "t1",
                "name": "work",
                "color": "#0070f3",
                "created_at": "2025-10-20T00:00:00Z"
            }));
        });

        let tag = organizer(&server)
            .create_tag("work", None)
            .await
            .expect("create tag");
        mock.assert();
        assert_eq!(tag.id, "t1");
    }

    #[tokio::test]
    async fn invalid_tag_colour_never_issues_a_request() {
        let server = MockServer::start_async().await;
        let mock = server.mock(|when, then| {
            when.method(POST).path("/library/tags");
            then.status(201);
        });

        let err = organizer(&server)
            .create_tag("work", Some("blue"))
            .await
            .expect_err("bad colour");
        assert!(matches!(
            err,
            ApiError::Validation(ValidationError::InvalidTagColor { .. })
        ));
        mock.assert_calls(0);
    }

    #[tokio::test]
    async fn tags_list_decodes() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(GET).path("/library/tags");
            then.status(200).json_body(json!({
                "tags": [{
                    "id": "t1",
                    "name": "work",
                    "color": "#0070f3",
                    "created_at": "2025-10-20T00:00:00Z"
                }]
            }));
        });

        let tags = organizer(&server).tags().await.expect("tags");
        assert_eq!(tags[0].color, "#0070f3");
    }
}
