//! Editor form state, preview generation and save.
//!
//! # Design
//! - Content is parsed as a JSON object; anything else is stored as
//!   `{"data": content}` and unwrapped again when an item is reopened.
//! - Reopened content is equivalent, not byte-identical: JSON objects come
//!   back pretty-printed with sorted keys, and a typed `{"data": "..."}`
//!   object comes back as its bare string. [`same_content`] compares the
//!   way the API stores it.
//! - Preview generation never fails: any error yields a placeholder preview.
//! - Save validates name and content before anything is sent.

use qrcloner_api_models::{
    JsonObject, QrItem, QrItemCreate, QrItemType, QrItemUpdate, QrPreviewRequest, Template,
};
use reqwest::Method;
use serde_json::{Value, json};
use url::Url;

use crate::error::ApiError;
use crate::navigation::Navigation;
use crate::session::SessionContext;
use crate::transport::{Auth, ResourceClient};
use crate::validate::{ValidationError, validate_item_id};

/// Key used to wrap non-JSON content.
pub const DATA_KEY: &str = "data";

/// Whether the editor creates a new item or updates an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// `POST /library/qr-items`.
    Create,
    /// `PUT /library/qr-items/{id}`.
    Edit,
}

/// Form fields of the editor.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditorState {
    /// Item name.
    pub name: String,
    /// Content kind.
    pub qr_type: QrItemType,
    /// Raw content as typed by the user.
    pub content: String,
    /// Item being edited (`edit` query parameter).
    pub edit_id: Option<String>,
    /// Template the form started from (`template` query parameter).
    pub template_id: Option<String>,
}

impl EditorState {
    /// Empty form honouring the `edit` and `template` query parameters.
    #[must_use]
    pub fn from_url(url: &Url) -> Self {
        let mut state = Self::default();
        for (key, value) in url.query_pairs() {
            match &*key {
                "edit" if !value.is_empty() => state.edit_id = Some(value.into_owned()),
                "template" if !value.is_empty() => state.template_id = Some(value.into_owned()),
                _ => {}
            }
        }
        state
    }

    /// Create or edit, depending on the edit identifier.
    #[must_use]
    pub const fn mode(&self) -> EditorMode {
        if self.edit_id.is_some() {
            EditorMode::Edit
        } else {
            EditorMode::Create
        }
    }

    /// Populate the form from a stored item.
    pub fn load_item(&mut self, item: &QrItem) {
        self.name.clone_from(&item.name);
        self.qr_type = item.qr_type;
        self.content = render_payload(&item.payload);
        self.edit_id = Some(item.id.clone());
    }

    /// Pre-fill type and content from a template; a typed name is kept.
    pub fn apply_template(&mut self, template: &Template) {
        if self.name.trim().is_empty() {
            self.name.clone_from(&template.name);
        }
        self.qr_type = template.qr_type;
        if !template.payload_template.is_empty() {
            self.content = render_payload(&template.payload_template);
        }
        self.template_id = Some(template.id.clone());
    }

    /// Check the fields required for saving.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NameRequired`] or
    /// [`ValidationError::ContentRequired`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::NameRequired);
        }
        if self.content.trim().is_empty() {
            return Err(ValidationError::ContentRequired);
        }
        Ok(())
    }
}

/// Parse editor content into a payload object.
#[must_use]
pub fn parse_content(content: &str) -> JsonObject {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => map,
        _ => {
            let mut map = JsonObject::new();
            map.insert(DATA_KEY.to_string(), Value::String(content.to_string()));
            map
        }
    }
}

/// Inverse of [`parse_content`]: unwrap `{"data": "..."}`, else pretty JSON.
#[must_use]
pub fn render_payload(payload: &JsonObject) -> String {
    if let (1, Some(Value::String(data))) = (payload.len(), payload.get(DATA_KEY)) {
        return data.clone();
    }
    serde_json::to_string_pretty(payload).unwrap_or_default()
}

/// Whether two editor contents store the same payload.
#[must_use]
pub fn same_content(left: &str, right: &str) -> bool {
    parse_content(left) == parse_content(right)
}

/// Result of a preview request.
#[derive(Debug, Clone, PartialEq)]
pub enum Preview {
    /// Body returned by `POST /qr`.
    Rendered(Value),
    /// Stand-in shown when the preview endpoint is unavailable.
    Placeholder {
        /// Content that would have been encoded.
        data: String,
        /// Content kind.
        qr_type: QrItemType,
    },
}

impl Preview {
    /// JSON shape handed to the renderer.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Self::Rendered(value) => value.clone(),
            Self::Placeholder { data, qr_type } => {
                json!({"placeholder": true, "data": data, "type": qr_type})
            }
        }
    }

    /// Whether the preview is the stand-in.
    #[must_use]
    pub const fn is_placeholder(&self) -> bool {
        matches!(self, Self::Placeholder { .. })
    }
}

/// Issues editor requests for one session.
#[derive(Debug, Clone)]
pub struct EditorController {
    client: ResourceClient,
    session: SessionContext,
}

impl EditorController {
    /// Build a controller for one session.
    #[must_use]
    pub const fn new(client: ResourceClient, session: SessionContext) -> Self {
        Self { client, session }
    }

    /// Request a preview. Blank content yields `None` without a request.
    pub async fn generate(&self, state: &EditorState) -> Option<Preview> {
        if state.content.trim().is_empty() {
            return None;
        }
        let body = QrPreviewRequest {
            data: state.content.clone(),
            qr_type: state.qr_type,
        };
        match self.request_preview(&body).await {
            Ok(value) => Some(Preview::Rendered(value)),
            Err(err) => {
                tracing::warn!(error = %err, "preview unavailable; showing placeholder");
                Some(Preview::Placeholder {
                    data: body.data,
                    qr_type: body.qr_type,
                })
            }
        }
    }

    /// Create or update the item, then return to the dashboard.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for missing fields or a bad edit
    /// identifier (nothing is sent), otherwise the classified request error.
    pub async fn save(&self, state: &EditorState) -> Result<Navigation, ApiError> {
        state.validate()?;
        let name = state.name.trim().to_string();
        let payload = parse_content(&state.content);
        let saved: QrItem = match &state.edit_id {
            None => {
                let body = QrItemCreate {
                    name,
                    qr_type: state.qr_type,
                    payload,
                    options: JsonObject::new(),
                    folder_id: None,
                    tag_ids: Vec::new(),
                };
                let url = self.session.endpoint(&["library", "qr-items"])?;
                let request = self
                    .client
                    .request(&self.session, Method::POST, url, Auth::Bearer)
                    .json(&body);
                self.client.fetch_json(request, "QR item create").await?
            }
            Some(id) => {
                let id = validate_item_id(id)?;
                let body = QrItemUpdate {
                    name: Some(name),
                    payload: Some(payload),
                    ..QrItemUpdate::default()
                };
                let url = self.session.endpoint(&["library", "qr-items", id])?;
                let request = self
                    .client
                    .request(&self.session, Method::PUT, url, Auth::Bearer)
                    .json(&body);
                self.client.fetch_json(request, "QR item update").await?
            }
        };
        tracing::info!(id = %saved.id, mode = ?state.mode(), "QR item saved");
        Ok(Navigation::Dashboard)
    }

    /// Build the form for the given `edit` / `template` parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Validation`] for a bad identifier, otherwise the
    /// classified request error.
    pub async fn open(
        &self,
        edit: Option<&str>,
        template: Option<&str>,
    ) -> Result<EditorState, ApiError> {
        let mut state = EditorState::default();
        if let Some(template_id) = template {
            let template_id = validate_item_id(template_id)?;
            let url = self.session.endpoint(&["templates", template_id])?;
            let request = self
                .client
                .request(&self.session, Method::GET, url, Auth::Bearer);
            let template: Template = self.client.fetch_json(request, "template").await?;
            state.apply_template(&template);
        }
        if let Some(id) = edit {
            let id = validate_item_id(id)?;
            let url = self.session.endpoint(&["library", "qr-items", id])?;
            let request = self
                .client
                .request(&self.session, Method::GET, url, Auth::Bearer);
            let item: QrItem = self.client.fetch_json(request, "QR item").await?;
            state.load_item(&item);
        }
        Ok(state)
    }

    async fn request_preview(&self, body: &QrPreviewRequest) -> Result<Value, ApiError> {
        let url = self.session.endpoint(&["qr"])?;
        let request = self
            .client
            .request(&self.session, Method::POST, url, Auth::Bearer)
            .json(body);
        self.client.fetch_json(request, "preview").await
    }
}
