//! Navigation targets produced by controllers after user actions.

use url::Url;

/// Where the front end should go next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    /// Saved item list.
    Dashboard,
    /// Detail view of one item.
    ItemDetail {
        /// Item identifier.
        id: String,
    },
    /// Editor, optionally editing an item or starting from a template.
    Editor {
        /// Item being edited.
        edit: Option<String>,
        /// Template to start from.
        template: Option<String>,
    },
    /// Login page.
    Login,
    /// Hosted page outside the app (checkout, billing portal).
    External(Url),
}

impl Navigation {
    /// Resolve the target against the front-end origin.
    #[must_use]
    pub fn to_url(&self, origin: &Url) -> Url {
        let segments: Vec<&str> = match self {
            Self::External(url) => return url.clone(),
            Self::Dashboard => vec!["dashboard"],
            Self::ItemDetail { id } => vec!["dashboard", "items", id.as_str()],
            Self::Editor { .. } => vec!["editor"],
            Self::Login => vec!["login"],
        };
        let mut url = origin.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        if let Self::Editor { edit, template } = self {
            let mut pairs = url.query_pairs_mut();
            if let Some(edit) = edit {
                pairs.append_pair("edit", edit);
            }
            if let Some(template) = template {
                pairs.append_pair("template", template);
            }
        }
        if url.query() == Some("") {
            url.set_query(None);
        }
        url
    }
}
