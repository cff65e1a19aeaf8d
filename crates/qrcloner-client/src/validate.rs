//! Client-side validation applied before a request is issued.
//!
//! # Design
//! - Every check runs before any network call; a failure means nothing was sent.
//! - Limits mirror what the API enforces so the user sees the problem early.
//! - Messages are user-facing and shown verbatim.

use thiserror::Error;

/// Longest identifier accepted in a URL path segment.
pub const MAX_ID_LEN: usize = 100;

/// Largest asset upload accepted (5 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// MIME types accepted for template asset uploads.
pub const ALLOWED_UPLOAD_MIME_TYPES: [&str; 6] = [
    "image/png",
    "image/jpeg",
    "image/jpg",
    "image/gif",
    "image/svg+xml",
    "image/webp",
];

/// Longest category name accepted by the API.
pub const MAX_CATEGORY_NAME_LEN: usize = 100;

/// Longest folder name accepted by the API.
pub const MAX_FOLDER_NAME_LEN: usize = 255;

/// Longest tag name accepted by the API.
pub const MAX_TAG_NAME_LEN: usize = 50;

/// Colour given to tags created without one.
pub const DEFAULT_TAG_COLOR: &str = "#0070f3";

/// Largest analytics window, in days.
pub const MAX_ANALYTICS_DAYS: u32 = 365;

/// Validation failures detected before a request leaves the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Identifier empty or longer than [`MAX_ID_LEN`].
    #[error("Invalid ID")]
    InvalidId,
    /// Editor name missing.
    #[error("Please enter a name for your QR code")]
    NameRequired,
    /// Editor content missing.
    #[error("Please enter content for your QR code")]
    ContentRequired,
    /// Upload exceeds [`MAX_UPLOAD_BYTES`].
    #[error("File too large. Maximum size is 5MB.")]
    FileTooLarge {
        /// Size of the rejected file.
        size: u64,
    },
    /// Upload MIME type outside [`ALLOWED_UPLOAD_MIME_TYPES`].
    #[error("Invalid file type. Only images are allowed.")]
    UnsupportedFileType {
        /// MIME type of the rejected file.
        mime: String,
    },
    /// Upload is missing its file or target template.
    #[error("Please select a file and enter template ID")]
    MissingUploadTarget,
    /// Category slug contains characters outside `[a-z0-9-]`.
    #[error("Slug may only contain lowercase letters, digits and hyphens")]
    InvalidSlug {
        /// Rejected slug.
        slug: String,
    },
    /// Category name empty or too long.
    #[error("Category name must be between 1 and 100 characters")]
    InvalidCategoryName,
    /// Folder name empty or too long.
    #[error("Folder name must be between 1 and 255 characters")]
    InvalidFolderName,
    /// Tag name empty or too long.
    #[error("Tag name must be between 1 and 50 characters")]
    InvalidTagName,
    /// Tag colour not written as `#rrggbb`.
    #[error("Tag colour must look like #0070f3")]
    InvalidTagColor {
        /// Rejected colour.
        color: String,
    },
    /// Analytics window outside `1..=365`.
    #[error("Days must be between 1 and 365")]
    DaysOutOfRange {
        /// Rejected window.
        days: u32,
    },
    /// Page numbers are 1-based.
    #[error("Page must be at least 1")]
    InvalidPage,
    /// The free tier is activated without the payment provider.
    #[error("The free plan does not require checkout")]
    FreePlanCheckout,
}

/// Accept an identifier that is non-empty and at most [`MAX_ID_LEN`] characters.
///
/// Length counts Unicode scalar values, so one emoji is one character.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidId`] otherwise.
pub fn validate_item_id(id: &str) -> Result<&str, ValidationError> {
    if id.is_empty() || id.chars().count() > MAX_ID_LEN {
        return Err(ValidationError::InvalidId);
    }
    Ok(id)
}

/// Check an asset upload's size and MIME type.
///
/// # Errors
///
/// Returns [`ValidationError::FileTooLarge`] or
/// [`ValidationError::UnsupportedFileType`].
pub fn validate_upload(size: u64, mime: &str) -> Result<(), ValidationError> {
    if size > MAX_UPLOAD_BYTES {
        return Err(ValidationError::FileTooLarge { size });
    }
    let normalized = mime.trim().to_ascii_lowercase();
    if !ALLOWED_UPLOAD_MIME_TYPES.contains(&normalized.as_str()) {
        return Err(ValidationError::UnsupportedFileType {
            mime: mime.to_string(),
        });
    }
    Ok(())
}

/// Guess an upload MIME type from a file extension.
#[must_use]
pub fn mime_from_extension(file_name: &str) -> Option<&'static str> {
    let (_, extension) = file_name.rsplit_once('.')?;
    match extension.to_ascii_lowercase().as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "svg" => Some("image/svg+xml"),
        "webp" => Some("image/webp"),
        _ => None,
    }
}

/// Check a category name and slug.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidCategoryName`] or
/// [`ValidationError::InvalidSlug`].
pub fn validate_category(name: &str, slug: &str) -> Result<(), ValidationError> {
    let name_len = name.trim().chars().count();
    if name_len == 0 || name_len > MAX_CATEGORY_NAME_LEN {
        return Err(ValidationError::InvalidCategoryName);
    }
    let slug_ok = !slug.is_empty()
        && slug.len() <= MAX_CATEGORY_NAME_LEN
        && slug
            .bytes()
            .all(|byte| byte.is_ascii_lowercase() || byte.is_ascii_digit() || byte == b'-');
    if !slug_ok {
        return Err(ValidationError::InvalidSlug {
            slug: slug.to_string(),
        });
    }
    Ok(())
}

/// Check a folder name.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidFolderName`].
pub fn validate_folder_name(name: &str) -> Result<&str, ValidationError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_FOLDER_NAME_LEN {
        return Err(ValidationError::InvalidFolderName);
    }
    Ok(name)
}

/// Check a tag name and `#rrggbb` colour.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidTagName`] or
/// [`ValidationError::InvalidTagColor`].
pub fn validate_tag<'a>(name: &'a str, color: &str) -> Result<&'a str, ValidationError> {
    let name = name.trim();
    let len = name.chars().count();
    if len == 0 || len > MAX_TAG_NAME_LEN {
        return Err(ValidationError::InvalidTagName);
    }
    let color_ok = color
        .strip_prefix('#')
        .is_some_and(|hex| hex.len() == 6 && hex.bytes().all(|byte| byte.is_ascii_hexdigit()));
    if !color_ok {
        return Err(ValidationError::InvalidTagColor {
            color: color.to_string(),
        });
    }
    Ok(name)
}

/// Check an analytics window.
///
/// # Errors
///
/// Returns [`ValidationError::DaysOutOfRange`] outside `1..=365`.
pub const fn validate_days(days: u32) -> Result<u32, ValidationError> {
    if days == 0 || days > MAX_ANALYTICS_DAYS {
        return Err(ValidationError::DaysOutOfRange { days });
    }
    Ok(days)
}
