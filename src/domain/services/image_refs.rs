#[cfg(test)]
#[path = "image_refs_test.rs"]
mod tests;

use std::path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use tokio::fs;

use crate::domain::models::ChatError;

const MIME_TYPES: [(&str, &str); 5] = [
    ("png", "image/png"),
    ("jpg", "image/jpeg"),
    ("jpeg", "image/jpeg"),
    ("gif", "image/gif"),
    ("webp", "image/webp"),
];

/// Turns what a user attaches into something the provider accepts: remote
/// URLs and data URIs pass through, local files are inlined as data URIs.
pub struct ImageRefs {}

impl ImageRefs {
    pub fn is_inline(reference: &str) -> bool {
        return reference.starts_with("data:");
    }

    pub fn is_remote(reference: &str) -> bool {
        return reference.starts_with("http://") || reference.starts_with("https://");
    }

    pub fn mime_type(file_path: &path::Path) -> Option<&'static str> {
        let extension = file_path.extension()?.to_str()?.to_lowercase();
        return MIME_TYPES
            .iter()
            .find(|(ext, _)| return *ext == extension)
            .map(|(_, mime)| return *mime);
    }

    pub async fn resolve(reference: &str) -> Result<String, ChatError> {
        let reference = reference.trim();
        if reference.is_empty() {
            return Err(ChatError::Input(
                "You must specify an image URL or file path with `/image`. Run `/help` for more details."
                    .to_string(),
            ));
        }

        if ImageRefs::is_remote(reference) || ImageRefs::is_inline(reference) {
            return Ok(reference.to_string());
        }

        let file_path = path::PathBuf::from(reference);
        let mime = ImageRefs::mime_type(&file_path).ok_or_else(|| {
            return ChatError::Input(format!(
                "{reference} is not a supported image. Supported types are png, jpg, gif and webp."
            ));
        })?;

        let bytes = fs::read(&file_path).await.map_err(|err| {
            return ChatError::Input(format!("Unable to read image {reference}: {err}"));
        })?;
        tracing::debug!(path = reference, bytes = bytes.len(), "Inlined image");

        return Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)));
    }

    /// Short label for an image reference. Data URIs are far too long to
    /// show, so only their type and approximate size are displayed.
    pub fn describe(reference: &str) -> String {
        if !ImageRefs::is_inline(reference) {
            return reference.to_string();
        }

        let (header, payload) = reference.split_once(',').unwrap_or((reference, ""));
        let mime = header
            .trim_start_matches("data:")
            .split(';')
            .next()
            .unwrap_or("");
        let padding = payload.chars().rev().take_while(|c| return *c == '=').count();
        let bytes = (payload.len() * 3 / 4).saturating_sub(padding);

        return format!("inline {mime} ({bytes} bytes)");
    }
}
