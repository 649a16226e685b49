use std::path::{Component, Path};
use std::time::SystemTime;
use time::OffsetDateTime;

use crate::errors::WikiError;

pub mod browser;

/// Escape HTML special characters
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape HTML attribute values
pub fn escape_attr(text: &str) -> String {
    escape_html(text)
}

/// Format a timestamp as RFC 3339, if representable
pub fn format_timestamp(at: SystemTime) -> Option<String> {
    OffsetDateTime::from(at)
        .format(&time::format_description::well_known::Rfc3339)
        .ok()
}

/// Generate last modified metadata HTML
pub fn last_modified_html(modified: Option<SystemTime>) -> String {
    match modified.and_then(format_timestamp) {
        Some(s) => format!("<p class=\"meta\">Last modified: {}</p>", escape_html(&s)),
        None => String::new(),
    }
}

/// Reject request paths that climb out of the served directory
pub fn ensure_safe_path(req_path: &str) -> Result<(), WikiError> {
    for comp in Path::new(req_path).components() {
        match comp {
            Component::Normal(_) | Component::CurDir => {}
            _ => return Err(WikiError::InvalidPath),
        }
    }
    Ok(())
}

/// Determine content type for a static resource based on its extension
pub fn content_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|s| s.to_str()).map(|s| s.to_ascii_lowercase()) {
        Some(ref ext) if ext == "html" => "text/html; charset=utf-8",
        Some(ref ext) if ext == "css" => "text/css; charset=utf-8",
        Some(ref ext) if ext == "js" => "application/javascript; charset=utf-8",
        Some(ref ext) if ext == "svg" => "image/svg+xml",
        Some(ref ext) if ext == "png" => "image/png",
        Some(ref ext) if ext == "jpg" || ext == "jpeg" => "image/jpeg",
        Some(ref ext) if ext == "gif" => "image/gif",
        Some(ref ext) if ext == "ico" => "image/x-icon",
        Some(ref ext) if ext == "txt" => "text/plain; charset=utf-8",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, UNIX_EPOCH};

    #[test]
    fn escapes_markup() {
        assert_eq!(escape_html("<b>\"Tom & Jerry's\"</b>"), "&lt;b&gt;&quot;Tom &amp; Jerry&#39;s&quot;&lt;/b&gt;");
    }

    #[test]
    fn rejects_traversal() {
        assert!(ensure_safe_path("css/pantry.css").is_ok());
        assert!(ensure_safe_path("../secret").is_err());
        assert!(ensure_safe_path("/etc/passwd").is_err());
    }

    #[test]
    fn last_modified_is_rfc3339() {
        let at = UNIX_EPOCH + Duration::from_secs(86_400);
        assert_eq!(
            last_modified_html(Some(at)),
            "<p class=\"meta\">Last modified: 1970-01-02T00:00:00Z</p>"
        );
        assert_eq!(last_modified_html(None), "");
    }

    #[test]
    fn content_types() {
        assert_eq!(content_type_for(Path::new("a/site.CSS")), "text/css; charset=utf-8");
        assert_eq!(content_type_for(Path::new("blob")), "application/octet-stream");
    }
}
