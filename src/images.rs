//! Stored-image path resolution.

/// Shown when an entity has no image at all.
pub const PLACEHOLDER: &str = "/placeholder.svg";

/// Resolve a stored image path to a displayable URL.
///
/// Absolute URLs and site-local paths pass through unchanged; relative
/// paths are prefixed with the configured image base. Missing or empty
/// paths resolve to the placeholder.
pub fn image_url(base: &str, path: Option<&str>) -> String {
    let path = match path {
        Some(p) if !p.is_empty() => p,
        _ => return PLACEHOLDER.to_string(),
    };
    if path.starts_with("http://") || path.starts_with("https://") || path.starts_with('/') {
        return path.to_string();
    }
    format!("{base}{path}")
}
