//! Media path resolution against the configured backend origin.

/// Prefix under which the backend serves uploaded files.
pub const UPLOADS_PREFIX: &str = "/uploads/";

const ABSOLUTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// True when `path` already carries an `http://` or `https://` scheme (any case).
pub fn is_absolute_url(path: &str) -> bool {
    ABSOLUTE_SCHEMES.iter().any(|scheme| {
        path.len() >= scheme.len()
            && path.is_char_boundary(scheme.len())
            && path[..scheme.len()].eq_ignore_ascii_case(scheme)
    })
}

/// Qualify a media path against `origin`.
///
/// Empty input yields an empty string so the caller can pick its own
/// placeholder. Absolute URLs pass through untouched, which makes the
/// function idempotent on its own output. Upload paths and legacy relative
/// paths are both joined onto the origin.
pub fn resolve_media_path(path: Option<&str>, origin: &str) -> String {
    let Some(path) = path.map(str::trim).filter(|p| !p.is_empty()) else {
        return String::new();
    };
    if is_absolute_url(path) {
        return path.to_string();
    }
    let origin = origin.trim_end_matches('/');
    if path.starts_with(UPLOADS_PREFIX) {
        return format!("{origin}{path}");
    }
    // legacy paths, with or without the leading slash
    if path.starts_with('/') {
        format!("{origin}{path}")
    } else {
        format!("{origin}/{path}")
    }
}
