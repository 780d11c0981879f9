//! Model identifier extraction from a model page URL.

/// Extracts the model id from a page URL.
///
/// Takes the second-to-last path segment when it is all decimal digits
/// (`.../models/<id>/<slug>`), otherwise the last segment
/// (`.../models/<id>`). Query and fragment are ignored.
///
/// Returns `None` if the URL cannot be parsed or has no path segments.
pub fn parse_model_id(page_url: &str) -> Option<String> {
    let parsed = url::Url::parse(page_url).ok()?;
    let segments: Vec<&str> = parsed
        .path_segments()?
        .filter(|s| !s.is_empty())
        .collect();

    let last = *segments.last()?;
    let id = match segments.len().checked_sub(2).map(|i| segments[i]) {
        Some(prev) if is_decimal(prev) => prev,
        _ => last,
    };
    Some(id.to_string())
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}
