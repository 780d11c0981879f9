//! File extension of the last URL path segment.

/// Lowercased extension of the last path segment of `url`, without the dot.
///
/// Returns `None` if the URL cannot be parsed or the last segment has no extension.
pub fn extension_from_url(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().split('/').filter(|s| !s.is_empty()).last()?;
    let (stem, ext) = segment.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            extension_from_url("https://image.example.com/a/width=450/123.jpeg").as_deref(),
            Some("jpeg")
        );
        assert_eq!(
            extension_from_url("https://image.example.com/x.PNG").as_deref(),
            Some("png")
        );
    }

    #[test]
    fn with_query() {
        assert_eq!(
            extension_from_url("https://image.example.com/p.webp?token=abc").as_deref(),
            Some("webp")
        );
    }

    #[test]
    fn none() {
        assert_eq!(extension_from_url("https://image.example.com/"), None);
        assert_eq!(extension_from_url("https://image.example.com/raw"), None);
        assert_eq!(extension_from_url("https://image.example.com/.hidden"), None);
        assert_eq!(extension_from_url("not a url"), None);
    }
}
