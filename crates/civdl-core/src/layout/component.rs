//! Path-component checks for names taken from the catalog.

/// True if `name` can be joined onto a folder without escaping it.
///
/// Rejects empty names, `.` and `..`, and names containing `/`, `\`, NUL or
/// control characters. Everything else (spaces, unicode) is accepted as-is.
pub fn is_safe_component(name: &str) -> bool {
    if name.trim().is_empty() || name == "." || name == ".." {
        return false;
    }
    !name
        .chars()
        .any(|c| c == '/' || c == '\\' || c == '\0' || c.is_control())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plain_names() {
        assert!(is_safe_component("Checkpoint"));
        assert!(is_safe_component("my model v1.0.safetensors"));
        assert!(is_safe_component("Textual Inversion"));
    }

    #[test]
    fn rejects_reserved_and_empty() {
        assert!(!is_safe_component(""));
        assert!(!is_safe_component("   "));
        assert!(!is_safe_component("."));
        assert!(!is_safe_component(".."));
    }

    #[test]
    fn rejects_separators_and_control_chars() {
        assert!(!is_safe_component("../etc/passwd"));
        assert!(!is_safe_component("a\\b"));
        assert!(!is_safe_component("file\x00name"));
        assert!(!is_safe_component("line\nbreak"));
    }
}
