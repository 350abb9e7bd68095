//! Source formats the document service renders previews for.

/// Extensions (lowercase, no dot) eligible for previews.
pub const SUPPORTED_EXTENSIONS: [&str; 3] = ["docx", "xlsx", "pptx"];

/// Whether a lowercase extension is in the preview allow-list.
pub fn is_supported(extension: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension)
}

/// Lowercase extension of the last path component, if any.
pub fn extension_of(path: &str) -> Option<String> {
    let name = path.rsplit('/').next().unwrap_or(path);
    name.rsplit_once('.')
        .map(|(stem, ext)| (stem, ext.to_lowercase()))
        .filter(|(stem, ext)| !stem.is_empty() && !ext.is_empty())
        .map(|(_, ext)| ext)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allow_list() {
        assert!(is_supported("docx"));
        assert!(is_supported("pptx"));
        assert!(!is_supported("pdf"));
        assert!(!is_supported("DOCX"));
    }

    #[test]
    fn test_extension_of() {
        assert_eq!(extension_of("/alice/files/Report.DOCX").as_deref(), Some("docx"));
        assert_eq!(extension_of("/alice/files/.hidden"), None);
        assert_eq!(extension_of("/alice/files.d/notes"), None);
    }
}
