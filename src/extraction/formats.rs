use std::path::Path;

/// Extensions the pipeline accepts once an external decoder produced text.
pub const SUPPORTED_FORMATS: [&str; 5] = [".pdf", ".docx", ".txt", ".md", ".html"];

/// Extensions accepted for direct upload.
pub const ALLOWED_EXTENSIONS: [&str; 3] = ["pdf", "docx", "txt"];

/// Extensions that are already plain text and need no decoding.
pub const PLAIN_TEXT_FORMATS: [&str; 2] = [".txt", ".md"];

pub const UNKNOWN_FORMAT: &str = "unknown";

/// Lowercased extension of `source` including the dot, or `unknown`.
pub fn detect_format(source: &str) -> String {
    Path::new(source)
        .extension()
        .and_then(|ext| ext.to_str())
        .filter(|ext| !ext.is_empty())
        .map(|ext| format!(".{}", ext.to_lowercase()))
        .unwrap_or_else(|| UNKNOWN_FORMAT.to_string())
}

pub fn is_supported_format(source: &str) -> bool {
    SUPPORTED_FORMATS.contains(&detect_format(source).as_str())
}

pub fn is_plain_text(source: &str) -> bool {
    PLAIN_TEXT_FORMATS.contains(&detect_format(source).as_str())
}

/// Whether an uploaded file name carries an allowed extension.
pub fn allowed_file(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(_, ext)| ALLOWED_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_lowercased_extension() {
        assert_eq!(detect_format("report.PDF"), ".pdf");
        assert_eq!(detect_format("dir/notes.md"), ".md");
        assert_eq!(detect_format("archive.tar.gz"), ".gz");
    }

    #[test]
    fn sources_without_extension_are_unknown() {
        assert_eq!(detect_format("sample_text"), UNKNOWN_FORMAT);
        assert_eq!(detect_format(""), UNKNOWN_FORMAT);
        assert_eq!(detect_format(".hidden"), UNKNOWN_FORMAT);
    }

    #[test]
    fn supported_and_plain_text() {
        assert!(is_supported_format("paper.docx"));
        assert!(is_supported_format("page.HTML"));
        assert!(!is_supported_format("sheet.xlsx"));
        assert!(is_plain_text("readme.md"));
        assert!(!is_plain_text("paper.pdf"));
    }

    #[test]
    fn allowed_upload_extensions() {
        assert!(allowed_file("paper.pdf"));
        assert!(allowed_file("NOTES.TXT"));
        assert!(!allowed_file("readme.md"));
        assert!(!allowed_file("no_extension"));
    }
}
