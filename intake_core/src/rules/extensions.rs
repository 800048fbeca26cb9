//! File-type classification for the type check.
//!
//! A candidate matches a category when its lowercased filename extension is
//! in the category table; when the name carries no extension the candidate's
//! MIME type is consulted instead. Custom lists are comma-separated, the
//! leading dot is optional, and matching is case-insensitive.

use mime::Mime;

use crate::config::ExtensionFilter;

const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp", "svg", "bmp", "ico", "avif"];
const VIDEO_EXTENSIONS: &[&str] = &["mp4", "webm", "mov", "avi", "mkv", "m4v"];
const AUDIO_EXTENSIONS: &[&str] = &["mp3", "wav", "ogg", "m4a", "aac", "flac"];
const PDF_EXTENSIONS: &[&str] = &["pdf"];
const CSV_EXTENSIONS: &[&str] = &["csv"];
const EXCEL_EXTENSIONS: &[&str] = &["xls", "xlsx"];
const WORD_EXTENSIONS: &[&str] = &["doc", "docx"];
const JSON_EXTENSIONS: &[&str] = &["json"];

/// Extension table for a category filter. `Any` and `Custom` have no fixed
/// table.
fn category_extensions(filter: ExtensionFilter) -> &'static [&'static str] {
    match filter {
        ExtensionFilter::Image => IMAGE_EXTENSIONS,
        ExtensionFilter::Video => VIDEO_EXTENSIONS,
        ExtensionFilter::Audio => AUDIO_EXTENSIONS,
        ExtensionFilter::Pdf => PDF_EXTENSIONS,
        ExtensionFilter::Csv => CSV_EXTENSIONS,
        ExtensionFilter::Excel => EXCEL_EXTENSIONS,
        ExtensionFilter::Word => WORD_EXTENSIONS,
        ExtensionFilter::Json => JSON_EXTENSIONS,
        ExtensionFilter::Any | ExtensionFilter::Custom => &[],
    }
}

/// Parses a custom extension list: `".png, JPG,.webp"` -> `["png", "jpg", "webp"]`.
pub fn parse_custom_extensions(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|part| part.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Lowercased filename extension, if the name has one.
pub fn file_extension(name: &str) -> Option<String> {
    let (stem, ext) = name.rsplit_once('.')?;
    if stem.is_empty() || ext.is_empty() {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Label used for the `{type}` placeholder: the extension when the name has
/// one, otherwise the raw MIME classification.
pub fn file_type_label(name: &str, mime_or_extension: &str) -> String {
    file_extension(name).unwrap_or_else(|| mime_or_extension.to_string())
}

/// Label used for the `{allowed}` placeholder.
pub fn allowed_label(filter: ExtensionFilter, custom_extensions: &str) -> String {
    match filter {
        ExtensionFilter::Any => "any".to_string(),
        ExtensionFilter::Custom => parse_custom_extensions(custom_extensions).join(", "),
        _ => category_extensions(filter).join(", "),
    }
}

fn mime_matches(filter: ExtensionFilter, mime_or_extension: &str) -> bool {
    let Ok(mime) = mime_or_extension.parse::<Mime>() else {
        return false;
    };

    match filter {
        ExtensionFilter::Image => mime.type_() == mime::IMAGE,
        ExtensionFilter::Video => mime.type_() == mime::VIDEO,
        ExtensionFilter::Audio => mime.type_() == mime::AUDIO,
        ExtensionFilter::Pdf => mime == mime::APPLICATION_PDF,
        ExtensionFilter::Csv => mime.type_() == mime::TEXT && mime.subtype() == mime::CSV,
        ExtensionFilter::Json => mime.subtype() == mime::JSON,
        ExtensionFilter::Excel => {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == "vnd.ms-excel"
                    || mime.subtype() == "vnd.openxmlformats-officedocument.spreadsheetml.sheet")
        }
        ExtensionFilter::Word => {
            mime.type_() == mime::APPLICATION
                && (mime.subtype() == "msword"
                    || mime.subtype() == "vnd.openxmlformats-officedocument.wordprocessingml.document")
        }
        ExtensionFilter::Any | ExtensionFilter::Custom => false,
    }
}

/// Whether a candidate passes the configured type filter.
pub fn matches_filter(
    filter: ExtensionFilter,
    custom_extensions: &str,
    name: &str,
    mime_or_extension: &str,
) -> bool {
    match filter {
        ExtensionFilter::Any => true,
        ExtensionFilter::Custom => match file_extension(name) {
            Some(ext) => parse_custom_extensions(custom_extensions).contains(&ext),
            None => false,
        },
        _ => match file_extension(name) {
            Some(ext) => category_extensions(filter).contains(&ext.as_str()),
            None => mime_matches(filter, mime_or_extension),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_custom_extensions() {
        assert_eq!(
            parse_custom_extensions(".html, .xml, .pt"),
            vec!["html", "xml", "pt"]
        );
        assert_eq!(parse_custom_extensions("PNG,.Jpg"), vec!["png", "jpg"]);
        assert_eq!(parse_custom_extensions(" , ,"), Vec::<String>::new());
        assert_eq!(parse_custom_extensions(""), Vec::<String>::new());
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(file_extension("a.PNG"), Some("png".to_string()));
        assert_eq!(file_extension("archive.tar.gz"), Some("gz".to_string()));
        assert_eq!(file_extension("README"), None);
        assert_eq!(file_extension(".gitignore"), None);
        assert_eq!(file_extension("trailing."), None);
    }

    #[test]
    fn test_category_matching() {
        assert!(matches_filter(ExtensionFilter::Image, "", "photo.jpeg", "image/jpeg"));
        assert!(matches_filter(ExtensionFilter::Pdf, "", "doc.PDF", "application/pdf"));
        assert!(!matches_filter(ExtensionFilter::Image, "", "movie.mp4", "video/mp4"));
        assert!(matches_filter(ExtensionFilter::Any, "", "anything.bin", "application/octet-stream"));
    }

    #[test]
    fn test_mime_fallback_without_extension() {
        assert!(matches_filter(ExtensionFilter::Image, "", "photo", "image/png"));
        assert!(matches_filter(ExtensionFilter::Json, "", "payload", "application/json"));
        assert!(!matches_filter(ExtensionFilter::Video, "", "photo", "image/png"));
        assert!(!matches_filter(ExtensionFilter::Image, "", "photo", "not a mime"));
    }

    #[test]
    fn test_custom_matching_is_case_insensitive() {
        let custom = ".png, .jpg";
        assert!(matches_filter(ExtensionFilter::Custom, custom, "a.PNG", ""));
        assert!(matches_filter(ExtensionFilter::Custom, custom, "b.jpg", ""));
        assert!(!matches_filter(ExtensionFilter::Custom, custom, "a.gif", ""));
        assert!(!matches_filter(ExtensionFilter::Custom, custom, "noext", ""));
    }

    #[test]
    fn test_allowed_label() {
        assert_eq!(allowed_label(ExtensionFilter::Pdf, ""), "pdf");
        assert_eq!(allowed_label(ExtensionFilter::Word, ""), "doc, docx");
        assert_eq!(allowed_label(ExtensionFilter::Custom, ".png,.jpg"), "png, jpg");
        assert_eq!(allowed_label(ExtensionFilter::Any, ""), "any");
    }
}
