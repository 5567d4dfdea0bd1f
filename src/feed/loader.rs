//! Loading and validation of the JSON feed-item input.
//!
//! The input is a JSON array of post records, the same file the web
//! front end renders its card list from, so the field names here are the
//! shared contract between the two consumers.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

/// Maximum allowed input file size (64 MiB). Checked before reading so a
/// corrupted or runaway input file cannot exhaust memory.
const MAX_INPUT_SIZE: u64 = 64 * 1024 * 1024;

/// Errors that can occur while loading feed items.
///
/// Every variant is fatal for the run: the pipeline produces no output
/// from partially loaded input.
#[derive(Debug, Error)]
pub enum LoadError {
    /// Input source could not be read.
    #[error("Failed to read feed data: {0}")]
    Io(#[from] std::io::Error),

    /// Input is not valid JSON, or a record field has the wrong type.
    #[error("Invalid JSON in feed data: {0}")]
    Json(#[from] serde_json::Error),

    /// The top-level JSON value is something other than an array.
    #[error("Feed data must be a JSON array, found {0}")]
    NotAnArray(&'static str),

    /// Input file exceeds [`MAX_INPUT_SIZE`].
    #[error("Feed data file too large: {0}")]
    TooLarge(String),
}

/// One syndicated blog post, as read from the input JSON.
///
/// Every field is optional and a missing field is distinct from an empty
/// string: both degrade gracefully at render time, but presence is
/// preserved through the pipeline. Records are never mutated after
/// loading; later stages only reorder or drop whole records.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedItem {
    /// Post title. Renders as `(untitled)` when absent.
    pub title: Option<String>,
    /// Absolute URL of the post. Renders as an empty string when absent.
    pub link: Option<String>,
    /// Publication date in any parseable string form. Missing or
    /// unparsable dates fall back to the build time.
    pub date: Option<String>,
    /// Free-text teaser, may contain arbitrary HTML markup.
    pub snippet: Option<String>,
    /// Name of the originating publication.
    pub source_name: Option<String>,
    /// URL of the originating publication.
    pub source_url: Option<String>,
}

/// Loads feed items from a JSON file on disk.
///
/// # Errors
///
/// Returns [`LoadError`] if the file is unreadable, oversized, not valid
/// JSON, or not a top-level array.
pub fn load_items(path: &Path) -> Result<Vec<FeedItem>, LoadError> {
    let meta = std::fs::metadata(path)?;
    if meta.len() > MAX_INPUT_SIZE {
        return Err(LoadError::TooLarge(format!(
            "{} is {} bytes (max {} bytes)",
            path.display(),
            meta.len(),
            MAX_INPUT_SIZE
        )));
    }

    let content = std::fs::read_to_string(path)?;
    let items = parse_items(&content)?;
    tracing::info!(path = %path.display(), items = items.len(), "Loaded feed data");
    Ok(items)
}

/// Loads feed items from any byte source, e.g. stdin or a test buffer.
pub fn read_items<R: Read>(mut reader: R) -> Result<Vec<FeedItem>, LoadError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    parse_items(&content)
}

/// Parses an in-memory JSON string into feed items.
///
/// The top-level value must be an array; each element must be an object
/// whose present fields are strings. Unknown fields are ignored.
pub fn parse_items(json: &str) -> Result<Vec<FeedItem>, LoadError> {
    let value: serde_json::Value = serde_json::from_str(json)?;
    let records = match value {
        serde_json::Value::Array(records) => records,
        other => return Err(LoadError::NotAnArray(json_kind(&other))),
    };

    records
        .into_iter()
        .map(|record| serde_json::from_value(record).map_err(LoadError::Json))
        .collect()
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_full_record() {
        let json = r#"[{
            "title": "Hello",
            "link": "https://example.com/hello",
            "date": "2024-06-01",
            "snippet": "<p>Hi</p>",
            "sourceName": "Example Blog",
            "sourceUrl": "https://example.com"
        }]"#;

        let items = parse_items(json).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("Hello"));
        assert_eq!(items[0].link.as_deref(), Some("https://example.com/hello"));
        assert_eq!(items[0].date.as_deref(), Some("2024-06-01"));
        assert_eq!(items[0].snippet.as_deref(), Some("<p>Hi</p>"));
        assert_eq!(items[0].source_name.as_deref(), Some("Example Blog"));
        assert_eq!(items[0].source_url.as_deref(), Some("https://example.com"));
    }

    #[test]
    fn test_missing_fields_stay_absent() {
        let items = parse_items(r#"[{"title": "Only a title"}]"#).unwrap();
        assert_eq!(items[0].link, None);
        assert_eq!(items[0].date, None);
        assert_eq!(items[0].snippet, None);
        assert_eq!(items[0].source_name, None);
        assert_eq!(items[0].source_url, None);
    }

    #[test]
    fn test_empty_string_is_not_absence() {
        let items = parse_items(r#"[{"title": ""}]"#).unwrap();
        assert_eq!(items[0].title.as_deref(), Some(""));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let items = parse_items(r#"[{"title": "A", "author": "ignored"}]"#).unwrap();
        assert_eq!(items[0].title.as_deref(), Some("A"));
    }

    #[test]
    fn test_empty_array() {
        assert!(parse_items("[]").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = parse_items("not json at all");
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_top_level_object_rejected() {
        let result = parse_items(r#"{"title": "A"}"#);
        match result {
            Err(LoadError::NotAnArray(kind)) => assert_eq!(kind, "an object"),
            other => panic!("expected NotAnArray, got {other:?}"),
        }
    }

    #[test]
    fn test_top_level_string_rejected() {
        let result = parse_items(r#""just a string""#);
        assert!(matches!(result, Err(LoadError::NotAnArray("a string"))));
    }

    #[test]
    fn test_wrong_typed_field_rejected() {
        // Fields are text by contract; a numeric title is malformed
        // input, not an absence to paper over.
        let result = parse_items(r#"[{"title": 42}]"#);
        assert!(matches!(result, Err(LoadError::Json(_))));
    }

    #[test]
    fn test_read_items_from_reader() {
        let json = r#"[{"title": "From reader"}]"#;
        let items = read_items(json.as_bytes()).unwrap();
        assert_eq!(items[0].title.as_deref(), Some("From reader"));
    }

    #[test]
    fn test_load_items_missing_file() {
        let result = load_items(Path::new("/tmp/json2rss_test_does_not_exist.json"));
        assert!(matches!(result, Err(LoadError::Io(_))));
    }

    #[test]
    fn test_load_items_from_disk() {
        let dir = std::env::temp_dir().join("json2rss_loader_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("feed-data.json");
        std::fs::write(&path, r#"[{"title": "On disk"}]"#).unwrap();

        let items = load_items(&path).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title.as_deref(), Some("On disk"));

        std::fs::remove_dir_all(&dir).ok();
    }
}
