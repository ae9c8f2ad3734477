//! Typed call parameters.
//!
//! Each outbound call carries a [`Params`] bag built by a per-endpoint
//! request builder. Values are a small tagged variant instead of an open
//! string map, so a builder can only attach the kinds of values the encoder
//! knows how to serialize.

use botwire_core::InputFile;

/// Text formatting mode accepted by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseMode {
    MarkdownV2,
    Markdown,
    Html,
}

impl ParseMode {
    /// The platform's wire string for this mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMode::MarkdownV2 => "MarkdownV2",
            ParseMode::Markdown => "Markdown",
            ParseMode::Html => "HTML",
        }
    }
}

/// One call parameter value.
#[derive(Debug, Clone)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Bool(bool),
    Text(String),
    /// Enum-like string wrapper; unwraps to its wire string.
    Mode(ParseMode),
    /// Structured value; serialized as JSON.
    Json(serde_json::Value),
    File(InputFile),
}

impl ParamValue {
    /// Converts to the form-field string. `None` for values that cannot be
    /// represented as text: content-bearing files (they become multipart
    /// parts) and unencodable values (non-finite floats, unserializable
    /// JSON), which the encoder drops with a diagnostic.
    pub fn to_text(&self) -> Option<String> {
        match self {
            ParamValue::Int(v) => Some(v.to_string()),
            ParamValue::Float(v) => {
                if v.is_finite() {
                    Some(format!("{:.8}", v))
                } else {
                    None
                }
            }
            ParamValue::Bool(v) => Some(if *v { "true" } else { "false" }.to_string()),
            ParamValue::Text(v) => Some(v.clone()),
            ParamValue::Mode(v) => Some(v.as_str().to_string()),
            ParamValue::Json(v) => serde_json::to_string(v).ok(),
            ParamValue::File(InputFile::Url(url)) => Some(url.clone()),
            ParamValue::File(InputFile::FileId(id)) => Some(id.clone()),
            ParamValue::File(_) => None,
        }
    }
}

/// Ordered parameter bag for one outbound call. Built fresh per call,
/// discarded after the HTTP exchange.
#[derive(Debug, Clone, Default)]
pub struct Params {
    entries: Vec<(String, ParamValue)>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a parameter. Names are unique per call by construction
    /// (builders only set each field once).
    pub fn push(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.entries.push((name.into(), value));
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, ParamValue)> {
        self.entries.iter()
    }

    pub fn into_entries(self) -> Vec<(String, ParamValue)> {
        self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True when at least one value is a file reference carrying actual
    /// content; such a bag must be encoded as multipart.
    pub fn requires_multipart(&self) -> bool {
        self.entries.iter().any(|(_, value)| {
            matches!(value, ParamValue::File(file) if file.has_content())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_int_and_bool_conversion() {
        assert_eq!(ParamValue::Int(42).to_text().unwrap(), "42");
        assert_eq!(ParamValue::Bool(true).to_text().unwrap(), "true");
        assert_eq!(ParamValue::Bool(false).to_text().unwrap(), "false");
    }

    #[test]
    fn test_float_fixed_eight_decimals() {
        assert_eq!(ParamValue::Float(3.14).to_text().unwrap(), "3.14000000");
        assert_eq!(ParamValue::Float(51.5).to_text().unwrap(), "51.50000000");
    }

    #[test]
    fn test_non_finite_float_is_unencodable() {
        assert!(ParamValue::Float(f64::NAN).to_text().is_none());
        assert!(ParamValue::Float(f64::INFINITY).to_text().is_none());
    }

    #[test]
    fn test_mode_unwraps_to_wire_string() {
        assert_eq!(ParamValue::Mode(ParseMode::Html).to_text().unwrap(), "HTML");
        assert_eq!(
            ParamValue::Mode(ParseMode::MarkdownV2).to_text().unwrap(),
            "MarkdownV2"
        );
    }

    #[test]
    fn test_json_fallback_serialization() {
        let value = ParamValue::Json(serde_json::json!(["message", "callback_query"]));
        assert_eq!(
            value.to_text().unwrap(),
            r#"["message","callback_query"]"#
        );
    }

    #[test]
    fn test_metadata_files_convert_to_text() {
        let url = ParamValue::File(InputFile::url("https://example.com/a.png"));
        assert_eq!(url.to_text().unwrap(), "https://example.com/a.png");
        let id = ParamValue::File(InputFile::file_id("AgACAgIAAx"));
        assert_eq!(id.to_text().unwrap(), "AgACAgIAAx");
    }

    #[test]
    fn test_multipart_required_only_for_content_files() {
        let form_only = Params::new()
            .push("chat_id", ParamValue::Int(42))
            .push(
                "photo",
                ParamValue::File(InputFile::file_id("AgACAgIAAx")),
            );
        assert!(!form_only.requires_multipart());

        let with_upload = Params::new()
            .push("chat_id", ParamValue::Int(42))
            .push("photo", ParamValue::File(InputFile::bytes(vec![1, 2])));
        assert!(with_upload.requires_multipart());
    }
}
