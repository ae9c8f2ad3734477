//! Request body encoding: URL-encoded form fields or multipart.
//!
//! Multipart is chosen iff at least one parameter is a file reference with
//! actual content (byte payload or local path); metadata-only references
//! degrade to plain string fields. Parameters whose value cannot be
//! converted are dropped and reported, never a hard failure.

use botwire_core::{Error, InputFile, Result};
use reqwest::multipart::{Form, Part};
use tracing::warn;

use super::params::{ParamValue, Params};

/// Encoded HTTP body for one call.
#[derive(Debug)]
pub enum RequestBody {
    /// `application/x-www-form-urlencoded` field pairs.
    Form(Vec<(String, String)>),
    /// `multipart/form-data` with file parts.
    Multipart(Form),
}

/// Body plus the encoding report.
#[derive(Debug)]
pub struct EncodedBody {
    pub body: RequestBody,
    /// Names of parameters dropped because their value could not be
    /// converted. The call proceeds without them.
    pub dropped: Vec<String>,
}

/// Encodes a parameter bag. Local files are read here; the handles are
/// scoped to the read and released on every exit path. A read failure fails
/// the whole call (body-build failure), unlike an unencodable value.
pub async fn encode_params(params: Params) -> Result<EncodedBody> {
    let mut dropped = Vec::new();

    if params.requires_multipart() {
        let mut form = Form::new();
        for (name, value) in params.into_entries() {
            match value {
                ParamValue::File(InputFile::Path(path)) => {
                    let data = tokio::fs::read(&path).await.map_err(Error::Io)?;
                    let file_name = path
                        .file_name()
                        .and_then(|n| n.to_str())
                        .unwrap_or("file")
                        .to_string();
                    form = form.part(name, Part::bytes(data).file_name(file_name));
                }
                ParamValue::File(InputFile::Bytes { data, file_name }) => {
                    let file_name = file_name
                        .unwrap_or_else(|| format!("{}.{}", name, sniff_extension(&data)));
                    form = form.part(name, Part::bytes(data).file_name(file_name));
                }
                other => match other.to_text() {
                    Some(text) => form = form.text(name, text),
                    None => {
                        warn!(param = %name, "Dropping unencodable parameter");
                        dropped.push(name);
                    }
                },
            }
        }
        Ok(EncodedBody {
            body: RequestBody::Multipart(form),
            dropped,
        })
    } else {
        let mut pairs = Vec::new();
        for (name, value) in params.into_entries() {
            match value.to_text() {
                Some(text) => pairs.push((name, text)),
                None => {
                    warn!(param = %name, "Dropping unencodable parameter");
                    dropped.push(name);
                }
            }
        }
        Ok(EncodedBody {
            body: RequestBody::Form(pairs),
            dropped,
        })
    }
}

/// Picks a file extension from content magic bytes for synthesized part
/// names. Falls back to `bin`.
pub fn sniff_extension(data: &[u8]) -> &'static str {
    if data.starts_with(&[0x89, b'P', b'N', b'G']) {
        "png"
    } else if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "jpg"
    } else if data.starts_with(b"GIF8") {
        "gif"
    } else if data.len() >= 12 && data.starts_with(b"RIFF") && &data[8..12] == b"WEBP" {
        "webp"
    } else if data.starts_with(b"%PDF") {
        "pdf"
    } else if data.starts_with(b"OggS") {
        "ogg"
    } else if data.len() >= 12 && &data[4..8] == b"ftyp" {
        "mp4"
    } else if data.starts_with(b"PK\x03\x04") {
        "zip"
    } else if data.starts_with(b"ID3") || data.starts_with(&[0xFF, 0xFB]) {
        "mp3"
    } else {
        "bin"
    }
}
