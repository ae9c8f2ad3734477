//! File reference for outbound attachments.

use std::path::PathBuf;

/// A file parameter for an outbound call. Exactly one variant; immutable
/// once constructed. `Path` and `Bytes` carry uploadable content and force
/// multipart encoding; `Url` and `FileId` are metadata-only and degrade to
/// plain string fields.
#[derive(Debug, Clone)]
pub enum InputFile {
    /// Local file to open and upload.
    Path(PathBuf),
    /// Remote URL the platform fetches itself.
    Url(String),
    /// In-memory content; `file_name` is synthesized from content when absent.
    Bytes {
        data: Vec<u8>,
        file_name: Option<String>,
    },
    /// Identifier of a file already stored on the platform.
    FileId(String),
}

impl InputFile {
    /// Local file reference.
    pub fn path(path: impl Into<PathBuf>) -> Self {
        InputFile::Path(path.into())
    }

    /// Remote URL reference.
    pub fn url(url: impl Into<String>) -> Self {
        InputFile::Url(url.into())
    }

    /// Raw content without a name; the encoder sniffs an extension.
    pub fn bytes(data: Vec<u8>) -> Self {
        InputFile::Bytes {
            data,
            file_name: None,
        }
    }

    /// Raw content with an explicit file name.
    pub fn named_bytes(data: Vec<u8>, file_name: impl Into<String>) -> Self {
        InputFile::Bytes {
            data,
            file_name: Some(file_name.into()),
        }
    }

    /// Platform-assigned file id.
    pub fn file_id(id: impl Into<String>) -> Self {
        InputFile::FileId(id.into())
    }

    /// True when this reference carries actual content to upload
    /// (a resolvable local path or a byte payload).
    pub fn has_content(&self) -> bool {
        matches!(self, InputFile::Path(_) | InputFile::Bytes { .. })
    }
}
