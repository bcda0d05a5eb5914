use std::path::Path;

use base64::engine::general_purpose::STANDARD as B64;
use base64::Engine;
use tracing::debug;

use crate::errors::{EditorError, ValidationError};

/// Largest CV accepted for attachment or upload.
pub const MAX_ATTACHMENT_BYTES: u64 = 10 * 1024 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    Txt,
}

impl DocumentKind {
    /// Resolves the kind from the file extension, case-insensitively.
    pub fn from_file_name(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "docx" => Some(Self::Docx),
            "doc" => Some(Self::Doc),
            "txt" => Some(Self::Txt),
            _ => None,
        }
    }

    pub fn mime(self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Docx => "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
            Self::Doc => "application/msword",
            Self::Txt => "text/plain",
        }
    }
}

/// Checks type and size before anything is read.
pub fn validate_attachment(file_name: &str, size: u64) -> Result<DocumentKind, ValidationError> {
    let kind = DocumentKind::from_file_name(file_name).ok_or(ValidationError::UnsupportedFileType)?;
    if size > MAX_ATTACHMENT_BYTES {
        return Err(ValidationError::FileTooLarge);
    }
    Ok(kind)
}

/// A validated CV file held in memory, ready for upload or storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub file_name: String,
    pub kind: DocumentKind,
    pub bytes: Vec<u8>,
}

impl Attachment {
    pub fn from_bytes(file_name: &str, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let kind = validate_attachment(file_name, bytes.len() as u64)?;
        Ok(Self {
            file_name: file_name.to_string(),
            kind,
            bytes,
        })
    }

    /// Validates against the file's metadata, then reads it.
    pub async fn read(path: &Path) -> Result<Self, EditorError> {
        let io_err = |source| EditorError::Io {
            path: path.display().to_string(),
            source,
        };
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let size = tokio::fs::metadata(path).await.map_err(io_err)?.len();
        let kind = validate_attachment(&file_name, size)?;
        let bytes = tokio::fs::read(path).await.map_err(io_err)?;
        debug!("Read attachment {} ({} bytes)", file_name, bytes.len());

        Ok(Self {
            file_name,
            kind,
            bytes,
        })
    }

    /// `data:<mime>;base64,<payload>`, the form stored on the profile.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.kind.mime(), B64.encode(&self.bytes))
    }
}
