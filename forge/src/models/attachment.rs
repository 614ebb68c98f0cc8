//! ZIP archive attached to a deploy request

use bytes::Bytes;

use crate::errors::HostforgeError;
use crate::filesys::file::File;
use crate::utils::format_mib;

/// Where the archive bytes live until they are sent
#[derive(Debug, Clone, PartialEq, Eq)]
enum Content {
    Memory(Bytes),
    Disk(File),
}

/// A file picked or dropped onto the form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZipAttachment {
    file_name: String,
    size: u64,
    content: Content,
}

impl ZipAttachment {
    /// Attachment backed by an in-memory buffer
    pub fn from_bytes(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        let bytes = bytes.into();
        Self {
            file_name: file_name.into(),
            size: bytes.len() as u64,
            content: Content::Memory(bytes),
        }
    }

    /// Attachment backed by a file on disk; only the metadata is read here
    pub async fn from_file(file: File) -> Result<Self, HostforgeError> {
        let size = file.len().await?;
        Ok(Self {
            file_name: file.name(),
            size,
            content: Content::Disk(file),
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Size in bytes
    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn has_zip_suffix(&self) -> bool {
        has_zip_suffix(&self.file_name)
    }

    /// Label shown next to the file input, e.g. `site.zip (1.50 MB)`
    pub fn label(&self) -> String {
        format!("{} ({})", self.file_name, format_mib(self.size))
    }

    /// Load the archive bytes for upload. In-memory content is shared, not copied.
    pub async fn bytes(&self) -> Result<Bytes, HostforgeError> {
        match &self.content {
            Content::Memory(bytes) => Ok(bytes.clone()),
            Content::Disk(file) => Ok(Bytes::from(file.read_bytes().await?)),
        }
    }
}

pub fn has_zip_suffix(file_name: &str) -> bool {
    file_name.ends_with(".zip")
}
