// Shared download payload builder

/// In-memory file ready to be handed to the browser's download mechanism
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub mime_type: String,
}

impl Download {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Payload as text, `None` if it is not UTF-8
    pub fn text(&self) -> Option<&str> {
        std::str::from_utf8(&self.bytes).ok()
    }
}

/// Build a download for `bytes` saved as `filename` with the given content type
pub fn build_download(
    bytes: impl Into<Vec<u8>>,
    filename: impl Into<String>,
    mime_type: impl Into<String>,
) -> Download {
    Download {
        bytes: bytes.into(),
        filename: filename.into(),
        mime_type: mime_type.into(),
    }
}
