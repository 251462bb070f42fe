/// Bytes of a stored upload, read back for download or inline rendering.
#[derive(Debug, Clone)]
pub struct StoredFile {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl StoredFile {
    /// Content type guessed from the file extension.
    pub fn content_type(&self) -> String {
        mime_guess::from_path(&self.file_name)
            .first_or_octet_stream()
            .to_string()
    }
}
