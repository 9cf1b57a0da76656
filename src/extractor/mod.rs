mod error;
mod html;


pub use error::ExtractError;
pub use html::HtmlExtractor;

/// Turns raw markup into the text a reader would see
pub trait TextExtractor: Send + Sync {
    /// Extract visible text from decoded markup
    ///
    /// # Arguments
    /// * `content` - Raw markup as a UTF-8 string
    ///
    /// # Returns
    /// Text nodes concatenated in document order
    fn extract(&self, content: &str) -> Result<String, ExtractError>;

    /// Decode `bytes` as UTF-8, then extract
    fn extract_bytes(&self, bytes: &[u8]) -> Result<String, ExtractError> {
        let content = std::str::from_utf8(bytes)?;
        self.extract(content)
    }
}
