use async_trait::async_trait;

use crate::error::ExtractionError;
use crate::image_decoder::DecodedImage;

/// Text extraction backend
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Extract printed text from an image
    ///
    /// # Returns
    /// The flattened text, or an empty string when the backend found none
    async fn extract_text(&self, image: &DecodedImage) -> Result<String, ExtractionError>;

    /// Backend name reported by the health endpoint
    fn name(&self) -> &'static str;
}
