pub mod document;
pub mod google_vision;
pub mod interface;

pub use document::{Level, TextNode, Word};
pub use google_vision::GoogleVisionExtractor;
pub use interface::TextExtractor;
