//! Text segmentation modules

pub mod segmenter;

use serde::Serialize;

pub use segmenter::{segment, Segmenter};

/// A displayable unit of text, usually one sentence
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TextUnit {
    /// Unit text with normalized whitespace
    pub text: String,
    /// Position in the session's unit sequence (0-based)
    pub index: usize,
}

impl AsRef<str> for TextUnit {
    fn as_ref(&self) -> &str {
        &self.text
    }
}
