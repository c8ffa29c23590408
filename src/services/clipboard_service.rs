//! Clipboard access for the share action.
//!
//! Uses arboard on every platform: RGBA images for sharing the result itself,
//! plain text for the link fallback.

use crate::image_loader::DecodedImage;
use arboard::{Clipboard, ImageData};
use log::info;
use std::borrow::Cow;

/// Errors that can occur during clipboard operations.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    /// Nothing to copy.
    #[error("nothing to copy")]
    Empty,
    /// Platform-specific error occurred.
    #[error("{0}")]
    PlatformError(String),
}

/// Service for managing clipboard operations.
pub struct ClipboardService;

impl ClipboardService {
    /// Creates a new clipboard service.
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<Clipboard, ClipboardError> {
        Clipboard::new()
            .map_err(|e| ClipboardError::PlatformError(format!("Failed to access clipboard: {}", e)))
    }

    /// Copies text such as a link.
    pub fn copy_text(&self, text: &str) -> Result<(), ClipboardError> {
        if text.is_empty() {
            return Err(ClipboardError::Empty);
        }

        Self::open()?
            .set_text(text.to_string())
            .map_err(|e| ClipboardError::PlatformError(format!("Failed to set clipboard: {}", e)))?;

        info!("Copied text to clipboard");
        Ok(())
    }

    /// Copies decoded RGBA pixels as an image.
    pub fn copy_image(&self, image: DecodedImage) -> Result<(), ClipboardError> {
        if image.width == 0 || image.height == 0 || image.data.is_empty() {
            return Err(ClipboardError::Empty);
        }

        let (width, height) = (image.width, image.height);
        let data = ImageData {
            width: width as usize,
            height: height as usize,
            bytes: Cow::Owned(image.data),
        };

        Self::open()?
            .set_image(data)
            .map_err(|e| ClipboardError::PlatformError(format!("Failed to set clipboard: {}", e)))?;

        info!("Copied {}x{} image to clipboard", width, height);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_payloads_are_rejected_before_touching_the_clipboard() {
        let service = ClipboardService::new();
        assert!(matches!(service.copy_text(""), Err(ClipboardError::Empty)));

        let empty = DecodedImage {
            data: Vec::new(),
            width: 0,
            height: 0,
        };
        assert!(matches!(service.copy_image(empty), Err(ClipboardError::Empty)));
    }
}
