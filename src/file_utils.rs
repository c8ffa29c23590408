use crate::config::SUPPORTED_IMAGE_EXTENSIONS;
use log::{debug, warn};
use std::path::{Path, PathBuf};

const FALLBACK_MIME: &str = "application/octet-stream";

/// A user-selected file, read fully into memory.
#[derive(Debug, Clone)]
pub struct ImageFile {
    name: String,
    mime: String,
    bytes: Vec<u8>,
}

impl ImageFile {
    /// Wraps raw file contents. Returns `None` for empty files.
    pub fn from_bytes(name: impl Into<String>, bytes: Vec<u8>) -> Option<Self> {
        if bytes.is_empty() {
            return None;
        }
        let name = name.into();
        let mime = sniff_mime(&bytes, Path::new(&name)).to_string();
        Some(Self { name, mime, bytes })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the content or the file name identify an image.
    pub fn is_image(&self) -> bool {
        self.mime.starts_with("image/")
    }
}

/// Checks the extension against the supported image formats.
pub fn is_supported_image(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext_str| SUPPORTED_IMAGE_EXTENSIONS.contains(&ext_str.to_lowercase().as_str()))
            .unwrap_or(false)
}

/// Picks the first supported image out of several candidates.
pub fn first_supported<I>(paths: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    paths.into_iter().find(|path| is_supported_image(path))
}

/// Reads a file from disk without blocking the UI thread.
///
/// Unreadable or empty files yield `None`; they are ignored rather than reported.
pub async fn read_image_file(path: &Path) -> Option<ImageFile> {
    let bytes = match async_std::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!("Failed to read {}: {}", path.display(), e);
            return None;
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let file = ImageFile::from_bytes(name, bytes);
    if file.is_none() {
        debug!("Ignoring empty file {}", path.display());
    }
    file
}

/// Determines the MIME type from the content, then from the file name.
pub fn sniff_mime(bytes: &[u8], path: &Path) -> &'static str {
    if let Ok(format) = image::guess_format(bytes) {
        return format.to_mime_type();
    }
    image::ImageFormat::from_path(path)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MIME)
}

/// File extension matching the detected format of `bytes`, `png` when unknown.
pub fn extension_for(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .ok()
        .and_then(|format| format.extensions_str().first().copied())
        .unwrap_or("png")
}

#[cfg(test)]
pub(crate) mod test_support {
    use image::{ImageFormat, Rgba, RgbaImage};
    use std::io::Cursor;

    /// Encodes a small solid image in the requested format.
    pub fn encoded_image(format: ImageFormat, width: u32, height: u32) -> Vec<u8> {
        let image = RgbaImage::from_pixel(width, height, Rgba([200, 40, 40, 255]));
        let mut out = Cursor::new(Vec::new());
        match format {
            ImageFormat::Jpeg => image::DynamicImage::ImageRgba8(image)
                .to_rgb8()
                .write_to(&mut out, format)
                .unwrap(),
            _ => image.write_to(&mut out, format).unwrap(),
        }
        out.into_inner()
    }
}
