use slint::{Image, Rgba8Pixel, SharedPixelBuffer};

/// Decoded RGBA8 pixels.
pub struct DecodedImage {
    pub data: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

/// Decodes encoded image bytes into RGBA8, keeping transparency.
///
/// CPU-bound; call from a rayon worker, not the UI thread.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, image::ImageError> {
    let image = image::load_from_memory(bytes)?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(DecodedImage {
        data: rgba.into_raw(),
        width,
        height,
    })
}

/// Converts decoded pixels into a Slint image. Must run on the UI thread.
pub fn create_slint_image(decoded: DecodedImage) -> Image {
    let buffer =
        SharedPixelBuffer::<Rgba8Pixel>::clone_from_slice(&decoded.data, decoded.width, decoded.height);
    Image::from_rgba8(buffer)
}
