//! QR code image pointing at a quote's share link.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::{DynamicImage, ImageFormat, Luma};
use qrcode::QrCode;

use crate::error::AppError;

/// Smallest edge of the rendered PNG in pixels
const MIN_SIZE_PX: u32 = 240;

/// Render `data` as a PNG QR code
pub fn render_png(data: &str) -> Result<Vec<u8>, AppError> {
    let code = QrCode::new(data.as_bytes()).map_err(|e| AppError::QrCode(e.to_string()))?;
    let image = code
        .render::<Luma<u8>>()
        .min_dimensions(MIN_SIZE_PX, MIN_SIZE_PX)
        .build();

    let mut png = Vec::new();
    DynamicImage::ImageLuma8(image)
        .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
        .map_err(|e| AppError::QrCode(e.to_string()))?;

    Ok(png)
}

/// PNG bytes as a `data:` URI for inline `<img>` tags
pub fn png_data_uri(png: &[u8]) -> String {
    format!("data:image/png;base64,{}", STANDARD.encode(png))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_MAGIC: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_render_png_produces_png() {
        let png = render_png("https://example.com/quotes/00000000").unwrap();
        assert!(png.len() > PNG_MAGIC.len());
        assert_eq!(&png[..8], &PNG_MAGIC);

        let decoded = image::load_from_memory_with_format(&png, ImageFormat::Png).unwrap();
        assert!(decoded.width() >= MIN_SIZE_PX);
        assert_eq!(decoded.width(), decoded.height());
    }

    #[test]
    fn test_png_data_uri() {
        assert_eq!(png_data_uri(&[1, 2, 3]), "data:image/png;base64,AQID");
    }
}
