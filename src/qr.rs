//! Verification-code rasteriser: short string → QR code PNG bytes.

use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{EcLevel, QrCode};

use crate::error::AssetError;

/// Pixels per QR module in the rasterised image.
const MODULE_PX: u32 = 4;
/// Quiet zone around the code, in modules.
const QUIET_MODULES: u32 = 2;

/// Encode `text` as a QR code (error-correction level M) and return PNG
/// bytes. Failures are [`AssetError`]s: callers log them and render the
/// document without the barcode.
pub fn barcode_png(text: &str) -> Result<Vec<u8>, AssetError> {
    let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::M)
        .map_err(|e| AssetError::Qr(e.to_string()))?;

    let modules = code.width() as u32;
    let colors = code.to_colors();
    let side = (modules + 2 * QUIET_MODULES) * MODULE_PX;

    let img = GrayImage::from_fn(side, side, |x, y| {
        let mx = (x / MODULE_PX) as i64 - QUIET_MODULES as i64;
        let my = (y / MODULE_PX) as i64 - QUIET_MODULES as i64;
        let dark = mx >= 0
            && my >= 0
            && (mx as u32) < modules
            && (my as u32) < modules
            && colors[(my as u32 * modules + mx as u32) as usize] == qrcode::Color::Dark;
        if dark {
            Luma([0u8])
        } else {
            Luma([255u8])
        }
    });

    let mut out = Vec::new();
    img.write_to(&mut Cursor::new(&mut out), ImageFormat::Png)
        .map_err(|e| AssetError::Qr(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_to_png() {
        let png = barcode_png("https://example.org/v/42").unwrap();
        assert_eq!(&png[0..8], b"\x89PNG\r\n\x1a\n");
    }

    #[test]
    fn output_is_square() {
        let png = barcode_png("abc").unwrap();
        let img = image::load_from_memory(&png).unwrap();
        assert_eq!(img.width(), img.height());
        assert!(img.width() > 0);
    }

    #[test]
    fn arbitrary_content_encodes() {
        // Any printable content must encode; only capacity overflow fails.
        for s in ["a", "UTF-8: ação проверка", "0123456789"] {
            assert!(barcode_png(s).is_ok(), "failed on {s:?}");
        }
    }
}
