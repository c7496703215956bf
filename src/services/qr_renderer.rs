//! QR rendering for URLForge.
//!
//! Renders the assembled URL as a fixed-size two-tone PNG. The rendering
//! options are not user-configurable: 200x200 output, dark modules on white,
//! error correction level H, 4-module quiet zone.
//!
//! Suppression rules (empty base URL, URL over the length ceiling) belong to
//! the caller; the renderer itself encodes whatever it is handed.

use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::png::PngEncoder;
use image::{imageops, ExtendedColorType, ImageEncoder, Rgb, RgbImage};
use qrcode::{Color as QrColor, EcLevel, QrCode};
use std::io::Cursor;

use crate::types::errors::QrError;

/// Longest URL the QR area will render. Longer URLs show a notice instead;
/// the text URL is still displayed in full.
pub const QR_URL_LIMIT: usize = 1000;

/// Side length of the rendered PNG in pixels.
pub const OUTPUT_SIZE: u32 = 200;

const QUIET_ZONE_MODULES: u32 = 4;
const DARK: Rgb<u8> = Rgb([0x2c, 0x3e, 0x50]);
const LIGHT: Rgb<u8> = Rgb([0xff, 0xff, 0xff]);

/// Trait defining the QR rendering interface.
pub trait QrRendererTrait {
    fn render_png(&self, text: &str) -> Result<Vec<u8>, QrError>;
    fn data_url(&self, text: &str) -> Result<String, QrError>;
}

/// QR renderer with the fixed URLForge appearance.
pub struct QrRenderer;

impl QrRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Wraps already-rendered PNG bytes as a `data:image/png` URL for the
    /// webview `<img>` element.
    pub fn png_to_data_url(png: &[u8]) -> String {
        format!("data:image/png;base64,{}", BASE64.encode(png))
    }

    fn draw_modules(code: &QrCode) -> RgbImage {
        let width = code.width() as u32;
        let total = width + 2 * QUIET_ZONE_MODULES;
        let module_px = (OUTPUT_SIZE / total).max(1);
        let canvas = total * module_px;

        let mut img = RgbImage::from_pixel(canvas, canvas, LIGHT);
        for y in 0..width {
            for x in 0..width {
                if code[(x as usize, y as usize)] == QrColor::Dark {
                    let x0 = (x + QUIET_ZONE_MODULES) * module_px;
                    let y0 = (y + QUIET_ZONE_MODULES) * module_px;
                    for dy in 0..module_px {
                        for dx in 0..module_px {
                            img.put_pixel(x0 + dx, y0 + dy, DARK);
                        }
                    }
                }
            }
        }
        img
    }
}

impl Default for QrRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl QrRendererTrait for QrRenderer {
    /// Renders the text as a PNG of exactly [`OUTPUT_SIZE`] pixels per side.
    fn render_png(&self, text: &str) -> Result<Vec<u8>, QrError> {
        let code = QrCode::with_error_correction_level(text.as_bytes(), EcLevel::H)
            .map_err(|e| QrError::Unencodable(e.to_string()))?;

        let img = Self::draw_modules(&code);
        let img = if img.width() != OUTPUT_SIZE {
            imageops::resize(&img, OUTPUT_SIZE, OUTPUT_SIZE, imageops::FilterType::Nearest)
        } else {
            img
        };

        let mut png = Vec::new();
        PngEncoder::new(Cursor::new(&mut png))
            .write_image(img.as_raw(), OUTPUT_SIZE, OUTPUT_SIZE, ExtendedColorType::Rgb8)
            .map_err(|e| QrError::ImageEncoding(e.to_string()))?;
        Ok(png)
    }

    /// Renders the text and returns it as a base64 data URL.
    fn data_url(&self, text: &str) -> Result<String, QrError> {
        let png = self.render_png(text)?;
        Ok(Self::png_to_data_url(&png))
    }
}
