use crate::error::CodecError;
use base64::Engine;
use image::io::{Limits, Reader as ImageReader};
use std::io::Cursor;
use vision_sim::RasterBuffer;

/// Upload decoding into 8-bit RGBA rasters and PNG encoding back.
///
/// Uploads may be PNG, JPEG or WebP; the format is sniffed from the
/// leading bytes, not taken from the request. Every color type and bit
/// depth is normalized to 8-bit RGBA on decode, with missing alpha
/// filled with 255.
///
/// Output is always 8-bit RGBA PNG, optionally re-compressed with oxipng.
#[derive(Debug, Clone)]
pub struct PngCodec {
    /// Largest accepted image (width * height)
    max_pixels: u64,
    /// Run oxipng on encoded output
    optimize: bool,
}

/// Decoder allocation budget per accepted pixel
const ALLOC_BYTES_PER_PIXEL: u64 = 16;

impl PngCodec {
    pub fn new(max_pixels: u64, optimize: bool) -> Self {
        Self {
            max_pixels,
            optimize,
        }
    }

    /// Decode an uploaded image into an RGBA raster
    pub fn decode(&self, bytes: &[u8]) -> Result<RasterBuffer, CodecError> {
        if bytes.is_empty() {
            return Err(CodecError::EmptyUpload);
        }

        let format = image::guess_format(bytes)?;

        // Header only; pixels are not touched until the size is accepted
        let (width, height) =
            ImageReader::with_format(Cursor::new(bytes), format).into_dimensions()?;
        if width as u64 * height as u64 > self.max_pixels {
            return Err(CodecError::ImageTooLarge {
                width,
                height,
                max: self.max_pixels,
            });
        }

        let mut limits = Limits::default();
        limits.max_image_width = Some(width);
        limits.max_image_height = Some(height);
        limits.max_alloc = Some(self.max_pixels.saturating_mul(ALLOC_BYTES_PER_PIXEL));

        let mut reader = ImageReader::with_format(Cursor::new(bytes), format);
        reader.limits(limits);
        let rgba = reader.decode()?.to_rgba8().into_raw();

        tracing::debug!(width, height, ?format, "Decoded upload");

        RasterBuffer::new(width, height, rgba).map_err(|e| CodecError::Decode(e.to_string()))
    }

    /// Encode an RGBA raster as PNG
    pub fn encode(&self, raster: &RasterBuffer) -> Result<Vec<u8>, CodecError> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, raster.width(), raster.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_compression(png::Compression::Fast);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(raster.as_bytes())?;
        }
        let png_bytes = buf.into_inner();

        if !self.optimize {
            return Ok(png_bytes);
        }

        // Lossless re-compression; keep the fast encoding if oxipng fails
        let optimized = oxipng::optimize_from_memory(
            &png_bytes,
            &oxipng::Options {
                strip: oxipng::StripChunks::Safe,
                optimize_alpha: false,
                ..Default::default()
            },
        )
        .unwrap_or_else(|e| {
            tracing::warn!(%e, "oxipng failed, using unoptimized PNG");
            png_bytes
        });
        Ok(optimized)
    }
}

impl Default for PngCodec {
    fn default() -> Self {
        Self::new(u64::MAX, false)
    }
}

/// Wrap PNG bytes as a `data:` URL
pub fn to_data_url(png_bytes: &[u8]) -> String {
    format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(png_bytes)
    )
}
