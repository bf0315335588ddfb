//! Test fixtures: small PNG, JPEG and WebP images built in memory.

use base64::Engine;
use vision_sim::RasterBuffer;

/// 1x1 lossy (VP8) WebP
const WEBP_LOSSY_1X1: &str = "UklGRiIAAABXRUJQVlA4IBYAAAAwAQCdASoBAAEADsD+JaQAA3AAAAAA";

/// 1x1 lossless (VP8L) WebP
const WEBP_LOSSLESS_1X1: &str = "UklGRhoAAABXRUJQVlA4TA0AAAAvAAAAEAcQERGIiP4HAA==";

/// Encode RGBA pixels as an 8-bit PNG
pub fn png_from_rgba(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf
}

/// Encode RGB pixels (no alpha) as an 8-bit PNG
pub fn png_from_rgb(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    let mut buf = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().expect("Failed to write PNG header");
        writer
            .write_image_data(data)
            .expect("Failed to write PNG data");
    }
    buf
}

/// A single-colour opaque image
pub fn solid_png(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let raster = RasterBuffer::filled(width, height, [rgb[0], rgb[1], rgb[2], 255]);
    png_from_rgba(width, height, raster.as_bytes())
}

/// A single-colour JPEG at high quality
pub fn solid_jpeg(width: u32, height: u32, rgb: [u8; 3]) -> Vec<u8> {
    let data: Vec<u8> = rgb
        .iter()
        .copied()
        .cycle()
        .take((width * height * 3) as usize)
        .collect();
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 95)
        .encode(&data, width, height, image::ColorType::Rgb8)
        .expect("Failed to encode JPEG");
    buf
}

/// Lossy and lossless single-pixel WebP files
pub fn webp_1x1() -> [Vec<u8>; 2] {
    [WEBP_LOSSY_1X1, WEBP_LOSSLESS_1X1].map(|encoded| {
        base64::engine::general_purpose::STANDARD
            .decode(encoded)
            .expect("Invalid WebP fixture")
    })
}

/// Black/white checkerboard, one-pixel cells
pub fn checkerboard_png(size: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let v = if (x + y) % 2 == 0 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v, 255]);
        }
    }
    png_from_rgba(size, size, &data)
}

/// Decode a PNG response body into RGBA pixels
pub fn decode(png_bytes: &[u8]) -> RasterBuffer {
    let mut decoder = png::Decoder::new(png_bytes);
    decoder.set_transformations(png::Transformations::EXPAND);
    let mut reader = decoder.read_info().expect("Failed to read PNG info");
    let mut buf = vec![0; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut buf).expect("Failed to decode PNG");
    buf.truncate(frame.buffer_size());
    assert_eq!(frame.color_type, png::ColorType::Rgba, "previews are RGBA");
    RasterBuffer::new(frame.width, frame.height, buf).expect("Decoded size mismatch")
}
