pub mod png_codec;

pub use png_codec::{to_data_url, PngCodec};
