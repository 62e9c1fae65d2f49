pub mod chunks;
mod crc;
pub mod decoder;
pub mod encoder;
mod error;
mod filters;
pub mod icons;
mod image_data;
mod pixel;
mod scanlines;

pub use decoder::{decode, DecodedImage, PngDecoder};
pub use encoder::{encode, encode_pixels, Encoder, DEFAULT_COMPRESSION_LEVEL};
pub use error::{PngError, PngResult};
pub use image_data::MAX_COMPRESSION_LEVEL;
pub use pixel::Rgb;
