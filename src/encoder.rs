use crate::{
    chunks::{idat::IDATChunk, iend::IENDChunk, ihdr::ImageHeader, ParseableChunk, SIGNATURE},
    error::{PngError, PngResult},
    image_data::compress_data,
    pixel::Rgb,
    scanlines::{build_scanlines, scanlines_from_pixels},
};

/// zlib's own default, a reasonable size/speed trade-off for small images.
pub const DEFAULT_COMPRESSION_LEVEL: u8 = 6;

/// Writes 8-bit truecolor PNGs as `signature || IHDR || IDAT || IEND`.
///
/// ```
/// use icon_png::{Encoder, Rgb};
///
/// let png = Encoder::new(4, 2)
///     .compression_level(9)
///     .encode(|x, y| Rgb::new(x as u8 * 60, y as u8 * 120, 0))
///     .unwrap();
/// assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Encoder {
    width: u32,
    height: u32,
    compression_level: u8,
}

impl Encoder {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    /// zlib level, 0 (stored) to 10. Higher values are clamped.
    pub fn compression_level(mut self, level: u8) -> Self {
        self.compression_level = level;
        self
    }

    /// Encodes the image whose pixel at `(x, y)` is `color_fn(x, y)`.
    ///
    /// Dimensions are checked before `color_fn` is ever called.
    pub fn encode<F>(&self, color_fn: F) -> PngResult<Vec<u8>>
    where
        F: FnMut(u32, u32) -> Rgb,
    {
        let header = ImageHeader::truecolor(self.width, self.height)?;
        let scanlines = build_scanlines(&header, color_fn);
        self.assemble(&header, &scanlines)
    }

    /// Encodes a row-major pixel buffer holding exactly `width * height` pixels.
    pub fn encode_pixels(&self, pixels: &[Rgb]) -> PngResult<Vec<u8>> {
        let header = ImageHeader::truecolor(self.width, self.height)?;
        let expected = self.width as usize * self.height as usize;
        if pixels.len() != expected {
            return Err(PngError::PixelCount {
                expected,
                actual: pixels.len(),
            });
        }
        let scanlines = scanlines_from_pixels(&header, pixels);
        self.assemble(&header, &scanlines)
    }

    fn assemble(&self, header: &ImageHeader, scanlines: &[u8]) -> PngResult<Vec<u8>> {
        let compressed = compress_data(scanlines, self.compression_level);
        let idat = IDATChunk {
            data: compressed.as_slice(),
        };
        let mut png = SIGNATURE.to_vec();
        png.extend(header.to_bytes()?);
        png.extend(idat.to_bytes()?);
        png.extend(IENDChunk.to_bytes()?);
        log::debug!(
            "encoded {}x{} image: {} bytes of scanlines, {} byte IDAT, {} bytes total",
            header.width,
            header.height,
            scanlines.len(),
            idat.data.len(),
            png.len()
        );
        Ok(png)
    }
}

/// Encodes a `width` x `height` truecolor PNG with default settings.
pub fn encode<F>(width: u32, height: u32, color_fn: F) -> PngResult<Vec<u8>>
where
    F: FnMut(u32, u32) -> Rgb,
{
    Encoder::new(width, height).encode(color_fn)
}

/// Encodes a row-major pixel buffer with default settings.
pub fn encode_pixels(width: u32, height: u32, pixels: &[Rgb]) -> PngResult<Vec<u8>> {
    Encoder::new(width, height).encode_pixels(pixels)
}
