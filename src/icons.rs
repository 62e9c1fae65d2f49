//! Browser-extension icons: square PNGs filled with a horizontal gradient.

use crate::{encoder::Encoder, error::PngResult, pixel::Rgb};

/// Sizes an extension manifest asks for.
pub const ICON_SIZES: [u32; 4] = [16, 32, 48, 128];

/// Left-to-right linear blend between two colors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gradient {
    pub start: Rgb,
    pub end: Rgb,
}
impl Default for Gradient {
    fn default() -> Self {
        Self {
            start: Rgb::new(102, 126, 234),
            end: Rgb::new(118, 75, 162),
        }
    }
}
impl Gradient {
    /// Color of column `x` in an image `width` pixels wide: each channel is
    /// `start + round((end - start) * x / width)`, so the last column stops
    /// just short of `end`. Images one pixel wide are solid `start`.
    pub fn color_at(&self, x: u32, width: u32) -> Rgb {
        let ratio = if width > 1 {
            x as f64 / width as f64
        } else {
            0.0
        };
        let blend = |from: u8, to: u8| {
            from as i32 + ((to as i32 - from as i32) as f64 * ratio).round() as i32
        };
        Rgb::clamped(
            blend(self.start.red, self.end.red),
            blend(self.start.green, self.end.green),
            blend(self.start.blue, self.end.blue),
        )
    }
}

/// Encodes a `size` x `size` icon.
pub fn render_icon(size: u32, gradient: &Gradient, compression_level: u8) -> PngResult<Vec<u8>> {
    Encoder::new(size, size)
        .compression_level(compression_level)
        .encode(|x, _| gradient.color_at(x, size))
}

pub fn icon_file_name(size: u32) -> String {
    format!("icon{size}.png")
}
