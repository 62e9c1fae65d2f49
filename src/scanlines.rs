use crate::{chunks::ihdr::ImageHeader, filters::Filter, pixel::Rgb};

/// Lays out raw image data for `header`: each row is a `Filter::None` byte
/// followed by the row's pixels, left to right. `color_fn` is called exactly
/// once per pixel, in row-major order.
pub(crate) fn build_scanlines<F>(header: &ImageHeader, mut color_fn: F) -> Vec<u8>
where
    F: FnMut(u32, u32) -> Rgb,
{
    let mut data = Vec::with_capacity(header.scanline_size() * header.height as usize);
    for y in 0..header.height {
        data.push(Filter::None as u8);
        for x in 0..header.width {
            data.extend(color_fn(x, y).to_bytes());
        }
    }
    data
}

/// Same layout as [`build_scanlines`], from an existing row-major pixel buffer.
pub(crate) fn scanlines_from_pixels(header: &ImageHeader, pixels: &[Rgb]) -> Vec<u8> {
    let mut data = Vec::with_capacity(header.scanline_size() * header.height as usize);
    for row in pixels.chunks(header.width as usize) {
        data.push(Filter::None as u8);
        data.extend(row.iter().flat_map(|p| p.to_bytes()));
    }
    data
}

/// Splits reconstructed (unfiltered) image data back into pixels, dropping
/// each row's filter-type byte.
pub(crate) fn pixels_from_scanlines(header: &ImageHeader, data: &[u8]) -> Vec<Rgb> {
    data.chunks(header.scanline_size())
        .flat_map(|scanline| scanline[1..].chunks_exact(3))
        .map(|p| Rgb::new(p[0], p[1], p[2]))
        .collect()
}
