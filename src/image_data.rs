use miniz_oxide::{
    deflate::compress_to_vec_zlib,
    inflate::{decompress_to_vec_zlib_with_limit, TINFLStatus},
};

use crate::{
    chunks::ihdr::ImageHeader,
    error::{PngError, PngResult},
    filters::reconstruct_scanlines,
};

/// Highest level miniz_oxide accepts; anything above is treated as this.
pub const MAX_COMPRESSION_LEVEL: u8 = 10;

/// Wraps raw scanlines in a zlib stream, ready to become IDAT data.
pub(crate) fn compress_data(data: &[u8], level: u8) -> Vec<u8> {
    let compressed = compress_to_vec_zlib(data, level.min(MAX_COMPRESSION_LEVEL));
    log::trace!(
        "compressed {} bytes of scanlines to {} at level {level}",
        data.len(),
        compressed.len()
    );
    compressed
}

/// Inflates concatenated IDAT data and undoes scanline filtering. Inflation
/// stops once the stream exceeds what the header says the image holds.
pub(crate) fn decompress_data(compressed_data: &[u8], header: &ImageHeader) -> PngResult<Vec<u8>> {
    let expected = header
        .scanline_size()
        .checked_mul(header.height as usize)
        .ok_or_else(|| {
            PngError::malformed(format!(
                "{}x{} image is too large to hold in memory",
                header.width, header.height
            ))
        })?;
    let mut data = decompress_to_vec_zlib_with_limit(compressed_data, expected).map_err(|e| {
        match e.status {
            TINFLStatus::HasMoreOutput => PngError::malformed(format!(
                "image data inflates past the expected {expected} bytes"
            )),
            status => PngError::Decompress(format!("{status:?}")),
        }
    })?;
    if data.len() != expected {
        return Err(PngError::malformed(format!(
            "expected {expected} bytes of image data, found {}",
            data.len()
        )));
    }
    reconstruct_scanlines(&mut data, header)?;

    Ok(data)
}
