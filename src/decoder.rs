use nom::{bytes::complete::tag, IResult};

use crate::{
    chunks::{
        ihdr::{validate_dimensions, ColorType, ImageHeader, Interlacing},
        iter_chunks, Chunk, ChunkIter, SIGNATURE,
    },
    error::{PngError, PngResult},
    image_data::decompress_data,
    pixel::Rgb,
    scanlines::pixels_from_scanlines,
};

/// Reads PNGs in two steps: the header first, then the pixel data. Only
/// 8-bit, non-interlaced truecolor images can be read to pixels, but any
/// well-formed header can be inspected.
pub struct PngDecoder<'a, State> {
    chunks: ChunkIter<'a>,
    state: State,
}

/// Signature checked, nothing read yet.
pub struct Start;

/// IHDR read; image data still pending.
pub struct Header(ImageHeader);

impl<'a> PngDecoder<'a, Start> {
    /// Fails with [`PngError::Signature`] unless `data` starts with the PNG signature.
    pub fn new(data: &'a [u8]) -> PngResult<Self> {
        let (rest, _) = parse_signature(data).map_err(|_| PngError::Signature)?;
        Ok(Self {
            chunks: iter_chunks(rest),
            state: Start,
        })
    }

    /// Reads the IHDR chunk, which must come first.
    pub fn read_header(mut self) -> PngResult<PngDecoder<'a, Header>> {
        let raw = self
            .chunks
            .next()
            .ok_or_else(|| PngError::malformed("no chunks after signature"))??;
        match Chunk::parse(raw)? {
            Chunk::IHDR(header) => Ok(PngDecoder {
                chunks: self.chunks,
                state: Header(header),
            }),
            _ => Err(PngError::malformed(format!(
                "first chunk is {}, expected IHDR",
                raw.type_name()
            ))),
        }
    }
}

impl<'a> PngDecoder<'a, Header> {
    pub fn header(&self) -> &ImageHeader {
        &self.state.0
    }

    /// Collects every IDAT up to IEND and reconstructs the pixels.
    pub fn read_image(self) -> PngResult<DecodedImage> {
        let header = self.state.0;
        check_supported(&header)?;

        let mut compressed = vec![];
        let mut idat_count = 0;
        let mut finished = false;
        for raw in self.chunks {
            match Chunk::parse(raw?)? {
                Chunk::IDAT(idat) => {
                    compressed.extend_from_slice(idat.data);
                    idat_count += 1;
                }
                Chunk::IEND => finished = true,
                Chunk::IHDR(_) => return Err(PngError::malformed("more than one IHDR chunk")),
                Chunk::Unknown(raw) => {
                    log::trace!("skipping {} chunk", raw.type_name());
                }
            }
        }
        if idat_count == 0 {
            return Err(PngError::malformed("no IDAT chunk"));
        }
        if !finished {
            return Err(PngError::malformed("missing IEND chunk"));
        }
        log::debug!(
            "read {}x{} image from {idat_count} IDAT chunk(s), {} compressed bytes",
            header.width,
            header.height,
            compressed.len()
        );

        let data = decompress_data(&compressed, &header)?;
        let pixels = pixels_from_scanlines(&header, &data);
        Ok(DecodedImage { header, pixels })
    }
}

fn check_supported(header: &ImageHeader) -> PngResult<()> {
    validate_dimensions(header.width, header.height)?;
    if header.color_type != ColorType::Truecolor || header.bit_depth != 8 {
        return Err(PngError::unsupported(format!(
            "{:?} at bit depth {}",
            header.color_type, header.bit_depth
        )));
    }
    if header.interlace_method != Interlacing::None {
        return Err(PngError::unsupported("interlaced images"));
    }
    if header.compression_method != 0 || header.filter_method != 0 {
        return Err(PngError::malformed(format!(
            "compression method {} / filter method {}",
            header.compression_method, header.filter_method
        )));
    }
    Ok(())
}

fn parse_signature(input: &[u8]) -> IResult<&[u8], &[u8]> {
    tag(&SIGNATURE[..])(input)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    pub header: ImageHeader,
    /// Row-major, `width * height` entries.
    pub pixels: Vec<Rgb>,
}

impl DecodedImage {
    pub fn width(&self) -> u32 {
        self.header.width
    }

    pub fn height(&self) -> u32 {
        self.header.height
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x >= self.width() || y >= self.height() {
            return None;
        }
        self.pixels
            .get(y as usize * self.width() as usize + x as usize)
            .copied()
    }
}

/// Decodes a whole 8-bit truecolor PNG.
pub fn decode(bytes: &[u8]) -> PngResult<DecodedImage> {
    PngDecoder::new(bytes)?.read_header()?.read_image()
}
