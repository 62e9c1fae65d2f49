use std::borrow::Cow;

use nom::{
    combinator::map_res,
    number::complete::{be_u32, u8},
    sequence::tuple,
    IResult,
};

use super::ParseableChunk;
use crate::error::{PngError, PngResult};

pub(crate) const HEADER: &[u8; 4] = b"IHDR";

/// Largest width or height a PNG may declare.
pub const MAX_DIMENSION: u32 = i32::MAX as u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: ColorType,
    pub compression_method: u8,
    pub filter_method: u8,
    pub interlace_method: Interlacing,
}
impl ImageHeader {
    /// Header for an 8-bit, non-interlaced RGB image.
    pub fn truecolor(width: u32, height: u32) -> PngResult<Self> {
        validate_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            bit_depth: 8,
            color_type: ColorType::Truecolor,
            compression_method: 0,
            filter_method: 0,
            interlace_method: Interlacing::None,
        })
    }

    /// Bytes per complete pixel, rounded up to one; the distance filters look back.
    pub(crate) fn filter_width(&self) -> usize {
        let sample_width = usize::max(self.bit_depth as usize / 8, 1);
        self.color_type.channel_count() as usize * sample_width
    }

    /// Bits per pixel.
    pub(crate) fn pixel_width(&self) -> usize {
        self.color_type.channel_count() as usize * self.bit_depth as usize
    }

    /// Length of one scanline including its leading filter-type byte.
    pub fn scanline_size(&self) -> usize {
        (self.width as usize * self.pixel_width()).div_ceil(8) + 1
    }
}
impl<'a> ParseableChunk<'a> for ImageHeader {
    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, (width, height, bit_depth, color_type, compression_method, filter_method)) =
            tuple((
                be_u32,
                be_u32,
                u8,
                map_res(u8, ColorType::try_from),
                u8,
                u8,
            ))(chunk_data)?;
        let (rest, interlace_method) = map_res(u8, Interlacing::try_from)(rest)?;
        Ok((
            rest,
            ImageHeader {
                width,
                height,
                bit_depth,
                color_type,
                compression_method,
                filter_method,
                interlace_method,
            },
        ))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        let mut bytes = Vec::with_capacity(13);
        bytes.extend(self.width.to_be_bytes());
        bytes.extend(self.height.to_be_bytes());
        bytes.extend([
            self.bit_depth,
            self.color_type as u8,
            self.compression_method,
            self.filter_method,
            self.interlace_method as u8,
        ]);
        Cow::Owned(bytes)
    }
}

pub(crate) fn validate_dimensions(width: u32, height: u32) -> PngResult<()> {
    if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
        return Err(PngError::InvalidDimensions { width, height });
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorType {
    Greyscale = 0,
    Truecolor = 2,
    IndexedColor = 3,
    GreyscaleWithAlpha = 4,
    TruecolorWithAlpha = 6,
}
impl TryFrom<u8> for ColorType {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::Greyscale),
            2 => Ok(Self::Truecolor),
            3 => Ok(Self::IndexedColor),
            4 => Ok(Self::GreyscaleWithAlpha),
            6 => Ok(Self::TruecolorWithAlpha),
            v => Err(PngError::malformed(format!("invalid color type {v}"))),
        }
    }
}
impl ColorType {
    pub(crate) fn channel_count(&self) -> u8 {
        match self {
            Self::Greyscale => 1,
            Self::IndexedColor => 1,
            Self::GreyscaleWithAlpha => 2,
            Self::Truecolor => 3,
            Self::TruecolorWithAlpha => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interlacing {
    None = 0,
    Adam7 = 1,
}
impl TryFrom<u8> for Interlacing {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Adam7),
            v => Err(PngError::malformed(format!("invalid interlace method {v}"))),
        }
    }
}
