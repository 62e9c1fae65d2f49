use crate::{
    chunks::ihdr::ImageHeader,
    error::{PngError, PngResult},
};

/// Per-scanline prediction. `x` is the byte being processed, `a` the
/// corresponding byte of the pixel to the left, `b` the byte above and `c`
/// the byte above-left; missing neighbours are zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Filter {
    None = 0,
    Sub = 1,
    Up = 2,
    Average = 3,
    Paeth = 4,
}
impl Filter {
    pub fn reconstruct(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_add(a),
            Filter::Up => x.wrapping_add(b),
            Filter::Average => x.wrapping_add(((a as u16 + b as u16) / 2) as u8),
            Filter::Paeth => x.wrapping_add(paeth_predictor(a, b, c)),
        }
    }

    #[cfg(test)]
    pub(crate) fn filter(&self, x: u8, a: u8, b: u8, c: u8) -> u8 {
        match self {
            Filter::None => x,
            Filter::Sub => x.wrapping_sub(a),
            Filter::Up => x.wrapping_sub(b),
            Filter::Average => x.wrapping_sub(((a as u16 + b as u16) / 2) as u8),
            Filter::Paeth => x.wrapping_sub(paeth_predictor(a, b, c)),
        }
    }
}
impl TryFrom<u8> for Filter {
    type Error = PngError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::None),
            1 => Ok(Self::Sub),
            2 => Ok(Self::Up),
            3 => Ok(Self::Average),
            4 => Ok(Self::Paeth),
            i => Err(PngError::malformed(format!("unknown filter type {i}"))),
        }
    }
}

fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
    let p = a as i16 + b as i16 - c as i16;
    let pa = (p - a as i16).abs();
    let pb = (p - b as i16).abs();
    let pc = (p - c as i16).abs();
    if pa <= pb && pa <= pc {
        a
    } else if pb <= pc {
        b
    } else {
        c
    }
}

/// Undoes scanline filtering in place. `data` must hold exactly
/// `header.height` scanlines.
pub(crate) fn reconstruct_scanlines(data: &mut [u8], header: &ImageHeader) -> PngResult<()> {
    let scanline_size = header.scanline_size();
    let bpp = header.filter_width();
    let mut previous = vec![0u8; scanline_size - 1];
    for (row, scanline) in data.chunks_mut(scanline_size).enumerate() {
        let Some((filter_byte, line)) = scanline.split_first_mut() else {
            continue;
        };
        let filter = Filter::try_from(*filter_byte)
            .map_err(|e| PngError::malformed(format!("scanline {row}: {e}")))?;
        for i in 0..line.len() {
            let (a, c) = if i >= bpp {
                (line[i - bpp], previous[i - bpp])
            } else {
                (0, 0)
            };
            line[i] = filter.reconstruct(line[i], a, previous[i], c);
        }
        previous[..line.len()].copy_from_slice(line);
    }
    Ok(())
}
