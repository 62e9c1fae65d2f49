use std::borrow::Cow;

use nom::{
    bytes::complete::take,
    combinator::map,
    number::complete::be_u32,
    sequence::tuple,
    IResult,
};

use crate::{
    crc::{calculate_crc, Crc32},
    error::{PngError, PngResult},
};

pub mod idat;
pub mod iend;
pub mod ihdr;

pub(crate) const SIGNATURE: &[u8; 8] = b"\x89PNG\x0d\x0a\x1a\x0a";

#[allow(clippy::upper_case_acronyms)]
#[derive(Debug)]
pub enum Chunk<'a> {
    IHDR(ihdr::ImageHeader),
    IDAT(idat::IDATChunk<&'a [u8]>),
    IEND,
    Unknown(RawChunk<'a>),
}
impl<'a> Chunk<'a> {
    pub fn parse(raw: RawChunk<'a>) -> PngResult<Self> {
        match &raw.chunk_type {
            ihdr::HEADER => Ok(Chunk::IHDR(parse_payload(&raw)?)),
            idat::HEADER => Ok(Chunk::IDAT(parse_payload(&raw)?)),
            iend::HEADER => {
                let iend::IENDChunk = parse_payload(&raw)?;
                Ok(Chunk::IEND)
            }
            _ => Ok(Chunk::Unknown(raw)),
        }
    }
}

/// A framed chunk as it appears on the wire, before its payload is interpreted.
#[derive(Debug, Clone, Copy)]
pub struct RawChunk<'a> {
    pub chunk_type: [u8; 4],
    pub data: &'a [u8],
    pub crc: u32,
}
impl RawChunk<'_> {
    pub fn type_name(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.chunk_type)
    }

    pub fn expected_crc(&self) -> u32 {
        let mut crc = Crc32::new();
        crc.update(&self.chunk_type);
        crc.update(self.data);
        crc.finish()
    }
}

/// Iterates over the chunks following the signature. Every chunk's CRC is
/// checked; iteration ends after `IEND`, the end of input, or the first error.
pub fn iter_chunks(source: &[u8]) -> ChunkIter<'_> {
    ChunkIter {
        source,
        finished: false,
    }
}

pub struct ChunkIter<'a> {
    source: &'a [u8],
    finished: bool,
}

impl<'a> Iterator for ChunkIter<'a> {
    type Item = PngResult<RawChunk<'a>>;
    fn next(&mut self) -> Option<Self::Item> {
        if self.finished || self.source.is_empty() {
            return None;
        }
        match raw_chunk(self.source) {
            Ok((rest, chunk)) => {
                self.source = rest;
                let expected = chunk.expected_crc();
                if chunk.crc != expected {
                    self.finished = true;
                    return Some(Err(PngError::chunk(format!(
                        "CRC mismatch in {} chunk: stored {:08x}, computed {expected:08x}",
                        chunk.type_name(),
                        chunk.crc,
                    ))));
                }
                if &chunk.chunk_type == iend::HEADER {
                    self.finished = true;
                }
                Some(Ok(chunk))
            }
            Err(e) => {
                self.finished = true;
                Some(Err(PngError::chunk(format!(
                    "truncated chunk ({})",
                    describe(&e)
                ))))
            }
        }
    }
}

fn raw_chunk(input: &[u8]) -> IResult<&[u8], RawChunk<'_>> {
    let (input, length) = be_u32(input)?;
    let (input, (chunk_type, data, crc)) = tuple((
        map(be_u32, u32::to_be_bytes),
        take(length),
        be_u32,
    ))(input)?;
    Ok((
        input,
        RawChunk {
            chunk_type,
            data,
            crc,
        },
    ))
}

fn parse_payload<'a, C: ParseableChunk<'a>>(raw: &RawChunk<'a>) -> PngResult<C> {
    let (rest, chunk) = C::from_bytes(raw.data).map_err(|e| {
        PngError::chunk(format!("invalid {} chunk ({})", raw.type_name(), describe(&e)))
    })?;
    if !rest.is_empty() {
        return Err(PngError::chunk(format!(
            "{} unexpected trailing bytes in {} chunk",
            rest.len(),
            raw.type_name()
        )));
    }
    Ok(chunk)
}

fn describe(err: &nom::Err<nom::error::Error<&[u8]>>) -> String {
    match err {
        nom::Err::Incomplete(_) => "incomplete input".to_owned(),
        nom::Err::Error(e) | nom::Err::Failure(e) => format!("{:?}", e.code),
    }
}

/// Frames `payload` as `length || type || payload || crc(type || payload)`.
pub fn write_chunk(chunk_type: &[u8; 4], payload: &[u8]) -> PngResult<Vec<u8>> {
    let length = u32::try_from(payload.len())
        .ok()
        .filter(|&len| len <= i32::MAX as u32)
        .ok_or_else(|| {
            PngError::chunk(format!(
                "{} byte payload is too large for a single chunk",
                payload.len()
            ))
        })?;
    let mut bytes = Vec::with_capacity(payload.len() + 12);
    bytes.extend(length.to_be_bytes());
    bytes.extend(chunk_type);
    bytes.extend(payload);
    let crc = calculate_crc(&bytes[4..]).to_be_bytes();
    bytes.extend(crc);
    Ok(bytes)
}

pub(crate) trait ParseableChunk<'a>: Sized {
    const HEADER: &'static [u8; 4];

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self>;
    fn payload(&self) -> Cow<'_, [u8]>;

    fn to_bytes(&self) -> PngResult<Vec<u8>> {
        write_chunk(Self::HEADER, &self.payload())
    }
}
