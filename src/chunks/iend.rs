use std::borrow::Cow;

use nom::{combinator::eof, IResult};

use super::ParseableChunk;

pub(crate) const HEADER: &[u8; 4] = b"IEND";

pub(crate) struct IENDChunk;
impl<'a> ParseableChunk<'a> for IENDChunk {
    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        let (rest, _) = eof(chunk_data)?;
        Ok((rest, Self))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(&[])
    }
}
