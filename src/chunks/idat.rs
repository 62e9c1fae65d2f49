use std::borrow::Cow;

use nom::IResult;

use super::ParseableChunk;

pub(crate) const HEADER: &[u8; 4] = b"IDAT";

/// Compressed image data, borrowed from the stream being read or written.
#[derive(Debug)]
pub struct IDATChunk<T> {
    pub data: T,
}
impl<'a> ParseableChunk<'a> for IDATChunk<&'a [u8]> {
    const HEADER: &'static [u8; 4] = HEADER;

    fn from_bytes(chunk_data: &'a [u8]) -> IResult<&'a [u8], Self> {
        Ok((&chunk_data[chunk_data.len()..], IDATChunk { data: chunk_data }))
    }

    fn payload(&self) -> Cow<'_, [u8]> {
        Cow::Borrowed(self.data)
    }
}
