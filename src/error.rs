pub type PngResult<T> = Result<T, PngError>;

#[derive(thiserror::Error, Debug)]
pub enum PngError {
    #[error("invalid dimensions {width}x{height}: both must be between 1 and 2^31-1")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("expected {expected} pixels, got {actual}")]
    PixelCount { expected: usize, actual: usize },

    #[error("input doesn't start with the PNG signature")]
    Signature,

    #[error("chunk error: {0}")]
    Chunk(String),

    #[error("malformed image: {0}")]
    Malformed(String),

    #[error("unsupported image: {0}")]
    Unsupported(String),

    #[error("failed to decompress image data: {0}")]
    Decompress(String),
}

impl PngError {
    pub fn chunk(msg: impl Into<String>) -> Self {
        Self::Chunk(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}
