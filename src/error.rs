use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The stream ended before a full field (or bit) could be read.
    #[error("truncated input: needed {needed} bits, {available} available")]
    Truncated { needed: u32, available: u32 },

    #[error("invalid field width {0}, expected 1..=32")]
    InvalidWidth(u32),

    #[error("count {value} exceeds field maximum {max}")]
    CountOutOfRange { value: u32, max: u32 },

    #[error("picture must be at least one column wide")]
    InvalidColumns,

    #[error("{bits} bits do not fit a picture {cols} columns wide")]
    PictureTooLarge { bits: u64, cols: u32 },

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> std::io::Error {
        match e {
            Error::Io(e) => e,
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}
