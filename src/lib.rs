//! # Bitmap Run-Length Encoding Scheme
//!
//! The compressed stream is a flat sequence of W-bit unsigned fields, MSB first.
//! There is no header, no length prefix and no magic number, so W must be agreed
//! out of band (default 4).
//!
//! ```text
//!  field #   0      1      2      3     ...
//!          ┌──────┬──────┬──────┬──────┐
//!          │ len  │ len  │ len  │ len  │ ...
//!          └──────┴──────┴──────┴──────┘
//!   value    0      1      0      1
//! ```
//!
//! Field parity gives the bit value: even fields count `0`s, odd fields
//! count `1`s. A stream starting with `1` opens with a zero-length field.
//!
//! A field holds at most `MAX = 2^W - 1`. A longer run is written as `MAX`,
//! then a zero-length run of the other value, then the rest of the run.
//! For example, with W = 4, seventeen `1`s encode as `[0, 15, 0, 2]`.
//!
//! The writer pads the last byte with zero bits. When decoding, a zero-filled
//! tail shorter than one byte and shorter than W is ignored; a tail of W or
//! more zero bits decodes as zero-length fields, which add nothing.

#[macro_use]
extern crate log;

pub mod bitio;
mod derle;
mod error;
pub mod picture;
mod rle;
mod width;

pub use bitio::{BitReader, BitWriter};
pub use derle::{decode, expand, DeRle};
pub use error::{Error, Result};
pub use rle::{compress, encode, Fields, Rle, RunCounter};
pub use width::{Count, FieldWidth};

#[cfg(test)]
static INIT: std::sync::Once = std::sync::Once::new();

/// Setup function that is only run once, even if called multiple times.
#[cfg(test)]
fn setup() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}
