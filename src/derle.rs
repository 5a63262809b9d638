use crate::bitio::{BitReader, BitWriter};
use crate::error::{Error, Result};
use crate::width::{Count, FieldWidth};
use std::io;

pub fn decode<I: IntoIterator<Item = Count>>(fields: I) -> Vec<bool> {
    let mut current = false;
    let mut bits = vec![];
    for count in fields {
        bits.extend(std::iter::repeat(current).take(count.get() as usize));
        current = !current;
    }
    bits
}

/// Streaming decoder writing the expanded bits to `W`.
pub struct DeRle<W: io::Write> {
    writer: BitWriter<W>,
    current: bool,
    fields: u64,
}

impl<W: io::Write> DeRle<W> {
    pub fn new(writer: W) -> DeRle<W> {
        DeRle {
            writer: BitWriter::new(writer),
            current: false,
            fields: 0,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, count: Count) -> Result<()> {
        trace!(
            "field #{}: {} x is_one={}",
            self.fields,
            count.get(),
            self.current
        );
        for _ in 0..count.get() {
            self.writer.write_bit(self.current)?;
        }
        self.current = !self.current;
        self.fields += 1;
        Ok(())
    }

    pub fn finalize(self) -> Result<()> {
        debug!(
            "decoded {} fields ({} bits)",
            self.fields,
            self.writer.bits_written()
        );
        self.writer.finalize()
    }
}

/// Reads `width`-bit fields until `reader` is exhausted and writes the runs
/// they describe.
///
/// A zero-filled partial byte shorter than a field is the encoder's padding
/// and ends the stream; any other short tail is a truncated field.
pub fn expand<R: io::Read, W: io::Write>(
    reader: &mut BitReader<R>,
    writer: W,
    width: FieldWidth,
) -> Result<()> {
    let mut derle = DeRle::new(writer);
    while !reader.is_exhausted()? {
        let value = match reader.read_unsigned(width.bits()) {
            Ok(value) => value,
            Err(Error::Truncated { available, .. }) if reader.is_padding() => {
                trace!("skip {available} padding bits");
                break;
            }
            Err(e) => return Err(e),
        };
        derle.update(width.count(value)?)?;
    }
    debug!("expand read {} bits", reader.bits_read());
    derle.finalize()
}
