use crate::bitio::{BitReader, BitWriter};
use crate::error::Result;
use crate::width::{Count, FieldWidth};
use std::io;

/// Run counting state shared by every encoding surface.
///
/// The first run is always a run of `false`; an input starting with `true`
/// yields a leading zero-length field. A run reaching `max` is cut into a
/// `max` field followed by a zero-length field of the other value, so field
/// parity keeps naming the bit value.
#[derive(Copy, Clone, Debug)]
pub struct RunCounter {
    width: FieldWidth,
    current: bool,
    count: u32,
}

/// Fields produced by a single [`RunCounter::push`], at most two.
#[derive(Copy, Clone, Debug)]
pub struct Fields {
    buf: [Count; 2],
    len: u8,
    pos: u8,
}

impl Fields {
    fn none() -> Fields {
        Fields {
            buf: [Count::ZERO; 2],
            len: 0,
            pos: 0,
        }
    }

    fn one(count: Count) -> Fields {
        Fields {
            buf: [count, Count::ZERO],
            len: 1,
            pos: 0,
        }
    }

    fn escape(max: Count) -> Fields {
        Fields {
            buf: [max, Count::ZERO],
            len: 2,
            pos: 0,
        }
    }
}

impl Iterator for Fields {
    type Item = Count;

    fn next(&mut self) -> Option<Count> {
        if self.pos == self.len {
            return None;
        }
        let count = self.buf[self.pos as usize];
        self.pos += 1;
        Some(count)
    }
}

impl RunCounter {
    pub fn new(width: FieldWidth) -> RunCounter {
        RunCounter {
            width,
            current: false,
            count: 0,
        }
    }

    #[inline(always)]
    pub fn push(&mut self, bit: bool) -> Fields {
        let fields = if bit != self.current {
            let fields = Fields::one(self.take());
            self.current = bit;
            fields
        } else if self.count == self.width.max() {
            trace!("escape: run of {} reached max, is_one={}", self.count, bit);
            Fields::escape(self.take())
        } else {
            Fields::none()
        };
        self.count += 1;
        fields
    }

    #[inline(always)]
    fn take(&mut self) -> Count {
        debug_assert!(self.count <= self.width.max());
        let count = Count(self.count);
        self.count = 0;
        count
    }

    /// Flushes the in-progress run, possibly zero-length.
    pub fn finish(mut self) -> Count {
        self.take()
    }
}

pub fn encode<I: IntoIterator<Item = bool>>(bits: I, width: FieldWidth) -> Vec<Count> {
    let mut counter = RunCounter::new(width);
    let mut fields = vec![];
    for bit in bits {
        fields.extend(counter.push(bit));
    }
    fields.push(counter.finish());
    fields
}

/// Streaming encoder writing fixed-width fields to `W`.
pub struct Rle<W: io::Write> {
    counter: RunCounter,
    writer: BitWriter<W>,
    fields: u64,
}

impl<W: io::Write> Rle<W> {
    pub fn new(writer: W, width: FieldWidth) -> Self {
        Rle {
            counter: RunCounter::new(width),
            writer: BitWriter::new(writer),
            fields: 0,
        }
    }

    #[inline(always)]
    pub fn update(&mut self, bit: bool) -> Result<()> {
        for count in self.counter.push(bit) {
            self.emit(count)?;
        }
        Ok(())
    }

    pub fn update_byte(&mut self, byte: u8) -> Result<()> {
        for shift in (0..8).rev() {
            self.update((byte >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    #[inline(always)]
    fn emit(&mut self, count: Count) -> Result<()> {
        trace!("field #{}: {}", self.fields, count.get());
        self.fields += 1;
        self.writer.write_unsigned(count.get(), self.counter.width.bits())
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn finalize(mut self) -> Result<()> {
        let last = self.counter.finish();
        self.emit(last)?;
        debug!(
            "encoded {} fields ({} bits)",
            self.fields,
            self.writer.bits_written()
        );
        self.writer.finalize()
    }
}

impl<W: io::Write> io::Write for Rle<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        for byte in buf.iter() {
            self.update_byte(*byte)?;
        }
        Ok(buf.len())
    }

    /// Delivers the fields completed so far. The run in progress is only
    /// written by [`Rle::finalize`].
    fn flush(&mut self) -> io::Result<()> {
        Ok(self.writer.flush()?)
    }
}

/// Reads bits until `reader` is exhausted and writes their run lengths.
pub fn compress<R: io::Read, W: io::Write>(
    reader: &mut BitReader<R>,
    writer: W,
    width: FieldWidth,
) -> Result<()> {
    let mut rle = Rle::new(writer, width);
    while !reader.is_exhausted()? {
        rle.update(reader.read_bit()?)?;
    }
    debug!("compress read {} bits", reader.bits_read());
    rle.finalize()
}

#[cfg(test)]
mod tests {
    use super::{compress, encode, Rle};
    use crate::bitio::BitReader;
    use crate::width::FieldWidth;
    use crate::setup;
    use std::io::Write;

    // (input, compressed) with the default 4-bit fields
    const TEST_VECTOR: [(&str, &str); 9] = [
        ("", "00"),
        ("00", "80"),
        ("ff", "08"),
        ("0f", "44"),
        ("f0", "0440"),
        ("aa", "0111111110"),
        ("0000", "f010"),
        ("ffff", "0f01"),
        ("00ff", "88"),
    ];

    fn bits(s: &str) -> Vec<bool> {
        s.chars().map(|c| c == '1').collect()
    }

    fn values(width: u32, s: &str) -> Vec<u32> {
        let width = FieldWidth::new(width).unwrap();
        encode(bits(s), width).into_iter().map(|c| c.get()).collect()
    }

    #[test]
    fn test_encode_scenarios() {
        setup();
        assert_eq!(values(4, ""), vec![0]);
        assert_eq!(values(4, "000"), vec![3]);
        assert_eq!(values(4, "111"), vec![0, 3]);
        assert_eq!(values(4, "0011"), vec![2, 2]);
        assert_eq!(values(4, &"1".repeat(17)), vec![0, 15, 0, 2]);
    }

    #[test]
    fn test_escape_boundary() {
        setup();
        // exactly max does not escape
        assert_eq!(values(4, &"0".repeat(15)), vec![15]);
        assert_eq!(values(4, &"0".repeat(16)), vec![15, 0, 1]);
        assert_eq!(values(4, &"0".repeat(30)), vec![15, 0, 15]);
        assert_eq!(values(4, &"0".repeat(31)), vec![15, 0, 15, 0, 1]);
        assert_eq!(values(4, &format!("{}1", "0".repeat(16))), vec![15, 0, 1, 1]);
        assert_eq!(values(1, "00"), vec![1, 0, 1]);
        assert_eq!(values(1, "0110"), vec![1, 1, 0, 1, 1]);
    }

    #[test]
    fn test_fields_within_max() {
        setup();
        for w in 1..=5 {
            let width = FieldWidth::new(w).unwrap();
            let input = format!("{}{}0{}", "1".repeat(70), "0".repeat(33), "1".repeat(5));
            for count in encode(bits(&input), width) {
                assert!(count.get() <= width.max());
            }
        }
    }

    #[test]
    fn test_rle_encode() {
        setup();
        for (input, expected) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected = hex::decode(expected).unwrap();
            let mut out = vec![];
            let mut rle = Rle::new(&mut out, FieldWidth::default());
            rle.write_all(&input).unwrap();
            rle.finalize().unwrap();
            assert_eq!(expected, out);
        }
    }

    #[test]
    fn test_flush_delivers_completed_fields() {
        setup();
        let width = FieldWidth::new(8).unwrap();
        let mut out = vec![];
        let mut rle = Rle::new(&mut out, width);
        // the first 1 closes a run of four 0s
        rle.write_all(&[0x0F]).unwrap();
        assert!(rle.get_ref().is_empty());
        rle.flush().unwrap();
        assert_eq!(rle.get_ref().as_slice(), &[0x04]);
        rle.finalize().unwrap();
        assert_eq!(out, vec![0x04, 0x04]);
    }

    #[test]
    fn test_compress_reader() {
        setup();
        for (input, expected) in TEST_VECTOR.into_iter() {
            let input = hex::decode(input).unwrap();
            let expected = hex::decode(expected).unwrap();
            let mut reader = BitReader::new(input.as_slice());
            let mut out = vec![];
            compress(&mut reader, &mut out, FieldWidth::default()).unwrap();
            assert_eq!(expected, out);
        }
    }

    #[test]
    fn test_compress_narrow_width() {
        setup();
        // [7, 0, 1] -> 111 000 001
        let mut reader = BitReader::new(&[0u8][..]);
        let mut out = vec![];
        compress(&mut reader, &mut out, FieldWidth::new(3).unwrap()).unwrap();
        assert_eq!(out, vec![0xE0, 0x80]);
    }
}
