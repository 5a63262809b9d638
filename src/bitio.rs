//! MSB-first bit access over byte streams.
//!
//! The writer pads the final byte with zero bits. The reader has no notion of
//! padding on its own: callers that need to tell padding apart from a
//! truncated field ask [`BitReader::is_padding`] after a short read.

use crate::error::{Error, Result};
use std::io;

const MAX_READ_BITS: u32 = 32;
const SPILL_BYTES: usize = 1024;

#[inline(always)]
fn mask(bits: u32) -> u64 {
    (1u64 << bits) - 1
}

pub struct BitReader<R> {
    reader: R,
    // low `acc_len` bits are unread, oldest bit highest
    acc: u64,
    acc_len: u32,
    eof: bool,
    bits_read: u64,
}

impl<R: io::Read> BitReader<R> {
    pub fn new(reader: R) -> BitReader<R> {
        BitReader {
            reader,
            acc: 0,
            acc_len: 0,
            eof: false,
            bits_read: 0,
        }
    }

    fn fill(&mut self, want: u32) -> Result<()> {
        let mut byte = [0u8; 1];
        while self.acc_len < want && !self.eof {
            match self.reader.read(&mut byte) {
                Ok(0) => {
                    trace!("reader exhausted with {} bits buffered", self.acc_len);
                    self.eof = true;
                }
                Ok(_) => {
                    self.acc = (self.acc << 8) | byte[0] as u64;
                    self.acc_len += 8;
                }
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(())
    }

    pub fn is_exhausted(&mut self) -> Result<bool> {
        self.fill(1)?;
        Ok(self.acc_len == 0)
    }

    pub fn read_bit(&mut self) -> Result<bool> {
        Ok(self.read_unsigned(1)? == 1)
    }

    /// Reads `width` bits as an unsigned value, most significant bit first.
    ///
    /// Nothing is consumed when fewer than `width` bits remain.
    pub fn read_unsigned(&mut self, width: u32) -> Result<u32> {
        if width == 0 || width > MAX_READ_BITS {
            return Err(Error::InvalidWidth(width));
        }
        self.fill(width)?;
        if self.acc_len < width {
            return Err(Error::Truncated {
                needed: width,
                available: self.acc_len,
            });
        }
        let value = (self.acc >> (self.acc_len - width)) & mask(width);
        self.acc_len -= width;
        self.acc &= mask(self.acc_len);
        self.bits_read += width as u64;
        Ok(value as u32)
    }

    /// True when the underlying reader is done and only a zero-filled partial
    /// byte is left.
    pub fn is_padding(&self) -> bool {
        self.eof && self.acc_len < 8 && self.acc == 0
    }

    pub fn bits_read(&self) -> u64 {
        self.bits_read
    }
}

pub struct BitWriter<W: io::Write> {
    writer: W,
    buf: u8,
    bit_len: u8,
    out: Vec<u8>,
    bits_written: u64,
    closed: bool,
}

impl<W: io::Write> BitWriter<W> {
    pub fn new(writer: W) -> BitWriter<W> {
        BitWriter {
            writer,
            buf: 0,
            bit_len: 0,
            out: Vec::with_capacity(SPILL_BYTES),
            bits_written: 0,
            closed: false,
        }
    }

    #[inline(always)]
    pub fn write_bit(&mut self, bit: bool) -> Result<()> {
        self.buf = (self.buf << 1) | bit as u8;
        self.bit_len += 1;
        self.bits_written += 1;
        if self.bit_len == 8 {
            self.out.push(self.buf);
            self.buf = 0;
            self.bit_len = 0;
            if self.out.len() >= SPILL_BYTES {
                self.spill()?;
            }
        }
        Ok(())
    }

    /// Writes the low `width` bits of `value`, most significant bit first.
    pub fn write_unsigned(&mut self, value: u32, width: u32) -> Result<()> {
        if width > MAX_READ_BITS {
            return Err(Error::InvalidWidth(width));
        }
        debug_assert!(width == MAX_READ_BITS || value >> width == 0);
        for shift in (0..width).rev() {
            self.write_bit((value >> shift) & 1 == 1)?;
        }
        Ok(())
    }

    pub fn bits_written(&self) -> u64 {
        self.bits_written
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    /// Delivers every complete byte; a partial byte stays buffered.
    pub fn flush(&mut self) -> Result<()> {
        self.spill()?;
        self.writer.flush()?;
        Ok(())
    }

    fn spill(&mut self) -> Result<()> {
        if !self.out.is_empty() {
            trace!("spill {} bytes: {}", self.out.len(), hex::encode(&self.out));
            self.writer.write_all(&self.out)?;
            self.out.clear();
        }
        Ok(())
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        if self.bit_len != 0 {
            let pad = 8 - self.bit_len;
            trace!("pad last byte with {pad} zero bits");
            self.out.push(self.buf << pad);
            self.buf = 0;
            self.bit_len = 0;
        }
        self.spill()?;
        self.writer.flush()?;
        Ok(())
    }

    /// Pads the last byte with zeros and flushes the underlying writer.
    pub fn finalize(mut self) -> Result<()> {
        self.close()
    }
}

impl<W: io::Write> Drop for BitWriter<W> {
    fn drop(&mut self) {
        if !self.closed {
            if let Err(e) = self.close() {
                debug!("flush on drop failed: {e}");
            }
        }
    }
}
