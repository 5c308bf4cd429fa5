use crate::{Error, Result, huffman::Code};

/// A packed bitstream: bits are stored most-significant first and the last
/// byte is completed with `padding` zero bits.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PackedBits {
    pub bytes: Box<[u8]>,
    pub padding: u8,
}

impl PackedBits {
    /// Number of meaningful bits in the stream.
    pub fn bit_len(&self) -> usize {
        self.bytes.len() * 8 - self.padding as usize
    }
}

pub struct BinaryWriterBuilder {
    os: Vec<u8>,
    pub written_bits: usize,
    current: u64,
    free: usize,
}

impl Default for BinaryWriterBuilder {
    fn default() -> Self {
        BinaryWriterBuilder {
            os: Vec::default(),
            written_bits: 0,
            current: 0,
            free: 8,
        }
    }
}

impl BinaryWriterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(bits: usize) -> Self {
        Self { os: Vec::with_capacity(bits.div_ceil(8)), ..Default::default() }
    }

    /// Flushes the partial byte, if any, and reports how many zero bits
    /// were needed to complete it.
    pub fn build(mut self) -> PackedBits {
        let padding = (8 - self.written_bits % 8) % 8;
        if self.free != 8 {
            self.write(self.current);
        }

        debug_assert_eq!(self.os.len() * 8 - padding, self.written_bits);

        PackedBits {
            bytes: self.os.into_boxed_slice(),
            padding: padding as u8,
        }
    }

    #[inline(always)]
    fn write(&mut self, b: u64) {
        self.os.push(b as u8);
    }

    #[inline(always)]
    fn write_in_current(&mut self, b: u64, len: u64) -> u64 {
        self.free -= len as usize;
        self.current |= (b & ((1 << len) - 1)) << self.free;

        if self.free == 0 {
            self.write(self.current);
            self.free = 8;
            self.current = 0;
        }

        self.written_bits += len as usize;
        len
    }

    #[inline(always)]
    pub fn push_bit(&mut self, bit: bool) {
        self.write_in_current(bit as u64, 1);
    }

    /// Appends the lowest `len` bits of `x`, most significant first.
    #[inline(always)]
    pub fn push_bits(&mut self, x: u64, len: u64) -> u64 {
        assert!(len <= 64, "Cannot write {} bits from an integer", len);

        let mut left = len;
        while left > 0 {
            let chunk = left.min(self.free as u64);
            left -= chunk;
            self.write_in_current(x >> left, chunk);
        }

        len
    }

    /// Appends every bit of a prefix code.
    pub fn push_code(&mut self, code: &Code) -> u64 {
        let full = code.len() / 8;
        for &byte in code.as_bytes().iter().take(full) {
            self.push_bits(byte as u64, 8);
        }

        let rest = code.len() % 8;
        if rest != 0 {
            self.push_bits((code.as_bytes()[full] >> (8 - rest)) as u64, rest as u64);
        }

        code.len() as u64
    }
}

/// Reads back the bits of a [`PackedBits`] stream, stopping before the
/// padding.
#[derive(Clone, Debug)]
pub struct BinaryReader<'a> {
    is: &'a [u8],
    pub read_bits: usize,
    limit: usize,
}

impl<'a> BinaryReader<'a> {
    pub fn new(input_stream: &'a [u8], padding: u8) -> Result<Self> {
        if padding > 7 {
            return Err(Error::InvalidPadding(padding));
        }
        if input_stream.is_empty() && padding != 0 {
            return Err(Error::InvalidPadding(padding));
        }

        Ok(BinaryReader {
            is: input_stream,
            read_bits: 0,
            limit: input_stream.len() * 8 - padding as usize,
        })
    }

    pub fn remaining_bits(&self) -> usize {
        self.limit - self.read_bits
    }

    #[inline(always)]
    pub fn read_bit(&mut self) -> Option<bool> {
        if self.read_bits >= self.limit {
            return None;
        }

        let byte = self.is[self.read_bits >> 3];
        let bit = byte >> (7 - (self.read_bits & 7)) & 1;
        self.read_bits += 1;
        Some(bit == 1)
    }
}

impl Iterator for BinaryReader<'_> {
    type Item = bool;

    fn next(&mut self) -> Option<bool> {
        self.read_bit()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining_bits(), Some(self.remaining_bits()))
    }
}

pub fn pack_bits<I: IntoIterator<Item = bool>>(bits: I) -> PackedBits {
    let mut writer = BinaryWriterBuilder::new();
    for bit in bits {
        writer.push_bit(bit);
    }
    writer.build()
}

pub fn unpack_bits(bytes: &[u8], padding: u8) -> Result<Vec<bool>> {
    Ok(BinaryReader::new(bytes, padding)?.collect())
}
