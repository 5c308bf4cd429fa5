//! The container file format.
//!
//! ```text
//! symbol_count : u32 LE
//! symbol_count x (symbol : u8, frequency : i32 LE)   in table order
//! padding      : u8 in [0, 7]
//! payload      : packed bitstream, MSB first
//! ```
//!
//! The tree is never stored: the decoder rebuilds it from the frequency
//! entries, in the order they appear, with the same merge rule.

use tracing::{debug, warn};

use crate::{
    Error, Result,
    bitstreams::{BinaryReader, BinaryWriterBuilder, PackedBits},
    frequency::{FrequencyTable, K_NUM_SYMBOLS},
    huffman::{CodeTable, HuffNode, HuffmanTree},
};

pub mod files;

const COUNT_LEN: usize = 4;
const ENTRY_LEN: usize = 5;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContainerHeader {
    pub table: FrequencyTable,
    pub padding: u8,
}

impl ContainerHeader {
    /// Size in bytes of the serialized header, padding byte included.
    pub fn header_len(&self) -> usize {
        COUNT_LEN + ENTRY_LEN * self.table.len() + 1
    }

    pub fn write_to(&self, bytes: &mut Vec<u8>) {
        bytes.reserve(self.header_len());
        bytes.extend_from_slice(&(self.table.len() as u32).to_le_bytes());
        for (symbol, freq) in self.table.iter() {
            bytes.push(symbol);
            bytes.extend_from_slice(&(freq as i32).to_le_bytes());
        }
        bytes.push(self.padding);
    }

    /// Parses the header and returns it with the payload that follows.
    /// The padding value is returned as stored; the bit reader validates it.
    pub fn parse(data: &[u8]) -> Result<(Self, &[u8])> {
        let (count, rest) = split_array::<COUNT_LEN>(data)
            .ok_or_else(|| Error::MalformedHeader(format!("{} bytes, too short for a symbol count", data.len())))?;
        let count = u32::from_le_bytes(count) as usize;

        if count > K_NUM_SYMBOLS {
            return Err(Error::MalformedHeader(format!("{count} symbols declared, at most {K_NUM_SYMBOLS} exist")));
        }
        if rest.len() < count * ENTRY_LEN + 1 {
            return Err(Error::MalformedHeader(format!(
                "{count} symbols declared but only {} header bytes follow",
                rest.len()
            )));
        }

        let (entries_bytes, rest) = rest.split_at(count * ENTRY_LEN);
        let mut entries = Vec::with_capacity(count);
        for entry in entries_bytes.chunks_exact(ENTRY_LEN) {
            let freq = i32::from_le_bytes([entry[1], entry[2], entry[3], entry[4]]);
            if freq < 0 {
                return Err(Error::MalformedHeader(format!("negative frequency {freq} for symbol {:#04x}", entry[0])));
            }
            entries.push((entry[0], freq as u32));
        }

        let header = ContainerHeader {
            table: FrequencyTable::from_entries(entries)?,
            padding: rest[0],
        };

        Ok((header, &rest[1..]))
    }
}

fn split_array<const N: usize>(data: &[u8]) -> Option<([u8; N], &[u8])> {
    if data.len() < N {
        return None;
    }
    let (head, rest) = data.split_at(N);
    Some((head.try_into().ok()?, rest))
}

/// A parsed container, payload still packed.
#[derive(Clone, Debug)]
pub struct Container<'a> {
    pub header: ContainerHeader,
    pub payload: &'a [u8],
}

impl<'a> Container<'a> {
    /// Parses and sanity-checks a container without decoding it.
    pub fn inspect(data: &'a [u8]) -> Result<Self> {
        let (header, payload) = ContainerHeader::parse(data)?;
        if header.padding > 7 || (payload.is_empty() && header.padding != 0) {
            return Err(Error::InvalidPadding(header.padding));
        }
        Ok(Container { header, payload })
    }

    /// Number of meaningful bits in the payload.
    pub fn payload_bits(&self) -> usize {
        self.payload.len() * 8 - self.header.padding as usize
    }
}

/// Encodes `input` into a self-describing container.
pub fn compress(input: &[u8]) -> Result<Vec<u8>> {
    let table = FrequencyTable::from_bytes(input)?.with_filler();

    let Some(tree) = HuffmanTree::from_frequencies(&table) else {
        warn!("compressing empty input");
        let mut out = Vec::new();
        ContainerHeader { table, padding: 0 }.write_to(&mut out);
        return Ok(out);
    };
    let codes = tree.code_table();
    let packed = encode_payload(&codes, input, codes.encoded_bits(&table) as usize)?;

    let header = ContainerHeader { table, padding: packed.padding };
    let mut out = Vec::with_capacity(header.header_len() + packed.bytes.len());
    header.write_to(&mut out);
    out.extend_from_slice(&packed.bytes);

    debug!(
        input_len = input.len(),
        symbols = header.table.len(),
        bits = packed.bit_len(),
        padding = packed.padding,
        output_len = out.len(),
        "compressed"
    );
    Ok(out)
}

/// Concatenates the code of every input byte.
fn encode_payload(codes: &CodeTable, input: &[u8], bits: usize) -> Result<PackedBits> {
    let mut writer = BinaryWriterBuilder::with_capacity(bits);
    for &byte in input {
        let code = codes.get(byte).ok_or(Error::MissingCode(byte))?;
        writer.push_code(code);
    }
    Ok(writer.build())
}

/// Inverts [`compress`].
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let (header, payload) = ContainerHeader::parse(data)?;
    let expected = header.table.total();

    if payload.is_empty() && expected > 0 {
        return Err(Error::TruncatedBitstream { decoded: 0, expected });
    }
    let mut reader = BinaryReader::new(payload, header.padding)?;

    let Some(tree) = HuffmanTree::from_frequencies(&header.table) else {
        if !payload.is_empty() {
            return Err(Error::MalformedHeader(format!("{} payload bytes but no symbols", payload.len())));
        }
        return Ok(Vec::new());
    };

    let out = decode_symbols(&tree, &mut reader, expected)?;
    if reader.remaining_bits() != 0 {
        return Err(Error::LengthMismatch { expected, remaining_bits: reader.remaining_bits() });
    }

    debug!(input_len = data.len(), output_len = out.len(), "decompressed");
    Ok(out)
}

/// Walks the tree once per symbol, left on 0 and right on 1.
fn decode_symbols(tree: &HuffmanTree, reader: &mut BinaryReader, expected: u64) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(expected.min(reader.remaining_bits() as u64) as usize);
    let truncated = |decoded: usize| Error::TruncatedBitstream { decoded: decoded as u64, expected };

    while (out.len() as u64) < expected {
        let mut node = tree.root();
        loop {
            match node {
                HuffNode::Leaf { symbol, .. } => {
                    out.push(*symbol);
                    break;
                }
                HuffNode::Internal { left, right, .. } => {
                    let bit = reader.read_bit().ok_or_else(|| truncated(out.len()))?;
                    node = if bit { right.as_ref() } else { left.as_ref() };
                }
            }
        }
    }

    Ok(out)
}
