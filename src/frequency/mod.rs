use crate::{Error, Result};

pub const K_NUM_SYMBOLS: usize = 256;

/// Occurrence counts of the distinct byte values of an input.
///
/// The entry order is part of the container format: the tree builder breaks
/// weight ties by it, so a table read back from a header must keep the order
/// it was written in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrequencyTable {
    entries: Vec<(u8, u32)>,
}

impl FrequencyTable {
    /// Counts every byte of `data`. Entries are listed by ascending symbol.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut histo = [0u64; K_NUM_SYMBOLS];
        for &byte in data {
            histo[byte as usize] += 1;
        }

        let mut entries = Vec::new();
        for (symbol, &count) in histo.iter().enumerate() {
            if count == 0 {
                continue;
            }
            if count > i32::MAX as u64 {
                return Err(Error::InputTooLarge { symbol: symbol as u8, count });
            }
            entries.push((symbol as u8, count as u32));
        }

        Ok(Self { entries })
    }

    /// Builds a table keeping the given order. Repeated symbols are rejected.
    pub fn from_entries(entries: Vec<(u8, u32)>) -> Result<Self> {
        let mut seen = [false; K_NUM_SYMBOLS];
        for &(symbol, _) in entries.iter() {
            if seen[symbol as usize] {
                return Err(Error::MalformedHeader(format!("symbol {symbol:#04x} listed twice")));
            }
            seen[symbol as usize] = true;
        }

        Ok(Self { entries })
    }

    /// Returns a table that can always form a two-leaf tree: a single-symbol
    /// table gets a zero-weight filler appended after its only entry.
    pub fn with_filler(&self) -> Self {
        let mut entries = self.entries.clone();
        if let [(symbol, _)] = self.entries[..] {
            entries.push((filler_symbol(symbol), 0));
        }
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.entries.iter().copied()
    }

    pub fn frequency(&self, symbol: u8) -> Option<u32> {
        self.entries.iter().find(|(s, _)| *s == symbol).map(|&(_, f)| f)
    }

    /// Number of bytes the table describes.
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, f)| f as u64).sum()
    }
}

/// The zero byte, unless that is the symbol being padded.
pub(crate) fn filler_symbol(symbol: u8) -> u8 {
    if symbol == 0 { 1 } else { 0 }
}

#[cfg(test)]
mod tests;
