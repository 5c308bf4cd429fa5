use std::fmt;

use tracing::trace;

use crate::frequency::{FrequencyTable, K_NUM_SYMBOLS};

use super::{HuffNode, HuffmanTree};

/// A prefix code: `len` bits packed most-significant first.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Code {
    bits: Vec<u8>,
    len: usize,
}

impl Code {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bits
    }

    pub fn bit(&self, i: usize) -> bool {
        assert!(i < self.len, "bit {} out of a {}-bit code", i, self.len);
        self.bits[i >> 3] >> (7 - (i & 7)) & 1 == 1
    }

    pub fn push(&mut self, bit: bool) {
        if self.len % 8 == 0 {
            self.bits.push(0);
        }
        if bit {
            self.bits[self.len >> 3] |= 1 << (7 - (self.len & 7));
        }
        self.len += 1;
    }

    /// A copy of this code with one more bit appended.
    pub fn extended(&self, bit: bool) -> Self {
        let mut code = self.clone();
        code.push(bit);
        code
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(|i| self.bit(i))
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        self.len <= other.len && (0..self.len).all(|i| self.bit(i) == other.bit(i))
    }
}

impl fmt::Debug for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in self.iter() {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Symbol to code mapping derived from a [`HuffmanTree`].
#[derive(Clone, Debug)]
pub struct CodeTable {
    codes: Box<[Option<Code>]>,
}

impl CodeTable {
    /// Walks the tree depth-first, left = 0 and right = 1, recording the path
    /// to every leaf.
    pub fn from_tree(tree: &HuffmanTree) -> Self {
        let mut codes = vec![None; K_NUM_SYMBOLS].into_boxed_slice();

        // A lone leaf would get an empty code; give it a single bit instead.
        if let HuffNode::Leaf { symbol, .. } = tree.root() {
            codes[*symbol as usize] = Some(Code::new().extended(false));
            return Self { codes };
        }

        let mut stack = vec![(tree.root(), Code::new())];
        while let Some((node, code)) = stack.pop() {
            match node {
                HuffNode::Leaf { symbol, weight } => {
                    trace!(symbol, weight, len = code.len(), "assigned code");
                    codes[*symbol as usize] = Some(code);
                }
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), code.extended(true)));
                    stack.push((left.as_ref(), code.extended(false)));
                }
            }
        }

        Self { codes }
    }

    pub fn get(&self, symbol: u8) -> Option<&Code> {
        self.codes[symbol as usize].as_ref()
    }

    pub fn len(&self) -> usize {
        self.codes.iter().flatten().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> + '_ {
        self.codes.iter()
            .enumerate()
            .filter_map(|(s, c)| c.as_ref().map(|c| (s as u8, c)))
    }

    /// No code is a prefix of another.
    pub fn is_prefix_free(&self) -> bool {
        let codes: Vec<_> = self.iter().collect();
        codes.iter().enumerate().all(|(i, (_, a))| {
            codes.iter().skip(i + 1).all(|(_, b)| !a.is_prefix_of(b) && !b.is_prefix_of(a))
        })
    }

    /// Exact number of payload bits needed to encode the bytes `table` counts.
    pub fn encoded_bits(&self, table: &FrequencyTable) -> u64 {
        table.iter()
            .map(|(s, f)| f as u64 * self.get(s).map_or(0, |c| c.len() as u64))
            .sum()
    }
}
