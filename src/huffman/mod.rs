use std::{cmp::Reverse, collections::BinaryHeap};

use tracing::debug;

use crate::frequency::FrequencyTable;

pub mod codes;

pub use codes::{Code, CodeTable};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        symbol: u8,
        weight: u64,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
}

impl HuffNode {
    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }
}

/// Heap entry. Equal weights are ordered by `key`: leaves take keys in table
/// order, merged nodes take the next unused key.
#[derive(Debug)]
struct HeapNode {
    key: usize,
    node: HuffNode,
}

impl Ord for HeapNode {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.node.weight().cmp(&other.node.weight())
            .then(self.key.cmp(&other.key))
    }
}

impl PartialOrd for HeapNode {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Eq for HeapNode {}

impl PartialEq for HeapNode {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    root: HuffNode,
}

impl HuffmanTree {
    /// Builds the prefix tree by repeatedly merging the two lightest nodes.
    /// The first node popped becomes the left child. Returns `None` for an
    /// empty table.
    ///
    /// Decoding depends on this being reproducible from the stored table
    /// alone, so the heap order is total: weight, then key.
    pub fn from_frequencies(table: &FrequencyTable) -> Option<Self> {
        let table = table.with_filler();

        let mut freq_tree = BinaryHeap::with_capacity(table.len());
        let mut next_key = 0;
        for (symbol, freq) in table.iter() {
            freq_tree.push(Reverse(HeapNode { key: next_key, node: HuffNode::Leaf { symbol, weight: freq as u64 } }));
            next_key += 1;
        }

        while freq_tree.len() > 1 {
            let Reverse(node1) = freq_tree.pop()?;
            let Reverse(node2) = freq_tree.pop()?;

            let new_node = HuffNode::Internal {
                weight: node1.node.weight() + node2.node.weight(),
                left: Box::new(node1.node),
                right: Box::new(node2.node),
            };

            freq_tree.push(Reverse(HeapNode { key: next_key, node: new_node }));
            next_key += 1;
        }

        let Reverse(root) = freq_tree.pop()?;
        let tree = HuffmanTree { root: root.node };
        debug!(leaves = table.len(), weight = tree.weight(), depth = tree.depth(), "built huffman tree");
        Some(tree)
    }

    pub fn root(&self) -> &HuffNode {
        &self.root
    }

    pub fn weight(&self) -> u64 {
        self.root.weight()
    }

    /// Length of the longest code.
    pub fn depth(&self) -> usize {
        let mut max_depth = 0;
        let mut stack = vec![(&self.root, 0)];
        while let Some((node, depth)) = stack.pop() {
            match node {
                HuffNode::Leaf { .. } => max_depth = max_depth.max(depth),
                HuffNode::Internal { left, right, .. } => {
                    stack.push((right.as_ref(), depth + 1));
                    stack.push((left.as_ref(), depth + 1));
                }
            }
        }
        max_depth
    }

    pub fn code_table(&self) -> CodeTable {
        CodeTable::from_tree(self)
    }
}
