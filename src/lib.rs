pub mod bitstreams;
pub mod container;
pub mod error;
pub mod frequency;
pub mod huffman;
pub mod properties;

pub use container::{compress, decompress, files::{compress_file, decompress_file}};
pub use error::{Error, Result};
pub use frequency::FrequencyTable;
pub use huffman::{CodeTable, HuffmanTree};
pub use properties::CompressionProperties;
