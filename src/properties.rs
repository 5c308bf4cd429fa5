use std::{collections::HashMap, fs::File, io::BufReader, path::Path};

use serde::{Deserialize, Serialize};

use crate::{Error, Result, container::Container};

/// Summary of one compression, stored next to the container as
/// `<dest>.properties`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompressionProperties {
    pub original_length: u64,
    pub compressed_length: u64,
    pub symbols: usize,
    pub encoded_bits: u64,
    pub padding: u8,
    pub header_length: u64,
}

impl CompressionProperties {
    pub fn of(input: &[u8], container: &[u8]) -> Result<Self> {
        let parsed = Container::inspect(container)?;
        Ok(Self {
            original_length: input.len() as u64,
            compressed_length: container.len() as u64,
            symbols: parsed.header.table.len(),
            encoded_bits: parsed.payload_bits() as u64,
            padding: parsed.header.padding,
            header_length: parsed.header.header_len() as u64,
        })
    }

    /// Compressed size over original size; 0 for an empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            return 0.0;
        }
        self.compressed_length as f64 / self.original_length as f64
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_map(&self) -> HashMap<String, String> {
        HashMap::from([
            ("originallength".to_owned(), self.original_length.to_string()),
            ("compressedlength".to_owned(), self.compressed_length.to_string()),
            ("symbols".to_owned(), self.symbols.to_string()),
            ("encodedbits".to_owned(), self.encoded_bits.to_string()),
            ("padding".to_owned(), self.padding.to_string()),
            ("headerlength".to_owned(), self.header_length.to_string()),
        ])
    }

    pub fn store(&self, path: &Path) -> Result<()> {
        let mut buf = Vec::new();
        java_properties::write(&mut buf, &self.to_map()).map_err(|e| Error::Properties(e.to_string()))?;
        crate::container::files::write_atomically(path, &buf)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file = File::open(path).map_err(|e| Error::io(path, e))?;
        let map = java_properties::read(BufReader::new(file)).map_err(|e| Error::Properties(e.to_string()))?;
        Self::try_from(map)
    }
}

impl TryFrom<HashMap<String, String>> for CompressionProperties {
    type Error = Error;

    fn try_from(value: HashMap<String, String>) -> Result<Self> {
        fn field<T: std::str::FromStr>(value: &HashMap<String, String>, key: &str) -> Result<T> {
            value.get(key)
                .ok_or_else(|| Error::Properties(format!("missing {key}")))?
                .trim()
                .parse()
                .map_err(|_| Error::Properties(format!("unparsable {key}")))
        }

        Ok(CompressionProperties {
            original_length: field(&value, "originallength")?,
            compressed_length: field(&value, "compressedlength")?,
            symbols: field(&value, "symbols")?,
            encoded_bits: field(&value, "encodedbits")?,
            padding: field(&value, "padding")?,
            header_length: field(&value, "headerlength")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_of_container() {
        let input = b"abcc";
        let container = crate::compress(input).unwrap();
        let props = CompressionProperties::of(input, &container).unwrap();

        assert_eq!(props.original_length, 4);
        assert_eq!(props.compressed_length, 21);
        assert_eq!(props.symbols, 3);
        assert_eq!(props.encoded_bits, 6);
        assert_eq!(props.padding, 2);
        assert_eq!(props.header_length, 20);
    }

    #[test]
    fn test_properties_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data.hz.properties");
        let input = vec![0x41; 1000];
        let props = CompressionProperties::of(&input, &crate::compress(&input).unwrap()).unwrap();

        props.store(&path).unwrap();

        assert_eq!(CompressionProperties::load(&path).unwrap(), props);
    }

    #[test]
    fn test_missing_key() {
        let mut map = CompressionProperties::default().to_map();
        map.remove("symbols");

        assert!(matches!(CompressionProperties::try_from(map), Err(Error::Properties(_))));
    }

    #[test]
    fn test_json_fields() {
        let props = CompressionProperties { original_length: 10, ..Default::default() };
        let json = serde_json::to_value(&props).unwrap();

        assert_eq!(json["original_length"], 10u64);
        assert_eq!(serde_json::from_value::<CompressionProperties>(json).unwrap(), props);
    }

    #[test]
    fn test_to_json() {
        let props = CompressionProperties { symbols: 3, padding: 2, ..Default::default() };
        let text = props.to_json().unwrap();

        assert_eq!(serde_json::from_str::<CompressionProperties>(&text).unwrap(), props);
    }

    #[test]
    fn test_json_failure_is_reported() {
        let err: Error = serde_json::from_str::<CompressionProperties>("{").unwrap_err().into();

        assert!(matches!(err, Error::Json(_)));
    }
}
