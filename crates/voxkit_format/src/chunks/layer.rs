//! LAYR chunk.

use crate::attributes::Attributes;
use crate::error::DecodeResult;
use crate::reader::ByteReader;

/// A named editor layer that transform nodes refer to by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerChunk {
    /// Layer id.
    pub id: i32,
    /// Layer attributes (`_name`, `_hidden`).
    pub attributes: Attributes,
    /// Trailing int32 with no documented meaning.
    pub unknown: i32,
}

impl LayerChunk {
    /// Reads a LAYR payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: reader.read_i32()?,
            attributes: Attributes::read(reader)?,
            unknown: reader.read_i32()?,
        })
    }

    /// Layer name, empty if unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes.get("_name").unwrap_or_default()
    }

    /// True unless `_hidden` is absent or `"0"`.
    #[must_use]
    pub fn hidden(&self) -> bool {
        self.attributes.get("_hidden").is_some_and(|v| v != "0")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_accessors() {
        let layer = LayerChunk {
            id: 1,
            attributes: [("_name", "props"), ("_hidden", "1")].into_iter().collect(),
            unknown: -1,
        };
        assert_eq!(layer.name(), "props");
        assert!(layer.hidden());
        assert!(!LayerChunk::default().hidden());
        assert_eq!(LayerChunk::default().name(), "");
    }
}
