//! Schematic store configuration.
//!
//! ```toml
//! chunk_size = 64
//! ```

use serde::Deserialize;

use crate::error::{SchematicError, SchematicResult};
use crate::index::{DEFAULT_CHUNK_SIZE, MAX_WORLD_HEIGHT, MAX_WORLD_LENGTH, MAX_WORLD_WIDTH};

/// Region partitioning settings.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchematicConfig {
    /// Edge length of a cubic region, in voxels.
    pub chunk_size: u32,
}

impl Default for SchematicConfig {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }
}

impl SchematicConfig {
    /// Config with the given region edge length.
    #[must_use]
    pub const fn with_chunk_size(chunk_size: u32) -> Self {
        Self { chunk_size }
    }

    /// Parses and validates a TOML document. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`SchematicError::Toml`] on malformed input or unknown keys and
    /// [`SchematicError::InvalidChunkSize`] for a zero chunk size.
    pub fn from_toml_str(source: &str) -> SchematicResult<Self> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks that the values are usable.
    ///
    /// # Errors
    ///
    /// Returns [`SchematicError::InvalidChunkSize`] if `chunk_size` is zero.
    pub fn validate(&self) -> SchematicResult<()> {
        if self.chunk_size == 0 {
            return Err(SchematicError::InvalidChunkSize(self.chunk_size));
        }
        Ok(())
    }

    /// Number of regions needed to tile the world along each axis.
    #[must_use]
    pub const fn regions_per_axis(&self) -> [u32; 3] {
        let size = if self.chunk_size == 0 { 1 } else { self.chunk_size };
        [
            MAX_WORLD_WIDTH.div_ceil(size),
            MAX_WORLD_HEIGHT.div_ceil(size),
            MAX_WORLD_LENGTH.div_ceil(size),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_chunk_size() {
        assert_eq!(SchematicConfig::default().chunk_size, 128);
        assert!(SchematicConfig::default().validate().is_ok());
    }

    #[test]
    fn test_regions_per_axis_rounds_up() {
        assert_eq!(SchematicConfig::default().regions_per_axis(), [16, 8, 16]);
        assert_eq!(
            SchematicConfig::with_chunk_size(1000).regions_per_axis(),
            [2, 1, 2]
        );
    }

    #[test]
    fn test_from_toml() {
        let config = SchematicConfig::from_toml_str("chunk_size = 32").unwrap();
        assert_eq!(config.chunk_size, 32);
        assert_eq!(SchematicConfig::from_toml_str("").unwrap(), SchematicConfig::default());
    }

    #[test]
    fn test_from_toml_rejects_bad_input() {
        assert!(matches!(
            SchematicConfig::from_toml_str("chunk_size = 0"),
            Err(SchematicError::InvalidChunkSize(0))
        ));
        assert!(matches!(
            SchematicConfig::from_toml_str("chunk = 3"),
            Err(SchematicError::Toml(_))
        ));
    }
}
