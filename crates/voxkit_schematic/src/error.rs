//! # Schematic Error Types
//!
//! Editing a schematic never fails: zero colors, out-of-range coordinates
//! and palette overflow are silent no-ops, and lookup misses return empty
//! sentinels. The only fallible step is building a store from configuration.

use thiserror::Error;

/// Errors raised while configuring a schematic.
#[derive(Error, Debug)]
pub enum SchematicError {
    /// Region edge length must be at least one voxel.
    #[error("invalid chunk size: {0} (must be at least 1)")]
    InvalidChunkSize(u32),

    /// The TOML document could not be parsed into a configuration.
    #[error("invalid schematic config: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Result type for schematic configuration.
pub type SchematicResult<T> = Result<T, SchematicError>;
