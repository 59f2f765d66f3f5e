//! # Decoder Error Types
//!
//! All errors that can abort a decode pass. Everything else the decoder runs
//! into (unknown chunks, version drift, dangling ids) is a [`DecodeWarning`]
//! and decoding continues.

use thiserror::Error;

/// Errors that abort decoding. No partial model is returned.
#[derive(Error, Debug)]
pub enum DecodeError {
    /// The stream does not start with the `VOX ` magic.
    #[error("not a vox file: expected magic \"VOX \", found {found:?}")]
    InvalidMagic {
        /// The four bytes found at the start of the stream.
        found: [u8; 4],
    },

    /// The stream ended before a read could complete.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof {
        /// Bytes the read required.
        needed: usize,
        /// Bytes left in the cursor.
        remaining: usize,
    },

    /// A declared int32 length or count was negative.
    #[error("negative {what}: {value}")]
    NegativeLength {
        /// Which length field was negative.
        what: &'static str,
        /// The raw value read.
        value: i32,
    },

    /// Chunk children were nested deeper than the configured limit.
    #[error("chunk nesting exceeds limit of {limit}")]
    NestingTooDeep {
        /// The configured maximum depth.
        limit: usize,
    },

    /// A PACK chunk declared more frames than the decoder will allocate.
    #[error("frame count {count} exceeds limit of {limit}")]
    TooManyFrames {
        /// Declared frame count.
        count: usize,
        /// Maximum accepted.
        limit: usize,
    },

    /// A frame's cells cannot all be addressed with a `usize` index.
    #[error("frame {wide}x{tall}x{deep} is too large to address")]
    FrameTooLarge {
        /// Padded width.
        wide: usize,
        /// Padded height.
        tall: usize,
        /// Padded depth.
        deep: usize,
    },

    /// An XYZI chunk arrived before any SIZE chunk declared a frame.
    #[error("voxel data before any SIZE chunk")]
    VoxelsBeforeSize,

    /// Reading the input file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while loading decoder configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The TOML document could not be parsed into options.
    #[error("invalid decode options: {0}")]
    Toml(#[from] toml::de::Error),

    /// A value parsed but is out of range.
    #[error("invalid decode options: {0}")]
    Invalid(String),
}

/// Structural problems reported while decoding. Never fatal.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeWarning {
    /// The header version differs from the one this decoder targets.
    #[error("version {found} differs from supported version {expected}")]
    VersionMismatch {
        /// Version found in the header.
        found: i32,
        /// Version the decoder was written against.
        expected: i32,
    },
    /// A chunk with an unrecognized tag was skipped.
    #[error("unknown chunk \"{}\"", String::from_utf8_lossy(.tag))]
    UnknownChunk {
        /// The raw tag bytes.
        tag: [u8; 4],
    },
    /// A debug-mode consistency check failed.
    #[error("{0}")]
    Inconsistent(crate::model::ConsistencyIssue),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ConsistencyIssue;

    #[test]
    fn test_warning_messages() {
        let unknown = DecodeWarning::UnknownChunk { tag: *b"ZZZZ" };
        assert_eq!(unknown.to_string(), "unknown chunk \"ZZZZ\"");

        let version = DecodeWarning::VersionMismatch {
            found: 200,
            expected: 150,
        };
        assert_eq!(
            version.to_string(),
            "version 200 differs from supported version 150"
        );

        let orphan = DecodeWarning::Inconsistent(ConsistencyIssue::OrphanTransform(9));
        assert_eq!(
            orphan.to_string(),
            "transform id never referenced by any group: 9"
        );
        assert_eq!(ConsistencyIssue::DuplicateId(3).to_string(), "duplicate id: 3");
    }
}
