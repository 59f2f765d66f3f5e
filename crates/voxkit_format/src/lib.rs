//! # VOXKIT Format
//!
//! Decoder for chunked voxel scene files (`.vox`).
//!
//! ## Design Principles
//!
//! 1. **Self-describing framing**: every chunk declares its content and
//!    children lengths, so unknown chunks are skipped without losing
//!    alignment
//! 2. **All-or-nothing**: a decode either returns a complete [`VoxModel`] or
//!    an error; warnings never abort
//! 3. **Id-addressed scene graph**: nodes refer to each other by integer id,
//!    never by reference
//! 4. **Bounded**: chunk nesting is walked with an explicit stack and a hard
//!    depth limit
//!
//! ## Core Components
//!
//! - `VoxDecoder`: chunk-tree walker producing a `VoxModel`
//! - `VoxelGrid`: sparse per-frame storage with 2x downsampling
//! - `Attributes`: ordered key/value pairs carried by scene chunks
//! - `TransformNode` / `GroupNode` / `ShapeNode`: scene graph records
//!
//! ## Example
//!
//! ```rust,ignore
//! use voxkit_format::{DecodeOptions, VoxDecoder};
//!
//! let mut decoder = VoxDecoder::new(DecodeOptions::default());
//! let model = decoder.decode_file("assets/castle.vox")?;
//! for warning in decoder.warnings() {
//!     eprintln!("{warning}");
//! }
//! println!("{} frames", model.frames.len());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod attributes;
pub mod chunks;
pub mod color;
pub mod decoder;
pub mod error;
pub mod grid;
pub mod model;
pub mod options;
pub mod reader;
pub mod sink;

pub use attributes::Attributes;
pub use chunks::{
    FrameTransform, GroupNode, LayerChunk, MaterialChunk, MaterialType, NodeKind,
    RenderSettingKind, RendererSettingChunk, Rotation, ShapeModel, ShapeNode, TransformNode,
};
pub use color::{default_palette, Palette, VoxColor, PALETTE_SIZE};
pub use decoder::{decode, ChunkTag, DecodeStats, VoxDecoder, VOX_MAGIC, VOX_VERSION};
pub use error::{ConfigError, DecodeError, DecodeResult, DecodeWarning};
pub use grid::VoxelGrid;
pub use model::{identity_remap, ConsistencyIssue, NodeRef, SceneNode, VoxModel};
pub use options::DecodeOptions;
pub use reader::ByteReader;
pub use sink::{ChunkLogRecord, ChunkLogSink, MemorySink, TracingSink};
