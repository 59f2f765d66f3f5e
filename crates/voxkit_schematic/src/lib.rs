//! # VOXKIT Schematic
//!
//! Sparse paletted voxel store for editing and exporting voxel volumes.
//!
//! ## Design Principles
//!
//! 1. **Sparse**: only occupied regions allocate; the 2000x1000x2000 world is
//!    never materialized
//! 2. **Silent no-ops**: zero colors, out-of-range coordinates and palette
//!    overflow are steady states, not errors
//! 3. **Live palette indices**: a self-managed palette re-sorts on every new
//!    color, so indices are looked up, never cached
//! 4. **Monotonic extent**: the bounding box grows with writes and never
//!    shrinks on removal
//!
//! ## Core Components
//!
//! - `Schematic`: the store and its mutators and queries
//! - `Region`: one cubic partition holding voxels by world index
//! - `ColorPalette`: bounded ordered color list
//! - `voxel_index`: world addressing shared by voxels and regions
//!
//! ## Example
//!
//! ```rust,ignore
//! use voxkit_format::{DecodeOptions, VoxDecoder};
//! use voxkit_schematic::Schematic;
//!
//! let model = VoxDecoder::new(DecodeOptions::default()).decode_file("castle.vox")?;
//! let mut schematic = Schematic::new(None);
//! for frame in &model.frames {
//!     schematic.import_grid(frame, &model.palette, [0, 0, 0]);
//! }
//! println!("{}x{}x{}", schematic.width(), schematic.height(), schematic.length());
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod config;
pub mod error;
pub mod index;
pub mod palette;
pub mod region;
pub mod schematic;

pub use config::SchematicConfig;
pub use error::{SchematicError, SchematicResult};
pub use index::{
    in_world, voxel_index, voxel_index_2d, voxel_index_2d_for_rotation, RotationMode,
    DEFAULT_CHUNK_SIZE, MAX_COLORS_IN_PALETTE, MAX_WORLD_HEIGHT, MAX_WORLD_LENGTH,
    MAX_WORLD_WIDTH,
};
pub use palette::ColorPalette;
pub use region::{Region, Voxel};
pub use schematic::{Bounds, Schematic};
