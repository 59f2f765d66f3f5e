//! # Chunk Records
//!
//! Typed views over the attribute-carrying chunks of a scene file.
//!
//! ```text
//! nTRN  transform: id, attrs, child id, reserved id, layer id, frame attrs[]
//! nGRP  group:     id, attrs, child ids[]
//! nSHP  shape:     id, attrs, (model id, attrs)[]
//! LAYR  layer:     id, attrs, unknown int32
//! MATL  material:  id, attrs
//! rOBJ  renderer:  attrs
//! ```
//!
//! Nodes never own each other. They refer to children by integer id and the
//! model resolves ids on demand.

mod layer;
mod material;
mod node;
mod renderer;

pub use layer::LayerChunk;
pub use material::{MaterialChunk, MaterialType};
pub use node::{
    FrameTransform, GroupNode, NodeKind, Rotation, ShapeModel, ShapeNode, TransformNode,
};
pub use renderer::{RenderSettingKind, RendererSettingChunk};
