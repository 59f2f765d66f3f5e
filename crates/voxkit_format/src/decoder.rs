//! # Chunk Decoder
//!
//! Walks the chunk tree of a scene file and builds a [`VoxModel`].
//!
//! ## Framing
//!
//! ```text
//! file   := "VOX " version:i32 chunk*
//! chunk  := tag:[u8; 4] content_len:i32 children_len:i32
//!           content[content_len] children[children_len]
//! ```
//!
//! Content and children are split off the parent cursor before the tag is
//! looked at, so an unknown tag (or a known tag whose payload is shorter than
//! declared) never desynchronizes the stream. Any chunk may carry children.
//!
//! ## Traversal
//!
//! Children are walked depth-first in document order with an explicit stack
//! of cursors rather than recursion, and nesting deeper than
//! [`DecodeOptions::max_nesting_depth`] fails the decode.

use std::path::Path;

use crate::chunks::{
    GroupNode, LayerChunk, MaterialChunk, RendererSettingChunk, ShapeNode, TransformNode,
};
use crate::color::{Palette, VoxColor, PALETTE_SIZE};
use crate::error::{DecodeError, DecodeResult, DecodeWarning};
use crate::grid::VoxelGrid;
use crate::model::VoxModel;
use crate::options::DecodeOptions;
use crate::reader::ByteReader;
use crate::sink::{ChunkLogRecord, ChunkLogSink, TracingSink};

/// File magic.
pub const VOX_MAGIC: [u8; 4] = *b"VOX ";

/// Version this decoder was written against. Others decode with a warning.
pub const VOX_VERSION: i32 = 150;

/// Upper bound on frames a PACK chunk may pre-allocate.
pub const MAX_PACKED_FRAMES: usize = 1 << 16;

/// Recognized chunk tags.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ChunkTag {
    /// `MAIN` - root container, no payload.
    Main,
    /// `SIZE` - frame dimensions.
    Size,
    /// `XYZI` - frame voxels.
    Xyzi,
    /// `RGBA` - palette.
    Rgba,
    /// `PACK` - frame count.
    Pack,
    /// `MATT` - legacy material, ignored.
    Matt,
    /// `nTRN` - transform node.
    Transform,
    /// `nGRP` - group node.
    Group,
    /// `nSHP` - shape node.
    Shape,
    /// `LAYR` - layer.
    Layer,
    /// `MATL` - material.
    Material,
    /// `rOBJ` - renderer settings.
    RenderObject,
    /// `IMAP` - palette remap.
    IndexMap,
    /// Anything else.
    Unknown([u8; 4]),
}

impl ChunkTag {
    /// Classifies raw tag bytes.
    #[must_use]
    pub const fn from_bytes(tag: [u8; 4]) -> Self {
        match &tag {
            b"MAIN" => Self::Main,
            b"SIZE" => Self::Size,
            b"XYZI" => Self::Xyzi,
            b"RGBA" => Self::Rgba,
            b"PACK" => Self::Pack,
            b"MATT" => Self::Matt,
            b"nTRN" => Self::Transform,
            b"nGRP" => Self::Group,
            b"nSHP" => Self::Shape,
            b"LAYR" => Self::Layer,
            b"MATL" => Self::Material,
            b"rOBJ" => Self::RenderObject,
            b"IMAP" => Self::IndexMap,
            _ => Self::Unknown(tag),
        }
    }
}

/// Counters from the most recent decode pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Chunks parsed, containers included.
    pub chunk_count: usize,
    /// SIZE chunks applied.
    pub frames_sized: usize,
    /// Voxel count declared by the last XYZI chunk.
    pub last_xyzi_count: usize,
    /// Deepest chunk nesting seen (top level = 0).
    pub max_depth: usize,
}

fn frame_too_large(frame: &VoxelGrid) -> DecodeError {
    let (wide, tall, deep) = frame.volume_size();
    DecodeError::FrameTooLarge { wide, tall, deep }
}

/// State of one decode pass.
struct Pass {
    model: VoxModel,
    palette: Option<Palette>,
    stats: DecodeStats,
    offset_palette: bool,
}

impl Pass {
    fn apply(&mut self, tag: ChunkTag, reader: &mut ByteReader<'_>) -> DecodeResult<()> {
        let model = &mut self.model;
        match tag {
            ChunkTag::Main | ChunkTag::Matt | ChunkTag::Unknown(_) => {}
            ChunkTag::Size => {
                let wide = reader.read_len("frame width")?;
                let tall = reader.read_len("frame height")?;
                let deep = reader.read_len("frame depth")?;
                let slot = self.stats.frames_sized;
                if slot >= model.frames.len() {
                    model.frames.push(VoxelGrid::default());
                }
                let frame = &mut model.frames[slot];
                frame.resize(wide, tall, deep);
                if frame.volume().is_none() {
                    return Err(frame_too_large(frame));
                }
                self.stats.frames_sized += 1;
            }
            ChunkTag::Xyzi => {
                let count = reader.read_len("voxel count")?;
                self.stats.last_xyzi_count = count;
                let slot = self
                    .stats
                    .frames_sized
                    .checked_sub(1)
                    .ok_or(DecodeError::VoxelsBeforeSize)?;
                let frame = &mut model.frames[slot];
                model.colors_used.reserve(count.min(reader.remaining() / 4));
                for _ in 0..count {
                    let [x, y, z, color] = reader.read_array::<4>()?;
                    if color > 0 && !frame.set(x.into(), y.into(), z.into(), color) {
                        return Err(frame_too_large(frame));
                    }
                    model.colors_used.push(color);
                }
            }
            ChunkTag::Rgba => {
                let (start, end) = if self.offset_palette {
                    (0, PALETTE_SIZE - 1)
                } else {
                    (1, PALETTE_SIZE)
                };
                let mut palette = [VoxColor::TRANSPARENT; PALETTE_SIZE];
                for slot in &mut palette[start..end] {
                    *slot = reader.read_pod::<VoxColor>()?;
                }
                self.palette = Some(palette);
            }
            ChunkTag::Pack => {
                let count = reader.read_len("frame count")?;
                if count > MAX_PACKED_FRAMES {
                    return Err(DecodeError::TooManyFrames {
                        count,
                        limit: MAX_PACKED_FRAMES,
                    });
                }
                model
                    .frames
                    .extend(std::iter::repeat_with(VoxelGrid::default).take(count));
            }
            ChunkTag::Transform => model.transform_nodes.push(TransformNode::read(reader)?),
            ChunkTag::Group => model.group_nodes.push(GroupNode::read(reader)?),
            ChunkTag::Shape => model.shape_nodes.push(ShapeNode::read(reader)?),
            ChunkTag::Layer => model.layers.push(LayerChunk::read(reader)?),
            ChunkTag::Material => model.materials.push(MaterialChunk::read(reader)?),
            ChunkTag::RenderObject => model
                .renderer_settings
                .push(RendererSettingChunk::read(reader)?),
            ChunkTag::IndexMap => model.palette_remap = reader.read_array::<PALETTE_SIZE>()?,
        }
        Ok(())
    }

    /// Detail lines for the chunk that was just applied.
    fn describe(&self, tag: ChunkTag) -> Vec<String> {
        let model = &self.model;
        let attributes = |attrs: &crate::Attributes, out: &mut Vec<String>| {
            out.extend(
                attrs
                    .iter()
                    .map(|(k, v)| format!("--> ATTRIBUTE: Key={k} Value={v}")),
            );
        };
        let mut out = Vec::new();
        match tag {
            ChunkTag::Size => {
                if let Some(frame) = self
                    .stats
                    .frames_sized
                    .checked_sub(1)
                    .and_then(|i| model.frames.get(i))
                {
                    out.push(format!(
                        "-> SIZE: {} {} {}",
                        frame.wide(),
                        frame.tall(),
                        frame.deep()
                    ));
                }
            }
            ChunkTag::Xyzi => out.push(format!("-> XYZI: {}", self.stats.last_xyzi_count)),
            ChunkTag::Transform => {
                if let Some(node) = model.transform_nodes.last() {
                    out.push(format!("-> TRANSFORM NODE: {}", node.id));
                    out.push(format!("--> CHILD Id: {}", node.child_id));
                    out.push(format!("--> RESERVED Id: {}", node.reserved_id));
                    out.push(format!("--> LAYER Id: {}", node.layer_id));
                    attributes(&node.attributes, &mut out);
                    for frame in node.frames() {
                        out.push(format!(
                            "--> FRAME ATTRIBUTE: {} {:?}",
                            frame.rotation().0,
                            frame.translation()
                        ));
                    }
                }
            }
            ChunkTag::Group => {
                if let Some(node) = model.group_nodes.last() {
                    out.push(format!("-> GROUP NODE: {}", node.id));
                    out.extend(node.child_ids.iter().map(|id| format!("--> CHILD Id: {id}")));
                    attributes(&node.attributes, &mut out);
                }
            }
            ChunkTag::Shape => {
                if let Some(node) = model.shape_nodes.last() {
                    out.push(format!("-> SHAPE NODE: {}", node.id));
                    attributes(&node.attributes, &mut out);
                    for shape_model in &node.models {
                        out.push(format!("--> MODEL ATTRIBUTE: {}", shape_model.model_id));
                        attributes(&shape_model.attributes, &mut out);
                    }
                }
            }
            ChunkTag::Layer => {
                if let Some(layer) = model.layers.last() {
                    out.push(format!(
                        "-> LAYER NODE: {} {} {} {}",
                        layer.id,
                        layer.name(),
                        layer.hidden(),
                        layer.unknown
                    ));
                    attributes(&layer.attributes, &mut out);
                }
            }
            ChunkTag::Material => {
                if let Some(m) = model.materials.last() {
                    out.push(format!("-> MATERIAL NODE: {}", m.id));
                    out.push(format!("--> ALPHA: {:.1}", m.alpha()));
                    out.push(format!("--> EMISSION: {:.1}", m.emission()));
                    out.push(format!("--> FLUX: {:.1}", m.flux()));
                    out.push(format!("--> METALLIC: {:.1}", m.metal()));
                    out.push(format!("--> ROUGH: {:.1}", m.rough()));
                    out.push(format!("--> SMOOTHNESS: {:.1}", m.smoothness()));
                    out.push(format!("--> SPEC: {:.1}", m.specular()));
                    attributes(&m.properties, &mut out);
                }
            }
            ChunkTag::IndexMap => {
                out.extend(model.palette_remap.iter().map(|i| format!("--> {i}")));
            }
            _ => {}
        }
        out
    }
}

/// Scene file decoder.
///
/// Holds options, an optional log sink, and the warnings and counters of
/// the most recent pass.
#[derive(Default)]
pub struct VoxDecoder<'s> {
    options: DecodeOptions,
    sink: Option<&'s mut dyn ChunkLogSink>,
    warnings: Vec<DecodeWarning>,
    stats: DecodeStats,
}

impl std::fmt::Debug for VoxDecoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoxDecoder")
            .field("options", &self.options)
            .field("has_sink", &self.sink.is_some())
            .field("warnings", &self.warnings.len())
            .field("stats", &self.stats)
            .finish()
    }
}

impl<'s> VoxDecoder<'s> {
    /// Creates a decoder with the given options.
    #[must_use]
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            sink: None,
            warnings: Vec::new(),
            stats: DecodeStats::default(),
        }
    }

    /// Routes chunk records to `sink` instead of `tracing`.
    ///
    /// Records are only produced when `write_log` is enabled.
    #[must_use]
    pub fn with_sink(mut self, sink: &'s mut dyn ChunkLogSink) -> Self {
        self.sink = Some(sink);
        self
    }

    /// Options in effect.
    #[must_use]
    pub fn options(&self) -> &DecodeOptions {
        &self.options
    }

    /// Warnings raised by the last decode.
    #[must_use]
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Counters from the last decode.
    #[must_use]
    pub fn stats(&self) -> DecodeStats {
        self.stats
    }

    /// Reads a whole file into memory and decodes it.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Io`] if the file cannot be read, otherwise the
    /// errors of [`Self::decode`].
    pub fn decode_file<P: AsRef<Path>>(&mut self, path: P) -> DecodeResult<VoxModel> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "decoding scene file");
        self.decode(&bytes)
    }

    /// Decodes a complete in-memory scene file.
    ///
    /// # Errors
    ///
    /// - [`DecodeError::InvalidMagic`] if the header is not `VOX `.
    /// - Read failures for truncated streams or negative lengths.
    /// - [`DecodeError::NestingTooDeep`] past the configured depth.
    /// - [`DecodeError::FrameTooLarge`] when a frame's cells cannot be indexed.
    pub fn decode(&mut self, bytes: &[u8]) -> DecodeResult<VoxModel> {
        self.warnings.clear();
        self.stats = DecodeStats::default();

        let mut header = ByteReader::new(bytes);
        let magic = header.read_array::<4>()?;
        if magic != VOX_MAGIC {
            tracing::warn!(found = ?magic, "not a vox file");
            return Err(DecodeError::InvalidMagic { found: magic });
        }
        let version = header.read_i32()?;
        if version != VOX_VERSION {
            self.warn(DecodeWarning::VersionMismatch {
                found: version,
                expected: VOX_VERSION,
            });
        }

        let mut pass = Pass {
            model: VoxModel {
                version,
                ..VoxModel::default()
            },
            palette: None,
            stats: DecodeStats::default(),
            offset_palette: self.options.offset_palette,
        };

        let result = self.walk(header, &mut pass);
        self.stats = pass.stats;
        result?;

        if self.options.debug {
            for issue in pass.model.consistency_issues() {
                tracing::error!("{issue}");
                self.warnings.push(DecodeWarning::Inconsistent(issue));
            }
        }

        let mut model = pass.model;
        if let Some(palette) = pass.palette {
            model.palette = palette;
        }
        Ok(model)
    }

    fn walk<'a>(&mut self, top: ByteReader<'a>, pass: &mut Pass) -> DecodeResult<()> {
        let mut stack: Vec<ByteReader<'a>> = vec![top];
        while let Some(cursor) = stack.last_mut() {
            if cursor.is_exhausted() {
                stack.pop();
                continue;
            }
            let raw_tag = cursor.read_array::<4>()?;
            let content_len = cursor.read_len("chunk content length")?;
            let children_len = cursor.read_len("chunk children length")?;
            let content = cursor.read_bytes(content_len)?;
            let children = cursor.read_bytes(children_len)?;

            let depth = stack.len() - 1;
            pass.stats.chunk_count += 1;
            pass.stats.max_depth = pass.stats.max_depth.max(depth);

            let tag = ChunkTag::from_bytes(raw_tag);
            if let ChunkTag::Unknown(tag) = tag {
                self.warn(DecodeWarning::UnknownChunk { tag });
            }
            pass.apply(tag, &mut ByteReader::new(content))?;

            if self.options.write_log {
                let record = ChunkLogRecord {
                    ordinal: pass.stats.chunk_count,
                    tag: String::from_utf8_lossy(&raw_tag).into_owned(),
                    content_len,
                    children_len,
                    details: pass.describe(tag),
                };
                match self.sink.as_deref_mut() {
                    Some(sink) => sink.record(record),
                    None => TracingSink.record(record),
                }
            }

            if !children.is_empty() {
                if depth + 1 > self.options.max_nesting_depth {
                    return Err(DecodeError::NestingTooDeep {
                        limit: self.options.max_nesting_depth,
                    });
                }
                stack.push(ByteReader::new(children));
            }
        }
        Ok(())
    }

    fn warn(&mut self, warning: DecodeWarning) {
        tracing::warn!("{warning}");
        self.warnings.push(warning);
    }
}

/// Decodes `bytes` with `options`, discarding warnings.
///
/// # Errors
///
/// See [`VoxDecoder::decode`].
pub fn decode(bytes: &[u8], options: DecodeOptions) -> DecodeResult<VoxModel> {
    VoxDecoder::new(options).decode(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(tag: &[u8; 4], content: &[u8], children: &[u8]) -> Vec<u8> {
        let mut out = tag.to_vec();
        out.extend_from_slice(&i32::try_from(content.len()).unwrap().to_le_bytes());
        out.extend_from_slice(&i32::try_from(children.len()).unwrap().to_le_bytes());
        out.extend_from_slice(content);
        out.extend_from_slice(children);
        out
    }

    fn file(body: &[u8]) -> Vec<u8> {
        let mut out = VOX_MAGIC.to_vec();
        out.extend_from_slice(&VOX_VERSION.to_le_bytes());
        out.extend_from_slice(body);
        out
    }

    #[test]
    fn test_tag_classification() {
        assert_eq!(ChunkTag::from_bytes(*b"nTRN"), ChunkTag::Transform);
        assert_eq!(ChunkTag::from_bytes(*b"ZZZZ"), ChunkTag::Unknown(*b"ZZZZ"));
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = file(&[]);
        bytes[0] = b'X';
        assert!(matches!(
            decode(&bytes, DecodeOptions::default()),
            Err(DecodeError::InvalidMagic { found }) if &found == b"XOX "
        ));
    }

    #[test]
    fn test_version_mismatch_is_warning() {
        let mut bytes = VOX_MAGIC.to_vec();
        bytes.extend_from_slice(&200i32.to_le_bytes());
        bytes.extend(chunk(b"MAIN", &[], &[]));
        let mut decoder = VoxDecoder::new(DecodeOptions::default());
        let model = decoder.decode(&bytes).unwrap();
        assert_eq!(model.version, 200);
        assert_eq!(
            decoder.warnings(),
            &[DecodeWarning::VersionMismatch {
                found: 200,
                expected: VOX_VERSION
            }]
        );
    }

    #[test]
    fn test_nesting_limit() {
        let inner = chunk(b"MAIN", &[], &chunk(b"MAIN", &[], &[]));
        let bytes = file(&chunk(b"MAIN", &[], &inner));
        let shallow = DecodeOptions {
            max_nesting_depth: 1,
            ..DecodeOptions::default()
        };
        assert!(matches!(
            decode(&bytes, shallow),
            Err(DecodeError::NestingTooDeep { limit: 1 })
        ));

        let mut decoder = VoxDecoder::new(DecodeOptions::default());
        decoder.decode(&bytes).unwrap();
        assert_eq!(decoder.stats().max_depth, 2);
        assert_eq!(decoder.stats().chunk_count, 3);
    }

    #[test]
    fn test_xyzi_before_size_fails() {
        let mut content = 1i32.to_le_bytes().to_vec();
        content.extend_from_slice(&[0, 0, 0, 1]);
        let bytes = file(&chunk(b"XYZI", &content, &[]));
        assert!(matches!(
            decode(&bytes, DecodeOptions::default()),
            Err(DecodeError::VoxelsBeforeSize)
        ));
    }

    #[test]
    fn test_pack_preallocates_frames() {
        let mut size = Vec::new();
        for v in [1i32, 1, 1] {
            size.extend_from_slice(&v.to_le_bytes());
        }
        let mut body = chunk(b"PACK", &3i32.to_le_bytes(), &[]);
        body.extend(chunk(b"SIZE", &size, &[]));
        let model = decode(&file(&body), DecodeOptions::default()).unwrap();
        assert_eq!(model.frames.len(), 3);
        assert!(model.frames[0].is_sized());
        assert!(!model.frames[1].is_sized());
    }

    #[test]
    fn test_pack_rejects_absurd_counts() {
        let bytes = file(&chunk(b"PACK", &i32::MAX.to_le_bytes(), &[]));
        assert!(matches!(
            decode(&bytes, DecodeOptions::default()),
            Err(DecodeError::TooManyFrames { .. })
        ));
    }
}
