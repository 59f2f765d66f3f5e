//! Scene-graph node chunks.

use crate::attributes::Attributes;
use crate::error::DecodeResult;
use crate::reader::ByteReader;

/// Kind of scene-graph node.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// nTRN.
    Transform,
    /// nGRP.
    Group,
    /// nSHP.
    Shape,
}

/// Reads an int32 count followed by that many items.
fn read_array<'a, T>(
    reader: &mut ByteReader<'a>,
    what: &'static str,
    mut item: impl FnMut(&mut ByteReader<'a>) -> DecodeResult<T>,
) -> DecodeResult<Vec<T>> {
    let count = reader.read_len(what)?;
    let mut out = Vec::with_capacity(count.min(256));
    for _ in 0..count {
        out.push(item(reader)?);
    }
    Ok(out)
}

/// Transform node: places exactly one child in space, per animation frame.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransformNode {
    /// Node id.
    pub id: i32,
    /// Node attributes (`_name`, `_hidden`).
    pub attributes: Attributes,
    /// Id of the child group or shape.
    pub child_id: i32,
    /// Reserved, always -1 in files seen so far.
    pub reserved_id: i32,
    /// Layer this node belongs to.
    pub layer_id: i32,
    /// One attribute mapping per animation frame (`_r`, `_t`, `_f`).
    pub frame_attributes: Vec<Attributes>,
}

impl TransformNode {
    /// Reads an nTRN payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: reader.read_i32()?,
            attributes: Attributes::read(reader)?,
            child_id: reader.read_i32()?,
            reserved_id: reader.read_i32()?,
            layer_id: reader.read_i32()?,
            frame_attributes: read_array(reader, "frame count", Attributes::read)?,
        })
    }

    /// Node name, empty if unset.
    #[must_use]
    pub fn name(&self) -> &str {
        self.attributes.get("_name").unwrap_or_default()
    }

    /// Typed view of each animation frame.
    pub fn frames(&self) -> impl Iterator<Item = FrameTransform<'_>> {
        self.frame_attributes.iter().map(FrameTransform)
    }
}

/// Group node: an unordered set of transform children.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GroupNode {
    /// Node id.
    pub id: i32,
    /// Node attributes.
    pub attributes: Attributes,
    /// Ids of child transform nodes.
    pub child_ids: Vec<i32>,
}

impl GroupNode {
    /// Reads an nGRP payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: reader.read_i32()?,
            attributes: Attributes::read(reader)?,
            child_ids: read_array(reader, "child count", ByteReader::read_i32)?,
        })
    }
}

/// A model reference inside a shape node.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeModel {
    /// Index into the model's frame list.
    pub model_id: i32,
    /// Per-model attributes (`_f` for animation frame).
    pub attributes: Attributes,
}

/// Shape node: leaf referencing one or more frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShapeNode {
    /// Node id.
    pub id: i32,
    /// Node attributes.
    pub attributes: Attributes,
    /// Referenced frames.
    pub models: Vec<ShapeModel>,
}

impl ShapeNode {
    /// Reads an nSHP payload.
    ///
    /// # Errors
    ///
    /// Fails on truncated content.
    pub fn read(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
        Ok(Self {
            id: reader.read_i32()?,
            attributes: Attributes::read(reader)?,
            models: read_array(reader, "model count", |r| {
                Ok(ShapeModel {
                    model_id: r.read_i32()?,
                    attributes: Attributes::read(r)?,
                })
            })?,
        })
    }
}

/// Packed rotation byte from a transform frame's `_r` attribute.
///
/// Bits 0-1 give the column of the non-zero entry in row 0, bits 2-3 the
/// column for row 1; row 2 takes the remaining column. Bits 4-6 are the
/// signs of rows 0-2 (set = negative).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rotation(pub u8);

impl Rotation {
    /// No rotation.
    pub const IDENTITY: Self = Self(0b0000_0100);

    /// Decodes into a signed 3x3 permutation matrix, indexed `[row][col]`.
    #[must_use]
    pub fn to_matrix(self) -> [[i8; 3]; 3] {
        let r = self.0;
        let col0 = usize::from(r & 0b11);
        let col1 = usize::from((r >> 2) & 0b11);
        let sign = |bit: u8| if r & (1 << bit) == 0 { 1 } else { -1 };

        let mut m = [[0i8; 3]; 3];
        if col0 < 3 {
            m[0][col0] = sign(4);
        }
        if col1 < 3 {
            m[1][col1] = sign(5);
        }
        match col0 + col1 {
            1 => m[2][2] = sign(6),
            2 => m[2][1] = sign(6),
            3 => m[2][0] = sign(6),
            _ => {}
        }
        m
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Typed view over one transform frame's attributes.
#[derive(Clone, Copy, Debug)]
pub struct FrameTransform<'a>(pub &'a Attributes);

impl FrameTransform<'_> {
    /// `_r`, identity if absent or malformed.
    #[must_use]
    pub fn rotation(&self) -> Rotation {
        self.0
            .get("_r")
            .and_then(|v| v.trim().parse::<u8>().ok())
            .map_or(Rotation::IDENTITY, Rotation)
    }

    /// `_t` as "x y z", zero if absent or malformed.
    #[must_use]
    pub fn translation(&self) -> [i32; 3] {
        let Some(value) = self.0.get("_t") else {
            return [0; 3];
        };
        let mut parts = value.split_whitespace().map(str::parse::<i32>);
        match (parts.next(), parts.next(), parts.next()) {
            (Some(Ok(x)), Some(Ok(y)), Some(Ok(z))) => [x, y, z],
            _ => [0; 3],
        }
    }

    /// `_f` animation frame index, 0 if absent.
    #[must_use]
    pub fn frame_index(&self) -> i32 {
        self.0
            .get("_f")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rotation() {
        assert_eq!(
            Rotation::IDENTITY.to_matrix(),
            [[1, 0, 0], [0, 1, 0], [0, 0, 1]]
        );
    }

    #[test]
    fn test_rotation_signs_and_permutation() {
        // row0 -> col 1, row1 -> col 0, row0 negative
        let r = Rotation(0b0001_0001);
        assert_eq!(r.to_matrix(), [[0, -1, 0], [1, 0, 0], [0, 0, 1]]);
    }

    #[test]
    fn test_frame_transform_accessors() {
        let attrs: Attributes = [("_t", "-4 10 2"), ("_f", "3"), ("_r", "17")]
            .into_iter()
            .collect();
        let frame = FrameTransform(&attrs);
        assert_eq!(frame.translation(), [-4, 10, 2]);
        assert_eq!(frame.frame_index(), 3);
        assert_eq!(frame.rotation(), Rotation(17));
    }

    #[test]
    fn test_frame_transform_defaults() {
        let attrs: Attributes = [("_t", "1 2")].into_iter().collect();
        let frame = FrameTransform(&attrs);
        assert_eq!(frame.translation(), [0, 0, 0]);
        assert_eq!(frame.rotation(), Rotation::IDENTITY);
        assert_eq!(frame.frame_index(), 0);
    }

    #[test]
    fn test_group_read() {
        let mut data = Vec::new();
        data.extend_from_slice(&5i32.to_le_bytes());
        data.extend_from_slice(&0i32.to_le_bytes());
        data.extend_from_slice(&2i32.to_le_bytes());
        data.extend_from_slice(&7i32.to_le_bytes());
        data.extend_from_slice(&9i32.to_le_bytes());
        let group = GroupNode::read(&mut ByteReader::new(&data)).unwrap();
        assert_eq!(group.id, 5);
        assert_eq!(group.child_ids, vec![7, 9]);
    }
}
