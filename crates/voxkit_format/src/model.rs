//! # Decoded Model
//!
//! The aggregate produced by one decode pass: frames, the scene graph as
//! three flat node lists, and the side tables.
//!
//! The scene graph is an arena. Nodes refer to each other by integer id and
//! [`VoxModel::node_index`] builds the id lookup on demand. Duplicate or
//! dangling ids are representable; [`VoxModel::consistency_issues`] reports
//! them without touching the model.

use std::collections::{HashMap, HashSet};

use thiserror::Error;

use crate::chunks::{
    GroupNode, LayerChunk, MaterialChunk, NodeKind, RendererSettingChunk, ShapeNode,
    TransformNode,
};
use crate::color::{default_palette, Palette, PALETTE_SIZE};
use crate::grid::VoxelGrid;

/// Identity palette remap table.
#[must_use]
pub fn identity_remap() -> [u8; PALETTE_SIZE] {
    let mut remap = [0u8; PALETTE_SIZE];
    for (slot, value) in remap.iter_mut().zip(0u8..=255) {
        *slot = value;
    }
    remap
}

/// Everything decoded from one scene file.
#[derive(Debug, Clone, PartialEq)]
pub struct VoxModel {
    /// Header version.
    pub version: i32,
    /// 256 palette slots; slot 0 is reserved by convention.
    pub palette: Palette,
    /// IMAP table, identity unless the file overrides it.
    pub palette_remap: [u8; PALETTE_SIZE],
    /// Voxel frames in SIZE arrival order.
    pub frames: Vec<VoxelGrid>,
    /// nTRN nodes in document order.
    pub transform_nodes: Vec<TransformNode>,
    /// nGRP nodes in document order.
    pub group_nodes: Vec<GroupNode>,
    /// nSHP nodes in document order.
    pub shape_nodes: Vec<ShapeNode>,
    /// LAYR chunks.
    pub layers: Vec<LayerChunk>,
    /// MATL chunks.
    pub materials: Vec<MaterialChunk>,
    /// rOBJ chunks.
    pub renderer_settings: Vec<RendererSettingChunk>,
    /// Every color index read from XYZI chunks, zeros and repeats included.
    pub colors_used: Vec<u8>,
}

impl Default for VoxModel {
    fn default() -> Self {
        Self {
            version: 0,
            palette: default_palette(),
            palette_remap: identity_remap(),
            frames: Vec::new(),
            transform_nodes: Vec::new(),
            group_nodes: Vec::new(),
            shape_nodes: Vec::new(),
            layers: Vec::new(),
            materials: Vec::new(),
            renderer_settings: Vec::new(),
            colors_used: Vec::new(),
        }
    }
}

/// Position of a node within its kind's list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeRef {
    /// Index into `transform_nodes`.
    Transform(usize),
    /// Index into `group_nodes`.
    Group(usize),
    /// Index into `shape_nodes`.
    Shape(usize),
}

impl NodeRef {
    /// The node's kind.
    #[must_use]
    pub const fn kind(self) -> NodeKind {
        match self {
            Self::Transform(_) => NodeKind::Transform,
            Self::Group(_) => NodeKind::Group,
            Self::Shape(_) => NodeKind::Shape,
        }
    }
}

/// Borrowed view of a resolved node.
#[derive(Clone, Copy, Debug)]
pub enum SceneNode<'a> {
    /// A transform node.
    Transform(&'a TransformNode),
    /// A group node.
    Group(&'a GroupNode),
    /// A shape node.
    Shape(&'a ShapeNode),
}

/// Scene-graph problems found by the consistency checks.
#[derive(Error, Clone, Debug, PartialEq, Eq)]
pub enum ConsistencyIssue {
    /// The same id is used by more than one node.
    #[error("duplicate id: {0}")]
    DuplicateId(i32),
    /// The same child id appears in more than one group slot.
    #[error("duplicate child group id: {0}")]
    DuplicateChildId(i32),
    /// A transform (other than the root, id 0) is not a child of any group.
    #[error("transform id never referenced by any group: {0}")]
    OrphanTransform(i32),
}

/// Values occurring more than once, in order of first repeat.
fn duplicates(ids: impl IntoIterator<Item = i32>) -> Vec<i32> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    let mut out = Vec::new();
    for id in ids {
        if !seen.insert(id) && reported.insert(id) {
            out.push(id);
        }
    }
    out
}

impl VoxModel {
    /// Builds the id lookup. On duplicate ids the first node wins, in the
    /// order groups, transforms, shapes.
    #[must_use]
    pub fn node_index(&self) -> HashMap<i32, NodeRef> {
        let mut index = HashMap::new();
        let groups = self.group_nodes.iter().enumerate().map(|(i, n)| (n.id, NodeRef::Group(i)));
        let transforms = self
            .transform_nodes
            .iter()
            .enumerate()
            .map(|(i, n)| (n.id, NodeRef::Transform(i)));
        let shapes = self.shape_nodes.iter().enumerate().map(|(i, n)| (n.id, NodeRef::Shape(i)));
        for (id, node) in groups.chain(transforms).chain(shapes) {
            index.entry(id).or_insert(node);
        }
        index
    }

    /// Resolves a node id. Linear scan; build [`Self::node_index`] for bulk lookups.
    #[must_use]
    pub fn node(&self, id: i32) -> Option<SceneNode<'_>> {
        if let Some(n) = self.group_nodes.iter().find(|n| n.id == id) {
            return Some(SceneNode::Group(n));
        }
        if let Some(n) = self.transform_nodes.iter().find(|n| n.id == id) {
            return Some(SceneNode::Transform(n));
        }
        self.shape_nodes
            .iter()
            .find(|n| n.id == id)
            .map(SceneNode::Shape)
    }

    /// The implicit root transform (id 0), if present.
    #[must_use]
    pub fn root(&self) -> Option<&TransformNode> {
        self.transform_nodes.iter().find(|n| n.id == 0)
    }

    /// Looks up a frame referenced by a shape model id.
    #[must_use]
    pub fn frame(&self, model_id: i32) -> Option<&VoxelGrid> {
        usize::try_from(model_id).ok().and_then(|i| self.frames.get(i))
    }

    /// Total non-zero voxels across all frames.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.frames.iter().map(|f| f.voxels().count()).sum()
    }

    /// Runs every scene-graph consistency check. Report only.
    #[must_use]
    pub fn consistency_issues(&self) -> Vec<ConsistencyIssue> {
        let all_ids = self
            .group_nodes
            .iter()
            .map(|n| n.id)
            .chain(self.transform_nodes.iter().map(|n| n.id))
            .chain(self.shape_nodes.iter().map(|n| n.id));
        let child_ids: Vec<i32> = self
            .group_nodes
            .iter()
            .flat_map(|g| g.child_ids.iter().copied())
            .collect();
        let referenced: HashSet<i32> = child_ids.iter().copied().collect();

        let mut issues: Vec<ConsistencyIssue> = duplicates(all_ids)
            .into_iter()
            .map(ConsistencyIssue::DuplicateId)
            .collect();
        issues.extend(
            duplicates(child_ids)
                .into_iter()
                .map(ConsistencyIssue::DuplicateChildId),
        );
        issues.extend(
            self.transform_nodes
                .iter()
                .filter(|t| t.id != 0 && !referenced.contains(&t.id))
                .map(|t| ConsistencyIssue::OrphanTransform(t.id)),
        );
        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transform(id: i32, child_id: i32) -> TransformNode {
        TransformNode {
            id,
            child_id,
            reserved_id: -1,
            ..TransformNode::default()
        }
    }

    fn scene() -> VoxModel {
        VoxModel {
            transform_nodes: vec![transform(0, 1), transform(2, 3)],
            group_nodes: vec![GroupNode {
                id: 1,
                child_ids: vec![2],
                ..GroupNode::default()
            }],
            shape_nodes: vec![ShapeNode {
                id: 3,
                ..ShapeNode::default()
            }],
            ..VoxModel::default()
        }
    }

    #[test]
    fn test_identity_remap() {
        let remap = identity_remap();
        assert_eq!(remap[0], 0);
        assert_eq!(remap[255], 255);
    }

    #[test]
    fn test_node_resolution() {
        let model = scene();
        let index = model.node_index();
        assert_eq!(index[&1], NodeRef::Group(0));
        assert_eq!(index[&3].kind(), NodeKind::Shape);
        assert!(matches!(model.node(2), Some(SceneNode::Transform(t)) if t.child_id == 3));
        assert!(model.node(42).is_none());
        assert_eq!(model.root().map(|r| r.child_id), Some(1));
    }

    #[test]
    fn test_clean_scene_has_no_issues() {
        assert!(scene().consistency_issues().is_empty());
    }

    #[test]
    fn test_consistency_issues() {
        let mut model = scene();
        model.shape_nodes.push(ShapeNode {
            id: 2,
            ..ShapeNode::default()
        });
        model.group_nodes.push(GroupNode {
            id: 4,
            child_ids: vec![2],
            ..GroupNode::default()
        });
        model.transform_nodes.push(transform(5, 3));

        let issues = model.consistency_issues();
        assert_eq!(
            issues,
            vec![
                ConsistencyIssue::DuplicateId(2),
                ConsistencyIssue::DuplicateChildId(2),
                ConsistencyIssue::OrphanTransform(5),
            ]
        );
    }
}
