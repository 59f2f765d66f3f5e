//! # Schematic
//!
//! Editable sparse voxel volume over a fixed 2000x1000x2000 world.
//!
//! ## Storage
//!
//! Voxels live in [`Region`]s, cubic partitions of `chunk_size` voxels per
//! edge. A region is created the first time a voxel lands in it and is never
//! destroyed, only left empty. A coordinate whose region does not exist is
//! simply empty.
//!
//! ## Bounding box
//!
//! `min`/`max` start at the origin and only grow. Removing voxels never
//! shrinks them, and the dimension accessors report `0` until the palette
//! holds at least one color.

use std::collections::BTreeMap;

use voxkit_format::{Palette, VoxelGrid};

use crate::config::SchematicConfig;
use crate::error::SchematicResult;
use crate::index::{in_world, voxel_index};
use crate::palette::ColorPalette;
use crate::region::{Region, Voxel};

/// Inclusive axis-aligned extent.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Bounds {
    /// Smallest coordinate per axis.
    pub min: [i32; 3],
    /// Largest coordinate per axis.
    pub max: [i32; 3],
}

impl Bounds {
    /// `max - min + 1` per axis.
    #[must_use]
    pub fn extent(&self) -> [u16; 3] {
        let axis = |i: usize| u16::try_from(self.max[i] - self.min[i] + 1).unwrap_or(u16::MAX);
        [axis(0), axis(1), axis(2)]
    }
}

/// Sparse paletted voxel store.
#[derive(Clone, Debug)]
pub struct Schematic {
    config: SchematicConfig,
    regions: BTreeMap<i64, Region>,
    palette: ColorPalette,
    bounds: Bounds,
}

impl Default for Schematic {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Schematic {
    /// Creates an empty store with the default region size.
    ///
    /// With `fixed_palette`, colors keep the caller's order; otherwise the
    /// palette sorts itself descending.
    #[must_use]
    pub fn new(fixed_palette: Option<Vec<u32>>) -> Self {
        Self::build(SchematicConfig::default(), fixed_palette)
    }

    /// Creates an empty store with custom region partitioning.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` fails validation.
    pub fn with_config(
        config: SchematicConfig,
        fixed_palette: Option<Vec<u32>>,
    ) -> SchematicResult<Self> {
        config.validate()?;
        Ok(Self::build(config, fixed_palette))
    }

    fn build(config: SchematicConfig, fixed_palette: Option<Vec<u32>>) -> Self {
        let palette = fixed_palette.map_or_else(ColorPalette::self_managed, ColorPalette::fixed);
        tracing::debug!(
            chunk_size = config.chunk_size,
            fixed_palette = palette.is_fixed(),
            "schematic created"
        );
        Self {
            config,
            regions: BTreeMap::new(),
            palette,
            bounds: Bounds::default(),
        }
    }

    /// Creates a self-managed store holding `voxels`.
    #[must_use]
    pub fn from_voxels<I: IntoIterator<Item = Voxel>>(voxels: I) -> Self {
        let mut schematic = Self::new(None);
        schematic.add_voxels(voxels);
        schematic
    }

    /// Configuration in effect.
    #[inline]
    #[must_use]
    pub const fn config(&self) -> &SchematicConfig {
        &self.config
    }

    // =========================================================================
    // Mutation
    // =========================================================================

    /// Adds every voxel, replacing existing ones.
    pub fn add_voxels<I: IntoIterator<Item = Voxel>>(&mut self, voxels: I) {
        for voxel in voxels {
            self.add_voxel(voxel.x.into(), voxel.y.into(), voxel.z.into(), voxel.color);
        }
    }

    /// Stores a voxel, replacing any voxel already at that position.
    pub fn add_voxel(&mut self, x: i32, y: i32, z: i32, color: u32) {
        self.add_voxel_with(x, y, z, color, true);
    }

    /// Stores a voxel.
    ///
    /// No-op if `color` is `0`, the coordinate is outside the world, or
    /// `replace_if_exist` is false and the position is occupied.
    pub fn add_voxel_with(&mut self, x: i32, y: i32, z: i32, color: u32, replace_if_exist: bool) {
        let Some(voxel) = Self::make_voxel(x, y, z, color) else {
            return;
        };
        if !replace_if_exist && self.contains_voxel(x, y, z) {
            return;
        }
        self.palette.register(color);
        let key = self.region_index(x, y, z);
        let origin = self.region_origin(x, y, z);
        self.regions
            .entry(key)
            .or_insert_with(|| Region::new(origin))
            .insert(voxel);
        self.grow_bounds(x, y, z);
    }

    /// Changes the color of an existing voxel.
    ///
    /// The color is registered in the palette even when no voxel is present.
    /// No-op if `color` is `0`.
    pub fn replace_voxel(&mut self, x: i32, y: i32, z: i32, color: u32) {
        if color == 0 {
            return;
        }
        self.palette.register(color);
        if !in_world(x, y, z) {
            return;
        }
        let key = self.region_index(x, y, z);
        if let Some(voxel) = self
            .regions
            .get_mut(&key)
            .and_then(|region| region.get_mut(voxel_index(x, y, z)))
        {
            voxel.color = color;
        }
    }

    /// Deletes the voxel at a position and returns it. The bounding box is
    /// left untouched.
    pub fn remove_voxel(&mut self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        if !in_world(x, y, z) {
            return None;
        }
        let key = self.region_index(x, y, z);
        self.regions
            .get_mut(&key)
            .and_then(|region| region.remove(voxel_index(x, y, z)))
    }

    /// Copies every voxel of a decoded frame into the store.
    ///
    /// Palette indices are resolved through `palette` and stored as packed
    /// ARGB. Frame coordinates are offset by `origin` and otherwise copied
    /// verbatim. Returns the number of voxels written.
    pub fn import_grid(&mut self, grid: &VoxelGrid, palette: &Palette, origin: [i32; 3]) -> usize {
        let offset = |v: usize, o: i32| i32::try_from(v).ok().and_then(|v| v.checked_add(o));
        let mut written = 0;
        for ((x, y, z), index) in grid.voxels() {
            let color = palette[usize::from(index)].to_argb();
            let (Some(x), Some(y), Some(z)) =
                (offset(x, origin[0]), offset(y, origin[1]), offset(z, origin[2]))
            else {
                continue;
            };
            if color != 0 && in_world(x, y, z) {
                self.add_voxel(x, y, z, color);
                written += 1;
            }
        }
        tracing::debug!(written, total = grid.len(), "imported frame");
        written
    }

    // =========================================================================
    // Queries
    // =========================================================================

    /// Voxel at a position.
    #[must_use]
    pub fn get_voxel(&self, x: i32, y: i32, z: i32) -> Option<Voxel> {
        if !in_world(x, y, z) {
            return None;
        }
        self.regions
            .get(&self.region_index(x, y, z))
            .and_then(|region| region.voxel(x, y, z))
            .copied()
    }

    /// True if a voxel is stored at the position.
    #[must_use]
    pub fn contains_voxel(&self, x: i32, y: i32, z: i32) -> bool {
        self.get_voxel(x, y, z).is_some()
    }

    /// Color at a position, `0` if empty.
    #[must_use]
    pub fn color_at(&self, x: i32, y: i32, z: i32) -> u32 {
        self.get_voxel(x, y, z).map_or(0, |v| v.color)
    }

    /// Every stored voxel, grouped by region.
    pub fn all_voxels(&self) -> impl Iterator<Item = &Voxel> + '_ {
        self.regions.values().flat_map(Region::iter)
    }

    /// Regions holding at least one voxel, ordered by region index.
    pub fn all_regions(&self) -> impl Iterator<Item = &Region> + '_ {
        self.regions.values().filter(|region| !region.is_empty())
    }

    /// Total stored voxels.
    #[must_use]
    pub fn voxel_count(&self) -> usize {
        self.regions.values().map(Region::len).sum()
    }

    // =========================================================================
    // Palette
    // =========================================================================

    /// The used-color palette.
    #[inline]
    #[must_use]
    pub const fn palette(&self) -> &ColorPalette {
        &self.palette
    }

    /// Current palette index of `color`. Not stable across insertions into a
    /// self-managed palette.
    #[must_use]
    pub fn palette_index(&self, color: u32) -> Option<usize> {
        self.palette.index_of(color)
    }

    /// Palette color at `index`, `0` when out of range.
    #[must_use]
    pub fn color_at_palette_index(&self, index: usize) -> u32 {
        self.palette.color_at(index)
    }

    // =========================================================================
    // Extent
    // =========================================================================

    /// Smallest coordinate ever written, per axis.
    #[inline]
    #[must_use]
    pub const fn min(&self) -> [i32; 3] {
        self.bounds.min
    }

    /// Largest coordinate ever written, per axis.
    #[inline]
    #[must_use]
    pub const fn max(&self) -> [i32; 3] {
        self.bounds.max
    }

    /// Bounding box, or `None` while the palette is empty.
    #[must_use]
    pub fn bounds(&self) -> Option<Bounds> {
        (!self.palette.is_empty()).then_some(self.bounds)
    }

    /// Extent along X.
    #[must_use]
    pub fn width(&self) -> u16 {
        self.extent()[0]
    }

    /// Extent along Y.
    #[must_use]
    pub fn height(&self) -> u16 {
        self.extent()[1]
    }

    /// Extent along Z.
    #[must_use]
    pub fn length(&self) -> u16 {
        self.extent()[2]
    }

    fn extent(&self) -> [u16; 3] {
        self.bounds().map_or([0; 3], |b| b.extent())
    }

    // =========================================================================
    // Internals
    // =========================================================================

    fn make_voxel(x: i32, y: i32, z: i32, color: u32) -> Option<Voxel> {
        if color == 0 || !in_world(x, y, z) {
            return None;
        }
        Some(Voxel::new(
            u16::try_from(x).ok()?,
            u16::try_from(y).ok()?,
            u16::try_from(z).ok()?,
            color,
        ))
    }

    fn chunk_coord(&self, x: i32, y: i32, z: i32) -> [i32; 3] {
        let size = i32::try_from(self.config.chunk_size).unwrap_or(i32::MAX);
        [x.div_euclid(size), y.div_euclid(size), z.div_euclid(size)]
    }

    /// Key of the region owning a world coordinate: [`voxel_index`] applied
    /// to the floor-divided chunk coordinate.
    #[must_use]
    pub fn region_index(&self, x: i32, y: i32, z: i32) -> i64 {
        let [cx, cy, cz] = self.chunk_coord(x, y, z);
        voxel_index(cx, cy, cz)
    }

    fn region_origin(&self, x: i32, y: i32, z: i32) -> [i32; 3] {
        let size = i32::try_from(self.config.chunk_size).unwrap_or(i32::MAX);
        self.chunk_coord(x, y, z).map(|c| c * size)
    }

    fn grow_bounds(&mut self, x: i32, y: i32, z: i32) {
        let Bounds { min, max } = &mut self.bounds;
        for (axis, v) in [x, y, z].into_iter().enumerate() {
            min[axis] = min[axis].min(v);
            max[axis] = max[axis].max(v);
        }
    }
}
