//! # World Addressing
//!
//! Linear indices over the fixed addressable world. The same formula keys
//! voxels (in world units) and regions (in chunk units), so region keys are
//! interchangeable with any other store built on it.

/// World extent along X.
pub const MAX_WORLD_WIDTH: u32 = 2000;
/// World extent along Y.
pub const MAX_WORLD_HEIGHT: u32 = 1000;
/// World extent along Z.
pub const MAX_WORLD_LENGTH: u32 = 2000;
/// Palette capacity.
pub const MAX_COLORS_IN_PALETTE: usize = 256;
/// Default region edge length.
pub const DEFAULT_CHUNK_SIZE: u32 = 128;

/// `(y * MAX_WORLD_LENGTH + z) * MAX_WORLD_WIDTH + x`.
#[inline]
#[must_use]
pub fn voxel_index(x: i32, y: i32, z: i32) -> i64 {
    (i64::from(y) * i64::from(MAX_WORLD_LENGTH) + i64::from(z)) * i64::from(MAX_WORLD_WIDTH)
        + i64::from(x)
}

/// Index on the horizontal plane: `x + MAX_WORLD_WIDTH * z`.
#[inline]
#[must_use]
pub fn voxel_index_2d(x: i32, z: i32) -> i64 {
    i64::from(x) + i64::from(MAX_WORLD_WIDTH) * i64::from(z)
}

/// Axis a projection looks down.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum RotationMode {
    /// Project onto the ZY plane.
    X,
    /// Project onto the XZ plane.
    #[default]
    Y,
    /// Project onto the XY plane.
    Z,
}

/// 2D index of `(x, y, z)` projected along `mode`'s axis.
#[inline]
#[must_use]
pub fn voxel_index_2d_for_rotation(x: i32, y: i32, z: i32, mode: RotationMode) -> i64 {
    match mode {
        RotationMode::X => voxel_index_2d(z, y),
        RotationMode::Y => voxel_index_2d(x, z),
        RotationMode::Z => voxel_index_2d(x, y),
    }
}

/// True if the coordinate lies inside the addressable world.
#[inline]
#[must_use]
pub fn in_world(x: i32, y: i32, z: i32) -> bool {
    let inside = |v: i32, max: u32| u32::try_from(v).is_ok_and(|v| v < max);
    inside(x, MAX_WORLD_WIDTH) && inside(y, MAX_WORLD_HEIGHT) && inside(z, MAX_WORLD_LENGTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voxel_index_layout() {
        assert_eq!(voxel_index(0, 0, 0), 0);
        assert_eq!(voxel_index(1, 0, 0), 1);
        assert_eq!(voxel_index(0, 0, 1), 2000);
        assert_eq!(voxel_index(0, 1, 0), 4_000_000);
        assert_eq!(voxel_index(1999, 999, 1999), 3_999_999_999);
    }

    #[test]
    fn test_rotation_projections() {
        assert_eq!(voxel_index_2d_for_rotation(1, 2, 3, RotationMode::X), 3 + 2 * 2000);
        assert_eq!(voxel_index_2d_for_rotation(1, 2, 3, RotationMode::Y), 1 + 3 * 2000);
        assert_eq!(voxel_index_2d_for_rotation(1, 2, 3, RotationMode::Z), 1 + 2 * 2000);
    }

    #[test]
    fn test_world_bounds() {
        assert!(in_world(0, 0, 0));
        assert!(in_world(1999, 999, 1999));
        assert!(!in_world(2000, 0, 0));
        assert!(!in_world(0, 1000, 0));
        assert!(!in_world(0, 0, 2000));
        assert!(!in_world(-1, 0, 0));
    }
}
