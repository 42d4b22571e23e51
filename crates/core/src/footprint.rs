//! Floor-footprint bounds for a single asset.

use glam::Vec3;

use crate::{available_half_extent, clamp_symmetric, BoxPart, PlaceableAsset, POSITION_EPSILON};

/// Valid region for one asset's origin on a given floor.
///
/// Horizontally the asset's box center may travel `half_extent_*` from the
/// floor center; vertically the origin is pinned so the box rests on the
/// floor's top face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FootprintBounds {
    /// Floor center on X.
    pub center_x: f32,
    /// Floor center on Z.
    pub center_z: f32,
    /// Allowed travel of the box center along X.
    pub half_extent_x: f32,
    /// Allowed travel of the box center along Z.
    pub half_extent_z: f32,
    /// Origin height that puts the box bottom on the floor top.
    pub rest_y: f32,
    bounds_offset: Vec3,
}

impl FootprintBounds {
    /// Bounds for `asset` on `floor`. Inputs are assumed validated.
    pub(crate) fn new(floor: &BoxPart, asset: &PlaceableAsset) -> Self {
        Self {
            center_x: floor.position.x,
            center_z: floor.position.z,
            half_extent_x: available_half_extent(floor.size.x, asset.size.x),
            half_extent_z: available_half_extent(floor.size.z, asset.size.z),
            rest_y: floor.top() + asset.vertical_offset(),
            bounds_offset: asset.bounds_offset,
        }
    }

    /// Clamp a candidate origin into the bounds.
    pub fn clamp(&self, origin: Vec3) -> Vec3 {
        let center = origin + self.bounds_offset;
        let x = clamp_symmetric(center.x, self.center_x, self.half_extent_x);
        let z = clamp_symmetric(center.z, self.center_z, self.half_extent_z);
        Vec3::new(x - self.bounds_offset.x, self.rest_y, z - self.bounds_offset.z)
    }

    /// Whether `origin` satisfies the bounds (within [`POSITION_EPSILON`]).
    pub fn contains(&self, origin: Vec3) -> bool {
        let center = origin + self.bounds_offset;
        (center.x - self.center_x).abs() <= self.half_extent_x + POSITION_EPSILON
            && (center.z - self.center_z).abs() <= self.half_extent_z + POSITION_EPSILON
            && (origin.y - self.rest_y).abs() <= POSITION_EPSILON
    }
}
