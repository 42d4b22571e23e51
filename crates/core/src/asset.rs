//! Placeable furniture records.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Aabb, GeometryError};

/// A loaded piece of furniture as seen by layout and drag handling.
///
/// `position` is the node origin. The measured bounding box is not always
/// centered on that origin (models are authored with the origin at the feet,
/// at a corner, ...), so `bounds_offset` records where the box center sits
/// relative to the origin after scale and rotation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlaceableAsset {
    /// Post-scale bounding box size.
    pub size: Vec3,
    /// Node origin in world space.
    pub position: Vec3,
    /// Offset from the node origin to the bounding box center.
    #[serde(default)]
    pub bounds_offset: Vec3,
}

impl PlaceableAsset {
    /// Asset of the given size whose box is centered on its origin.
    pub fn new(size: Vec3) -> Self {
        Self {
            size,
            position: Vec3::ZERO,
            bounds_offset: Vec3::ZERO,
        }
    }

    /// Set the origin-to-box-center offset.
    pub fn with_bounds_offset(mut self, offset: Vec3) -> Self {
        self.bounds_offset = offset;
        self
    }

    /// Set the initial position.
    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Height of the node origin above the bottom face of its box.
    pub fn vertical_offset(&self) -> f32 {
        self.size.y * 0.5 - self.bounds_offset.y
    }

    /// Center of the bounding box in world space.
    pub fn bounds_center(&self) -> Vec3 {
        self.position + self.bounds_offset
    }

    /// Move the asset so its bounding box is centered at `center`.
    pub fn set_bounds_center(&mut self, center: Vec3) {
        self.position = center - self.bounds_offset;
    }

    /// World-space bounding box.
    pub fn world_bounds(&self) -> Aabb {
        Aabb::from_center_size(self.bounds_center(), self.size)
    }

    /// Check the measured size and offset are usable.
    pub fn validate(&self) -> Result<(), GeometryError> {
        if !self.size.is_finite() || self.size.min_element() < 0.0 {
            return Err(GeometryError::InvalidAssetSize { size: self.size });
        }
        if !self.bounds_offset.is_finite() {
            return Err(GeometryError::InvalidBoundsOffset {
                offset: self.bounds_offset,
            });
        }
        Ok(())
    }
}
