//! Geometry error type.

use glam::Vec3;
use thiserror::Error;

/// Geometry that cannot produce a valid placement or drag bound.
///
/// Callers in the layout and drag paths recover from every variant locally;
/// none of these are meant to reach the host application.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum GeometryError {
    /// Floor has a missing, negative or non-finite footprint.
    #[error("floor size {size} does not describe a usable footprint")]
    InvalidFloor {
        /// Offending floor size.
        size: Vec3,
    },
    /// Floor position contains NaN or infinity.
    #[error("floor position {position} is not finite")]
    NonFiniteFloorPosition {
        /// Offending floor position.
        position: Vec3,
    },
    /// Asset bounding box is negative or non-finite.
    #[error("asset size {size} is not a valid bounding box")]
    InvalidAssetSize {
        /// Offending asset size.
        size: Vec3,
    },
    /// Asset origin-to-bounds offset is non-finite.
    #[error("asset bounds offset {offset} is not finite")]
    InvalidBoundsOffset {
        /// Offending offset.
        offset: Vec3,
    },
}
