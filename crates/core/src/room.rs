//! Room shell envelope (floor, walls, ceiling).

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::{Aabb, FootprintBounds, GeometryError, PlaceableAsset};

/// One box-shaped part of the room: a size and the position of its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPart {
    /// Width, height and depth.
    pub size: Vec3,
    /// Center of the box in world space.
    pub position: Vec3,
}

impl BoxPart {
    /// Create a part from its size and center.
    pub const fn new(size: Vec3, position: Vec3) -> Self {
        Self { size, position }
    }

    /// World-space bounds of the part.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.position, self.size)
    }

    /// Height of the part's upper face.
    pub fn top(&self) -> f32 {
        self.position.y + self.size.y * 0.5
    }

    /// Height of the part's lower face.
    pub fn bottom(&self) -> f32 {
        self.position.y - self.size.y * 0.5
    }
}

/// Geometric envelope of the room.
///
/// Positioned by the scene bootstrap; layout and drag handling only read it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RoomShell {
    /// Floor slab. Its top face is the resting height for every asset.
    pub floor: BoxPart,
    /// Wall block behind the floor.
    pub walls: BoxPart,
    /// Ceiling slab.
    pub ceiling: BoxPart,
}

impl RoomShell {
    /// Assemble a shell from already-positioned parts.
    pub const fn new(floor: BoxPart, walls: BoxPart, ceiling: BoxPart) -> Self {
        Self {
            floor,
            walls,
            ceiling,
        }
    }

    /// Height of the floor's top face.
    pub fn floor_top(&self) -> f32 {
        self.floor.top()
    }

    /// Check that the floor can bound assets.
    ///
    /// The horizontal footprint must be finite and positive; the slab
    /// thickness must be finite and non-negative.
    pub fn validate(&self) -> Result<(), GeometryError> {
        let size = self.floor.size;
        let footprint_ok = size.x.is_finite() && size.z.is_finite() && size.x > 0.0 && size.z > 0.0;
        let thickness_ok = size.y.is_finite() && size.y >= 0.0;
        if !footprint_ok || !thickness_ok {
            return Err(GeometryError::InvalidFloor { size });
        }
        if !self.floor.position.is_finite() {
            return Err(GeometryError::NonFiniteFloorPosition {
                position: self.floor.position,
            });
        }
        Ok(())
    }

    /// Bounds inside which `asset` may sit on this floor.
    pub fn footprint_bounds(&self, asset: &PlaceableAsset) -> Result<FootprintBounds, GeometryError> {
        self.validate()?;
        asset.validate()?;
        Ok(FootprintBounds::new(&self.floor, asset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_with_floor(size: Vec3) -> RoomShell {
        let floor = BoxPart::new(size, Vec3::ZERO);
        let walls = BoxPart::new(Vec3::new(10.0, 4.0, 0.5), Vec3::new(0.0, 2.0, -3.25));
        let ceiling = BoxPart::new(size, Vec3::new(0.0, 4.0, 0.0));
        RoomShell::new(floor, walls, ceiling)
    }

    #[test]
    fn floor_top_is_half_thickness_above_center() {
        let mut shell = shell_with_floor(Vec3::new(10.0, 0.2, 6.0));
        assert!((shell.floor_top() - 0.1).abs() < 1e-6);
        shell.floor.position.y = -1.25;
        assert!((shell.floor_top() + 1.15).abs() < 1e-6);
    }

    #[test]
    fn validate_rejects_unset_floor() {
        let shell = shell_with_floor(Vec3::ZERO);
        assert!(matches!(
            shell.validate(),
            Err(GeometryError::InvalidFloor { .. })
        ));

        let shell = shell_with_floor(Vec3::new(f32::NAN, 0.2, 6.0));
        assert!(shell.validate().is_err());
    }

    #[test]
    fn validate_rejects_non_finite_position() {
        let mut shell = shell_with_floor(Vec3::new(10.0, 0.2, 6.0));
        shell.floor.position.x = f32::INFINITY;
        assert!(matches!(
            shell.validate(),
            Err(GeometryError::NonFiniteFloorPosition { .. })
        ));
    }

    #[test]
    fn part_faces() {
        let part = BoxPart::new(Vec3::new(6.0, 0.2, 6.0), Vec3::new(0.0, 1.25, 0.0));
        assert!((part.bottom() - 1.15).abs() < 1e-6);
        assert!((part.top() - 1.35).abs() < 1e-6);
        assert_eq!(part.aabb().size(), part.size);
    }
}
