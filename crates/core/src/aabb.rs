//! Axis-aligned bounding boxes and ray/box intersection.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Axis-aligned bounding box in world space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Minimum corner of the box.
    pub min: Vec3,
    /// Maximum corner of the box.
    pub max: Vec3,
}

impl Aabb {
    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size.abs() * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Measure the box enclosing a set of points.
    ///
    /// Returns `None` for an empty set or when any point is not finite.
    pub fn from_points<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        if !first.is_finite() {
            return None;
        }
        let mut min = first;
        let mut max = first;
        for point in iter {
            if !point.is_finite() {
                return None;
            }
            min = min.min(point);
            max = max.max(point);
        }
        Some(Self { min, max })
    }

    /// Center of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Extent of the box along each axis.
    pub fn size(&self) -> Vec3 {
        self.max - self.min
    }

    /// True when the box has no volume or carries non-finite corners.
    pub fn is_degenerate(&self) -> bool {
        let size = self.size();
        !self.min.is_finite() || !self.max.is_finite() || size.min_element() <= 0.0
    }

    /// Test whether a point lies inside or on the surface of the box.
    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Test if a ray intersects this AABB.
    ///
    /// Returns the distance along the ray to the nearest hit, or the exit
    /// distance when the ray starts inside the box. Degenerate boxes never hit.
    pub fn ray_intersection(&self, ray: &Ray) -> Option<f32> {
        if self.is_degenerate() {
            return None;
        }

        let mut tmin = f32::NEG_INFINITY;
        let mut tmax = f32::INFINITY;

        for axis in 0..3 {
            let origin = ray.origin[axis];
            let dir = ray.direction[axis];
            let (lo, hi) = (self.min[axis], self.max[axis]);

            if dir == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin < lo || origin > hi {
                    return None;
                }
                continue;
            }

            let inv = 1.0 / dir;
            let t1 = (lo - origin) * inv;
            let t2 = (hi - origin) * inv;
            tmin = tmin.max(t1.min(t2));
            tmax = tmax.min(t1.max(t2));
        }

        // Entire box is behind the ray origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        let distance = if tmin < 0.0 { tmax } else { tmin };
        distance.is_finite().then_some(distance)
    }
}
