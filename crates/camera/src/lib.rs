#![warn(missing_docs)]
//! Look-at camera used to turn pointer positions into world-space rays.

use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use roomstage_core::Ray;
use serde::{Deserialize, Serialize};

/// Projection model of the camera.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum Projection {
    /// Perspective frustum.
    Perspective {
        /// Vertical field of view in radians.
        fov: f32,
        /// Aspect ratio (width / height).
        aspect: f32,
        /// Near clipping plane distance.
        near: f32,
        /// Far clipping plane distance.
        far: f32,
    },
    /// Parallel projection of a fixed-size box.
    Orthographic {
        /// Half of the visible width in world units.
        half_width: f32,
        /// Half of the visible height in world units.
        half_height: f32,
        /// Near clipping plane distance.
        near: f32,
        /// Far clipping plane distance.
        far: f32,
    },
}

/// Camera looking from `position` toward `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    /// Camera position in world space.
    pub position: Vec3,
    /// Point the camera looks at.
    pub target: Vec3,
    /// Projection parameters.
    pub projection: Projection,
}

impl Default for Camera {
    fn default() -> Self {
        Self::perspective(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            75f32.to_radians(),
            16.0 / 9.0,
            0.1,
            1000.0,
        )
    }
}

impl Camera {
    /// Create a perspective camera.
    pub fn perspective(
        position: Vec3,
        target: Vec3,
        fov: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            projection: Projection::Perspective {
                fov,
                aspect,
                near,
                far,
            },
        }
    }

    /// Create an orthographic camera.
    pub fn orthographic(
        position: Vec3,
        target: Vec3,
        half_width: f32,
        half_height: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            projection: Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            },
        }
    }

    /// Get the forward direction vector (where camera is looking).
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize_or_zero()
    }

    /// Up vector used to build the view matrix.
    ///
    /// Falls back to -Z when looking straight up or down.
    fn up_hint(&self) -> Vec3 {
        if self.forward().y.abs() > 0.999 {
            Vec3::NEG_Z
        } else {
            Vec3::Y
        }
    }

    /// Compute the view matrix (world space -> camera space).
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up_hint())
    }

    /// Compute the projection matrix (camera space -> clip space).
    pub fn projection_matrix(&self) -> Mat4 {
        match self.projection {
            Projection::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov, aspect, near, far),
            Projection::Orthographic {
                half_width,
                half_height,
                near,
                far,
            } => Mat4::orthographic_rh(-half_width, half_width, -half_height, half_height, near, far),
        }
    }

    /// Compute the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Build the world-space ray under a point in normalized device coordinates.
    ///
    /// The ray starts on the near plane and passes through the far plane at
    /// the same NDC position, which works for both projection kinds. Values
    /// outside `[-1, 1]` are accepted and simply aim off-screen. Returns `None`
    /// when the camera matrices are singular.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Option<Ray> {
        let inverse = self.view_projection_matrix().inverse();
        if !inverse.is_finite() {
            return None;
        }
        // glam's projections map depth to [0, 1].
        let near = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(near, far - near)
    }

    /// Project a world-space point into normalized device coordinates.
    ///
    /// Returns `None` for points behind a perspective camera.
    pub fn project_to_ndc(&self, point: Vec3) -> Option<Vec2> {
        let clip = self.view_projection_matrix() * point.extend(1.0);
        if clip.w <= f32::EPSILON {
            return None;
        }
        let ndc = clip.xy() / clip.w;
        ndc.is_finite().then_some(ndc)
    }

    /// Follow a viewport resize.
    ///
    /// Perspective cameras take the new aspect ratio; orthographic cameras
    /// keep their visible height and widen or narrow to match. Zero-sized
    /// viewports (minimized windows) are ignored.
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        let new_aspect = width as f32 / height as f32;
        match &mut self.projection {
            Projection::Perspective { aspect, .. } => *aspect = new_aspect,
            Projection::Orthographic {
                half_width,
                half_height,
                ..
            } => *half_width = *half_height * new_aspect,
        }
    }
}
