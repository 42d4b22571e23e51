use std::fs;
use std::path::Path;

use glam::{Quat, Vec3};
use roomstage_core::{Aabb, PlaceableAsset};
use thiserror::Error;

/// Errors emitted while measuring model geometry.
#[derive(Debug, Error)]
pub enum ObjError {
    /// Wrap IO errors when reading model files.
    #[error("failed to read model: {0}")]
    Io(#[from] std::io::Error),
    /// A vertex line could not be parsed.
    #[error("line {line}: malformed vertex ({reason})")]
    Parse {
        /// 1-based line number.
        line: usize,
        /// What was wrong with it.
        reason: String,
    },
    /// The model has no vertices, or a transformed vertex is not finite.
    #[error("model has no measurable vertices")]
    Empty,
}

/// Measured bounds of a loaded model, after scale and rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AssetGeometry {
    /// Bounding box size.
    pub size: Vec3,
    /// Offset from the model origin to the bounding box center.
    pub bounds_offset: Vec3,
}

impl AssetGeometry {
    /// Geometry for a box of known size centered on its origin.
    pub fn from_size(size: Vec3) -> Self {
        Self {
            size,
            bounds_offset: Vec3::ZERO,
        }
    }

    /// Measure vertices after a uniform `scale` and a rotation of `yaw`
    /// radians about +Y.
    pub fn from_vertices<I>(vertices: I, scale: f32, yaw: f32) -> Result<Self, ObjError>
    where
        I: IntoIterator<Item = Vec3>,
    {
        let rotation = Quat::from_rotation_y(yaw);
        let bounds = Aabb::from_points(vertices.into_iter().map(|v| rotation * (v * scale)))
            .ok_or(ObjError::Empty)?;
        Ok(Self {
            size: bounds.size(),
            bounds_offset: bounds.center(),
        })
    }

    /// Measure the `v` records of a Wavefront OBJ document.
    pub fn from_obj_str(source: &str, scale: f32, yaw: f32) -> Result<Self, ObjError> {
        Self::from_vertices(parse_obj_vertices(source)?, scale, yaw)
    }

    /// Read and measure an OBJ file.
    pub fn from_obj_file(path: &Path, scale: f32, yaw: f32) -> Result<Self, ObjError> {
        let source = fs::read_to_string(path)?;
        Self::from_obj_str(&source, scale, yaw)
    }

    /// Ready-to-place asset with this geometry at the origin.
    pub fn into_asset(self) -> PlaceableAsset {
        PlaceableAsset::new(self.size).with_bounds_offset(self.bounds_offset)
    }
}

/// Collect vertex positions; faces, normals and texture coordinates are
/// irrelevant for bounds.
fn parse_obj_vertices(source: &str) -> Result<Vec<Vec3>, ObjError> {
    let mut vertices = Vec::new();
    for (index, raw) in source.lines().enumerate() {
        let mut fields = raw.split_whitespace();
        if fields.next() != Some("v") {
            continue;
        }
        let mut coords = [0.0f32; 3];
        for (axis, slot) in coords.iter_mut().enumerate() {
            let field = fields.next().ok_or_else(|| ObjError::Parse {
                line: index + 1,
                reason: format!("expected 3 coordinates, found {axis}"),
            })?;
            *slot = field.parse().map_err(|err| ObjError::Parse {
                line: index + 1,
                reason: format!("{field:?}: {err}"),
            })?;
        }
        vertices.push(Vec3::from_array(coords));
    }
    Ok(vertices)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CUBE_AT_FEET: &str = "\
# unit cube with origin on the bottom face
o cube
v -0.5 0.0 -0.5
v 0.5 0.0 -0.5
v 0.5 1.0 -0.5
v -0.5 1.0 -0.5
v -0.5 0.0 0.5
v 0.5 0.0 0.5
v 0.5 1.0 0.5
v -0.5 1.0 0.5
vn 0.0 1.0 0.0
vt 0.0 0.0
f 1 2 3 4
";

    #[test]
    fn measures_scaled_bounds_and_offset() {
        let geometry = AssetGeometry::from_obj_str(CUBE_AT_FEET, 2.0, 0.0).unwrap();
        assert_eq!(geometry.size, Vec3::splat(2.0));
        assert_eq!(geometry.bounds_offset, Vec3::new(0.0, 1.0, 0.0));

        let asset = geometry.into_asset();
        assert_eq!(asset.vertical_offset(), 0.0);
    }

    #[test]
    fn quarter_turn_swaps_width_and_depth() {
        let vertices = [Vec3::new(-2.0, 0.0, -0.5), Vec3::new(2.0, 1.0, 0.5)];
        let geometry =
            AssetGeometry::from_vertices(vertices, 1.0, std::f32::consts::FRAC_PI_2).unwrap();
        assert!((geometry.size.x - 1.0).abs() < 1e-5);
        assert!((geometry.size.z - 4.0).abs() < 1e-5);
    }

    #[test]
    fn malformed_vertex_reports_line() {
        let err = AssetGeometry::from_obj_str("v 1 2 3\nv 1 nope 3\n", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 2, .. }));

        let err = AssetGeometry::from_obj_str("v 1 2\n", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, ObjError::Parse { line: 1, .. }));
    }

    #[test]
    fn model_without_vertices_is_empty() {
        let err = AssetGeometry::from_obj_str("# nothing\nf 1 2 3\n", 1.0, 0.0).unwrap_err();
        assert!(matches!(err, ObjError::Empty));
    }
}
