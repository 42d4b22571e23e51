#![warn(missing_docs)]
//! Initial furniture placement from measured bounding boxes.
//!
//! Every asset is dropped onto the floor's top face and pushed toward the
//! wall, corner or center its [`PlacementRule`] names. The only distances
//! involved are the floor footprint, the asset's own footprint and an
//! optional per-asset wall gap, so placement needs no hand-tuned
//! coordinates.

mod engine;
mod rule;

pub use engine::LayoutEngine;
pub use rule::{Anchor, PlacementRule};

use glam::Vec3;
use roomstage_core::{GeometryError, PlaceableAsset, RoomShell};
use tracing::warn;

/// Compute where `asset` should sit under `rule`.
///
/// The result rests the asset's box on the floor and keeps the box center
/// within `floor.size / 2 - asset.size / 2` of the floor center on X and Z.
/// An asset wider or deeper than the floor is centered on that axis.
pub fn compute_placement(
    asset: &PlaceableAsset,
    shell: &RoomShell,
    rule: &PlacementRule,
) -> Result<Vec3, GeometryError> {
    let bounds = shell.footprint_bounds(asset)?;
    let (sign_x, sign_z) = rule.anchor.direction();
    let gap = rule.effective_gap();

    let offset_x = sign_x * (bounds.half_extent_x - gap).max(0.0);
    let offset_z = sign_z * (bounds.half_extent_z - gap).max(0.0);
    let center = Vec3::new(bounds.center_x + offset_x, 0.0, bounds.center_z + offset_z);

    Ok(bounds.clamp(center - asset.bounds_offset))
}

/// Place `asset` and return its new position.
///
/// Invalid geometry leaves the asset where it is and logs a warning.
pub fn place_asset(asset: &mut PlaceableAsset, shell: &RoomShell, rule: &PlacementRule) -> Vec3 {
    match compute_placement(asset, shell, rule) {
        Ok(position) => {
            asset.position = position;
        }
        Err(err) => {
            warn!("Cannot place asset: {err}. Leaving it at {}", asset.position);
        }
    }
    asset.position
}
