#![warn(missing_docs)]
//! Geometry primitives shared across the workspace.
//!
//! Everything here is plain data plus pure functions: bounding boxes, rays,
//! the room shell envelope and the placeable asset record that layout and
//! drag handling read and write.

pub mod aabb;
pub mod asset;
pub mod clamp;
pub mod error;
pub mod footprint;
pub mod ray;
pub mod room;

pub use aabb::Aabb;
pub use asset::PlaceableAsset;
pub use clamp::{available_half_extent, clamp_symmetric};
pub use error::GeometryError;
pub use footprint::FootprintBounds;
pub use ray::Ray;
pub use room::{BoxPart, RoomShell};

/// Tolerance used when comparing positions that went through clamping.
pub const POSITION_EPSILON: f32 = 1e-4;
