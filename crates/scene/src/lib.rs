#![warn(missing_docs)]
//! Scene graph of furniture nodes and the asset-load completion channel.
//!
//! The scene owns every asset node. Nodes start out loading; a load
//! completion carries the measured geometry, and the layout step turns it
//! into a ready [`PlaceableAsset`](roomstage_core::PlaceableAsset).

mod geometry;
mod graph;
mod loader;

pub use geometry::{AssetGeometry, ObjError};
pub use graph::{NodeId, NodeState, SceneGraph, SceneNode};
pub use loader::{LoadCompletion, LoadHandle, LoadQueue};
