#![warn(missing_docs)]
//! Pointer dragging of a single asset across the floor.
//!
//! A press that lands on the draggable asset starts a drag session; motion
//! moves the asset by a fixed world-units-per-pixel scale and clamps it to
//! the floor footprint; release ends the session.

mod config;
mod controller;

pub use config::{DragConfig, ScreenYAxis};
pub use controller::{DragContext, DragController, DragOutcome, DragPhase, DragSession};
