#![warn(missing_docs)]
//! Pointer input: raw device-pixel events and their normalized form.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use winit::event::{ElementState, MouseButton, WindowEvent};

/// Phase of a pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PointerKind {
    /// Primary button pressed.
    Down,
    /// Pointer moved.
    Move,
    /// Primary button released.
    Up,
}

/// A pointer event in device pixels, carrying the viewport it happened in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerEvent {
    /// Event phase.
    pub kind: PointerKind,
    /// Pointer position in pixels, origin at the top-left corner.
    pub position: Vec2,
    /// Viewport width and height in pixels.
    pub viewport: (u32, u32),
}

impl PointerEvent {
    /// Create an event.
    pub fn new(kind: PointerKind, position: Vec2, viewport: (u32, u32)) -> Self {
        Self {
            kind,
            position,
            viewport,
        }
    }

    /// Primary button press at `position`.
    pub fn down(position: Vec2, viewport: (u32, u32)) -> Self {
        Self::new(PointerKind::Down, position, viewport)
    }

    /// Pointer motion to `position`.
    pub fn moved(position: Vec2, viewport: (u32, u32)) -> Self {
        Self::new(PointerKind::Move, position, viewport)
    }

    /// Primary button release at `position`.
    pub fn up(position: Vec2, viewport: (u32, u32)) -> Self {
        Self::new(PointerKind::Up, position, viewport)
    }

    /// Normalized device coordinates in `[-1, 1]`, +Y up.
    ///
    /// Positions outside the viewport map outside that range and are not
    /// rejected. Only a zero-sized viewport yields `None`.
    pub fn ndc(&self) -> Option<Vec2> {
        pixel_to_ndc(self.position, self.viewport)
    }
}

/// Convert a pixel position to normalized device coordinates.
pub fn pixel_to_ndc(position: Vec2, viewport: (u32, u32)) -> Option<Vec2> {
    let (width, height) = viewport;
    if width == 0 || height == 0 {
        return None;
    }
    let x = (2.0 * position.x) / width as f32 - 1.0;
    let y = 1.0 - (2.0 * position.y) / height as f32; // Flip Y
    Some(Vec2::new(x, y))
}

/// Convert normalized device coordinates back to a pixel position.
pub fn ndc_to_pixel(ndc: Vec2, viewport: (u32, u32)) -> Vec2 {
    let (width, height) = viewport;
    Vec2::new(
        (ndc.x + 1.0) * 0.5 * width as f32,
        (1.0 - ndc.y) * 0.5 * height as f32,
    )
}

/// Tracks cursor position and viewport size across window events and emits
/// [`PointerEvent`]s for the primary button.
#[derive(Debug, Default)]
pub struct PointerTracker {
    /// Last known cursor position in pixels.
    cursor: Vec2,
    /// Current viewport size in pixels.
    viewport: (u32, u32),
    /// Whether the primary button is held.
    pressed: bool,
}

impl PointerTracker {
    /// Create a tracker for a viewport of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            viewport: (width, height),
            ..Default::default()
        }
    }

    /// Current viewport size.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    /// Whether the primary button is currently held.
    pub fn is_pressed(&self) -> bool {
        self.pressed
    }

    /// Process a window event, returning the pointer event it produced.
    ///
    /// Resize events update the tracked viewport and produce nothing.
    pub fn handle_event(&mut self, event: &WindowEvent) -> Option<PointerEvent> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                Some(self.cursor_moved(position.x as f32, position.y as f32))
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } => Some(self.primary_button(*state == ElementState::Pressed)),
            WindowEvent::Resized(size) => {
                self.resized(size.width, size.height);
                None
            }
            _ => None,
        }
    }

    /// Record cursor motion.
    pub fn cursor_moved(&mut self, x: f32, y: f32) -> PointerEvent {
        self.cursor = Vec2::new(x, y);
        PointerEvent::moved(self.cursor, self.viewport)
    }

    /// Record a primary button transition at the current cursor position.
    pub fn primary_button(&mut self, pressed: bool) -> PointerEvent {
        self.pressed = pressed;
        let kind = if pressed {
            PointerKind::Down
        } else {
            PointerKind::Up
        };
        PointerEvent::new(kind, self.cursor, self.viewport)
    }

    /// Record a viewport resize.
    pub fn resized(&mut self, width: u32, height: u32) {
        self.viewport = (width, height);
    }
}
