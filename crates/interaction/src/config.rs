use serde::{Deserialize, Serialize};

/// What vertical pointer motion does while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScreenYAxis {
    /// Moving the pointer down the screen moves the asset toward the viewer
    /// (+Z).
    #[default]
    Depth,
    /// Vertical pointer motion is ignored; the asset slides along X only.
    Ignore,
}

/// Drag tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// World units moved per pixel of pointer motion.
    pub sensitivity: f32,
    /// Mapping for vertical pointer motion.
    pub screen_y: ScreenYAxis,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            // 100 px of pointer travel per world unit; matches the default
            // camera distance closely enough for furniture-scale rooms.
            sensitivity: 0.01,
            screen_y: ScreenYAxis::Depth,
        }
    }
}

impl DragConfig {
    /// Sensitivity actually applied: non-finite or negative values disable
    /// motion instead of corrupting positions.
    pub fn effective_sensitivity(&self) -> f32 {
        if self.sensitivity.is_finite() {
            self.sensitivity.max(0.0)
        } else {
            0.0
        }
    }
}
