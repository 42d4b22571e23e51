use serde::{Deserialize, Serialize};

/// Which part of the floor an asset is pushed toward.
///
/// The back wall is on −Z and the left wall on −X, as seen from a camera on
/// the +Z side looking into the room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Floor center.
    #[default]
    Center,
    /// Centered against the back wall.
    BackWall,
    /// Centered against the front edge.
    FrontWall,
    /// Centered against the left wall.
    LeftWall,
    /// Centered against the right wall.
    RightWall,
    /// Back-left corner.
    BackLeftCorner,
    /// Back-right corner.
    BackRightCorner,
    /// Front-left corner.
    FrontLeftCorner,
    /// Front-right corner.
    FrontRightCorner,
}

impl Anchor {
    /// Every anchor, for iteration in tests and tooling.
    pub const ALL: [Anchor; 9] = [
        Anchor::Center,
        Anchor::BackWall,
        Anchor::FrontWall,
        Anchor::LeftWall,
        Anchor::RightWall,
        Anchor::BackLeftCorner,
        Anchor::BackRightCorner,
        Anchor::FrontLeftCorner,
        Anchor::FrontRightCorner,
    ];

    /// Push direction on X and Z, each -1, 0 or 1.
    pub fn direction(self) -> (f32, f32) {
        match self {
            Anchor::Center => (0.0, 0.0),
            Anchor::BackWall => (0.0, -1.0),
            Anchor::FrontWall => (0.0, 1.0),
            Anchor::LeftWall => (-1.0, 0.0),
            Anchor::RightWall => (1.0, 0.0),
            Anchor::BackLeftCorner => (-1.0, -1.0),
            Anchor::BackRightCorner => (1.0, -1.0),
            Anchor::FrontLeftCorner => (-1.0, 1.0),
            Anchor::FrontRightCorner => (1.0, 1.0),
        }
    }
}

/// Placement policy for one asset.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlacementRule {
    /// Where on the floor the asset goes.
    pub anchor: Anchor,
    /// Clearance between the asset's box and the wall(s) it is pushed
    /// toward, in world units.
    pub wall_gap: f32,
}

impl PlacementRule {
    /// Rule with no wall clearance.
    pub fn new(anchor: Anchor) -> Self {
        Self {
            anchor,
            wall_gap: 0.0,
        }
    }

    /// Set the wall clearance.
    pub fn with_gap(mut self, wall_gap: f32) -> Self {
        self.wall_gap = wall_gap;
        self
    }

    /// Clearance actually applied: negative or non-finite gaps count as zero.
    pub fn effective_gap(&self) -> f32 {
        if self.wall_gap.is_finite() {
            self.wall_gap.max(0.0)
        } else {
            0.0
        }
    }
}
