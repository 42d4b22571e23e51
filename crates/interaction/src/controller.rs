use glam::{Vec2, Vec3};
use roomstage_camera::Camera;
use roomstage_core::{PlaceableAsset, RoomShell};
use roomstage_input::{PointerEvent, PointerKind};
use serde::Serialize;
use tracing::{debug, warn};

use crate::{DragConfig, ScreenYAxis};

/// Observable state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DragPhase {
    /// No drag in progress.
    Idle,
    /// The draggable asset follows the pointer.
    Dragging,
}

/// State kept while the pointer button is held over the asset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    /// Pointer position (pixels) at the press that started the drag.
    pub anchor: Vec2,
    /// Pointer position (pixels) at the last processed event.
    pub last_pointer: Vec2,
    /// Asset origin when the drag started.
    pub start_position: Vec3,
}

/// Everything a pointer handler needs, passed per event.
#[derive(Debug)]
pub struct DragContext<'a> {
    /// Active camera.
    pub camera: &'a Camera,
    /// The draggable asset, or `None` while it is loading or after removal.
    pub asset: Option<&'a mut PlaceableAsset>,
    /// Room envelope the asset is constrained to.
    pub shell: &'a RoomShell,
}

/// Result of handling one pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum DragOutcome {
    /// Event had no effect on dragging.
    Ignored,
    /// Press did not land on the asset.
    Missed,
    /// Press landed on the asset at `distance` along the pointer ray.
    Started {
        /// Ray distance to the hit.
        distance: f32,
    },
    /// Asset moved to `position`.
    Moved {
        /// New asset origin.
        position: Vec3,
    },
    /// Drag ended by release.
    Released,
    /// The asset disappeared; the drag was abandoned.
    AssetLost,
    /// Room or asset geometry could not bound the move; position unchanged.
    InvalidBounds,
}

/// Drag state machine for the single draggable asset.
#[derive(Debug, Default)]
pub struct DragController {
    config: DragConfig,
    session: Option<DragSession>,
}

impl DragController {
    /// Create an idle controller.
    pub fn new(config: DragConfig) -> Self {
        Self {
            config,
            session: None,
        }
    }

    /// Drag tuning in use.
    pub fn config(&self) -> &DragConfig {
        &self.config
    }

    /// Whether a drag is in progress. Camera controls should stay disabled
    /// while this is true.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// Current phase.
    pub fn phase(&self) -> DragPhase {
        if self.is_active() {
            DragPhase::Dragging
        } else {
            DragPhase::Idle
        }
    }

    /// Current session, if dragging.
    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    /// Drop any session and return to idle.
    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            debug!("drag session discarded");
        }
    }

    /// Dispatch on the event kind.
    pub fn handle(&mut self, event: &PointerEvent, ctx: DragContext<'_>) -> DragOutcome {
        match event.kind {
            PointerKind::Down => self.handle_pointer_down(event, ctx),
            PointerKind::Move => self.handle_pointer_move(event, ctx),
            PointerKind::Up => self.handle_pointer_up(event),
        }
    }

    /// Hit-test the draggable asset and start dragging on a hit.
    pub fn handle_pointer_down(&mut self, event: &PointerEvent, ctx: DragContext<'_>) -> DragOutcome {
        // A press without a matching release (focus loss, missed event)
        // starts over.
        self.reset();

        let Some(asset) = ctx.asset else {
            debug!("pointer down before the draggable asset is available");
            return DragOutcome::Ignored;
        };
        let Some(ndc) = event.ndc() else {
            debug!(viewport = ?event.viewport, "pointer down in an empty viewport");
            return DragOutcome::Ignored;
        };
        let Some(ray) = ctx.camera.ray_from_ndc(ndc) else {
            warn!("Camera produced no pointer ray; ignoring press");
            return DragOutcome::Ignored;
        };

        match asset.world_bounds().ray_intersection(&ray) {
            Some(distance) => {
                self.session = Some(DragSession {
                    anchor: event.position,
                    last_pointer: event.position,
                    start_position: asset.position,
                });
                debug!(%distance, anchor = %event.position, "drag started");
                DragOutcome::Started { distance }
            }
            None => DragOutcome::Missed,
        }
    }

    /// Move the asset by the pointer delta and clamp it to the floor.
    pub fn handle_pointer_move(&mut self, event: &PointerEvent, ctx: DragContext<'_>) -> DragOutcome {
        let Some(session) = self.session.as_mut() else {
            return DragOutcome::Ignored;
        };
        let Some(asset) = ctx.asset else {
            self.session = None;
            debug!("draggable asset vanished mid-drag; returning to idle");
            return DragOutcome::AssetLost;
        };

        let delta = event.position - session.last_pointer;
        if !delta.is_finite() {
            debug!(position = %event.position, "non-finite pointer position ignored");
            return DragOutcome::Ignored;
        }
        session.last_pointer = event.position;

        let bounds = match ctx.shell.footprint_bounds(asset) {
            Ok(bounds) => bounds,
            Err(err) => {
                warn!("Cannot constrain drag: {err}. Asset stays at {}", asset.position);
                return DragOutcome::InvalidBounds;
            }
        };

        let scale = self.config.effective_sensitivity();
        let depth = match self.config.screen_y {
            ScreenYAxis::Depth => delta.y * scale,
            ScreenYAxis::Ignore => 0.0,
        };
        let candidate = asset.position + Vec3::new(delta.x * scale, 0.0, depth);
        asset.position = bounds.clamp(candidate);
        DragOutcome::Moved {
            position: asset.position,
        }
    }

    /// End the drag, wherever the pointer is.
    pub fn handle_pointer_up(&mut self, _event: &PointerEvent) -> DragOutcome {
        match self.session.take() {
            Some(session) => {
                debug!(
                    anchor = %session.anchor,
                    start = %session.start_position,
                    "drag released"
                );
                DragOutcome::Released
            }
            None => DragOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomstage_core::BoxPart;

    const VIEWPORT: (u32, u32) = (800, 600);

    fn shell() -> RoomShell {
        let floor = BoxPart::new(Vec3::new(10.0, 0.2, 6.0), Vec3::ZERO);
        RoomShell::new(floor, floor, floor)
    }

    /// Camera straight above the floor origin, looking down.
    fn top_down_camera() -> Camera {
        Camera::orthographic(Vec3::new(0.0, 10.0, 0.0), Vec3::ZERO, 8.0, 6.0, 0.1, 50.0)
    }

    fn centered_asset() -> PlaceableAsset {
        PlaceableAsset::new(Vec3::ONE).with_position(Vec3::new(0.0, 0.6, 0.0))
    }

    fn ctx<'a>(
        camera: &'a Camera,
        asset: Option<&'a mut PlaceableAsset>,
        shell: &'a RoomShell,
    ) -> DragContext<'a> {
        DragContext {
            camera,
            asset,
            shell,
        }
    }

    #[test]
    fn press_on_asset_starts_drag() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::default();

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        let outcome = controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));
        assert!(matches!(outcome, DragOutcome::Started { .. }));
        assert_eq!(controller.phase(), DragPhase::Dragging);

        let session = controller.session().unwrap();
        assert_eq!(session.anchor, Vec2::new(400.0, 300.0));
        assert_eq!(session.last_pointer, session.anchor);
    }

    #[test]
    fn press_off_asset_stays_idle() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::default();

        let down = PointerEvent::down(Vec2::new(10.0, 10.0), VIEWPORT);
        let outcome = controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));
        assert_eq!(outcome, DragOutcome::Missed);
        assert!(!controller.is_active());

        let moved = PointerEvent::moved(Vec2::new(500.0, 300.0), VIEWPORT);
        let outcome = controller.handle_pointer_move(&moved, ctx(&camera, Some(&mut asset), &shell));
        assert_eq!(outcome, DragOutcome::Ignored);
        assert_eq!(asset.position, Vec3::new(0.0, 0.6, 0.0));
    }

    #[test]
    fn press_before_load_is_ignored() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut controller = DragController::default();
        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        assert_eq!(
            controller.handle_pointer_down(&down, ctx(&camera, None, &shell)),
            DragOutcome::Ignored
        );
        assert!(!controller.is_active());
    }

    #[test]
    fn motion_moves_by_sensitivity() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::new(DragConfig {
            sensitivity: 0.01,
            screen_y: ScreenYAxis::Depth,
        });

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));

        let moved = PointerEvent::moved(Vec2::new(500.0, 250.0), VIEWPORT);
        let outcome = controller.handle_pointer_move(&moved, ctx(&camera, Some(&mut asset), &shell));
        assert!(matches!(outcome, DragOutcome::Moved { .. }));
        assert!((asset.position.x - 1.0).abs() < 1e-5);
        assert!((asset.position.z + 0.5).abs() < 1e-5);
        assert!((asset.position.y - 0.6).abs() < 1e-6);
        let session = controller.session().unwrap();
        assert_eq!(session.last_pointer, moved.position);
        assert_eq!(session.start_position, Vec3::new(0.0, 0.6, 0.0));
    }

    #[test]
    fn ignore_mode_locks_depth() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::new(DragConfig {
            sensitivity: 0.01,
            screen_y: ScreenYAxis::Ignore,
        });

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));
        let moved = PointerEvent::moved(Vec2::new(400.0, 100.0), VIEWPORT);
        controller.handle_pointer_move(&moved, ctx(&camera, Some(&mut asset), &shell));
        assert_eq!(asset.position.z, 0.0);
    }

    #[test]
    fn release_anywhere_ends_drag() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::default();

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));
        let up = PointerEvent::up(Vec2::new(5000.0, -20.0), VIEWPORT);
        assert_eq!(controller.handle_pointer_up(&up), DragOutcome::Released);
        assert!(!controller.is_active());
        assert_eq!(controller.handle_pointer_up(&up), DragOutcome::Ignored);
    }

    #[test]
    fn unset_floor_keeps_position_and_warns() {
        let camera = top_down_camera();
        let mut broken = shell();
        let mut asset = centered_asset();
        let mut controller = DragController::default();

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &broken));

        broken.floor.size = Vec3::new(f32::NAN, 0.2, 6.0);
        let moved = PointerEvent::moved(Vec2::new(450.0, 300.0), VIEWPORT);
        let outcome = controller.handle_pointer_move(&moved, ctx(&camera, Some(&mut asset), &broken));
        assert_eq!(outcome, DragOutcome::InvalidBounds);
        assert_eq!(asset.position, Vec3::new(0.0, 0.6, 0.0));
        assert!(asset.position.is_finite());
        // Still dragging; a later valid move resumes from the new pointer.
        assert!(controller.is_active());
    }

    #[test]
    fn asset_lost_mid_drag_returns_to_idle() {
        let (camera, shell) = (top_down_camera(), shell());
        let mut asset = centered_asset();
        let mut controller = DragController::default();

        let down = PointerEvent::down(Vec2::new(400.0, 300.0), VIEWPORT);
        controller.handle_pointer_down(&down, ctx(&camera, Some(&mut asset), &shell));

        let moved = PointerEvent::moved(Vec2::new(450.0, 300.0), VIEWPORT);
        let outcome = controller.handle_pointer_move(&moved, ctx(&camera, None, &shell));
        assert_eq!(outcome, DragOutcome::AssetLost);
        assert_eq!(controller.phase(), DragPhase::Idle);
    }
}
