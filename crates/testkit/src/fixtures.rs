use glam::{Vec2, Vec3};
use roomstage_camera::Camera;
use roomstage_core::{BoxPart, PlaceableAsset, RoomShell};
use roomstage_input::ndc_to_pixel;

/// Viewport used by fixtures, in pixels.
pub const VIEWPORT: (u32, u32) = (1280, 720);

/// 10 × 0.2 × 6 floor centered at the origin, back wall on −Z, ceiling
/// four units up.
pub fn reference_room() -> RoomShell {
    let floor = BoxPart::new(Vec3::new(10.0, 0.2, 6.0), Vec3::ZERO);
    let walls = BoxPart::new(Vec3::new(10.0, 4.0, 0.5), Vec3::new(0.0, 2.1, -3.25));
    let ceiling = BoxPart::new(Vec3::new(10.0, 0.2, 6.0), Vec3::new(0.0, 4.2, 0.0));
    RoomShell::new(floor, walls, ceiling)
}

/// The furnished room the application ships with.
pub fn showroom() -> RoomShell {
    let floor = BoxPart::new(Vec3::new(6.0, 0.2, 6.0), Vec3::new(0.0, -1.25, 0.0));
    let walls = BoxPart::new(Vec3::new(12.75, 5.75, 0.5), Vec3::new(0.0, 0.0, 0.5));
    let ceiling = BoxPart::new(Vec3::new(6.0, 0.2, 6.0), Vec3::new(0.0, 1.25, 0.0));
    RoomShell::new(floor, walls, ceiling)
}

/// Asset of `size` resting on the floor at its center.
pub fn asset_on_floor(shell: &RoomShell, size: Vec3) -> PlaceableAsset {
    let mut asset = PlaceableAsset::new(size);
    asset.position = Vec3::new(
        shell.floor.position.x,
        shell.floor_top() + asset.vertical_offset(),
        shell.floor.position.z,
    );
    asset
}

/// Perspective camera in front of and above the reference room, looking at
/// its center.
pub fn overview_camera() -> Camera {
    Camera::perspective(
        Vec3::new(0.0, 4.0, 9.0),
        Vec3::new(0.0, 0.5, 0.0),
        60f32.to_radians(),
        VIEWPORT.0 as f32 / VIEWPORT.1 as f32,
        0.1,
        100.0,
    )
}

/// Orthographic camera straight above the floor; screen right is +X and
/// screen down is +Z.
pub fn top_down_camera() -> Camera {
    let aspect = VIEWPORT.0 as f32 / VIEWPORT.1 as f32;
    Camera::orthographic(
        Vec3::new(0.0, 20.0, 0.0),
        Vec3::ZERO,
        5.0 * aspect,
        5.0,
        0.1,
        100.0,
    )
}

/// Pixel position under which `point` appears, if it is in front of the
/// camera.
pub fn pixel_over(camera: &Camera, point: Vec3, viewport: (u32, u32)) -> Option<Vec2> {
    camera
        .project_to_ndc(point)
        .map(|ndc| ndc_to_pixel(ndc, viewport))
}
