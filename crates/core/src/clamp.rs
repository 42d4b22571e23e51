//! Scalar clamping helpers used for floor-footprint constraints.

/// Half-range an item of extent `item` may travel inside a container of
/// extent `container`, measured from the container's center.
///
/// An item larger than its container gets zero travel (it stays centered).
pub fn available_half_extent(container: f32, item: f32) -> f32 {
    ((container - item) * 0.5).max(0.0)
}

/// Clamp `value` into `[center - half_range, center + half_range]`.
///
/// `half_range` must be non-negative.
pub fn clamp_symmetric(value: f32, center: f32, half_range: f32) -> f32 {
    debug_assert!(half_range >= 0.0, "negative half range {half_range}");
    value.max(center - half_range).min(center + half_range)
}
