use bevy::math::{Quat, Vec2};

/// Map a point on the drawing surface (physical pixels, origin top-left, y down)
/// to 2D world space (logical pixels, origin at the window centre, y up).
pub fn canvas_to_world(point: Vec2, surface_size: Vec2, scale_factor: f32) -> Vec2 {
    let logical = point / scale_factor;
    let half = surface_size / scale_factor / 2.0;
    Vec2::new(logical.x - half.x, half.y - logical.y)
}

/// A clockwise canvas rotation becomes a counter-clockwise turn around +Z once y points up.
pub fn canvas_rotation_to_world(angle: f32) -> Quat {
    Quat::from_rotation_z(-angle)
}

pub fn logical_font_size(size: f32, scale_factor: f32) -> f32 {
    size / scale_factor
}
