use bevy::prelude::*;
use spiralgen::prelude::{ParticleField, RecordingSurface};

/// The running particle field, painting onto an off-screen recording surface
/// sized like the primary window's backing store.
#[derive(Resource)]
pub struct ActiveField(pub ParticleField<RecordingSurface>);

/// Set when no glyph font is configured: Bevy's built-in font has no emoji,
/// so plain stand-ins are drawn instead.
#[derive(Resource)]
pub struct GlyphStyle {
    pub plain: bool,
}

/// Recording surface matching the window in physical pixels.
pub fn surface_for(window: &Window) -> RecordingSurface {
    RecordingSurface::new(
        window.physical_width() as f32,
        window.physical_height() as f32,
    )
    .with_pixel_ratio(window.scale_factor())
}
