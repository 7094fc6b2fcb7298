use std::f32::consts::PI;

/// Symbols a particle can carry. A particle picks one uniformly on every respawn.
pub const GLYPHS: &[&str] = &["👍", "😍", "❤️", "🥰", "🤩"];

pub const DEFAULT_PARTICLE_COUNT: usize = 5;

/// Spawn x offset is a whole number in `SPAWN_X_MIN..SPAWN_X_MAX`.
pub const SPAWN_X_MIN: i32 = -50;
pub const SPAWN_X_MAX: i32 = 50;

pub const SPEED_MIN: f32 = 0.75;
pub const SPEED_MAX: f32 = 1.25;

/// Upper bound (exclusive) of a lifetime, in ticks. 6 seconds at 60 fps.
pub const MAX_TTL: f32 = 360.0;

pub const MAX_ROTATION: f32 = PI / 4.0;

/// Helix turns over a full traversal of the surface height.
pub const WINDING_TURNS: f32 = 3.0;

/// A particle climbs `speed * height / ASCENT_DIVISOR` per tick.
pub const ASCENT_DIVISOR: f32 = 300.0;

/// helix radius = width / HELIX_RADIUS_DIVISOR
pub const HELIX_RADIUS_DIVISOR: f32 = 10.0;

/// full glyph size = width / GLYPH_SIZE_DIVISOR (before the pixel ratio)
pub const GLYPH_SIZE_DIVISOR: f32 = 15.0;

/// Progress after which a particle starts fading out.
pub const FADE_START: f32 = 0.75;
