use crate::config::FieldConfig;
use crate::constants::*;
use glam::Vec3;
use rand::Rng;

/// A single floating glyph.
///
/// Particles are never dropped while the field lives: when a lifetime runs out
/// the particle is reinitialized in place and starts again from the bottom.
#[derive(Debug, Clone)]
pub struct Particle {
    id: usize,
    lifetimes: u32,
    /// x/y in surface pixels, z is a synthetic depth used for size and paint order.
    pub position: Vec3,
    pub glyph: &'static str,
    /// Ascent rate, always positive.
    pub speed: f32,
    /// Helix pitch and spin rate, signed.
    pub rotation: f32,
    /// Ticks lived in the current lifetime.
    pub ttl: u32,
    /// Lifetime budget in ticks, always positive.
    pub max_ttl: f32,
}

impl Particle {
    /// `config` must pass [`FieldConfig::validate`].
    pub fn new(id: usize, config: &FieldConfig, rng: &mut impl Rng) -> Self {
        let mut particle = Self {
            id,
            lifetimes: 0,
            position: Vec3::ZERO,
            glyph: GLYPHS[0],
            speed: config.motion.speed_min,
            rotation: 0.0,
            ttl: 0,
            max_ttl: config.lifetime.max_ttl,
        };
        particle.reinitialize(config, rng);
        particle
    }

    pub fn id(&self) -> usize {
        self.id
    }

    /// How many lifetimes this particle has started, including the current one.
    pub fn lifetimes(&self) -> u32 {
        self.lifetimes
    }

    /// Fraction of the lifetime elapsed. Goes past 1 for at most one tick.
    pub fn progress(&self) -> f32 {
        self.ttl as f32 / self.max_ttl
    }

    /// Draw fresh values for everything but the identity and start a new lifetime.
    pub fn reinitialize(&mut self, config: &FieldConfig, rng: &mut impl Rng) {
        let x = rng.random_range(SPAWN_X_MIN..SPAWN_X_MAX);
        self.position = Vec3::new(x as f32, 0.0, 0.0);
        self.glyph = GLYPHS[rng.random_range(0..GLYPHS.len())];
        self.speed = rng.random_range(config.speed_range());
        // strictly inside (0, max_ttl)
        let ceiling = f32::from_bits(config.lifetime.max_ttl.to_bits() - 1);
        self.max_ttl = rng.random_range(f32::MIN_POSITIVE..=ceiling);
        self.ttl = 0;

        let magnitude = rng.random_range(0.0..=config.motion.max_rotation);
        self.rotation = if rng.random_bool(0.5) {
            -magnitude
        } else {
            magnitude
        };

        self.lifetimes += 1;
    }
}
