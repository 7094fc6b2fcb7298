use crate::config::{FieldConfig, get_config};
use crate::constants::*;
use crate::particle::Particle;
use crate::surface::{DrawingSurface, TextAlign, TextBaseline};
use crate::tools::field_rng;
use rand::Rng;
use rand::rngs::StdRng;
use std::f32::consts::TAU;

/// Horizontal and depth offsets of a point on the helix.
///
/// The phase only depends on how far the particle has climbed, so the shape
/// stays the same no matter how unevenly frames arrive.
pub fn helix_offset(y: f32, height: f32, rotation: f32, turns: f32, radius: f32) -> (f32, f32) {
    let phase = TAU * (y / height) * rotation * turns;
    (phase.cos() * radius, phase.sin() * radius)
}

/// Opacity for a given lifetime progress: opaque until `fade_start`, then a
/// linear fade that reaches zero at the end of the lifetime.
pub fn fade_alpha(progress: f32, fade_start: f32) -> f32 {
    if progress <= fade_start {
        1.0
    } else {
        ((1.0 - progress) / (1.0 - fade_start)).clamp(0.0, 1.0)
    }
}

/// Where and how a single particle is painted.
#[derive(Debug, Clone, Copy)]
struct Projection {
    x: f32,
    y: f32,
    size: f32,
    angle: f32,
    alpha: f32,
}

/// A fixed pool of glyph particles spiralling up a drawing surface.
///
/// The host calls [`ParticleField::update`] and then [`ParticleField::render`]
/// once per frame.
pub struct ParticleField<S: DrawingSurface, R: Rng = StdRng> {
    particles: Vec<Particle>,
    surface: S,
    rng: R,
    config: FieldConfig,
}

impl<S: DrawingSurface> ParticleField<S, StdRng> {
    /// Build a field from the shared configuration file.
    pub fn from_config(surface: S) -> Self {
        let config = get_config();
        let rng = field_rng(config.field.seed);
        let count = config.field.particle_count;
        Self::with_config(count, surface, rng, config)
    }
}

impl<S: DrawingSurface, R: Rng> ParticleField<S, R> {
    pub fn new(count: usize, surface: S, rng: R) -> Self {
        Self::with_config(count, surface, rng, FieldConfig::default())
    }

    /// An invalid `config` is replaced by the defaults so the animation still runs.
    pub fn with_config(count: usize, mut surface: S, mut rng: R, config: FieldConfig) -> Self {
        let config = match config.validate() {
            Ok(()) => config,
            Err(err) => {
                log::warn!("Rejected field configuration ({err}), using defaults");
                FieldConfig::default()
            }
        };

        initialize_context(&mut surface);

        let particles = (0..count)
            .map(|id| Particle::new(id, &config, &mut rng))
            .collect();

        log::debug!(
            "Particle field with {count} particles on a {}x{} surface",
            surface.width(),
            surface.height()
        );

        Self {
            particles,
            surface,
            rng,
            config,
        }
    }

    /// Particles in paint order (back to front after an update).
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The host resizes the surface through this between frames.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    /// Advance every particle by one tick and re-sort them by depth.
    pub fn update(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        let helix_radius = width / HELIX_RADIUS_DIVISOR;
        let ascent = height / self.config.motion.ascent_divisor;
        let turns = self.config.motion.winding_turns;

        // a minimized window has no area to climb; hold the animation until it returns
        if !(width > 0.0 && height > 0.0) {
            return;
        }

        for particle in &mut self.particles {
            particle.position.y -= particle.speed * ascent;
            let (x, z) = helix_offset(
                particle.position.y,
                height,
                particle.rotation,
                turns,
                helix_radius,
            );
            particle.position.x = x;
            particle.position.z = z;
            particle.ttl += 1;

            if particle.progress() > 1.0 {
                log::trace!(
                    "Particle {} respawns after {} ticks",
                    particle.id(),
                    particle.ttl
                );
                particle.reinitialize(&self.config, &mut self.rng);
            }
        }

        self.particles
            .sort_unstable_by(|a, b| a.position.z.total_cmp(&b.position.z));
    }

    /// Clear the surface and paint every particle in the current order.
    pub fn render(&mut self) {
        let width = self.surface.width();
        let height = self.surface.height();
        let full_size = (width / GLYPH_SIZE_DIVISOR) * self.surface.pixel_ratio();

        // the helix emerges just past the bottom-right corner
        let origin_x = width - full_size;
        let origin_y = height + full_size;

        self.surface.clear_rect(0.0, 0.0, width, height);

        for particle in &self.particles {
            let projection = self.project_point(particle, full_size, height);
            // also drops NaN sizes
            if !(projection.size > 0.0) {
                continue;
            }

            self.surface.save();
            self.surface.translate(
                origin_x + projection.x - projection.size / 2.0,
                origin_y + projection.y + projection.size / 2.0,
            );
            self.surface.rotate(projection.angle);
            self.surface.set_font_size(projection.size);
            self.surface.set_global_alpha(projection.alpha);
            self.surface.fill_text(particle.glyph, 0.0, 0.0);
            self.surface.restore();
        }
    }

    fn project_point(&self, particle: &Particle, full_size: f32, height: f32) -> Projection {
        let progress = particle.progress();
        let position = particle.position;
        Projection {
            x: position.x,
            // lift by half the depth for a bit of parallax
            y: position.y - position.z / 2.0,
            size: full_size * (position.z / (height / 2.0) + 0.5),
            angle: progress * particle.rotation,
            alpha: fade_alpha(progress, self.config.lifetime.fade_start),
        }
    }
}

fn initialize_context(surface: &mut impl DrawingSurface) {
    surface.set_text_align(TextAlign::Center);
    surface.set_text_baseline(TextBaseline::Middle);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingSurface;
    use rand::SeedableRng;
    use rstest::rstest;
    use std::collections::HashMap;

    fn field(count: usize, size: f32, seed: u64) -> ParticleField<RecordingSurface> {
        ParticleField::new(
            count,
            RecordingSurface::new(size, size),
            StdRng::seed_from_u64(seed),
        )
    }

    fn by_id(field: &ParticleField<RecordingSurface>) -> HashMap<usize, Particle> {
        field
            .particles()
            .iter()
            .map(|p| (p.id(), p.clone()))
            .collect()
    }

    #[test]
    fn test_construction_sets_up_text_alignment() {
        let field = field(5, 300.0, 1);
        assert_eq!(field.len(), 5);
        assert_eq!(field.surface().text_align(), TextAlign::Center);
        assert_eq!(field.surface().text_baseline(), TextBaseline::Middle);
        assert!(field.particles().iter().all(|p| p.lifetimes() == 1));
    }

    #[test]
    fn test_invalid_config_falls_back_to_defaults() {
        let mut config = FieldConfig::default();
        config.motion.speed_min = -1.0;
        let field = ParticleField::with_config(
            3,
            RecordingSurface::new(300.0, 300.0),
            StdRng::seed_from_u64(1),
            config,
        );
        assert_eq!(field.config(), &FieldConfig::default());
    }

    #[test]
    fn test_empty_field_updates_and_renders() {
        let mut field = field(0, 300.0, 1);
        assert!(field.is_empty());
        field.update();
        field.render();
        assert!(field.surface().draws().is_empty());
        assert_eq!(field.surface().clear_count(), 1);
    }

    #[rstest]
    #[case(0.0, 1.0)]
    #[case(0.5, 1.0)]
    #[case(0.75, 1.0)]
    #[case(0.8, 0.8)]
    #[case(0.9, 0.4)]
    #[case(1.0, 0.0)]
    fn test_opacity_law(#[case] progress: f32, #[case] expected: f32) {
        let alpha = fade_alpha(progress, FADE_START);
        assert!((alpha - expected).abs() < 1e-5, "alpha was {alpha}, expected {expected}");
    }

    #[test]
    fn test_fade_is_strictly_decreasing() {
        let mut previous = fade_alpha(FADE_START, FADE_START);
        for step in 1..=100 {
            let progress = FADE_START + (1.0 - FADE_START) * step as f32 / 100.0;
            let alpha = fade_alpha(progress, FADE_START);
            assert!(alpha < previous);
            previous = alpha;
        }
        assert_eq!(previous, 0.0);
    }

    #[test]
    fn test_helix_offset_is_pure() {
        let a = helix_offset(-87.5, 300.0, 0.4, WINDING_TURNS, 30.0);
        let b = helix_offset(-87.5, 300.0, 0.4, WINDING_TURNS, 30.0);
        assert_eq!(a, b);
        // on the circle of the given radius
        assert!(((a.0 * a.0 + a.1 * a.1).sqrt() - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_update_recomputes_geometry_from_height() {
        let mut field = field(8, 300.0, 3);
        field.update();
        let before = by_id(&field);
        field.update();

        for particle in field.particles() {
            let old = &before[&particle.id()];
            if particle.lifetimes() != old.lifetimes() {
                continue;
            }
            let y = old.position.y - old.speed * (300.0 / ASCENT_DIVISOR);
            let (x, z) = helix_offset(y, 300.0, old.rotation, WINDING_TURNS, 30.0);
            assert_eq!(particle.position.y, y);
            assert_eq!(particle.position.x, x);
            assert_eq!(particle.position.z, z);
            assert_eq!(particle.ttl, old.ttl + 1);
        }
    }

    #[test]
    fn test_update_sorts_back_to_front() {
        let mut field = field(40, 300.0, 9);
        for _ in 0..50 {
            field.update();
            for pair in field.particles().windows(2) {
                assert!(pair[0].position.z <= pair[1].position.z);
            }
        }
    }

    #[test]
    fn test_progress_grows_then_resets() {
        let mut field = field(10, 300.0, 21);
        let mut previous = by_id(&field);

        for _ in 0..1000 {
            field.update();
            for particle in field.particles() {
                let old = &previous[&particle.id()];
                if particle.lifetimes() == old.lifetimes() {
                    assert!(particle.progress() >= old.progress());
                    assert!(particle.progress() <= 1.0);
                } else {
                    assert_eq!(particle.lifetimes(), old.lifetimes() + 1);
                    assert_eq!(particle.progress(), 0.0);
                    assert_eq!(particle.position.y, 0.0);
                    // the lifetime ended because progress went past 1
                    assert!((old.ttl + 1) as f32 / old.max_ttl > 1.0);
                }
            }
            previous = by_id(&field);
        }
    }

    #[test]
    fn test_every_particle_respawns_within_a_max_lifetime() {
        let mut field = field(5, 300.0, 77);
        let floor_per_tick = SPEED_MAX * (300.0 / ASCENT_DIVISOR);

        for _ in 0..400 {
            field.update();
            for particle in field.particles() {
                let floor = -floor_per_tick * particle.ttl as f32 - 0.05;
                assert!(particle.position.y >= floor);
                assert!(particle.position.y >= -floor_per_tick * 400.0);
            }
        }

        for particle in field.particles() {
            assert!(particle.lifetimes() >= 2, "particle {} never respawned", particle.id());
        }
    }

    #[test]
    fn test_resize_is_picked_up_by_the_next_update() {
        let mut field = field(6, 300.0, 5);
        for _ in 0..10 {
            field.update();
        }
        let before = by_id(&field);

        field.surface_mut().resize(600.0, 600.0);
        field.update();

        for particle in field.particles() {
            if particle.lifetimes() != before[&particle.id()].lifetimes() {
                continue;
            }
            let radius = particle.position.x.hypot(particle.position.z);
            assert!((radius - 60.0).abs() < 1e-3, "radius was {radius}");
        }
    }

    #[test]
    fn test_render_paints_every_particle_back_to_front() {
        let mut field = field(5, 300.0, 13);
        for _ in 0..20 {
            field.update();
        }
        field.render();

        let surface = field.surface();
        let draws = surface.draws();
        assert_eq!(draws.len(), 5);
        assert_eq!(surface.clear_count(), 1);
        assert_eq!(surface.stack_depth(), 0);

        for (draw, particle) in draws.iter().zip(field.particles()) {
            assert_eq!(draw.glyph, particle.glyph);
            assert_eq!(draw.alpha, fade_alpha(particle.progress(), FADE_START));
            assert_eq!(draw.align, TextAlign::Center);
            assert_eq!(draw.baseline, TextBaseline::Middle);
        }
        for pair in draws.windows(2) {
            assert!(pair[0].font_size <= pair[1].font_size);
        }
    }

    #[test]
    fn test_render_projects_with_parallax() {
        let mut field = ParticleField::new(
            1,
            RecordingSurface::new(300.0, 300.0).with_pixel_ratio(2.0),
            StdRng::seed_from_u64(2),
        );
        field.update();
        field.render();

        let particle = &field.particles()[0];
        let draw = &field.surface().draws()[0];
        let full_size = 300.0 / GLYPH_SIZE_DIVISOR * 2.0;
        let size = full_size * (particle.position.z / 150.0 + 0.5);
        let x = 300.0 - full_size + particle.position.x - size / 2.0;
        let y = 300.0 + full_size + particle.position.y - particle.position.z / 2.0 + size / 2.0;

        assert!((draw.font_size - size).abs() < 1e-3);
        assert!((draw.x - x).abs() < 1e-3, "x was {}, expected {x}", draw.x);
        assert!((draw.y - y).abs() < 1e-3, "y was {}, expected {y}", draw.y);
        assert!((draw.rotation - particle.progress() * particle.rotation).abs() < 1e-6);
    }

    #[test]
    fn test_render_does_not_touch_the_simulation() {
        let mut field = field(5, 300.0, 8);
        field.update();
        let before = by_id(&field);
        field.render();
        field.render();

        for particle in field.particles() {
            let old = &before[&particle.id()];
            assert_eq!(particle.position, old.position);
            assert_eq!(particle.ttl, old.ttl);
        }
        assert_eq!(field.surface().clear_count(), 2);
        assert_eq!(field.surface().draws().len(), 5);
    }

    #[test]
    fn test_glyphs_too_far_back_are_skipped() {
        // a wide, short surface pushes the back of the helix past zero size
        let mut field = field(30, 300.0, 4);
        field.surface_mut().resize(3000.0, 100.0);
        for _ in 0..5 {
            field.update();
        }
        field.render();

        let visible = field
            .particles()
            .iter()
            .filter(|p| p.position.z / 50.0 + 0.5 > 0.0)
            .count();
        assert_eq!(field.surface().draws().len(), visible);
        assert!(field.surface().draws().iter().all(|d| d.font_size > 0.0));
    }

    #[test]
    fn test_zero_size_surface_holds_the_animation() {
        let mut field = field(5, 300.0, 10);
        for _ in 0..10 {
            field.update();
        }
        let before = by_id(&field);

        field.surface_mut().resize(0.0, 0.0);
        field.update();
        field.render();

        for particle in field.particles() {
            let old = &before[&particle.id()];
            assert!(particle.position.is_finite(), "position was {}", particle.position);
            assert_eq!(particle.position, old.position);
            assert_eq!(particle.ttl, old.ttl);
        }
        assert!(field.surface().draws().is_empty());
        assert_eq!(field.surface().stack_depth(), 0);

        field.surface_mut().resize(300.0, 300.0);
        field.update();
        field.render();
        assert_eq!(field.surface().draws().len(), 5);
        assert!(field.surface().draws().iter().all(|d| {
            d.x.is_finite() && d.y.is_finite() && d.font_size.is_finite()
        }));
    }

    #[test]
    fn test_render_after_draining_paints_a_full_frame() {
        let mut field = field(5, 300.0, 12);
        field.update();
        field.render();
        assert_eq!(field.surface_mut().take_draws().len(), 5);

        field.update();
        field.render();
        assert_eq!(field.surface().draws().len(), 5);
        assert_eq!(field.surface().clear_count(), 2);
    }

    #[test]
    fn test_same_seed_same_animation() {
        let mut a = field(5, 300.0, 99);
        let mut b = field(5, 300.0, 99);
        for _ in 0..200 {
            a.update();
            b.update();
        }
        a.render();
        b.render();
        assert_eq!(a.surface().draws(), b.surface().draws());
    }
}
