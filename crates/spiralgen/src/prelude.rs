pub use crate::config::FieldConfig;
pub use crate::constants::GLYPHS;
pub use crate::field::ParticleField;
pub use crate::particle::Particle;
pub use crate::recording::{GlyphDraw, RecordingSurface};
pub use crate::surface::{DrawingSurface, TextAlign, TextBaseline};
