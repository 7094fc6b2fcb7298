use bevy::prelude::*;

/// A text entity showing the glyph painted at position `slot` of the current frame.
#[derive(Component)]
pub struct GlyphSprite {
    pub slot: usize,
}
