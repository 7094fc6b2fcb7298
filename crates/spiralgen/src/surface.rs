//! The drawing surface a field paints onto.
//!
//! The shape follows an immediate-mode 2D canvas: a transform/state stack
//! (`save`/`restore`), affine transforms and text painting. Coordinates are in
//! backing-store pixels with the origin at the top-left and y pointing down.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Center,
    End,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Middle,
    Top,
    Bottom,
}

pub trait DrawingSurface {
    fn width(&self) -> f32;
    fn height(&self) -> f32;

    /// Device pixel density. Only used to scale glyph sizes.
    fn pixel_ratio(&self) -> f32 {
        1.0
    }

    fn set_text_align(&mut self, align: TextAlign);
    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    /// Push the current transform and paint state.
    fn save(&mut self);
    /// Pop the state pushed by the matching [`DrawingSurface::save`].
    fn restore(&mut self);

    fn translate(&mut self, x: f32, y: f32);
    /// Rotate clockwise (y points down) by `angle` radians.
    fn rotate(&mut self, angle: f32);

    fn set_font_size(&mut self, size: f32);
    fn set_global_alpha(&mut self, alpha: f32);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}
