//! An in-memory [`DrawingSurface`] that resolves the transform stack and keeps
//! every painted glyph. Engine front-ends replay the recorded draws with their
//! own primitives; tests inspect them directly.

use crate::surface::{DrawingSurface, TextAlign, TextBaseline};
use glam::{Affine2, Vec2};

/// One glyph as it lands on the surface, in surface pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphDraw {
    pub glyph: String,
    pub x: f32,
    pub y: f32,
    /// Clockwise rotation in radians.
    pub rotation: f32,
    pub font_size: f32,
    pub alpha: f32,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

#[derive(Debug, Clone, Copy)]
struct PaintState {
    transform: Affine2,
    rotation: f32,
    font_size: f32,
    alpha: f32,
    align: TextAlign,
    baseline: TextBaseline,
}

impl Default for PaintState {
    fn default() -> Self {
        Self {
            transform: Affine2::IDENTITY,
            rotation: 0.0,
            font_size: 10.0,
            alpha: 1.0,
            align: TextAlign::default(),
            baseline: TextBaseline::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RecordingSurface {
    width: f32,
    height: f32,
    pixel_ratio: f32,
    state: PaintState,
    stack: Vec<PaintState>,
    draws: Vec<GlyphDraw>,
    clears: usize,
}

impl RecordingSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width,
            height,
            pixel_ratio: 1.0,
            state: PaintState::default(),
            stack: Vec::new(),
            draws: Vec::new(),
            clears: 0,
        }
    }

    pub fn with_pixel_ratio(mut self, pixel_ratio: f32) -> Self {
        self.pixel_ratio = pixel_ratio;
        self
    }

    /// Resize handshake: the host reports its new backing-store size.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    pub fn set_pixel_ratio(&mut self, pixel_ratio: f32) {
        self.pixel_ratio = pixel_ratio;
    }

    /// Glyphs painted since the last clear, in paint order.
    pub fn draws(&self) -> &[GlyphDraw] {
        &self.draws
    }

    pub fn take_draws(&mut self) -> Vec<GlyphDraw> {
        std::mem::take(&mut self.draws)
    }

    pub fn clear_count(&self) -> usize {
        self.clears
    }

    /// Number of states pushed by `save` and not yet restored.
    pub fn stack_depth(&self) -> usize {
        self.stack.len()
    }

    pub fn text_align(&self) -> TextAlign {
        self.state.align
    }

    pub fn text_baseline(&self) -> TextBaseline {
        self.state.baseline
    }
}

impl DrawingSurface for RecordingSurface {
    fn width(&self) -> f32 {
        self.width
    }

    fn height(&self) -> f32 {
        self.height
    }

    fn pixel_ratio(&self) -> f32 {
        self.pixel_ratio
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.state.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.baseline = baseline;
    }

    fn clear_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.clears += 1;
        let covers_surface =
            x <= 0.0 && y <= 0.0 && x + width >= self.width && y + height >= self.height;
        if covers_surface {
            // glyphs hanging over the edges go too
            self.draws.clear();
            return;
        }
        self.draws.retain(|draw| {
            !(draw.x >= x && draw.x <= x + width && draw.y >= y && draw.y <= y + height)
        });
    }

    fn save(&mut self) {
        self.stack.push(self.state);
    }

    fn restore(&mut self) {
        // unbalanced restore is a no-op, like a canvas
        if let Some(state) = self.stack.pop() {
            self.state = state;
        }
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.state.transform = self.state.transform * Affine2::from_translation(Vec2::new(x, y));
    }

    fn rotate(&mut self, angle: f32) {
        self.state.transform = self.state.transform * Affine2::from_angle(angle);
        self.state.rotation += angle;
    }

    fn set_font_size(&mut self, size: f32) {
        self.state.font_size = size;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        // out-of-range values are ignored, like a canvas
        if (0.0..=1.0).contains(&alpha) {
            self.state.alpha = alpha;
        }
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        let at = self.state.transform.transform_point2(Vec2::new(x, y));
        self.draws.push(GlyphDraw {
            glyph: text.to_string(),
            x: at.x,
            y: at.y,
            rotation: self.state.rotation,
            font_size: self.state.font_size,
            alpha: self.state.alpha,
            align: self.state.align,
            baseline: self.state.baseline,
        });
    }
}
