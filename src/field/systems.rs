use crate::core::camera::logic::{canvas_rotation_to_world, canvas_to_world, logical_font_size};
use crate::core::state::AppState;
use crate::field::components::GlyphSprite;
use crate::field::logic::{has_drawable_area, plain_glyph};
use crate::field::resources::{ActiveField, GlyphStyle, surface_for};
use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized, WindowScaleFactorChanged};
use spiralgen::prelude::{DrawingSurface, ParticleField};

/// Later paints sit in front of earlier ones.
const GLYPH_DEPTH_STEP: f32 = 0.01;

/// Build the field once the primary window has a drawable size.
pub fn start_field(
    mut commands: Commands,
    windows: Query<&Window, With<PrimaryWindow>>,
    asset_server: Res<AssetServer>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    if !has_drawable_area(window.physical_width(), window.physical_height()) {
        return;
    }

    let field = ParticleField::from_config(surface_for(window));

    let font_path = field.config().field.font.clone();
    if font_path.is_none() {
        warn!("No glyph font configured, drawing plain glyphs. Set `font` in the config for emoji");
    }
    commands.insert_resource(GlyphStyle {
        plain: font_path.is_none(),
    });
    let font: Handle<Font> = font_path
        .map(|path| asset_server.load(path))
        .unwrap_or_default();

    for slot in 0..field.len() {
        commands.spawn((
            Text2d::default(),
            TextFont {
                font: font.clone(),
                ..default()
            },
            TextColor(Color::BLACK),
            Transform::default(),
            Visibility::Hidden,
            GlyphSprite { slot },
        ));
    }

    info!(
        "Starting particle field: {} particles on a {}x{} surface",
        field.len(),
        window.physical_width(),
        window.physical_height()
    );

    commands.insert_resource(ActiveField(field));
    next_state.set(AppState::Running);
}

/// Resize handshake: keep the surface in step with the window's backing store.
pub fn handle_surface_resize(
    mut resized: MessageReader<WindowResized>,
    mut rescaled: MessageReader<WindowScaleFactorChanged>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut field: ResMut<ActiveField>,
) {
    let changed = resized.read().count() + rescaled.read().count() > 0;
    if !changed {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };
    if !has_drawable_area(window.physical_width(), window.physical_height()) {
        debug!("Window has no area, keeping the last surface size");
        return;
    }

    let width = window.physical_width() as f32;
    let height = window.physical_height() as f32;
    let surface = field.0.surface_mut();
    surface.resize(width, height);
    surface.set_pixel_ratio(window.scale_factor());

    debug!("Surface resized to {}x{}", width, height);
}

pub fn tick_field(mut field: ResMut<ActiveField>) {
    field.0.update();
    field.0.render();
}

/// Replay this frame's recorded glyphs onto the text entities.
pub fn apply_glyph_draws(
    mut field: ResMut<ActiveField>,
    style: Res<GlyphStyle>,
    mut sprites: Query<(
        &GlyphSprite,
        &mut Text2d,
        &mut TextFont,
        &mut TextColor,
        &mut Transform,
        &mut Visibility,
    )>,
) {
    let surface = field.0.surface();
    let surface_size = Vec2::new(surface.width(), surface.height());
    let scale_factor = surface.pixel_ratio();
    let draws = field.0.surface_mut().take_draws();

    for (sprite, mut text, mut font, mut color, mut transform, mut visibility) in &mut sprites {
        let Some(draw) = draws.get(sprite.slot) else {
            *visibility = Visibility::Hidden;
            continue;
        };

        let glyph = if style.plain {
            plain_glyph(&draw.glyph)
        } else {
            draw.glyph.as_str()
        };
        if text.0 != glyph {
            text.0 = glyph.to_string();
        }
        font.font_size = logical_font_size(draw.font_size, scale_factor);
        color.0 = Color::srgba(0.0, 0.0, 0.0, draw.alpha);

        let position = canvas_to_world(Vec2::new(draw.x, draw.y), surface_size, scale_factor);
        transform.translation = position.extend(sprite.slot as f32 * GLYPH_DEPTH_STEP);
        transform.rotation = canvas_rotation_to_world(draw.rotation);

        *visibility = Visibility::Visible;
    }
}
