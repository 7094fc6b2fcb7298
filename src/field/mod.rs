pub mod components;
pub mod logic;
pub mod resources;
pub mod systems;

use crate::core::state::AppState;
use crate::field::systems::*;
use bevy::prelude::*;

pub struct FieldPlugin;

impl Plugin for FieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            start_field.run_if(in_state(AppState::WaitingForSurface)),
        )
        .add_systems(
            Update,
            (handle_surface_resize, tick_field, apply_glyph_draws)
                .chain()
                .run_if(in_state(AppState::Running)),
        );
    }
}
