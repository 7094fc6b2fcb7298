mod core;
mod field;

use crate::core::camera::CameraPlugin;
use crate::core::state::AppState;
use crate::field::FieldPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::{FrameTimeDiagnosticsPlugin, LogDiagnosticsPlugin};
use bevy::prelude::*;

/// Floating glyphs spiralling up the primary window.
pub struct FloatyPlugin;

impl Plugin for FloatyPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins((CameraPlugin, FieldPlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins((
                FrameTimeDiagnosticsPlugin::default(),
                LogDiagnosticsPlugin::default(),
            ));
        }
    }
}
