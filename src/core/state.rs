use bevy::prelude::States;

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub(crate) enum AppState {
    /// No usable primary window yet, the field is not built.
    #[default]
    WaitingForSurface,
    Running,
}
