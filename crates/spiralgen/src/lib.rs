pub mod config;
pub mod constants;
pub mod error;
pub mod field;
pub mod particle;
pub mod prelude;
pub mod recording;
pub mod surface;
pub mod tools;

pub use config::{get_config, reload_config};
