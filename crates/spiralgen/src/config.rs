use crate::constants::*;
use crate::error::{ConfigError, Result};
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use std::path::Path;
use std::sync::{Mutex, OnceLock};

pub const CONFIG_FILE: &str = "floaty_config.toml";

static CONFIG: OnceLock<Mutex<FieldConfig>> = OnceLock::new();

/// Get a copy of the current configuration, loading it from [`CONFIG_FILE`] on
/// first use. A missing or broken file falls back to the defaults.
pub fn get_config() -> FieldConfig {
    let config_mutex = CONFIG.get_or_init(|| {
        let config = FieldConfig::load_from_file(CONFIG_FILE).unwrap_or_else(|err| {
            log::warn!("Could not load {CONFIG_FILE} ({err}), using defaults");
            FieldConfig::default()
        });
        Mutex::new(config)
    });
    config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner())
        .clone()
}

/// Re-read [`CONFIG_FILE`]. The cached configuration is left untouched on error.
pub fn reload_config() -> Result<()> {
    let new_config = FieldConfig::load_from_file(CONFIG_FILE)?;
    let config_mutex = CONFIG.get_or_init(|| Mutex::new(new_config.clone()));
    *config_mutex
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner()) = new_config;
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldConfig {
    pub field: PoolConfig,
    pub motion: MotionConfig,
    pub lifetime: LifetimeConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolConfig {
    pub particle_count: usize,
    /// Fixed seed for a reproducible animation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u32>,
    /// Font asset used to draw the glyphs. Emoji need a font that has them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MotionConfig {
    pub speed_min: f32,
    pub speed_max: f32,
    pub max_rotation: f32,
    pub winding_turns: f32,
    pub ascent_divisor: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LifetimeConfig {
    pub max_ttl: f32,
    pub fade_start: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            field: PoolConfig {
                particle_count: DEFAULT_PARTICLE_COUNT,
                seed: None,
                font: None,
            },
            motion: MotionConfig {
                speed_min: SPEED_MIN,
                speed_max: SPEED_MAX,
                max_rotation: MAX_ROTATION,
                winding_turns: WINDING_TURNS,
                ascent_divisor: ASCENT_DIVISOR,
            },
            lifetime: LifetimeConfig {
                max_ttl: MAX_TTL,
                fade_start: FADE_START,
            },
        }
    }
}

impl FieldConfig {
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: FieldConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn save_to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let motion = &self.motion;
        if !(motion.speed_min > 0.0) {
            return Err(invalid("motion.speed_min must be positive"));
        }
        if !(motion.speed_max > motion.speed_min) || !motion.speed_max.is_finite() {
            return Err(invalid("motion.speed_max must be greater than motion.speed_min"));
        }
        if !(motion.max_rotation >= 0.0) || !motion.max_rotation.is_finite() {
            return Err(invalid("motion.max_rotation must be finite and not negative"));
        }
        if !(motion.ascent_divisor > 0.0) || !motion.ascent_divisor.is_finite() {
            return Err(invalid("motion.ascent_divisor must be positive"));
        }
        if !motion.winding_turns.is_finite() {
            return Err(invalid("motion.winding_turns must be finite"));
        }
        if !(self.lifetime.max_ttl >= 1.0) || !self.lifetime.max_ttl.is_finite() {
            return Err(invalid("lifetime.max_ttl must be at least one tick"));
        }
        if !(0.0..1.0).contains(&self.lifetime.fade_start) {
            return Err(invalid("lifetime.fade_start must be in [0, 1)"));
        }
        Ok(())
    }

    pub fn speed_range(&self) -> RangeInclusive<f32> {
        self.motion.speed_min..=self.motion.speed_max
    }
}

fn invalid(message: &str) -> ConfigError {
    ConfigError::Validation(message.to_string())
}
