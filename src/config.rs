//! Game configuration loaded from TOML.
//!
//! Every section falls back to its defaults, so an empty file (or no file at
//! all) yields the classic 1024×768 layout and timings.

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub canvas: CanvasConfig,
    pub timing: TimingConfig,
    pub assets: AssetPaths,
}

/// Size of the play field in pixels.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 1024.0,
            height: 768.0,
        }
    }
}

/// Periods of every timer in the game, in milliseconds.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    /// Main simulation/render loop.
    pub loop_ms: u64,
    /// Enemy descent step.
    pub enemy_step_ms: u64,
    /// Laser ascent step.
    pub laser_step_ms: u64,
    /// Fire-cooldown decay step.
    pub cooldown_step_ms: u64,
    /// Pause between the end of play and the end screen.
    pub end_delay_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            loop_ms: 100,
            enemy_step_ms: 300,
            laser_step_ms: 100,
            cooldown_step_ms: 200,
            end_delay_ms: 200,
        }
    }
}

/// Where the asset provider should look for each texture.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AssetPaths {
    pub hero: String,
    pub enemy: String,
    pub laser: String,
    pub life: String,
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self {
            hero: "assets/player.png".to_string(),
            enemy: "assets/enemyShip.png".to_string(),
            laser: "assets/laserRed.png".to_string(),
            life: "assets/life.png".to_string(),
        }
    }
}

impl GameConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml(&contents)?;
        log::debug!("loaded config from {}: {:?}", path.display(), config);
        Ok(config)
    }

    /// Parse and validate config text.
    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.canvas.width > 0.0 && self.canvas.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "canvas must be positive, got {}x{}",
                self.canvas.width, self.canvas.height
            )));
        }
        let t = &self.timing;
        let periods = [
            ("loop_ms", t.loop_ms),
            ("enemy_step_ms", t.enemy_step_ms),
            ("laser_step_ms", t.laser_step_ms),
            ("cooldown_step_ms", t.cooldown_step_ms),
        ];
        if let Some((name, _)) = periods.iter().find(|(_, ms)| *ms == 0) {
            return Err(ConfigError::Invalid(format!("timing.{} must be non-zero", name)));
        }
        Ok(())
    }
}
