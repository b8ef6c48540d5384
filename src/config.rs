// Game configuration loaded from an INI file
//
// Every value has a safe default; a file only needs the keys it changes.
//
// ```ini
// [window]
// width = 960
// height = 640
//
// [player]
// max_health = 10
// damage = 1
// speed = 0.6
//
// [enemy]
// max_health = 5
// damage = 1
// max_speed = 0.7
// aggro_radius = 50
// lose_radius = 100
// attack_cooldown = 60
// ```

use std::path::Path;

use configparser::ini::Ini;
use log::info;

use crate::game::characters::stats::{ActorStats, EnemyBehavior, ENEMY_BEHAVIOR, ENEMY_STATS, PLAYER_STATS};

const DEFAULT_WINDOW_WIDTH: u32 = 960;
const DEFAULT_WINDOW_HEIGHT: u32 = 640;

/// Errors raised while loading a configuration file
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Read(String),

    #[error("Invalid value for [{section}] {key}: {reason}")]
    InvalidValue {
        section: &'static str,
        key: &'static str,
        reason: String,
    },
}

/// Tunable settings for a session
#[derive(Debug, Clone, PartialEq)]
pub struct GameConfig {
    pub window_width: u32,
    pub window_height: u32,

    pub player_max_health: i32,
    pub player_damage: i32,
    pub player_speed: f32,

    pub enemy_max_health: i32,
    pub enemy_damage: i32,
    pub enemy_max_speed: f32,
    pub enemy_aggro_radius: f32,
    pub enemy_lose_radius: f32,
    pub enemy_attack_cooldown: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            window_width: DEFAULT_WINDOW_WIDTH,
            window_height: DEFAULT_WINDOW_HEIGHT,

            player_max_health: PLAYER_STATS.max_health,
            player_damage: PLAYER_STATS.damage,
            player_speed: PLAYER_STATS.speed,

            enemy_max_health: ENEMY_STATS.max_health,
            enemy_damage: ENEMY_STATS.damage,
            enemy_max_speed: ENEMY_STATS.speed,
            enemy_aggro_radius: ENEMY_BEHAVIOR.aggro_radius,
            enemy_lose_radius: ENEMY_BEHAVIOR.lose_radius,
            enemy_attack_cooldown: ENEMY_BEHAVIOR.attack_cooldown,
        }
    }
}

impl GameConfig {
    /// Load a config file on top of the defaults
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut ini = Ini::new();
        ini.load(path)
            .map_err(|e| ConfigError::Read(format!("{}: {}", path.display(), e)))?;

        let config = Self::from_ini(&ini)?;
        info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Parse INI text on top of the defaults
    pub fn load_from_str(text: &str) -> Result<Self, ConfigError> {
        let mut ini = Ini::new();
        ini.read(text.to_string()).map_err(ConfigError::Read)?;
        Self::from_ini(&ini)
    }

    fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // [window]
        if let Some(width) = get_uint(ini, "window", "width")? {
            config.window_width = width;
        }
        if let Some(height) = get_uint(ini, "window", "height")? {
            config.window_height = height;
        }

        // [player]
        if let Some(health) = get_positive_int(ini, "player", "max_health")? {
            config.player_max_health = health;
        }
        if let Some(damage) = get_int(ini, "player", "damage")? {
            config.player_damage = damage;
        }
        if let Some(speed) = get_float(ini, "player", "speed")? {
            config.player_speed = speed;
        }

        // [enemy]
        if let Some(health) = get_positive_int(ini, "enemy", "max_health")? {
            config.enemy_max_health = health;
        }
        if let Some(damage) = get_int(ini, "enemy", "damage")? {
            config.enemy_damage = damage;
        }
        if let Some(speed) = get_float(ini, "enemy", "max_speed")? {
            config.enemy_max_speed = speed;
        }
        if let Some(radius) = get_float(ini, "enemy", "aggro_radius")? {
            config.enemy_aggro_radius = radius;
        }
        if let Some(radius) = get_float(ini, "enemy", "lose_radius")? {
            config.enemy_lose_radius = radius;
        }
        if let Some(cooldown) = get_uint(ini, "enemy", "attack_cooldown")? {
            config.enemy_attack_cooldown = cooldown;
        }

        Ok(config)
    }

    pub fn player_stats(&self) -> ActorStats {
        ActorStats {
            max_health: self.player_max_health,
            damage: self.player_damage,
            speed: self.player_speed,
            ..PLAYER_STATS
        }
    }

    pub fn enemy_stats(&self) -> ActorStats {
        ActorStats {
            max_health: self.enemy_max_health,
            damage: self.enemy_damage,
            speed: self.enemy_max_speed,
            ..ENEMY_STATS
        }
    }

    pub fn enemy_behavior(&self) -> EnemyBehavior {
        EnemyBehavior {
            aggro_radius: self.enemy_aggro_radius,
            lose_radius: self.enemy_lose_radius,
            attack_cooldown: self.enemy_attack_cooldown,
        }
    }

    pub fn window_size(&self) -> (u32, u32) {
        (self.window_width, self.window_height)
    }
}

fn invalid(section: &'static str, key: &'static str, reason: impl ToString) -> ConfigError {
    ConfigError::InvalidValue {
        section,
        key,
        reason: reason.to_string(),
    }
}

fn get_uint(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<u32>, ConfigError> {
    match ini.getuint(section, key).map_err(|e| invalid(section, key, e))? {
        Some(value) => u32::try_from(value)
            .map(Some)
            .map_err(|e| invalid(section, key, e)),
        None => Ok(None),
    }
}

fn get_int(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<i32>, ConfigError> {
    match ini.getint(section, key).map_err(|e| invalid(section, key, e))? {
        Some(value) => i32::try_from(value)
            .map(Some)
            .map_err(|e| invalid(section, key, e)),
        None => Ok(None),
    }
}

fn get_positive_int(
    ini: &Ini,
    section: &'static str,
    key: &'static str,
) -> Result<Option<i32>, ConfigError> {
    match get_int(ini, section, key)? {
        Some(value) if value <= 0 => Err(invalid(section, key, "must be greater than zero")),
        other => Ok(other),
    }
}

fn get_float(ini: &Ini, section: &'static str, key: &'static str) -> Result<Option<f32>, ConfigError> {
    match ini.getfloat(section, key).map_err(|e| invalid(section, key, e))? {
        Some(value) if value.is_finite() && value >= 0.0 => Ok(Some(value as f32)),
        Some(_) => Err(invalid(section, key, "must be a non-negative number")),
        None => Ok(None),
    }
}
