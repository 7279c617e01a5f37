//! Game configuration from environment variables.
//!
//! | variable | default |
//! |---|---|
//! | `BLOCKFALL_SEED` | derived from the clock |
//! | `BLOCKFALL_PLAYER` | `player` |
//! | `BLOCKFALL_SCORES_HOST` / `BLOCKFALL_SCORES_PORT` | `127.0.0.1:7878` |
//! | `BLOCKFALL_SCORES_DISABLED` | unset (`1` or `true` disables reporting) |
//! | `BLOCKFALL_LOG_LEVEL` | `info` |
//! | `BLOCKFALL_LOG_FILE` | `blockfall.log` |

use std::env;
use std::time::{SystemTime, UNIX_EPOCH};

use log::LevelFilter;

use crate::scores::server::ServerConfig;
use crate::scores::store::truncate_name;

pub const DEFAULT_PLAYER: &str = "player";
pub const DEFAULT_LOG_FILE: &str = "blockfall.log";

/// Settings for the terminal game binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Piece generator seed
    pub seed: u32,
    /// Name submitted with scores
    pub player: String,
    /// `host:port` of the score server, `None` when reporting is disabled
    pub scores_addr: Option<String>,
    pub log_level: LevelFilter,
    pub log_file: String,
}

impl GameConfig {
    /// Read every setting once at startup
    pub fn from_env() -> Self {
        let seed = env::var("BLOCKFALL_SEED")
            .ok()
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or_else(clock_seed);

        let player = env::var("BLOCKFALL_PLAYER")
            .ok()
            .map(|s| truncate_name(s.trim()))
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_PLAYER.to_string());

        let scores_addr = if flag_set("BLOCKFALL_SCORES_DISABLED") {
            None
        } else {
            Some(ServerConfig::from_env().address())
        };

        let log_file = env::var("BLOCKFALL_LOG_FILE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

        Self {
            seed,
            player,
            scores_addr,
            log_level: log_level_from_env(),
            log_file,
        }
    }
}

/// `BLOCKFALL_LOG_LEVEL`, defaulting to `info`
pub fn log_level_from_env() -> LevelFilter {
    env::var("BLOCKFALL_LOG_LEVEL")
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(LevelFilter::Info)
}

/// True when `name` is `1` or `true` (any case)
pub fn flag_set(name: &str) -> bool {
    env::var(name)
        .map(|v| {
            let v = v.trim();
            v == "1" || v.eq_ignore_ascii_case("true")
        })
        .unwrap_or(false)
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
