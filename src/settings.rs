//! Runtime options. Game rules are fixed in [`crate::game::config`]; these
//! only affect presentation and diagnostics.

use std::path::PathBuf;
use std::time::Duration;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use simplelog::LevelFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Frame cap
    pub fps: u32,
    /// Fixed RNG seed; entropy when absent
    pub seed: Option<u64>,
    pub log_file: PathBuf,
    pub log_level: LogLevel,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fps: 60,
            seed: None,
            log_file: PathBuf::from("spike_snake.log"),
            log_level: LogLevel::Info,
        }
    }
}

impl Settings {
    /// Time between two frames, never shorter than 1ms
    pub fn frame_interval(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.fps.max(1))).max(Duration::from_millis(1))
    }
}
