//! Spike Snake - a terminal snake game where the walls close in
//!
//! This library provides:
//! - Core simulation and phase machine (game module)
//! - Cosmetic effects: death particles, camera shake, UI tweens (fx module)
//! - Terminal rendering and input mapping (render, input modules)
//! - The interactive frame loop (modes module)

pub mod fx;
pub mod game;
pub mod input;
pub mod logging;
pub mod metrics;
pub mod modes;
pub mod render;
pub mod settings;
