//! Compile-time game rules.
//!
//! Grid size, speeds and animation timings are fixed for every run. Times are
//! in seconds, distances in pixels of the logical playfield (`CELL_SIZE` per cell).

/// Width of the game grid in cells
pub const GRID_WIDTH: i32 = 25;
/// Height of the game grid in cells
pub const GRID_HEIGHT: i32 = 20;
/// Edge length of one cell in playfield pixels
pub const CELL_SIZE: f32 = 28.0;

/// Tick interval at the start of a run
pub const INITIAL_TICK_INTERVAL: f32 = 0.15;
/// Fastest the snake is allowed to move
pub const MIN_TICK_INTERVAL: f32 = 0.05;
/// How much each eaten food shortens the tick interval
pub const TICK_INTERVAL_DECREMENT: f32 = 0.005;

/// Time food may sit uneaten before the spike walls start closing in
pub const SPIKE_GRACE_PERIOD: f32 = 8.0;
/// Time between two consecutive wall advances
pub const SPIKE_ADVANCE_INTERVAL: f32 = 2.0;

/// Length of the Dying phase
pub const DYING_DURATION: f32 = 0.8;
pub const HEAD_PARTICLES: usize = 25;
pub const BODY_PARTICLES: usize = 15;
pub const PARTICLE_MIN_SPEED: f32 = 50.0;
pub const PARTICLE_MAX_SPEED: f32 = 150.0;
/// Particle lifetimes are drawn from `[MIN_FRACTION, 1.0) * DYING_DURATION`
pub const PARTICLE_MIN_LIFETIME_FRACTION: f32 = 0.5;
pub const PARTICLE_RADIUS: f32 = 2.0;

pub const SHAKE_DURATION: f32 = 0.3;
pub const SHAKE_INTENSITY: f32 = 4.0;

pub const SCORE_PULSE_DURATION: f32 = 0.3;
/// Peak extra scale of the score display during a pulse
pub const SCORE_PULSE_AMPLITUDE: f32 = 0.3;

pub const GAME_OVER_REVEAL_DURATION: f32 = 0.4;
