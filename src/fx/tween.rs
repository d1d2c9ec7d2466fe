//! Countdown timers and the two UI scale tweens built on them.

use std::f32::consts::PI;

use crate::game::config::{GAME_OVER_REVEAL_DURATION, SCORE_PULSE_AMPLITUDE, SCORE_PULSE_DURATION};

/// A fixed-length timer counting down to zero
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Countdown {
    duration: f32,
    remaining: f32,
}

impl Countdown {
    /// An idle countdown; call [`Countdown::start`] to arm it
    pub fn new(duration: f32) -> Self {
        Self {
            duration,
            remaining: 0.0,
        }
    }

    pub fn start(&mut self) {
        self.remaining = self.duration;
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    /// Take `dt` off the clock. Returns true if the timer was running before the call.
    pub fn tick(&mut self, dt: f32) -> bool {
        if self.remaining > 0.0 {
            self.remaining -= dt;
            true
        } else {
            false
        }
    }

    /// Remaining share of the duration; may dip below zero on the final tick
    pub fn fraction_remaining(&self) -> f32 {
        self.remaining / self.duration
    }

    /// Elapsed share of the duration, clamped to `[0, 1]`
    pub fn fraction_elapsed(&self) -> f32 {
        (1.0 - self.fraction_remaining()).clamp(0.0, 1.0)
    }
}

/// Bump on the score display whenever the score goes up
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScorePulse {
    timer: Countdown,
    scale: f32,
}

impl ScorePulse {
    pub fn new() -> Self {
        Self {
            timer: Countdown::new(SCORE_PULSE_DURATION),
            scale: 1.0,
        }
    }

    pub fn trigger(&mut self) {
        self.timer.start();
    }

    pub fn reset(&mut self) {
        self.timer.stop();
        self.scale = 1.0;
    }

    /// `1 + k * sin(pi * t)`, peaking halfway through the pulse
    pub fn update(&mut self, dt: f32) {
        self.scale = if self.timer.tick(dt) && self.timer.is_running() {
            1.0 + SCORE_PULSE_AMPLITUDE * (PI * self.timer.fraction_elapsed()).sin()
        } else {
            1.0
        };
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for ScorePulse {
    fn default() -> Self {
        Self::new()
    }
}

/// Grows the game-over text from nothing to full size
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reveal {
    timer: Countdown,
    scale: f32,
}

impl Reveal {
    pub fn new() -> Self {
        Self {
            timer: Countdown::new(GAME_OVER_REVEAL_DURATION),
            scale: 0.0,
        }
    }

    /// Restart the reveal from scale 0
    pub fn start(&mut self) {
        self.timer.start();
        self.scale = 0.0;
    }

    pub fn update(&mut self, dt: f32) {
        self.scale = if self.timer.tick(dt) {
            self.timer.fraction_elapsed()
        } else {
            1.0
        };
    }

    pub fn scale(&self) -> f32 {
        self.scale
    }
}

impl Default for Reveal {
    fn default() -> Self {
        Self::new()
    }
}
