use rand::Rng;

use super::tween::Countdown;
use crate::game::config::{SHAKE_DURATION, SHAKE_INTENSITY};

/// Random viewport jitter that fades out linearly
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraShake {
    timer: Countdown,
    magnitude: f32,
    offset: (f32, f32),
}

impl CameraShake {
    pub fn new() -> Self {
        Self {
            timer: Countdown::new(SHAKE_DURATION),
            magnitude: 0.0,
            offset: (0.0, 0.0),
        }
    }

    pub fn trigger(&mut self) {
        self.timer.start();
        self.magnitude = SHAKE_INTENSITY;
    }

    pub fn reset(&mut self) {
        self.timer.stop();
        self.magnitude = 0.0;
        self.offset = (0.0, 0.0);
    }

    /// Re-sample the offset for this frame
    pub fn update<R: Rng + ?Sized>(&mut self, dt: f32, rng: &mut R) {
        if !self.timer.tick(dt) {
            self.offset = (0.0, 0.0);
            return;
        }

        let current = self.magnitude * self.timer.fraction_remaining();
        self.offset = if current > 0.0 {
            (
                rng.gen_range(-current..=current),
                rng.gen_range(-current..=current),
            )
        } else {
            (0.0, 0.0)
        };
    }

    /// Offset to add to the viewport center
    pub fn offset(&self) -> (f32, f32) {
        self.offset
    }
}

impl Default for CameraShake {
    fn default() -> Self {
        Self::new()
    }
}
