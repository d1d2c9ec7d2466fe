//! Cosmetic, time-driven effects layered over the simulation.
//!
//! None of these feed back into gameplay; they only shape what gets drawn.

pub mod particles;
pub mod shake;
pub mod tween;

pub use particles::{Particle, ParticleSystem, Rgba};
pub use shake::CameraShake;
pub use tween::{Countdown, Reveal, ScorePulse};
