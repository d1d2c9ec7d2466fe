//! Death burst: the snake breaks apart into fading particles.

use std::f32::consts::TAU;

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game::Cell;
use crate::game::config::{
    BODY_PARTICLES, CELL_SIZE, DYING_DURATION, HEAD_PARTICLES, PARTICLE_MAX_SPEED,
    PARTICLE_MIN_LIFETIME_FRACTION, PARTICLE_MIN_SPEED,
};

/// 8-bit RGBA colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }
}

pub const HEAD_COLOR: Rgba = Rgba::rgb(0, 255, 0);
pub const BODY_COLOR: Rgba = Rgba::rgb(0, 200, 0);

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub position: (f32, f32),
    pub velocity: (f32, f32),
    pub color: Rgba,
    pub lifetime: f32,
    pub initial_lifetime: f32,
}

impl Particle {
    /// Advance by `dt`. Returns false once the particle has expired.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.lifetime -= dt;
        if self.lifetime <= 0.0 {
            return false;
        }
        self.position.0 += self.velocity.0 * dt;
        self.position.1 += self.velocity.1 * dt;
        self.color.a = self.opacity();
        true
    }

    /// Linear fade from 255 to 0 over the particle's life
    pub fn opacity(&self) -> u8 {
        (255.0 * (self.lifetime / self.initial_lifetime)).clamp(0.0, 255.0) as u8
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParticleSystem {
    particles: Vec<Particle>,
}

impl ParticleSystem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace any live particles with a burst from every cell, head first
    pub fn burst<'a, R: Rng + ?Sized>(
        &mut self,
        cells: impl IntoIterator<Item = &'a Cell>,
        rng: &mut R,
    ) {
        self.particles.clear();

        for (index, cell) in cells.into_iter().enumerate() {
            let (count, color) = if index == 0 {
                (HEAD_PARTICLES, HEAD_COLOR)
            } else {
                (BODY_PARTICLES, BODY_COLOR)
            };
            let origin = cell.center(CELL_SIZE);

            for _ in 0..count {
                let angle = rng.gen_range(0.0..TAU);
                let speed = rng.gen_range(PARTICLE_MIN_SPEED..PARTICLE_MAX_SPEED);
                let lifetime =
                    rng.gen_range(DYING_DURATION * PARTICLE_MIN_LIFETIME_FRACTION..DYING_DURATION);
                self.particles.push(Particle {
                    position: origin,
                    velocity: (angle.cos() * speed, angle.sin() * speed),
                    color,
                    lifetime,
                    initial_lifetime: lifetime,
                });
            }
        }

        debug!("Spawned {} death particles", self.particles.len());
    }

    /// Move every particle and drop the expired ones
    pub fn update(&mut self, dt: f32) {
        self.particles.retain_mut(|particle| particle.tick(dt));
    }

    pub fn clear(&mut self) {
        self.particles.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}
