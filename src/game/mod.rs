//! Core game logic module for Snake
//!
//! This module contains all the game logic without any I/O or rendering dependencies.
//! The frame loop feeds it commands and elapsed time and reads back a [`Snapshot`].

pub mod action;
pub mod boundary;
pub mod config;
pub mod engine;
pub mod snapshot;
pub mod state;
pub mod world;

// Re-export commonly used types
pub use action::{Command, Direction};
pub use boundary::{Boundary, Walls};
pub use engine::StepInfo;
pub use snapshot::{ParticleView, Segment, Snapshot};
pub use state::{Cell, CollisionType, GameState, Snake};
pub use world::{GameWorld, Phase, PhaseKind};
