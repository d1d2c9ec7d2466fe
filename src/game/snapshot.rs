use serde::{Deserialize, Serialize};

use super::boundary::Walls;
use super::state::{Cell, CollisionType};
use super::world::PhaseKind;
use crate::fx::Rgba;

/// One snake segment as the renderer sees it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub cell: Cell,
    pub is_head: bool,
}

/// A particle in playfield pixels, alpha already applied
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ParticleView {
    pub x: f32,
    pub y: f32,
    pub color: Rgba,
}

/// Everything a renderer needs to paint one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub phase: PhaseKind,
    pub grid_width: i32,
    pub grid_height: i32,
    pub cell_size: f32,
    pub snake: Vec<Segment>,
    pub food: Option<Cell>,
    pub walls: Walls,
    /// Camera shake offset applied to the viewport center, in pixels
    pub view_offset: (f32, f32),
    pub score: u32,
    pub score_scale: f32,
    pub particles: Vec<ParticleView>,
    pub particle_radius: f32,
    /// Scale of the game-over and restart texts
    pub game_over_scale: f32,
    pub show_instructions: bool,
    pub board_cleared: bool,
    pub last_collision: Option<CollisionType>,
    pub tick_interval: f32,
}

impl Snapshot {
    pub fn head(&self) -> Option<Cell> {
        self.snake.iter().find(|segment| segment.is_head).map(|segment| segment.cell)
    }

    /// Whether a wall has moved off the given grid edge
    pub fn spikes_visible(&self) -> bool {
        self.walls != Walls::full(self.grid_width, self.grid_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fx::particles::HEAD_COLOR;
    use crate::game::world::GameWorld;

    #[test]
    fn test_snapshot_json_round_trip() {
        let mut snapshot = GameWorld::with_seed(4).snapshot();
        snapshot.particles.push(ParticleView {
            x: 10.5,
            y: -3.25,
            color: HEAD_COLOR.with_alpha(128),
        });
        snapshot.last_collision = Some(CollisionType::Boundary);

        let json = serde_json::to_string(&snapshot).expect("serialize snapshot");
        let restored: Snapshot = serde_json::from_str(&json).expect("deserialize snapshot");

        assert_eq!(restored, snapshot);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let snapshot = GameWorld::with_seed(4).snapshot();
        let value = serde_json::to_value(&snapshot).expect("serialize snapshot");

        assert_eq!(value["phase"], "Starting");
        assert_eq!(value["grid_width"], 25);
        assert_eq!(value["walls"]["right"], 25);
        assert_eq!(value["snake"][0]["cell"]["x"], 12);
        assert_eq!(value["snake"][0]["is_head"], true);
        assert!(value["last_collision"].is_null());
    }
}
