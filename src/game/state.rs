use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use super::action::Direction;
use super::boundary::Boundary;
use super::config::{GRID_HEIGHT, GRID_WIDTH, INITIAL_TICK_INTERVAL};

/// A cell on the game grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
}

impl Cell {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Move cell by delta
    pub fn moved_by(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Neighbouring cell in a direction
    pub fn moved_in_direction(&self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.moved_by(dx, dy)
    }

    /// Center of the cell in playfield pixels
    pub fn center(&self, cell_size: f32) -> (f32, f32) {
        (
            self.x as f32 * cell_size + cell_size * 0.5,
            self.y as f32 * cell_size + cell_size * 0.5,
        )
    }
}

/// The snake, head at the front
#[derive(Debug, Clone, PartialEq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// A one-cell snake
    pub fn new(head: Cell) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from its cells, head first. `None` for an empty list.
    pub fn from_cells(cells: impl IntoIterator<Item = Cell>) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        (!body.is_empty()).then_some(Self { body })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn cells(&self) -> impl ExactSizeIterator<Item = &Cell> {
        self.body.iter()
    }

    /// Whether any segment, head and tail included, sits on `cell`
    pub fn occupies(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Put a new head in front of the old one
    pub fn push_head(&mut self, head: Cell) {
        self.body.push_front(head);
    }

    /// Drop the last segment; a one-cell snake keeps its head
    pub fn pop_tail(&mut self) {
        if self.body.len() > 1 {
            self.body.pop_back();
        }
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }
}

/// What the head ran into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CollisionType {
    /// Left the grid
    Wall,
    /// Inside the grid but past a spike wall
    Boundary,
    /// Snake hit itself
    SelfCollision,
}

/// Everything that makes up one run on the grid
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    pub snake: Snake,
    /// `None` once the board is full
    pub food: Option<Cell>,
    pub boundary: Boundary,
    /// Heading used by the last tick; `None` until the first steer
    pub direction: Option<Direction>,
    /// Heading to commit on the next tick
    pub pending_direction: Option<Direction>,
    pub grid_width: i32,
    pub grid_height: i32,
    pub score: u32,
    /// Seconds between two ticks
    pub tick_interval: f32,
    /// Time collected towards the next tick
    pub accumulator: f32,
    /// Set when food could not be placed because every cell is taken
    pub board_cleared: bool,
}

impl GameState {
    /// A fresh run with a one-cell snake in the middle of the grid
    pub fn new(food: Option<Cell>) -> Self {
        Self::with_snake(Snake::new(Self::center()), food)
    }

    pub fn with_snake(snake: Snake, food: Option<Cell>) -> Self {
        Self {
            snake,
            food,
            boundary: Boundary::new(GRID_WIDTH, GRID_HEIGHT),
            direction: None,
            pending_direction: None,
            grid_width: GRID_WIDTH,
            grid_height: GRID_HEIGHT,
            score: 0,
            tick_interval: INITIAL_TICK_INTERVAL,
            accumulator: 0.0,
            board_cleared: false,
        }
    }

    pub fn center() -> Cell {
        Cell::new(GRID_WIDTH / 2, GRID_HEIGHT / 2)
    }

    /// Check if a cell is within the grid
    pub fn is_in_bounds(&self, cell: Cell) -> bool {
        cell.x >= 0 && cell.x < self.grid_width && cell.y >= 0 && cell.y < self.grid_height
    }

    /// Check if a cell is occupied by the snake
    pub fn is_occupied_by_snake(&self, cell: Cell) -> bool {
        self.snake.occupies(cell)
    }

    /// Every grid cell not covered by the snake, row by row
    pub fn free_cells(&self) -> Vec<Cell> {
        (0..self.grid_height)
            .flat_map(|y| (0..self.grid_width).map(move |x| Cell::new(x, y)))
            .filter(|&cell| !self.snake.occupies(cell))
            .collect()
    }
}
