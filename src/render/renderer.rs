use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Block, BorderType, Borders, Clear, Paragraph,
        canvas::{Canvas, Context, Points},
    },
};

use crate::game::{Cell, CollisionType, PhaseKind, Snapshot};
use crate::metrics::GameMetrics;

/// Terminal columns used per grid cell
const COLS_PER_CELL: u16 = 2;
/// The terminal cannot move by sub-cell amounts, so shake is exaggerated
const SHAKE_GAIN: f64 = 3.5;

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(snapshot, metrics);
        frame.render_widget(stats, chunks[0]);

        let board_area = Self::board_area(chunks[1], snapshot);
        self.render_board(frame, board_area, snapshot);

        match snapshot.phase {
            PhaseKind::Starting => self.render_instructions(frame, board_area),
            PhaseKind::GameOver => self.render_game_over(frame, board_area, snapshot),
            PhaseKind::Playing | PhaseKind::Dying => {}
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    /// Bordered rectangle sized to the grid, centered in `area`
    fn board_area(area: Rect, snapshot: &Snapshot) -> Rect {
        let width = (snapshot.grid_width as u16 * COLS_PER_CELL + 2).min(area.width);
        let height = (snapshot.grid_height as u16 + 2).min(area.height);
        Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        }
    }

    fn render_board(&self, frame: &mut Frame, area: Rect, snapshot: &Snapshot) {
        // Playfield pixels per terminal column and per cell
        let col_px = f64::from(snapshot.cell_size) / f64::from(COLS_PER_CELL);
        let cell_px = f64::from(snapshot.cell_size);
        let cols = f64::from(snapshot.grid_width as u16 * COLS_PER_CELL);
        let rows = f64::from(snapshot.grid_height as u16);
        let span_x = (cols - 1.0) * col_px;
        let span_y = (rows - 1.0) * cell_px;

        let ox = f64::from(snapshot.view_offset.0) * SHAKE_GAIN;
        let oy = f64::from(snapshot.view_offset.1) * SHAKE_GAIN;

        let border_color = match snapshot.phase {
            PhaseKind::Dying => Color::Red,
            _ => Color::White,
        };

        let canvas = Canvas::default()
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border_color))
                    .title(" Snake "),
            )
            .marker(Marker::Braille)
            .background_color(Color::Reset)
            .x_bounds([ox, ox + span_x])
            .y_bounds([-oy, span_y - oy])
            .paint(|ctx| {
                // Canvas y grows upwards, playfield y grows downwards
                let to_canvas = |px: f64, py: f64| (px, span_y - py);
                let cell_origin = |cell: Cell| {
                    to_canvas(
                        f64::from(cell.x) * cell_px + col_px / 2.0,
                        f64::from(cell.y) * cell_px + cell_px / 2.0,
                    )
                };

                if snapshot.phase == PhaseKind::Dying {
                    self.paint_particles(ctx, snapshot, to_canvas);
                    ctx.layer();
                }

                if let Some(food) = snapshot.food {
                    let (x, y) = cell_origin(food);
                    ctx.print(
                        x,
                        y,
                        Span::styled(
                            "()",
                            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                        ),
                    );
                }

                if matches!(snapshot.phase, PhaseKind::Starting | PhaseKind::Playing) {
                    if snapshot.phase == PhaseKind::Playing && snapshot.spikes_visible() {
                        for (cell, symbol) in spike_cells(snapshot) {
                            let (x, y) = cell_origin(cell);
                            ctx.print(x, y, Span::styled(symbol, Style::default().fg(Color::Yellow)));
                        }
                    }

                    for segment in &snapshot.snake {
                        let (x, y) = cell_origin(segment.cell);
                        let style = if segment.is_head {
                            Style::default()
                                .fg(Color::Rgb(0, 255, 0))
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default().fg(Color::Rgb(0, 200, 0))
                        };
                        ctx.print(x, y, Span::styled("██", style));
                    }
                }
            });

        frame.render_widget(canvas, area);
    }

    fn paint_particles(
        &self,
        ctx: &mut Context<'_>,
        snapshot: &Snapshot,
        to_canvas: impl Fn(f64, f64) -> (f64, f64),
    ) {
        for particle in &snapshot.particles {
            let alpha = f64::from(particle.color.a) / 255.0;
            let fade = |c: u8| (f64::from(c) * alpha) as u8;
            let coords = [to_canvas(f64::from(particle.x), f64::from(particle.y))];
            ctx.draw(&Points {
                coords: &coords,
                color: Color::Rgb(
                    fade(particle.color.r),
                    fade(particle.color.g),
                    fade(particle.color.b),
                ),
            });
        }
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        // The pulse widens and brightens the score while it is active
        let pad = " ".repeat(((snapshot.score_scale - 1.0) * 10.0).round().max(0.0) as usize);
        let score_style = if snapshot.score_scale > 1.0 {
            Style::default()
                .fg(Color::LightYellow)
                .add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD)
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(format!("{pad}{}{pad}", snapshot.score), score_style),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Speed: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                format!("{:.1}/s", 1.0 / snapshot.tick_interval),
                Style::default().fg(Color::White),
            ),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_instructions(&self, frame: &mut Frame, board: Rect) {
        let text = vec![
            Line::from(Span::styled(
                "Use WASD or Arrow Keys to Move",
                Style::default().fg(Color::Cyan),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press any movement key to Start!",
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            )),
        ];
        let area = centered(board, 36, 3);
        frame.render_widget(Clear, area);
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }

    fn render_game_over(&self, frame: &mut Frame, board: Rect, snapshot: &Snapshot) {
        let scale = snapshot.game_over_scale;
        if scale <= 0.0 {
            return;
        }

        let banner = if snapshot.board_cleared {
            "BOARD CLEARED!"
        } else {
            "GAME OVER!"
        };
        let cause = match snapshot.last_collision {
            _ if snapshot.board_cleared => "",
            Some(CollisionType::Wall) => "You hit the wall",
            Some(CollisionType::Boundary) => "The spikes got you",
            Some(CollisionType::SelfCollision) => "You bit yourself",
            None => "",
        };

        let text = vec![
            Line::from(Span::styled(
                reveal_text(banner, scale),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                reveal_text(cause, scale),
                Style::default().fg(Color::Gray),
            )),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(Span::styled(
                reveal_text("Press SPACE to Restart", scale),
                Style::default().fg(Color::Yellow),
            )),
        ];

        let area = centered(board, 30, 8);
        frame.render_widget(Clear, area);
        frame.render_widget(
            Paragraph::new(text).alignment(Alignment::Center).block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Red)),
            ),
            area,
        );
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("SPACE", Style::default().fg(Color::Green)),
            Span::raw(" to restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Cells just outside the legal area, one row or column per advanced wall
fn spike_cells(snapshot: &Snapshot) -> Vec<(Cell, &'static str)> {
    let w = snapshot.walls;
    let mut cells = Vec::new();
    for x in w.left..w.right {
        if w.top > 0 {
            cells.push((Cell::new(x, w.top - 1), "vv"));
        }
        if w.bottom < snapshot.grid_height {
            cells.push((Cell::new(x, w.bottom), "^^"));
        }
    }
    for y in w.top..w.bottom {
        if w.left > 0 {
            cells.push((Cell::new(w.left - 1, y), ">>"));
        }
        if w.right < snapshot.grid_width {
            cells.push((Cell::new(w.right, y), "<<"));
        }
    }
    cells
}

/// The middle `scale` share of `text`, so it appears to grow from its center
fn reveal_text(text: &str, scale: f32) -> String {
    let chars: Vec<char> = text.chars().collect();
    let shown = ((chars.len() as f32) * scale.clamp(0.0, 1.0)).round() as usize;
    let start = (chars.len() - shown) / 2;
    chars[start..start + shown].iter().collect()
}

fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Command, Direction, GameWorld};
    use ratatui::{Terminal, backend::TestBackend};

    fn draw(snapshot: &Snapshot) -> String {
        let mut terminal = Terminal::new(TestBackend::new(80, 30)).expect("test terminal");
        let metrics = GameMetrics::new();
        terminal
            .draw(|frame| Renderer::new().render(frame, snapshot, &metrics))
            .expect("draw");
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_reveal_text_grows_from_center() {
        assert_eq!(reveal_text("GAME OVER!", 0.0), "");
        assert_eq!(reveal_text("GAME OVER!", 1.0), "GAME OVER!");
        assert_eq!(reveal_text("ABCDEF", 0.5), "BCD");
        assert_eq!(reveal_text("", 0.7), "");
    }

    #[test]
    fn test_spike_cells_only_for_advanced_walls() {
        let mut snapshot = GameWorld::with_seed(1).snapshot();
        assert!(spike_cells(&snapshot).is_empty());

        snapshot.walls.left = 3;
        let cells = spike_cells(&snapshot);
        assert_eq!(cells.len(), 20);
        assert!(cells.iter().all(|(cell, _)| cell.x == 2));
    }

    #[test]
    fn test_starting_screen_shows_instructions() {
        let snapshot = GameWorld::with_seed(1).snapshot();
        let screen = draw(&snapshot);
        assert!(screen.contains("Score:"));
        assert!(screen.contains("Press any movement key to Start!"));
    }

    #[test]
    fn test_game_over_screen() {
        let mut world = GameWorld::with_seed(3);
        world.handle_command(Command::Steer(Direction::Up));
        for _ in 0..600 {
            world.update(0.05);
            if world.phase().kind() == PhaseKind::GameOver {
                break;
            }
        }
        world.update(1.0);
        world.update(0.1);

        let screen = draw(&world.snapshot());
        assert!(screen.contains("GAME OVER!"));
        assert!(screen.contains("Press SPACE to Restart"));
        assert!(screen.contains("You hit the wall"));
    }

    #[test]
    fn test_cleared_board_hides_collision_cause() {
        let mut snapshot = GameWorld::with_seed(1).snapshot();
        snapshot.phase = PhaseKind::GameOver;
        snapshot.show_instructions = false;
        snapshot.game_over_scale = 1.0;
        snapshot.board_cleared = true;
        snapshot.last_collision = Some(CollisionType::SelfCollision);

        let screen = draw(&snapshot);
        assert!(screen.contains("BOARD CLEARED!"));
        assert!(!screen.contains("You bit yourself"));
        assert!(!screen.contains("GAME OVER!"));
    }
}
