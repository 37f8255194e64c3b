use rand::Rng;
use ratatui::{
    Frame,
    buffer::Buffer,
    layout::{Alignment, Position, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::entities::{Enemy, GamePhase, Player, Projectile};

/// View struct that holds everything needed to draw one frame.
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub paused: bool,
    pub player: &'a Player,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
    pub status: String,
    pub view_width: f32,
    pub view_height: f32,
    pub frame_count: u64,
    pub area: Rect,
}

/// Maps world-space rectangles onto terminal cells.
struct CellMap {
    area: Rect,
    sx: f32,
    sy: f32,
}

impl CellMap {
    fn new(area: Rect, view_width: f32, view_height: f32) -> Self {
        Self {
            area,
            sx: f32::from(area.width) / view_width,
            sy: f32::from(area.height) / view_height,
        }
    }

    /// Clipped cell rectangle for a world rectangle; `None` when nothing of
    /// it lands inside the drawing area.
    fn project(&self, x: f32, y: f32, width: f32, height: f32) -> Option<Rect> {
        let x0 = ((x * self.sx).floor() as i32).max(0);
        let y0 = ((y * self.sy).floor() as i32).max(0);
        let x1 = (((x + width) * self.sx).ceil() as i32).min(i32::from(self.area.width));
        let y1 = (((y + height) * self.sy).ceil() as i32).min(i32::from(self.area.height));
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some(Rect {
            x: self.area.x + x0 as u16,
            y: self.area.y + y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

fn fill(buffer: &mut Buffer, cells: Rect, color: Color) {
    for y in cells.top()..cells.bottom() {
        for x in cells.left()..cells.right() {
            if let Some(cell) = buffer.cell_mut(Position::new(x, y)) {
                cell.set_char(' ').set_bg(color);
            }
        }
    }
}

/// Handles all rendering responsibilities for the game.
pub struct GameRenderer {}

impl GameRenderer {
    pub fn new() -> Self {
        Self {}
    }

    /// Draws the playfield, then whichever overlay the shell state asks for.
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if view.phase.is_terminal() {
            self.render_terminal_overlay(frame, view);
        } else if view.paused {
            self.render_paused(frame, view);
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let map = CellMap::new(area, view.view_width, view.view_height);

        // Flickering starfield background.
        if view.frame_count % 10 < 5 {
            let star_text = (0..area.height)
                .map(|_| {
                    let mut rng = rand::rng();
                    if rng.random_bool(0.05) { "." } else { " " }
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(Color::DarkGray)),
                area,
            );
        }

        let buffer = frame.buffer_mut();

        for bullet in view.projectiles {
            if let Some(cells) = map.project(bullet.x, bullet.y, bullet.width, bullet.height) {
                fill(buffer, cells, Color::Yellow);
            }
        }

        // Three-layer nested-rectangle alien sprite.
        for enemy in view.enemies {
            if let Some(cells) = map.project(enemy.x, enemy.y, enemy.width, enemy.height) {
                fill(buffer, cells, Color::LightMagenta);
            }
            if let Some(cells) = map.project(
                enemy.x + 6.0,
                enemy.y + 6.0,
                enemy.width - 12.0,
                enemy.height - 12.0,
            ) {
                fill(buffer, cells, Color::Black);
            }
            if let Some(cells) = map.project(
                enemy.x + 10.0,
                enemy.y + 14.0,
                enemy.width - 20.0,
                enemy.height - 22.0,
            ) {
                fill(buffer, cells, Color::LightMagenta);
            }
        }

        // Hull plus a small turret on top.
        let player = view.player;
        if let Some(cells) = map.project(player.x, player.y, player.width, player.height) {
            fill(buffer, cells, Color::Cyan);
        }
        if let Some(cells) = map.project(
            player.x + player.width / 2.0 - 6.0,
            player.y - 12.0,
            12.0,
            12.0,
        ) {
            fill(buffer, cells, Color::Cyan);
        }

        // Status line at the top.
        let status = Line::from(Span::styled(
            view.status.clone(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ));
        let status_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(status), status_area);

        // Controls hint at bottom.
        let controls = Line::from(vec![Span::styled(
            "[A D/Arrows: Move] [Space: Fire] [P: Pause] [R: Restart] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Renders the pause overlay on top of the frozen playfield.
    fn render_paused(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let pause_text = vec![
            Line::from(""),
            Line::from("PAUSED").centered().bold().yellow(),
            Line::from(""),
            Line::from("Press P to resume").centered().white(),
        ];

        let pause_area = Rect {
            x: (area.width / 2).saturating_sub(15),
            y: (area.height / 2).saturating_sub(3),
            width: area.width.min(30),
            height: area.height.min(6),
        };

        frame.render_widget(
            Paragraph::new(pause_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Yellow)),
                )
                .alignment(Alignment::Center),
            pause_area,
        );
    }

    /// Dims the playfield and announces the outcome.
    fn render_terminal_overlay(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        frame
            .buffer_mut()
            .set_style(area, Style::default().add_modifier(Modifier::DIM));

        let (title, color) = match view.phase {
            GamePhase::Won => ("YOU WIN", Color::Green),
            _ => ("GAME OVER", Color::Red),
        };
        let overlay_text = vec![
            Line::from(""),
            Line::from(title).centered().fg(color).bold(),
            Line::from(""),
            Line::from("Press R to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let overlay_area = Rect {
            x: (area.width / 2).saturating_sub(17),
            y: (area.height / 2).saturating_sub(3),
            width: area.width.min(34),
            height: area.height.min(7),
        };

        frame.render_widget(
            Paragraph::new(overlay_text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(color)),
                )
                .alignment(Alignment::Center),
            overlay_area,
        );
    }
}
