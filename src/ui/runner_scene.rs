//! Runner play field rendering.
//!
//! Uses a cell buffer: the ground, obstacle and player are drawn into a 2D
//! grid scaled from field units, then stamped row-by-row as Paragraph
//! widgets.

use super::palette::Palette;
use crate::config::RunnerConfig;
use crate::runner::collision::Aabb;
use crate::runner::types::{GameMode, RunnerSnapshot};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const GROUND_CHAR: char = '▓';
const PLAYER_CHAR: char = '█';
const OBSTACLE_CHAR: char = '▒';

#[derive(Clone, Copy)]
struct Cell {
    ch: char,
    fg: Color,
    bg: Color,
}

/// Render the whole runner screen: bordered field plus a two-line status bar.
pub fn render_runner_scene(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RunnerSnapshot,
    config: &RunnerConfig,
    palette: &Palette,
) {
    frame.render_widget(Clear, area);

    let block = Block::default()
        .title(" Sleep Runner ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(palette.border));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(4), Constraint::Length(2)])
        .split(inner);

    render_play_field(frame, chunks[0], snapshot, config, palette);
    render_status_bar(frame, chunks[1], snapshot, palette);
}

/// Hint shown under the field for each mode.
pub fn status_hint(mode: GameMode) -> &'static str {
    match mode {
        GameMode::Ready => "[Enter] Start   [t] Theme   [q] Quit",
        GameMode::Running => "[Space] Jump   [t] Theme   [q] Quit",
        GameMode::Over => "You crashed!  [Enter] Try again   [q] Quit",
    }
}

fn render_status_bar(frame: &mut Frame, area: Rect, snapshot: &RunnerSnapshot, palette: &Palette) {
    let text_style = Style::default().fg(palette.text);
    let score_line = Line::from(vec![
        Span::styled("Score: ", text_style),
        Span::styled(
            snapshot.score.to_string(),
            text_style.add_modifier(Modifier::BOLD),
        ),
        Span::styled("   Best: ", text_style),
        Span::styled(
            snapshot.high_score.to_string(),
            text_style.add_modifier(Modifier::BOLD),
        ),
    ]);
    let hint_line = Line::from(Span::styled(
        status_hint(snapshot.mode),
        Style::default().fg(Color::DarkGray),
    ));
    frame.render_widget(Paragraph::new(vec![score_line, hint_line]), area);
}

/// Map a field-space box to the cell rectangle it covers, as
/// `(col_start, col_end, row_start, row_end)` with exclusive ends.
fn box_to_cells(
    aabb: &Aabb,
    config: &RunnerConfig,
    width: usize,
    height: usize,
) -> (usize, usize, usize, usize) {
    let x_scale = width as f64 / config.field_width;
    let y_scale = height as f64 / config.field_height;

    let to_col = |x: f64| (x * x_scale).round().clamp(0.0, width as f64) as usize;
    // Row 0 is the top of the field
    let to_row = |y: f64| ((config.field_height - y) * y_scale).round().clamp(0.0, height as f64) as usize;

    let col_start = to_col(aabb.left);
    let col_end = to_col(aabb.right).max(col_start + 1).min(width);
    let row_start = to_row(aabb.top);
    let row_end = to_row(aabb.bottom).max(row_start + 1).min(height);
    (col_start, col_end, row_start, row_end)
}

fn fill(buffer: &mut [Vec<Cell>], cells: (usize, usize, usize, usize), cell: Cell) {
    let (col_start, col_end, row_start, row_end) = cells;
    for row in buffer.iter_mut().take(row_end).skip(row_start) {
        for slot in row.iter_mut().take(col_end).skip(col_start) {
            *slot = cell;
        }
    }
}

fn render_play_field(
    frame: &mut Frame,
    area: Rect,
    snapshot: &RunnerSnapshot,
    config: &RunnerConfig,
    palette: &Palette,
) {
    let width = area.width as usize;
    let height = area.height as usize;
    if width < 4 || height < 2 {
        return;
    }

    let background = Cell {
        ch: ' ',
        fg: palette.text,
        bg: palette.field,
    };
    let mut buffer = vec![vec![background; width]; height];

    // ── Ground ────────────────────────────────────────────────────────
    let ground = Aabb::new(0.0, 0.0, config.field_width, config.ground_level);
    fill(
        &mut buffer,
        box_to_cells(&ground, config, width, height),
        Cell {
            ch: GROUND_CHAR,
            fg: palette.ground,
            bg: palette.field,
        },
    );

    let geometry = config.geometry();

    // ── Obstacle (hidden until a run starts) ──────────────────────────
    let obstacle = geometry.obstacle_box(snapshot.obstacle_offset);
    let on_field = obstacle.right > 0.0 && obstacle.left < config.field_width;
    if snapshot.mode != GameMode::Ready && on_field {
        fill(
            &mut buffer,
            box_to_cells(&obstacle, config, width, height),
            Cell {
                ch: OBSTACLE_CHAR,
                fg: palette.obstacle,
                bg: palette.field,
            },
        );
    }

    // ── Player ────────────────────────────────────────────────────────
    let player = geometry.player_box(snapshot.player_offset);
    fill(
        &mut buffer,
        box_to_cells(&player, config, width, height),
        Cell {
            ch: PLAYER_CHAR,
            fg: palette.player,
            bg: palette.field,
        },
    );

    // ── Stamp rows ────────────────────────────────────────────────────
    for (row_idx, row) in buffer.iter().enumerate() {
        let mut spans: Vec<Span> = Vec::new();
        let mut current: Option<(Color, Color)> = None;
        let mut text = String::new();

        for cell in row {
            if current != Some((cell.fg, cell.bg)) {
                if let Some((fg, bg)) = current {
                    spans.push(Span::styled(
                        std::mem::take(&mut text),
                        Style::default().fg(fg).bg(bg),
                    ));
                }
                current = Some((cell.fg, cell.bg));
            }
            text.push(cell.ch);
        }
        if let Some((fg, bg)) = current {
            spans.push(Span::styled(text, Style::default().fg(fg).bg(bg)));
        }

        let row_area = Rect::new(area.x, area.y + row_idx as u16, area.width, 1);
        frame.render_widget(Paragraph::new(Line::from(spans)), row_area);
    }
}
