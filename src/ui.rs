//! Terminal UI rendering with ratatui

use crate::board::{Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::game::GameState;
use crate::settings::Settings;
use crate::tetromino::Shape;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

const EMPTY: &str = "  ";

/// Total width needed: hold(12) + board(22) + next/stats(16) = 50
const GAME_WIDTH: u16 = 50;
/// Total height needed: the next-queue column outweighs the board
const GAME_HEIGHT: u16 = 26;

/// Render the entire game UI
pub fn render_game(frame: &mut Frame, state: &GameState, settings: &Settings) {
    let area = frame.area();
    let game_area = center_rect(area, GAME_WIDTH, GAME_HEIGHT);

    // hold | board | next + stats
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(12),
            Constraint::Length(22), // 10 cells * 2 chars + borders
            Constraint::Length(16),
        ])
        .split(game_area);

    render_hold(frame, columns[0], state, settings);
    render_board(frame, columns[1], state, settings);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(17), Constraint::Min(8)])
        .split(columns[2]);
    render_next_queue(frame, right[0], state, settings);
    render_stats(frame, right[1], state);

    if state.game_over {
        render_overlay(frame, area, "GAME OVER", "R restart · Q quit");
    } else if state.paused {
        render_overlay(frame, area, "PAUSED", "Press P to play");
    }
}

/// A bordered side panel with a centered title
fn panel(title: &'static str) -> Block<'static> {
    Block::default()
        .title(title)
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray))
}

/// Center a rect within another rect
fn center_rect(area: Rect, width: u16, height: u16) -> Rect {
    let x = area.x + area.width.saturating_sub(width) / 2;
    let y = area.y + area.height.saturating_sub(height) / 2;
    Rect {
        x,
        y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

/// Render the hold piece box
fn render_hold(frame: &mut Frame, area: Rect, state: &GameState, settings: &Settings) {
    let block = panel(" HOLD ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if let Some(held) = &state.held {
        // Held pieces keep their rotation, so draw the live shape;
        // dim it while hold is spent for this piece
        let mut style = Style::default().fg(held.kind.color());
        if !state.can_hold {
            style = style.dim();
        }
        render_mini_shape(frame, inner, &held.shape, style, settings);
    }
}

/// Render the next piece queue, top of the queue first
fn render_next_queue(frame: &mut Frame, area: Rect, state: &GameState, settings: &Settings) {
    let block = panel(" NEXT ");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let slots = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Length(3); state.queue.len()])
        .split(inner);

    for (slot, &kind) in slots.iter().zip(&state.queue) {
        let style = Style::default().fg(kind.color());
        render_mini_shape(frame, *slot, &kind.shape(), style, settings);
    }
}

/// Render a small shape preview (for hold and next queue)
fn render_mini_shape(frame: &mut Frame, area: Rect, shape: &Shape, style: Style, settings: &Settings) {
    if area.height < 1 || area.width < 4 {
        return;
    }
    let (block_char, _) = settings.visual.block_chars();

    // Tight vertical bounds of the occupied cells
    let occupied_rows: Vec<usize> = shape
        .iter()
        .enumerate()
        .filter_map(|(y, row)| row.iter().any(|&cell| cell != 0).then_some(y))
        .collect();
    let (Some(&first), Some(&last)) = (occupied_rows.first(), occupied_rows.last()) else {
        return;
    };
    let min_x = shape
        .iter()
        .flat_map(|row| row.iter().enumerate())
        .filter_map(|(x, &cell)| (cell != 0).then_some(x))
        .min()
        .unwrap_or(0);

    let mut lines = Vec::new();
    for y in first..=last {
        let spans: Vec<Span> = (min_x..min_x + 4)
            .map(|x| {
                let filled = shape
                    .get(y)
                    .and_then(|row| row.get(x))
                    .is_some_and(|&cell| cell != 0);
                if filled {
                    Span::styled(block_char, style)
                } else {
                    Span::raw(EMPTY)
                }
            })
            .collect();
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), area);
}

/// Render the game board
fn render_board(frame: &mut Frame, area: Rect, state: &GameState, settings: &Settings) {
    let (block_char, ghost_char) = settings.visual.block_chars();

    let block = Block::default()
        .title(" BLOCKFALL ")
        .title_alignment(Alignment::Center)
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::White));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    // The landing preview goes into a display copy, never the real board
    let display = if settings.visual.show_ghost && !state.game_over {
        state.board.with_ghost(&state.current.dropped(&state.board))
    } else {
        state.board.clone()
    };
    let current_cells: Vec<(i32, i32)> = state.current.cells().collect();
    let current_color = state.current.kind.color();

    let mut lines: Vec<Line> = Vec::new();
    for y in 0..BOARD_HEIGHT as i32 {
        let mut spans = Vec::new();
        for x in 0..BOARD_WIDTH as i32 {
            let (text, style) = if current_cells.contains(&(x, y)) {
                (block_char, Style::default().fg(current_color))
            } else {
                match display.get(x, y) {
                    Some(Cell::Locked(kind)) => (block_char, Style::default().fg(kind.color())),
                    Some(Cell::Ghost) => (ghost_char, Style::default().fg(current_color).dim()),
                    _ => (EMPTY, Style::default()),
                }
            };
            spans.push(Span::styled(text, style));
        }
        lines.push(Line::from(spans));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render the score / level / lines panel
fn render_stats(frame: &mut Frame, area: Rect, state: &GameState) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Gray));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = [
        ("SCORE", state.score.points.to_string(), Color::Yellow),
        ("LEVEL", state.score.level.to_string(), Color::Cyan),
        ("LINES", state.score.lines.to_string(), Color::Green),
    ];
    let mut lines = Vec::new();
    for (label, value, color) in rows {
        lines.push(Line::from(Span::styled(
            label,
            Style::default().fg(Color::Gray),
        )));
        lines.push(Line::from(Span::styled(
            value,
            Style::default().fg(color).bold(),
        )));
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

/// Render an overlay popup (for pause/game over)
fn render_overlay(frame: &mut Frame, area: Rect, title: &'static str, subtitle: &'static str) {
    let popup_area = center_rect(area, 26, 5);
    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Yellow))
        .style(Style::default().bg(Color::Black));
    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let lines = vec![
        Line::styled(title, Style::default().fg(Color::Yellow).bold()),
        Line::raw(""),
        Line::styled(subtitle, Style::default().fg(Color::Gray)),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        inner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_rect_clamps_to_area() {
        let area = Rect::new(0, 0, 20, 10);
        let centered = center_rect(area, 50, 26);
        assert_eq!(centered.width, 20);
        assert_eq!(centered.height, 10);
    }

    #[test]
    fn test_center_rect_centers() {
        let area = Rect::new(0, 0, 100, 40);
        let centered = center_rect(area, 50, 26);
        assert_eq!(centered.x, 25);
        assert_eq!(centered.y, 7);
    }
}
