use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use ratatui::Frame;

use crate::game::{GameStatus, Snapshot};
use crate::geometry::{Bounds, Point};
use crate::ui::menu::{render_game_over_menu, render_play_again_menu};

/// Terminal columns used per grid cell; terminal cells are roughly twice as
/// tall as they are wide.
pub const COLUMNS_PER_CELL: u16 = 2;

const GLYPH_SNAKE_HEAD: &str = "██";
const GLYPH_SNAKE_BODY: &str = "▓▓";
const GLYPH_FOOD: &str = "●";

/// Renders the full game frame from a snapshot.
pub fn render(frame: &mut Frame<'_>, snapshot: &Snapshot) {
    let [hud_row, play_area] =
        Layout::vertical([Constraint::Length(1), Constraint::Min(0)]).areas(frame.area());

    render_hud(frame, hud_row, snapshot);

    let board = Block::bordered()
        .title(" snake ")
        .border_style(Style::new().fg(Color::Gray));
    let inner = board.inner(play_area);
    frame.render_widget(board, play_area);

    render_food(frame, inner, snapshot);
    render_snake(frame, inner, snapshot);

    match snapshot.status {
        GameStatus::GameOver => render_game_over_menu(frame, play_area, snapshot),
        GameStatus::AwaitingRestartChoice => render_play_again_menu(frame, play_area, snapshot),
        GameStatus::Playing | GameStatus::Quit => {}
    }
}

/// Terminal size needed to show the whole grid plus border and HUD.
#[must_use]
pub fn required_size(bounds: Bounds) -> (u16, u16) {
    let columns = u16::try_from(bounds.columns()).unwrap_or(u16::MAX);
    let rows = u16::try_from(bounds.rows()).unwrap_or(u16::MAX);
    (
        columns.saturating_mul(COLUMNS_PER_CELL).saturating_add(2),
        rows.saturating_add(3),
    )
}

fn render_hud(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let line = Line::from(vec![
        Span::styled(" Score: ", Style::new().fg(Color::DarkGray)),
        Span::styled(
            snapshot.score.to_string(),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ),
        Span::styled("   High score: ", Style::new().fg(Color::DarkGray)),
        Span::styled(snapshot.high_score.to_string(), Style::new().fg(Color::Yellow)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

fn render_food(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let Some((x, y)) = grid_to_terminal(inner, snapshot.bounds, snapshot.food) else {
        return;
    };

    frame
        .buffer_mut()
        .set_string(x, y, GLYPH_FOOD, Style::new().fg(Color::Red));
}

fn render_snake(frame: &mut Frame<'_>, inner: Rect, snapshot: &Snapshot) {
    let buffer = frame.buffer_mut();

    for (index, block) in snapshot.blocks.iter().enumerate() {
        // A head that left the grid is simply not drawn.
        let Some((x, y)) = grid_to_terminal(inner, snapshot.bounds, *block) else {
            continue;
        };

        let (glyph, style) = if index == 0 {
            (GLYPH_SNAKE_HEAD, Style::new().fg(Color::LightBlue))
        } else {
            (GLYPH_SNAKE_BODY, Style::new().fg(Color::Blue))
        };
        buffer.set_string(x, y, glyph, style);
    }
}

fn grid_to_terminal(inner: Rect, bounds: Bounds, point: Point) -> Option<(u16, u16)> {
    let (column, row) = bounds.cell_of(point)?;

    let x = inner
        .x
        .saturating_add(column.saturating_mul(COLUMNS_PER_CELL));
    let y = inner.y.saturating_add(row);
    if x.saturating_add(COLUMNS_PER_CELL) > inner.right() || y >= inner.bottom() {
        return None;
    }

    Some((x, y))
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;
    use ratatui::layout::Rect;
    use ratatui::Terminal;

    use crate::game::{GameStatus, Snapshot};
    use crate::geometry::{Bounds, Point};
    use crate::input::Direction;

    use super::{grid_to_terminal, render, required_size};

    fn snapshot(status: GameStatus) -> Snapshot {
        Snapshot {
            blocks: vec![Point::new(40, 20), Point::new(20, 20), Point::new(0, 20)],
            heading: Direction::Right,
            food: Point::new(100, 60),
            score: 10,
            high_score: 100,
            status,
            run_end: None,
            bounds: Bounds::new(200, 100, 20),
        }
    }

    fn rendered_text(status: GameStatus) -> String {
        let (width, height) = required_size(Bounds::new(200, 100, 20));
        let mut terminal =
            Terminal::new(TestBackend::new(width.max(40), height.max(14))).expect("test terminal");
        let snap = snapshot(status);
        terminal
            .draw(|frame| render(frame, &snap))
            .expect("drawing into a test backend succeeds");

        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn required_size_covers_border_and_hud() {
        assert_eq!(required_size(Bounds::new(640, 480, 20)), (66, 27));
    }

    #[test]
    fn grid_points_map_into_the_board() {
        let inner = Rect::new(1, 2, 20, 5);
        let bounds = Bounds::new(200, 100, 20);

        assert_eq!(grid_to_terminal(inner, bounds, Point::new(0, 0)), Some((1, 2)));
        assert_eq!(grid_to_terminal(inner, bounds, Point::new(40, 20)), Some((5, 3)));
        assert_eq!(grid_to_terminal(inner, bounds, Point::new(-20, 0)), None);
    }

    #[test]
    fn playing_frame_shows_scores_snake_and_food() {
        let text = rendered_text(GameStatus::Playing);

        assert!(text.contains("Score: 10"));
        assert!(text.contains("High score: 100"));
        assert!(text.contains('●'));
        assert!(text.contains('█'));
    }

    #[test]
    fn game_over_frame_shows_message() {
        let text = rendered_text(GameStatus::GameOver);
        assert!(text.contains("GAME OVER"));
    }

    #[test]
    fn restart_prompt_asks_to_play_again() {
        let text = rendered_text(GameStatus::AwaitingRestartChoice);
        assert!(text.contains("Play again?"));
    }
}
