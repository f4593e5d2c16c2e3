use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};
use ratatui::Frame;

use crate::collision::RunEnd;
use crate::game::Snapshot;

const POPUP_WIDTH: u16 = 30;

/// Draws the terminal "game over" message shown right after a fatal move.
pub fn render_game_over_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let lines = vec![
        Line::from("GAME OVER").style(
            Style::default()
                .fg(Color::Red)
                .add_modifier(Modifier::BOLD),
        ),
        Line::from(cause_text(snapshot.run_end)),
        Line::from(format!("Score: {}", snapshot.score)),
    ];

    render_popup(frame, area, " game over ", lines);
}

/// Draws the play-again prompt with the final score and the high score.
pub fn render_play_again_menu(frame: &mut Frame<'_>, area: Rect, snapshot: &Snapshot) {
    let is_new_high = snapshot.score > 0 && snapshot.score == snapshot.high_score;
    let lines = vec![
        Line::from(format!("Score: {}", snapshot.score)),
        Line::from(format!("High score: {}", snapshot.high_score)),
        Line::from(if is_new_high { "New high score!" } else { "" })
            .style(Style::default().fg(Color::Yellow)),
        Line::from("Play again?").style(Style::default().add_modifier(Modifier::BOLD)),
        Line::from("[Y] yes    [N] no"),
    ];

    render_popup(frame, area, " play again ", lines);
}

fn cause_text(run_end: Option<RunEnd>) -> &'static str {
    match run_end {
        Some(RunEnd::WallCollision) => "You hit the wall",
        Some(RunEnd::SelfCollision) => "You bit yourself",
        Some(RunEnd::BoardFilled) => "The board is full",
        None => "",
    }
}

fn render_popup(frame: &mut Frame<'_>, area: Rect, title: &str, lines: Vec<Line<'_>>) {
    let height = u16::try_from(lines.len()).unwrap_or(u16::MAX).saturating_add(2);
    let popup = centered_popup(area, POPUP_WIDTH, height);
    frame.render_widget(Clear, popup);

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::bordered().title(title)),
        popup,
    );
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [center] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);

    center
}
