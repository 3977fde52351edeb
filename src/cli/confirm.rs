use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::warn;

use crate::cli::tui::Terminal;
use crate::game::Confirm;

/// Blocking yes/no modal drawn over the terminal.
pub struct TerminalConfirm<'a> {
    terminal: &'a mut Terminal,
}

impl<'a> TerminalConfirm<'a> {
    pub fn new(terminal: &'a mut Terminal) -> Self {
        Self { terminal }
    }

    fn ask(&mut self, message: &str) -> io::Result<bool> {
        loop {
            self.terminal.draw(|f| render_modal(f, message))?;
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                match key.code {
                    KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => return Ok(true),
                    KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}

impl Confirm for TerminalConfirm<'_> {
    fn confirm(&mut self, message: &str) -> bool {
        match self.ask(message) {
            Ok(answer) => answer,
            Err(err) => {
                warn!(error = %err, "Confirmation failed, treating as no");
                false
            }
        }
    }
}

fn render_modal(f: &mut Frame<'_>, message: &str) {
    let area = centered(f.size(), 50, 7);
    let lines = vec![
        Line::from(message.to_string()),
        Line::from(""),
        Line::from(vec![
            Span::styled("[y]", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            Span::raw(" Yes    "),
            Span::styled("[n]", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)),
            Span::raw(" No"),
        ]),
    ];
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Confirm")
        .title_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        );
    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

/// Rect of `percent_x` width and `height` rows, centered in `area`.
pub(crate) fn centered(area: Rect, percent_x: u16, height: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(height),
            Constraint::Min(0),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
