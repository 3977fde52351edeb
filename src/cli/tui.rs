use std::io::{self, Stdout, stdout};
use std::time::Duration;

use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ratatui::Frame;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tracing::{debug, info};

use crate::cli::confirm::{TerminalConfirm, centered};
use crate::game::{GameController, RevealConfig, Snapshot, UiEvent};
use crate::types::{HintLevel, Role, View};

pub type Terminal = ratatui::Terminal<CrosstermBackend<Stdout>>;

/// Reveal distances in terminal rows.
pub const TERMINAL_REVEAL: RevealConfig = RevealConfig {
    threshold: 3.0,
    max_lift: 6.0,
};

pub struct TuiApp {
    controller: GameController,
    snapshot: Snapshot,
    selected_player: usize,
    name_input: Option<String>,
    card_area: Rect,
    show_help: bool,
    should_quit: bool,
}

impl TuiApp {
    pub fn new(controller: GameController) -> Self {
        let snapshot = controller.snapshot();
        Self {
            controller,
            snapshot,
            selected_player: 0,
            name_input: None,
            card_area: Rect::default(),
            show_help: false,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = stdout();
        execute!(stdout, EnableMouseCapture, EnableFocusChange)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        terminal.clear()?;
        info!("Terminal front end started");

        let result = self.event_loop(&mut terminal);

        // Always restore the terminal, even when the loop failed.
        let _ = terminal.clear();
        let _ = disable_raw_mode();
        let _ = execute!(
            terminal.backend_mut(),
            DisableMouseCapture,
            DisableFocusChange
        );
        let _ = terminal.show_cursor();

        result
    }

    fn event_loop(&mut self, terminal: &mut Terminal) -> io::Result<()> {
        while !self.should_quit {
            terminal.draw(|f| self.render(f))?;

            if !event::poll(Duration::from_millis(50))? {
                continue;
            }
            let ui_event = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse),
                Event::FocusLost => Some(UiEvent::PointerCancel),
                _ => None,
            };
            if let Some(ui_event) = ui_event {
                debug!(?ui_event, "Dispatching");
                let mut confirm = TerminalConfirm::new(terminal);
                self.snapshot = self.controller.dispatch(ui_event, &mut confirm);
                self.clamp_selection();
            }
        }
        Ok(())
    }

    fn clamp_selection(&mut self) {
        let len = self.snapshot.players.len();
        if self.selected_player >= len {
            self.selected_player = len.saturating_sub(1);
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<UiEvent> {
        if self.snapshot.view != View::Deal {
            return None;
        }
        let y = mouse.row as f32;
        let inside = self.card_area.x <= mouse.column
            && mouse.column < self.card_area.x + self.card_area.width
            && self.card_area.y <= mouse.row
            && mouse.row < self.card_area.y + self.card_area.height;
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) if inside => Some(UiEvent::PointerDown { y }),
            // Leaving the card ends the peek.
            MouseEventKind::Drag(MouseButton::Left) if !inside => Some(UiEvent::PointerCancel),
            MouseEventKind::Drag(MouseButton::Left) => Some(UiEvent::PointerMove { y }),
            MouseEventKind::Up(MouseButton::Left) => Some(UiEvent::PointerUp),
            _ => None,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Option<UiEvent> {
        if let Some(input) = self.name_input.as_mut() {
            match key.code {
                KeyCode::Char(c) => input.push(c),
                KeyCode::Backspace => {
                    input.pop();
                }
                KeyCode::Enter => {
                    let name = std::mem::take(input);
                    self.name_input = None;
                    return Some(UiEvent::AddPlayer(name));
                }
                KeyCode::Esc => self.name_input = None,
                _ => {}
            }
            return None;
        }

        match (self.snapshot.view, key.code) {
            (_, KeyCode::Char('q')) => {
                self.should_quit = true;
                None
            }
            (_, KeyCode::Char('h')) => {
                self.show_help = !self.show_help;
                None
            }
            (View::Menu, code) => self.handle_menu_key(code),
            (View::Deal, KeyCode::Enter | KeyCode::Char('n')) => Some(UiEvent::Next),
            (View::Start, KeyCode::Char('m') | KeyCode::Enter) => Some(UiEvent::BackToMenu),
            (View::Start, KeyCode::Char('r')) => Some(UiEvent::ReviewLastDeal),
            (View::Deal | View::Start, KeyCode::Esc) => Some(UiEvent::Exit),
            _ => None,
        }
    }

    fn handle_menu_key(&mut self, code: KeyCode) -> Option<UiEvent> {
        let selected = self.selected_player;
        let len = self.snapshot.players.len();
        match code {
            KeyCode::Char('a') => {
                self.name_input = Some(String::new());
                None
            }
            KeyCode::Up => {
                self.selected_player = selected.saturating_sub(1);
                None
            }
            KeyCode::Down => {
                if selected + 1 < len {
                    self.selected_player += 1;
                }
                None
            }
            KeyCode::Char('d') | KeyCode::Delete if len > 0 => {
                Some(UiEvent::RemovePlayer(selected))
            }
            KeyCode::Char('K') if selected > 0 => {
                self.selected_player -= 1;
                Some(UiEvent::ReorderPlayer {
                    from: selected,
                    to: selected - 1,
                })
            }
            KeyCode::Char('J') if selected + 1 < len => {
                self.selected_player += 1;
                Some(UiEvent::ReorderPlayer {
                    from: selected,
                    to: selected + 1,
                })
            }
            KeyCode::Char('+') | KeyCode::Right => Some(UiEvent::SetImpostorCount(
                self.snapshot.impostor_count + 1,
            )),
            KeyCode::Char('-') | KeyCode::Left => Some(UiEvent::SetImpostorCount(
                self.snapshot.impostor_count.saturating_sub(1),
            )),
            KeyCode::Char('t') => Some(UiEvent::SetHintsEnabled(!self.snapshot.hints_enabled)),
            KeyCode::Char(c @ '1'..='3') if self.snapshot.hints_enabled => {
                HintLevel::try_from(c as u8 - b'0')
                    .ok()
                    .map(UiEvent::SetHintLevel)
            }
            KeyCode::Enter => Some(UiEvent::StartGame),
            KeyCode::Char('r') => Some(UiEvent::ReviewLastDeal),
            _ => None,
        }
    }

    fn render(&mut self, f: &mut Frame<'_>) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Min(10),   // View
                Constraint::Length(3), // Error line
                Constraint::Length(3), // Help bar
            ])
            .split(f.size());

        match self.snapshot.view {
            View::Menu => self.render_menu(f, chunks[0]),
            View::Deal => self.render_deal(f, chunks[0]),
            View::Start => self.render_start(f, chunks[0]),
        }
        self.render_error(f, chunks[1]);
        self.render_status_bar(f, chunks[2]);

        if let Some(input) = &self.name_input {
            let area = centered(f.size(), 50, 3);
            let paragraph = Paragraph::new(format!("{input}_")).block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("New player (Enter to add, Esc to cancel)"),
            );
            f.render_widget(ratatui::widgets::Clear, area);
            f.render_widget(paragraph, area);
        }
    }

    fn render_menu(&self, f: &mut Frame<'_>, area: Rect) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(area);

        let items: Vec<ListItem<'_>> = self
            .snapshot
            .players
            .iter()
            .enumerate()
            .map(|(idx, name)| ListItem::new(format!("≡ {}. {}", idx + 1, name)))
            .collect();
        let status_style = if self.snapshot.roster_warning {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Players")
                    .title_bottom(Line::styled(
                        self.snapshot.roster_status.clone(),
                        status_style,
                    )),
            )
            .highlight_style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )
            .highlight_symbol("→ ");
        let mut state = ListState::default();
        if !self.snapshot.players.is_empty() {
            state.select(Some(self.selected_player));
        }
        f.render_stateful_widget(list, columns[0], &mut state);

        let on_off = |enabled: bool| if enabled { "on" } else { "off" };
        let hint_level_style = if self.snapshot.hints_enabled {
            Style::default().fg(Color::Cyan)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let mut lines = vec![
            Line::from(vec![
                Span::raw("Impostors: "),
                Span::styled(
                    self.snapshot.impostor_count.to_string(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(
                    format!("  ({})", self.snapshot.impostor_max_label),
                    Style::default().fg(Color::DarkGray),
                ),
            ]),
            Line::from(vec![
                Span::raw("Hints: "),
                Span::styled(
                    on_off(self.snapshot.hints_enabled),
                    Style::default().fg(Color::Cyan),
                ),
            ]),
            Line::from(vec![
                Span::raw("Hint level: "),
                Span::styled(self.snapshot.hint_level.to_string(), hint_level_style),
            ]),
        ];
        if self.snapshot.can_review {
            lines.push(Line::from(""));
            lines.push(Line::styled(
                "Press r to review the last deal",
                Style::default().fg(Color::Green),
            ));
        }
        let settings = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title("Settings"))
            .wrap(Wrap { trim: false });
        f.render_widget(settings, columns[1]);
    }

    fn render_deal(&mut self, f: &mut Frame<'_>, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Player and progress
                Constraint::Min(8),    // Reveal card
                Constraint::Length(3), // Next button
            ])
            .split(area);

        let name = self.snapshot.current_player_name.clone().unwrap_or_default();
        let progress = self.snapshot.progress.clone().unwrap_or_default();
        let header = Paragraph::new(Line::from(vec![
            Span::styled(
                name,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   "),
            Span::styled(progress, Style::default().fg(Color::Cyan)),
        ]))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).title("Turn"));
        f.render_widget(header, chunks[0]);

        self.card_area = chunks[1];
        // The card's top edge rises with the lift, one row per unit.
        let max_lift = TERMINAL_REVEAL.max_lift as u16;
        let lift = (self.snapshot.lift_pixels.round() as u16).min(max_lift);
        let offset = (max_lift - lift).min(chunks[1].height.saturating_sub(3));
        let card = Rect {
            y: chunks[1].y + offset,
            height: chunks[1].height - offset,
            ..chunks[1]
        };

        let lines = if self.snapshot.revealed {
            let (label, color) = match self.snapshot.role_label {
                Some(Role::Impostor) => ("Impostor", Color::Red),
                _ => ("Civilian", Color::Green),
            };
            let mut lines = vec![
                Line::from(""),
                Line::styled(label, Style::default().fg(color).add_modifier(Modifier::BOLD)),
            ];
            if let Some(text) = &self.snapshot.hint_text {
                lines.push(Line::from(""));
                lines.push(Line::styled(text.clone(), Style::default().fg(Color::White)));
            }
            lines
        } else {
            vec![
                Line::from(""),
                Line::styled(
                    "Hold the mouse button and drag up to peek",
                    Style::default().fg(Color::DarkGray),
                ),
            ]
        };
        let card_widget = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(Block::default().borders(Borders::ALL).title("Your role"));
        f.render_widget(card_widget, card);

        let next_label = if self.snapshot.is_last_turn {
            "Enter: Start game"
        } else {
            "Enter: Next player"
        };
        let next = Paragraph::new(next_label)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(next, chunks[2]);
    }

    fn render_start(&self, f: &mut Frame<'_>, area: Rect) {
        let starter = self.snapshot.starter_name.clone().unwrap_or_default();
        let lines = vec![
            Line::from(""),
            Line::from("First to speak:"),
            Line::from(""),
            Line::styled(
                starter,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        ];
        let paragraph = Paragraph::new(lines)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Game on"));
        f.render_widget(paragraph, area);
    }

    fn render_error(&self, f: &mut Frame<'_>, area: Rect) {
        let Some(error) = &self.snapshot.error else {
            return;
        };
        let paragraph = Paragraph::new(error.as_str())
            .style(Style::default().fg(Color::Red))
            .block(Block::default().borders(Borders::ALL).title("Error"));
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame<'_>, area: Rect) {
        let help_text = match (self.snapshot.view, self.show_help) {
            (View::Menu, true) => {
                "a: Add | d: Remove | ↑/↓: Select | K/J: Move | +/-: Impostors | t: Hints | 1-3: Level | Enter: Start | r: Review | q: Quit"
            }
            (View::Deal, true) => "Drag up on the card to peek | Enter: Next | Esc: Exit | q: Quit",
            (View::Start, true) => "m/Enter: Menu | r: Review deal | Esc: Exit | q: Quit",
            (_, false) => "Press 'h' for help",
        };
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL))
            .style(Style::default().fg(Color::White))
            .alignment(Alignment::Center);
        f.render_widget(paragraph, area);
    }
}
