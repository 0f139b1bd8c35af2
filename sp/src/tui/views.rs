//! TUI views and rendering
//!
//! All rendering logic is contained here. Views read TuiState and never
//! modify it.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};
use tracing::trace;

use super::state::TuiState;
use crate::controller::{AppState, ViewMode};
use crate::curriculum::{FIRST_DAY, LAST_DAY, PHASES, resolve};
use crate::generation::{Session, SessionType};

mod colors {
    use ratatui::style::Color;

    pub const ACCENT: Color = Color::Rgb(250, 204, 21); // Yellow 400
    pub const THEORY: Color = Color::Rgb(96, 165, 250); // Blue 400
    pub const APPLICATION: Color = Color::Rgb(74, 222, 128); // Green 400
    pub const FAILED: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const SUBJECT: Color = Color::Rgb(37, 99, 235); // Blue 600
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const SELECTED_BG: Color = Color::Rgb(40, 40, 40);
    pub const DIM: Color = Color::DarkGray;
}

const SPINNER: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Below this width the sidebar only shows when toggled open
const SIDEBAR_MIN_TOTAL_WIDTH: u16 = 90;
const SIDEBAR_WIDTH: u16 = 32;

const FEATURES: &[(&str, &str)] = &[
    ("Concise Modules", "Exam-oriented content without the fluff."),
    ("Session Boxes", "4 distinct sessions for structured study."),
    ("PYQ Focused", "Includes solutions to recent JE papers."),
];

/// Main render function
pub fn render(state: &TuiState, frame: &mut Frame) {
    let app = state.controller.state();
    trace!(view = ?app.view_mode, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Min(0),    // Main content
            Constraint::Length(3), // Footer
        ])
        .split(frame.area());

    render_header(state, frame, chunks[0]);

    match app.view_mode {
        ViewMode::Home => render_home(frame, chunks[1]),
        ViewMode::Plan => render_plan(state, frame, chunks[1]),
        ViewMode::Content => render_content(state, frame, chunks[1]),
    }

    render_footer(state, frame, chunks[2]);

    if state.show_help {
        render_help_overlay(frame, frame.area());
    }
}

fn render_header(state: &TuiState, frame: &mut Frame, area: Rect) {
    trace!("render_header: called");
    let app = state.controller.state();
    let mut spans = vec![
        Span::raw(" "),
        Span::styled("▲", Style::default().fg(colors::ACCENT)),
        Span::styled(" SSC JE ", Style::default().add_modifier(Modifier::BOLD)),
        Span::styled(
            "ARCHITECT",
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" │ "),
    ];

    let crumbs: Vec<(String, bool)> = match app.view_mode {
        ViewMode::Home => vec![("Home".to_string(), true)],
        ViewMode::Plan => vec![("Home".to_string(), false), ("360-Day Master Plan".to_string(), true)],
        ViewMode::Content => vec![
            ("Home".to_string(), false),
            ("Plan".to_string(), false),
            (format!("Day {}", app.selected_day), true),
        ],
    };
    for (idx, (name, active)) in crumbs.into_iter().enumerate() {
        if idx > 0 {
            spans.push(Span::styled(" › ", Style::default().fg(colors::DIM)));
        }
        let style = if active {
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::DIM)
        };
        spans.push(Span::styled(name, style));
    }

    let header = Paragraph::new(Line::from(spans)).block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, area);
}

fn render_home(frame: &mut Frame, area: Rect) {
    trace!("render_home: called");
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(7), // Title block
            Constraint::Length(6), // Feature cards
            Constraint::Length(3), // Call to action
            Constraint::Min(0),
        ])
        .split(area);

    let title = vec![
        Line::from(Span::styled(
            "⛑ CIVIL ENGINEERING PBL",
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("SSC JE ", Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                "ARCHITECT",
                Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "Optimized, fast, and token-efficient. Master the SSC JE syllabus",
            Style::default().fg(colors::DIM),
        )),
        Line::from(Span::styled(
            "through the construction of an imaginary city.",
            Style::default().fg(colors::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(title).alignment(Alignment::Center), rows[1]);

    let cards_area = centered_columns(rows[2], 90);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 3), Constraint::Ratio(1, 3), Constraint::Ratio(1, 3)])
        .split(cards_area);
    for ((title, text), card_area) in FEATURES.iter().zip(cards.iter()) {
        let card = Paragraph::new(vec![
            Line::from(Span::styled(*title, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(Span::styled(*text, Style::default().fg(colors::DIM))),
        ])
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL));
        frame.render_widget(card, *card_area);
    }

    let cta = Paragraph::new(Line::from(vec![
        Span::styled("[Enter]", Style::default().fg(colors::KEYBIND)),
        Span::styled(
            " GET STARTED →",
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(colors::DIM)));
    frame.render_widget(cta, rows[3]);
}

/// All plan rows, plus the index of the row holding `cursor`
fn plan_lines(cursor: u32, width: u16) -> (Vec<Line<'static>>, usize) {
    trace!(%cursor, "plan_lines: called");
    let mut lines = Vec::new();
    let mut cursor_line = 0;

    for phase in PHASES {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        let range = format!("DAYS {} — {}", phase.start_day, phase.end_day);
        let pad = (width as usize).saturating_sub(phase.name.chars().count() + range.chars().count() + 2);
        lines.push(Line::from(vec![
            Span::styled(
                format!(" {}", phase.name.to_uppercase()),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(" ".repeat(pad)),
            Span::styled(range, Style::default().fg(colors::DIM).add_modifier(Modifier::BOLD)),
        ]));
        lines.push(Line::from(Span::styled(
            format!(" {}", phase.description),
            Style::default().fg(colors::DIM),
        )));

        for day in phase.days() {
            let slot = resolve(day as i64);
            let selected = day == cursor;
            if selected {
                cursor_line = lines.len();
            }
            let marker = if selected { "▶" } else { " " };
            let mut line = Line::from(vec![
                Span::styled(format!(" {} ", marker), Style::default().fg(colors::ACCENT)),
                Span::styled(
                    format!("DAY {:<4}", day),
                    Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
                ),
                Span::styled(format!("{:<26}", slot.subject), Style::default().fg(colors::SUBJECT)),
                Span::raw(slot.topic),
            ]);
            if selected {
                line = line.style(Style::default().bg(colors::SELECTED_BG));
            }
            lines.push(line);
        }
    }

    (lines, cursor_line)
}

fn render_plan(state: &TuiState, frame: &mut Frame, area: Rect) {
    trace!(cursor = state.plan_cursor, "render_plan: called");
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 360-Day Master Plan ")
        .title_style(Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD));
    let inner = block.inner(area);

    let (lines, cursor_line) = plan_lines(state.plan_cursor, inner.width);
    // keep the cursor a third of the way down
    let offset = cursor_line.saturating_sub(inner.height as usize / 3);
    let plan = Paragraph::new(lines)
        .block(block)
        .scroll((offset.min(u16::MAX as usize) as u16, 0));
    frame.render_widget(plan, area);
}

fn render_content(state: &TuiState, frame: &mut Frame, area: Rect) {
    let app = state.controller.state();
    trace!(day = app.selected_day, "render_content: called");

    let show_sidebar = app.sidebar_open || area.width >= SIDEBAR_MIN_TOTAL_WIDTH;
    let main_area = if show_sidebar {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(SIDEBAR_WIDTH), Constraint::Min(0)])
            .split(area);
        render_sidebar(app, frame, cols[0]);
        cols[1]
    } else {
        area
    };

    let slot = state.controller.slot();
    let mut title = vec![Span::styled(
        format!(" Day {}: {} ", app.selected_day, slot.topic),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    if app.has_sessions() && !app.is_generating {
        title.push(Span::styled(
            "[s] Download Source ",
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        ));
    }
    let block = Block::default().borders(Borders::ALL).title(Line::from(title));
    let inner = block.inner(main_area);
    frame.render_widget(block, main_area);

    if app.is_generating {
        render_generating(state, frame, inner);
    } else if let Some(error) = &app.error {
        render_error(error, frame, inner);
    } else if let Some(sessions) = app.sessions.as_ref().filter(|s| !s.is_empty()) {
        let sessions = Paragraph::new(session_lines(sessions))
            .wrap(Wrap { trim: false })
            .scroll((state.content_scroll, 0));
        frame.render_widget(sessions, inner);
    } else {
        render_empty(app.selected_day, frame, inner);
    }
}

fn render_sidebar(app: &AppState, frame: &mut Frame, area: Rect) {
    trace!("render_sidebar: called");
    let slot = resolve(app.selected_day as i64);
    let arrow = |enabled: bool, glyph: &'static str| {
        let style = if enabled {
            Style::default().fg(colors::KEYBIND)
        } else {
            Style::default().fg(colors::DIM)
        };
        Span::styled(glyph, style)
    };

    let generate = if app.is_generating {
        Span::styled(" Generating... ", Style::default().fg(colors::DIM))
    } else {
        Span::styled(
            " [Enter] GENERATE MODULE ",
            Style::default()
                .fg(Color::Black)
                .bg(colors::ACCENT)
                .add_modifier(Modifier::BOLD),
        )
    };

    let lines = vec![
        Line::from(vec![
            Span::styled("[Esc]", Style::default().fg(colors::KEYBIND)),
            Span::styled(" ← Back to Plan", Style::default().fg(colors::DIM)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "DAY SELECTION",
            Style::default().fg(colors::DIM).add_modifier(Modifier::BOLD),
        )),
        Line::from(vec![
            arrow(app.selected_day > FIRST_DAY, " ◀ [ "),
            Span::styled(
                format!(" Day {} ", app.selected_day),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            arrow(app.selected_day < LAST_DAY, " ] ▶"),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            slot.subject.to_uppercase(),
            Style::default().fg(colors::SUBJECT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(slot.topic, Style::default().add_modifier(Modifier::BOLD))),
        Line::from(Span::styled(slot.phase.name, Style::default().fg(colors::DIM))),
        Line::from(""),
        Line::from(generate),
    ];

    let sidebar = Paragraph::new(lines).wrap(Wrap { trim: true }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" SSC JE PBL ")
            .title_style(Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD)),
    );
    frame.render_widget(sidebar, area);
}

fn render_generating(state: &TuiState, frame: &mut Frame, area: Rect) {
    let elapsed = state.generation_elapsed();
    let spin = state
        .generation_start
        .map(|t| (t.elapsed().as_millis() / 100) as usize % SPINNER.len())
        .unwrap_or(0);
    trace!(%elapsed, "render_generating: called");

    let lines = vec![
        Line::from(Span::styled(
            format!("{} {}... ({}s)", SPINNER[spin], state.building_word, elapsed),
            Style::default().fg(colors::ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "ARCHITECTING STUDY MODULE",
            Style::default().add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
        Line::from(Span::styled(
            "Token-efficient analysis...",
            Style::default().fg(colors::DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertical_center(area, 4),
    );
}

fn render_error(error: &str, frame: &mut Frame, area: Rect) {
    trace!("render_error: called");
    let panel_area = centered_rect(70, 50, area);
    let lines = vec![
        Line::from(Span::styled(
            "Synthesis Failed",
            Style::default().fg(colors::FAILED).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::raw(error.to_string())),
        Line::from(""),
        Line::from(vec![
            Span::styled("[r]", Style::default().fg(colors::KEYBIND)),
            Span::styled(" Retry", Style::default().add_modifier(Modifier::BOLD)),
        ]),
    ];
    let panel = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::FAILED)),
        );
    frame.render_widget(panel, panel_area);
}

fn render_empty(day: u32, frame: &mut Frame, area: Rect) {
    trace!(%day, "render_empty: called");
    let lines = vec![
        Line::from(Span::styled(
            format!("READY TO SYNTHESIZE DAY {}", day),
            Style::default().fg(colors::DIM).add_modifier(Modifier::BOLD | Modifier::ITALIC),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press Enter to generate the project-based study module.",
            Style::default().fg(colors::DIM),
        )),
    ];
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        vertical_center(area, 3),
    );
}

/// Session cards as lines: a numbered header, then the markdown body
fn session_lines(sessions: &[Session]) -> Vec<Line<'_>> {
    trace!(count = sessions.len(), "session_lines: called");
    let mut lines = Vec::new();
    for (idx, session) in sessions.iter().enumerate() {
        let color = match session.session_type {
            SessionType::Theory => colors::THEORY,
            SessionType::Application => colors::APPLICATION,
        };
        lines.push(Line::from(vec![
            Span::styled(format!(" {:02} ", idx + 1), Style::default().fg(colors::DIM)),
            Span::styled(
                session.title.to_uppercase(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("  "),
            Span::styled(
                format!("[{}]", session.session_type.as_str().to_uppercase()),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(Span::styled(
            "─".repeat(40),
            Style::default().fg(colors::DIM),
        )));

        let markdown = tui_markdown::from_str(&session.content);
        for line in markdown.lines.iter() {
            let mut spans = vec![Span::raw("  ")];
            spans.extend(line.spans.iter().cloned());
            lines.push(Line::from(spans));
        }
        lines.push(Line::from(""));
    }
    lines
}

fn render_footer(state: &TuiState, frame: &mut Frame, area: Rect) {
    trace!("render_footer: called");
    let app = state.controller.state();
    let content = if let Some(ref msg) = state.status_message {
        Line::from(Span::styled(format!(" {}", msg), Style::default().fg(colors::ACCENT)))
    } else {
        let keybinds: Vec<(&str, &str)> = match app.view_mode {
            ViewMode::Home => vec![("[Enter]", "Get started")],
            ViewMode::Plan => vec![
                ("[j/k]", "Move"),
                ("[PgUp/PgDn]", "Page"),
                ("[Enter]", "Start learning"),
                ("[Esc]", "Home"),
            ],
            ViewMode::Content if app.error.is_some() && !app.is_generating => {
                vec![("[r]", "Retry"), ("[ / ]", "Prev/next day"), ("[Esc]", "Plan")]
            }
            ViewMode::Content => {
                let mut binds = vec![("[Enter]", "Generate"), ("[ / ]", "Prev/next day")];
                if app.has_sessions() {
                    binds.push(("[s]", "Save"));
                    binds.push(("[j/k]", "Scroll"));
                }
                binds.push(("[b]", "Sidebar"));
                binds.push(("[Esc]", "Plan"));
                binds
            }
        };

        let mut spans = vec![Span::raw(" ")];
        for (key, desc) in keybinds {
            spans.push(Span::styled(key, Style::default().fg(colors::KEYBIND)));
            spans.push(Span::raw(format!(" {}  ", desc)));
        }
        spans.push(Span::styled("[?]", Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(" Help  "));
        spans.push(Span::styled("[q]", Style::default().fg(colors::KEYBIND)));
        spans.push(Span::raw(" Quit"));
        if !state.generator_label.is_empty() {
            spans.push(Span::styled(
                format!("  │ {}", state.generator_label),
                Style::default().fg(colors::DIM),
            ));
        }
        Line::from(spans)
    };

    let footer = Paragraph::new(content).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    trace!("render_help_overlay: called");
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let section = |name: &'static str| {
        Line::from(vec![Span::styled(name, Style::default().add_modifier(Modifier::BOLD))])
    };
    let help_text = vec![
        Line::from(vec![Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED)
                .fg(colors::ACCENT),
        )]),
        Line::from(""),
        section("Global"),
        key_line("?", "Toggle help"),
        key_line("q", "Quit"),
        key_line("Ctrl+C", "Force quit"),
        key_line("Esc", "Back"),
        Line::from(""),
        section("Plan"),
        key_line("j/↓  k/↑", "Move down / up"),
        key_line("PgDn/PgUp", "Move ten days"),
        key_line("g / G", "First / last day"),
        key_line("Enter", "Start learning the highlighted day"),
        Line::from(""),
        section("Study Module"),
        key_line("Enter", "Generate module"),
        key_line("r", "Retry after a failure"),
        key_line("[ / ]", "Previous / next day"),
        key_line("s", "Save module as a text file"),
        key_line("j/k", "Scroll"),
        key_line("b", "Toggle sidebar"),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help (? to close) ")
                .style(Style::default().bg(Color::Black)),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help, popup_area);
}

fn key_line<'a>(key: &'a str, desc: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(format!("{:<12}", key), Style::default().fg(colors::KEYBIND)),
        Span::raw(desc),
    ])
}

/// Helper to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    trace!(percent_x, percent_y, "centered_rect: called");
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    centered_columns(popup_layout[1], percent_x)
}

fn centered_columns(area: Rect, percent_x: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(area)[1]
}

fn vertical_center(area: Rect, height: u16) -> Rect {
    Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(height), Constraint::Min(0)])
        .split(area)[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::GenerationError;
    use crate::generation::mock::sample_sessions;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(state: &TuiState, width: u16, height: u16) -> String {
        let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
        terminal.draw(|frame| render(state, frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_render_home() {
        let screen = draw(&TuiState::new(), 120, 40);
        assert!(screen.contains("ARCHITECT"));
        assert!(screen.contains("Concise Modules"));
        assert!(screen.contains("GET STARTED"));
    }

    #[test]
    fn test_render_plan_follows_cursor() {
        let mut state = TuiState::new();
        state.controller.open_plan();
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("DAY 1"));
        assert!(screen.contains("Soil Mechanics"));

        state.plan_cursor = 300;
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("DAY 300"));
    }

    #[test]
    fn test_plan_lines_cursor_index() {
        let (lines, idx) = plan_lines(1, 100);
        // phase header and description come first
        assert_eq!(idx, 2);
        // 360 days + 2 header rows per phase + separators
        assert_eq!(lines.len(), 360 + PHASES.len() * 2 + PHASES.len() - 1);
    }

    #[test]
    fn test_render_content_states() {
        let mut state = TuiState::new();
        let ticket = state.controller.begin_generation(Some(5));
        state.start_generation(ticket.clone());
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("ARCHITECTING STUDY MODULE"));
        assert!(screen.contains(&state.building_word));

        state.controller.complete_generation(ticket.seq, Ok(sample_sessions(&ticket.request)));
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("[THEORY]"));
        assert!(screen.contains("[APPLICATION]"));
        assert!(screen.contains("Download Source"));

        let ticket = state.controller.retry_ticket();
        state
            .controller
            .complete_generation(ticket.seq, Err(GenerationError::network("connection refused")));
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("Synthesis Failed"));
        assert!(screen.contains("connection refused"));
    }

    #[test]
    fn test_render_empty_content() {
        let mut state = TuiState::new();
        let ticket = state.controller.begin_generation(Some(9));
        state.controller.complete_generation(ticket.seq, Ok(vec![]));
        let screen = draw(&state, 120, 40);
        assert!(screen.contains("READY TO SYNTHESIZE DAY 9"));
    }

    #[test]
    fn test_sidebar_hidden_when_narrow() {
        let mut state = TuiState::new();
        state.controller.begin_generation(None);
        assert!(!draw(&state, 80, 30).contains("SSC JE PBL"));

        state.controller.toggle_sidebar();
        assert!(draw(&state, 80, 30).contains("SSC JE PBL"));
        assert!(draw(&state, 120, 30).contains("SSC JE PBL"));
    }

    #[test]
    fn test_render_help_overlay() {
        let mut state = TuiState::new();
        state.show_help = true;
        assert!(draw(&state, 120, 40).contains("Keyboard Shortcuts"));
    }
}
