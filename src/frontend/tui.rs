use std::io;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame, Terminal,
};
use tui_textarea::TextArea;

use termfolio::dispatch::{Dispatcher, Effect, Key, Output, Reply};

use super::opener;
use super::theme::Theme;

const BOOT_TIME: Duration = Duration::from_secs(3);
const TICK: Duration = Duration::from_millis(50);

enum Screen {
    Boot { started: Instant },
    Terminal,
}

struct App<'a> {
    session: Dispatcher,
    screen: Screen,
    transcript: Vec<Output>,
    input: String,
    history: Vec<String>,
    history_index: Option<usize>,
    editor: Option<TextArea<'a>>,
    theme: Theme,
    /// Lines scrolled up from the bottom of the transcript.
    scroll_back: u16,
    quit: bool,
}

impl<'a> App<'a> {
    fn new(session: Dispatcher, boot: bool) -> Self {
        let mut app = App {
            session,
            screen: if boot {
                Screen::Boot { started: Instant::now() }
            } else {
                Screen::Terminal
            },
            transcript: Vec::new(),
            input: String::new(),
            history: Vec::new(),
            history_index: None,
            editor: None,
            theme: Theme::dark(),
            scroll_back: 0,
            quit: false,
        };
        let welcome = app.session.welcome();
        app.apply(welcome);
        app
    }

    fn tick(&mut self) {
        if let Screen::Boot { started } = self.screen {
            if started.elapsed() >= BOOT_TIME {
                self.screen = Screen::Terminal;
            }
        }
    }

    fn open_editor(&mut self, code: &str) {
        let mut editor = if code.is_empty() {
            TextArea::default()
        } else {
            TextArea::from(code.lines())
        };
        editor.set_block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Code Editor [Ctrl+S / Esc: done] "),
        );
        editor.set_line_number_style(Style::default().fg(self.theme.text_dim));
        self.editor = Some(editor);
    }

    fn apply(&mut self, reply: Reply) {
        self.transcript.extend(reply.lines);
        for effect in reply.effects {
            match effect {
                Effect::ClearTranscript => self.transcript.clear(),
                Effect::OpenUrl(target) | Effect::OpenDocument(target) => {
                    if let Err(e) = opener::open(&target) {
                        log::warn!("could not open {}: {}", target, e);
                        self.transcript
                            .push(Output::Text(format!("Could not open {} ({})", target, e)));
                    }
                }
                Effect::SetTheme(name) => self.theme = Theme::named(name),
                Effect::EditCode(previous) => self.open_editor(&previous),
            }
        }
        if self.session.awaiting_code() && self.editor.is_none() {
            self.open_editor("");
        }
        if !self.session.awaiting_code() {
            self.editor = None;
        }
        self.scroll_back = 0;
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('d'))
        {
            self.quit = true;
            return;
        }
        if let Screen::Boot { .. } = self.screen {
            self.screen = Screen::Terminal;
            return;
        }

        if self.session.capturing_keys() {
            let reply = self.session.press_key(konami_key(key.code));
            self.apply(reply);
            return;
        }

        if let Some(editor) = self.editor.as_mut() {
            let done = key.code == KeyCode::Esc
                || (key.code == KeyCode::Char('s') && key.modifiers.contains(KeyModifiers::CONTROL));
            if done {
                let code = editor.lines().join("\n");
                self.editor = None;
                self.transcript.push(Output::Text(format!("{} [code]", self.session.prompt())));
                let reply = self.session.enter_code(&code);
                self.apply(reply);
            } else {
                editor.input(key);
            }
            return;
        }

        match key.code {
            KeyCode::Enter => self.submit_line(),
            KeyCode::Up => self.recall(1),
            KeyCode::Down => self.recall(-1),
            KeyCode::PageUp => self.scroll_back = self.scroll_back.saturating_add(5),
            KeyCode::PageDown => self.scroll_back = self.scroll_back.saturating_sub(5),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            _ => {}
        }
    }

    fn submit_line(&mut self) {
        let line = std::mem::take(&mut self.input);
        self.history_index = None;
        if line.trim().is_empty() {
            return;
        }
        self.history.insert(0, line.clone());
        self.transcript
            .push(Output::Text(format!("{} {}", self.session.prompt(), line)));
        let reply = self.session.submit(&line);
        self.apply(reply);
    }

    /// Walk the history: `1` goes back in time, `-1` forward.
    fn recall(&mut self, direction: isize) {
        if self.history.is_empty() {
            return;
        }
        let current = self.history_index.map(|i| i as isize).unwrap_or(-1);
        let next = (current + direction).clamp(-1, self.history.len() as isize - 1);
        if next < 0 {
            self.history_index = None;
            self.input.clear();
        } else {
            let index = next as usize;
            self.history_index = Some(index);
            self.input = self.history[index].clone();
        }
    }
}

fn konami_key(code: KeyCode) -> Key {
    match code {
        KeyCode::Up => Key::Up,
        KeyCode::Down => Key::Down,
        KeyCode::Left => Key::Left,
        KeyCode::Right => Key::Right,
        KeyCode::Char(c) => Key::Char(c),
        other => Key::Other(format!("{:?}", other)),
    }
}

pub fn run(session: Dispatcher, boot: bool) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(session, boot);
    let result = event_loop(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App<'_>,
) -> Result<()> {
    while !app.quit {
        terminal.draw(|f| draw_ui(f, app))?;
        if event::poll(TICK)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.tick();
    }
    Ok(())
}

fn draw_ui(f: &mut Frame, app: &App) {
    let background = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(background, f.area());

    if let Screen::Boot { started } = app.screen {
        draw_boot_screen(f, app, started);
        return;
    }

    let editor_height = if app.editor.is_some() { 12 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(5),
            Constraint::Length(editor_height),
            Constraint::Length(3),
        ])
        .split(f.area());

    let status = Line::from(vec![
        Span::styled(
            " TERMFOLIO ",
            Style::default().fg(app.theme.background).bg(app.theme.accent),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" {} ", app.session.mode().name()),
            Style::default().fg(app.theme.text),
        ),
        Span::raw("  "),
        Span::styled(
            "PgUp/PgDn scroll  •  Ctrl+C quit",
            Style::default().fg(app.theme.text_dim),
        ),
    ]);
    f.render_widget(
        Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM)),
        chunks[0],
    );

    render_transcript(f, app, chunks[1]);

    if let Some(editor) = &app.editor {
        f.render_widget(editor, chunks[2]);
    }

    let prompt_text = if app.session.capturing_keys() {
        "(press keys)".to_string()
    } else if app.editor.is_some() {
        String::new()
    } else {
        format!("{}_", app.input)
    };
    let prompt = Line::from(vec![
        Span::styled(
            format!("{} ", app.session.prompt()),
            Style::default().fg(app.theme.prompt).add_modifier(Modifier::BOLD),
        ),
        Span::styled(prompt_text, Style::default().fg(app.theme.text)),
    ]);
    f.render_widget(
        Paragraph::new(prompt).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border)),
        ),
        chunks[3],
    );
}

fn render_transcript(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Vec::new();
    for entry in &app.transcript {
        match entry {
            Output::Text(text) => lines.push(Line::styled(text.clone(), Style::default().fg(app.theme.text))),
            Output::Code(code) => {
                for code_line in code.lines() {
                    lines.push(Line::styled(
                        format!("  │ {}", code_line),
                        Style::default().fg(app.theme.code),
                    ));
                }
            }
        }
    }

    let inner_width = area.width.saturating_sub(2).max(1) as usize;
    let inner_height = area.height.saturating_sub(2);
    let rendered: usize = lines
        .iter()
        .map(|l| l.width().max(1).div_ceil(inner_width))
        .sum();
    let bottom = (rendered as u16).saturating_sub(inner_height);
    let scroll = bottom.saturating_sub(app.scroll_back);

    let transcript = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(app.theme.border))
                .title(" ~/portfolio "),
        )
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(transcript, area);
}

fn draw_boot_screen(f: &mut Frame, app: &App, started: Instant) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(1),
        ])
        .split(f.area());

    let title = Paragraph::new("Initializing Portfolio OS...")
        .style(Style::default().fg(app.theme.banner).add_modifier(Modifier::BOLD))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[1]);

    let progress = (started.elapsed().as_secs_f64() / BOOT_TIME.as_secs_f64()).min(1.0);
    let bar_area = centered(chunks[2], 50);
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .gauge_style(Style::default().fg(app.theme.accent))
        .ratio(progress);
    f.render_widget(gauge, bar_area);

    let hint = Paragraph::new("press any key to skip")
        .style(Style::default().fg(app.theme.text_dim))
        .alignment(Alignment::Center);
    f.render_widget(hint, chunks[3]);
}

fn centered(area: Rect, percent: u16) -> Rect {
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent) / 2),
            Constraint::Percentage(percent),
            Constraint::Percentage((100 - percent) / 2),
        ])
        .split(area)[1]
}
