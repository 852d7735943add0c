//! Terminal UI example using crossterm and ratatui.
//!
//! A single text field driven by modal_field. Keys the engine lets through
//! are typed into the field the way a regular text widget would.
//! Run with: cargo run --example tui_crossterm
//!
//! Set `RUST_LOG=modal_field=trace` to record every routed key in
//! `modal_field_demo.log`.

use crossterm::{
    event::{self, Event, KeyCode as CKeyCode, KeyEvent as CKeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use modal_field::{Config, Engine, KeyCode, KeyEvent, MemoryBuffer, Mode, Modifiers, TextBuffer};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::{
    fs::File,
    io,
    sync::Mutex,
    time::{Duration, Instant},
};
use tracing_subscriber::EnvFilter;

const WELCOME: &str = "Welcome to modal_field!\n\nPress 'i' to enter insert mode.\nPress 'Esc' to return to normal mode.\nPress Ctrl-Q to quit.\n\nTry vim commands like:\n- hjkl for movement\n- dd to delete a line\n- yy to yank (copy) a line\n- p to paste\n- v to select, u to undo\n";

const TICK: Duration = Duration::from_millis(25);

struct App {
    engine: Engine,
    buffer: MemoryBuffer,
    message: Option<&'static str>,
    should_quit: bool,
}

impl App {
    fn new(debug: bool) -> Self {
        let config = Config::builder()
            .debug(debug)
            .build()
            .expect("default config is valid");
        Self {
            engine: Engine::builder()
                .config(config)
                .build()
                .expect("default keymap is valid"),
            buffer: MemoryBuffer::new(WELCOME).with_selection(0, 1),
            message: None,
            should_quit: false,
        }
    }

    fn handle_crossterm_event(&mut self, event: CKeyEvent) {
        if event.modifiers.contains(KeyModifiers::CONTROL)
            && matches!(event.code, CKeyCode::Char('c') | CKeyCode::Char('q'))
        {
            self.should_quit = true;
            return;
        }

        let Some(key) = convert_crossterm_event(event) else {
            return;
        };

        let outcome = self.engine.key_down(&mut self.buffer, key, Instant::now());
        self.message = outcome.message;
        if !outcome.suppress_default {
            self.type_default(event.code);
        }
    }

    /// What a plain text widget does with a key nobody intercepted.
    fn type_default(&mut self, code: CKeyCode) {
        match code {
            CKeyCode::Char(c) => self.buffer.replace_selection(c.encode_utf8(&mut [0; 4])),
            CKeyCode::Enter => self.buffer.replace_selection("\n"),
            CKeyCode::Tab => self.buffer.replace_selection("\t"),
            CKeyCode::Backspace => {
                let (start, end) = self.buffer.selection_range();
                if start < end {
                    self.buffer.replace_selection("");
                } else if start > 0 {
                    self.buffer.delete_range(start - 1, start);
                    self.buffer.set_selection_range(start - 1, start - 1);
                }
            }
            CKeyCode::Left => {
                let at = self.buffer.cursor().saturating_sub(1);
                self.buffer.set_selection_range(at, at);
            }
            CKeyCode::Right => {
                let at = (self.buffer.cursor() + 1).min(self.buffer.len());
                self.buffer.set_selection_range(at, at);
            }
            _ => {}
        }
    }

    fn tick(&mut self) {
        self.engine.poll_timers(&mut self.buffer, Instant::now());
    }
}

fn convert_crossterm_event(event: CKeyEvent) -> Option<KeyEvent> {
    let mut mods = Modifiers::empty();
    if event.modifiers.contains(KeyModifiers::SHIFT) {
        mods |= Modifiers::SHIFT;
    }
    if event.modifiers.contains(KeyModifiers::CONTROL) {
        mods |= Modifiers::CTRL;
    }
    if event.modifiers.contains(KeyModifiers::ALT) {
        mods |= Modifiers::ALT;
    }

    let code = match event.code {
        CKeyCode::Char(c) => KeyCode::Char(c),
        CKeyCode::Esc => KeyCode::Esc,
        CKeyCode::Enter => KeyCode::Enter,
        CKeyCode::Backspace => KeyCode::Backspace,
        CKeyCode::Tab => KeyCode::Tab,
        CKeyCode::Delete => KeyCode::Delete,
        CKeyCode::Insert => KeyCode::Insert,
        CKeyCode::Home => KeyCode::Home,
        CKeyCode::End => KeyCode::End,
        CKeyCode::Left => KeyCode::Left,
        CKeyCode::Right => KeyCode::Right,
        CKeyCode::Up => KeyCode::Up,
        CKeyCode::Down => KeyCode::Down,
        CKeyCode::F(n) => KeyCode::F(n),
        _ => return None,
    };
    Some(KeyEvent::new(code, mods))
}

/// Line and column of a character position, for placing the terminal cursor.
fn line_col(buffer: &MemoryBuffer, pos: usize) -> (u16, u16) {
    let (mut line, mut col) = (0u16, 0u16);
    for i in 0..pos.min(buffer.len()) {
        if buffer.char_at(i) == Some('\n') {
            line += 1;
            col = 0;
        } else {
            col += 1;
        }
    }
    (line, col)
}

fn ui(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Min(3), Constraint::Length(3)].as_ref())
        .split(f.size());

    // Main text area, with the selection highlighted
    let (sel_start, sel_end) = app.buffer.selection_range();
    let highlight = Style::default().bg(Color::Blue);
    let mut lines = vec![];
    let mut spans = vec![];
    for i in 0..app.buffer.len() {
        let Some(c) = app.buffer.char_at(i) else {
            break;
        };
        let selected = i >= sel_start && i < sel_end;
        if c == '\n' {
            if selected {
                spans.push(Span::styled(" ", highlight));
            }
            lines.push(Line::from(std::mem::take(&mut spans)));
            continue;
        }
        let text = app.buffer.slice(i, i + 1);
        spans.push(if selected {
            Span::styled(text, highlight)
        } else {
            Span::raw(text)
        });
    }
    lines.push(Line::from(spans));

    let text = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title("modal_field demo"),
    );
    f.render_widget(text, chunks[0]);

    // Status line
    let mode = match app.engine.mode() {
        Mode::Normal => "-- NORMAL --",
        Mode::Insert => "-- INSERT --",
        Mode::Visual => "-- VISUAL --",
        Mode::Command => "-- COMMAND --",
    };
    let mut status = mode.to_string();
    if let Some(count) = app.engine.snapshot().pending_count {
        status.push_str(&format!("  {count}"));
    }
    if let Some(message) = app.message {
        status.push_str("  ");
        status.push_str(message);
    }
    let status = Paragraph::new(status)
        .style(Style::default().add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(status, chunks[1]);

    // Set cursor position
    let (line, col) = line_col(&app.buffer, app.buffer.cursor());
    f.set_cursor(chunks[0].x + 1 + col, chunks[0].y + 1 + line);
}

fn init_tracing() -> bool {
    let Ok(filter) = EnvFilter::try_from_default_env() else {
        return false;
    };
    let Ok(file) = File::create("modal_field_demo.log") else {
        return false;
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .init();
    true
}

fn main() -> Result<(), io::Error> {
    let debug = init_tracing();

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(debug);

    loop {
        terminal.draw(|f| ui(f, &app))?;

        if event::poll(TICK)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_crossterm_event(key);

            if app.should_quit {
                break;
            }
        }

        // Deferred mode switches and caret repairs
        app.tick();
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    Ok(())
}
