use crate::task::Filter;
use crate::todo_list::{NoticeKind, TodoList};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Tabs},
    Frame, Terminal,
};
use std::io;
use std::time::{Duration, Instant};

/// Size of the application frame in terminal cells.
pub const WINDOW_WIDTH: u16 = 44;
pub const WINDOW_HEIGHT: u16 = 22;

const TITLE: &str = " Tarefex ";
const POLL_INTERVAL: Duration = Duration::from_millis(250);
const HELP: &str = "a add  space toggle  d delete  tab filter  q quit";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Editing,
}

pub struct App {
    pub list: TodoList,
    pub mode: InputMode,
    pub should_quit: bool,
}

impl App {
    pub fn new(list: TodoList) -> Self {
        Self {
            list,
            mode: InputMode::Normal,
            should_quit: false,
        }
    }

    /// Apply one key press to the list.
    ///
    /// Store failures are already logged and shown by the list, so their
    /// results are dropped here.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match self.mode {
            InputMode::Editing => match key.code {
                KeyCode::Enter => {
                    let _ = self.list.add();
                }
                KeyCode::Esc => self.mode = InputMode::Normal,
                KeyCode::Backspace => self.list.pop_char(),
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.list.push_char(c)
                }
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    self.should_quit = true
                }
                KeyCode::Char('a') | KeyCode::Char('i') => self.mode = InputMode::Editing,
                KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => self.list.next_filter(),
                KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => {
                    self.list.previous_filter()
                }
                KeyCode::Char(c @ '1'..='3') => {
                    if let Some(filter) = Filter::from_index(c as usize - '1' as usize) {
                        self.list.set_filter(filter);
                    }
                }
                KeyCode::Up | KeyCode::Char('k') => self.list.select_previous(),
                KeyCode::Down | KeyCode::Char('j') => self.list.select_next(),
                KeyCode::Char(' ') | KeyCode::Char('x') => {
                    let _ = self.list.toggle_selected();
                }
                KeyCode::Char('d') | KeyCode::Delete => {
                    let _ = self.list.delete_selected();
                }
                _ => {}
            },
        }
    }
}

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        app.list.tick(Instant::now());
        terminal.draw(|f| draw(f, app))?;

        if !event::poll(POLL_INTERVAL)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                app.handle_key(key);
            }
        }
        if app.should_quit {
            return Ok(());
        }
    }
}

pub fn draw(f: &mut Frame, app: &App) {
    let window = fixed_rect(WINDOW_WIDTH, WINDOW_HEIGHT, f.area());
    let block = Block::default().title(TITLE).borders(Borders::ALL);
    let inner = block.inner(window);
    f.render_widget(block, window);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(inner);

    draw_input(f, app, chunks[0]);
    draw_tabs(f, app.list.filter(), chunks[1]);
    draw_tasks(f, &app.list, chunks[2]);
    draw_footer(f, &app.list, chunks[3]);
}

fn draw_input(f: &mut Frame, app: &App, area: Rect) {
    let editing = app.mode == InputMode::Editing;
    let (text, style) = if app.list.input().is_empty() && !editing {
        ("Type a task", Style::default().fg(Color::DarkGray))
    } else {
        (app.list.input(), Style::default())
    };
    let border_style = if editing {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    let input = Paragraph::new(Span::styled(text, style)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("New task")
            .border_style(border_style),
    );
    f.render_widget(input, area);

    if editing {
        let width = app.list.input().chars().count() as u16;
        let x = (area.x + 1 + width).min(area.right().saturating_sub(2));
        f.set_cursor_position((x, area.y + 1));
    }
}

fn draw_tabs(f: &mut Frame, filter: Filter, area: Rect) {
    let tabs = Tabs::new(Filter::ALL.iter().map(|t| t.label()))
        .select(filter.index())
        .block(Block::default().borders(Borders::ALL))
        .highlight_style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD));
    f.render_widget(tabs, area);
}

fn draw_tasks(f: &mut Frame, list: &TodoList, area: Rect) {
    let items: Vec<ListItem> = list
        .tasks()
        .iter()
        .map(|t| {
            let checkbox = if t.status.is_complete() { "[x] " } else { "[ ] " };
            let name_style = if t.status.is_complete() {
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
            } else {
                Style::default().fg(Color::White)
            };
            ListItem::new(Line::from(vec![
                Span::raw(checkbox),
                Span::styled(t.name.as_str(), name_style),
            ]))
        })
        .collect();

    let tasks = List::new(items)
        .highlight_style(Style::default().add_modifier(Modifier::BOLD | Modifier::REVERSED));
    let mut state = ListState::default().with_selected(list.selected());
    f.render_stateful_widget(tasks, area, &mut state);
}

fn draw_footer(f: &mut Frame, list: &TodoList, area: Rect) {
    let footer = match list.notice() {
        Some(notice) => {
            let color = match notice.kind {
                NoticeKind::Warning => Color::Yellow,
                NoticeKind::Error => Color::Red,
            };
            Paragraph::new(Span::styled(notice.message.as_str(), Style::default().fg(color)))
        }
        None => Paragraph::new(Span::styled(HELP, Style::default().fg(Color::DarkGray))),
    };
    f.render_widget(footer, area);
}

/// A `width` x `height` rectangle centered in `area`, shrunk if it does not fit.
fn fixed_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
