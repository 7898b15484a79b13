use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use ens_search_core::{
    Catalog, DropdownBuilder, HistoryStore, NameValidator, Navigation, SearchItem, SearchSession,
    Translator,
};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph};
use ratatui::Terminal;
use std::io;
use std::time::{Duration, Instant};

use crate::config::Settings;
use crate::suggestion_history;
use crate::theme::{self, TuiTheme};

pub trait EventSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>>;
}

pub struct RealEventSource;

impl EventSource for RealEventSource {
    fn poll(&mut self, timeout: Duration) -> Result<Option<Event>> {
        if crossterm::event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

pub fn run_picker_default(store: &dyn HistoryStore, settings: &Settings) -> Result<Option<Navigation>> {
    let mut es = RealEventSource;
    run_picker_with(store, settings, &mut es, true)
}

/// Interactive search box. Returns the chosen navigation, or `None` when the
/// user cancels. With `draw = false` nothing touches the terminal, and the
/// loop ends once the event source runs dry.
pub fn run_picker_with(
    store: &dyn HistoryStore,
    settings: &Settings,
    es: &mut dyn EventSource,
    draw: bool,
) -> Result<Option<Navigation>> {
    let catalog = Catalog::with_overrides(settings.strings.clone());
    let builder = DropdownBuilder::new().with_translator(catalog);
    let mut session = SearchSession::with_builder(builder, settings.debounce());
    session.refresh(&suggestion_history(store)?);

    if !draw {
        return event_loop(&mut session, store, es, None);
    }

    let alt_screen = settings.tui.as_ref().and_then(|t| t.alt_screen).unwrap_or(true);
    let thm = theme::tui_theme(settings.tui.as_ref());
    let _guard = TerminalGuard::enter(alt_screen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;
    event_loop(&mut session, store, es, Some((&mut terminal, thm)))
}

/// Raw mode (and the alternate screen) for as long as it lives. Dropping it
/// restores the terminal on every exit path, errors included.
struct TerminalGuard {
    alt_screen: bool,
}

impl TerminalGuard {
    fn enter(alt_screen: bool) -> Result<Self> {
        enable_raw_mode()?;
        let mut guard = Self { alt_screen: false };
        if alt_screen {
            crossterm::execute!(io::stdout(), crossterm::terminal::EnterAlternateScreen)?;
            guard.alt_screen = true;
        }
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let mut out = io::stdout();
        if self.alt_screen {
            let _ = crossterm::execute!(out, crossterm::terminal::LeaveAlternateScreen);
        }
        let _ = crossterm::execute!(out, crossterm::cursor::Show);
    }
}

type Term = Terminal<CrosstermBackend<io::Stdout>>;

fn event_loop<V: NameValidator, T: Translator>(
    session: &mut SearchSession<V, T>,
    store: &dyn HistoryStore,
    es: &mut dyn EventSource,
    mut screen: Option<(&mut Term, TuiTheme)>,
) -> Result<Option<Navigation>> {
    let headless = screen.is_none();
    loop {
        session.tick(Instant::now());

        if let Some((term, thm)) = screen.as_mut() {
            draw_frame(term, session, *thm)?;
        }

        let Some(ev) = es.poll(Duration::from_millis(50))? else {
            if headless {
                return Ok(None);
            }
            continue;
        };
        let Event::Key(k) = ev else { continue };
        if k.kind != KeyEventKind::Press {
            continue;
        }
        match k.code {
            KeyCode::Esc => return Ok(None),
            KeyCode::Char('c') if k.modifiers.contains(KeyModifiers::CONTROL) => return Ok(None),
            KeyCode::Enter => {
                if let Some(nav) = session.submit(store)? {
                    return Ok(Some(nav));
                }
            }
            KeyCode::Up => session.move_up(),
            KeyCode::Down | KeyCode::Tab => session.move_down(),
            KeyCode::Backspace => {
                let mut input = session.input().to_string();
                input.pop();
                session.set_input(input, &suggestion_history(store)?, Instant::now());
            }
            KeyCode::Char(ch) => {
                let input = format!("{}{}", session.input(), ch);
                session.set_input(input, &suggestion_history(store)?, Instant::now());
            }
            _ => {}
        }
    }
}

fn draw_frame<V: NameValidator, T: Translator>(
    term: &mut Term,
    session: &SearchSession<V, T>,
    thm: TuiTheme,
) -> Result<()> {
    let has_error = matches!(session.items().first(), Some(SearchItem::Error { .. }));
    term.draw(|f| {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // search bar
                Constraint::Min(5),    // suggestions
                Constraint::Length(3), // shortcuts
            ])
            .split(f.area());

        let border = if has_error { thm.error_fg } else { thm.border_fg };
        let q = Paragraph::new(session.input()).block(
            Block::default()
                .borders(Borders::ALL)
                .title("Search names or addresses")
                .border_style(Style::default().fg(border)),
        );
        f.render_widget(q, chunks[0]);

        let rows: Vec<ListItem> = session
            .items()
            .iter()
            .map(|it| {
                let mut style = Style::default();
                if session.is_provisional(it) {
                    style = style.add_modifier(Modifier::DIM);
                }
                if matches!(it, SearchItem::Error { .. }) {
                    style = style.fg(thm.error_fg);
                }
                ListItem::new(Line::from(vec![
                    Span::styled(format!("{:<8}", it.kind_label()), Style::default().add_modifier(Modifier::DIM)),
                    Span::styled(it.text().to_string(), style),
                    Span::raw(validity_badge(it)),
                ]))
            })
            .collect();
        let list = List::new(rows)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title("Suggestions")
                    .border_style(Style::default().fg(border)),
            )
            .highlight_style(
                Style::default()
                    .fg(thm.highlight_fg)
                    .bg(thm.highlight_bg)
                    .add_modifier(Modifier::BOLD),
            );
        let mut state = ListState::default().with_selected(session.selected());
        f.render_stateful_widget(list, chunks[1], &mut state);

        let cancel = session.builder().translator().translate("action.cancel");
        let footer = Paragraph::new(format!("Enter open | ↑/↓ move | Esc {}", cancel.to_lowercase()))
            .block(Block::default().borders(Borders::ALL).title("Shortcuts").border_style(Style::default().fg(thm.border_fg)))
            .style(Style::default().fg(thm.help_fg));
        f.render_widget(footer, chunks[2]);
    })?;
    Ok(())
}

fn validity_badge(item: &SearchItem) -> &'static str {
    match item {
        SearchItem::Box { is_valid: false, .. } => "  (not available)",
        _ => "",
    }
}
