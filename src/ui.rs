use crate::catalog::PickerItem;
use crate::date_picker::DateField;
use crate::keypad::Key;
use crate::picker::ListPicker;
use crate::screen::{EditScreen, Input, Row};
use crate::sheet::{self, ModalKind, SheetHit, SheetLayout, SheetRect};
use crate::subscription::month_name;
use anyhow::{Context, Result};
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame, Terminal,
};
use std::io;

const ACCENT: Color = Color::Rgb(0x00, 0x2F, 0xFF);
const LABEL: Color = Color::Rgb(0x63, 0x6A, 0x79);
const MUTED: Color = Color::Rgb(0x8E, 0x8E, 0x93);
const DANGER: Color = Color::Rgb(0xFF, 0x3B, 0x30);
const ON: Color = Color::Rgb(0x34, 0xC7, 0x59);

// ============================================================================
// EVENT LOOP
// ============================================================================

pub fn run_ui(screen: &mut EditScreen) -> Result<()> {
    // Setup terminal; the guard restores it on every exit path from here on
    let _guard = TerminalGuard::enter(setup_terminal, restore_terminal)
        .context("failed to prepare terminal")?;
    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)?;

    // Run the screen
    run_app(&mut terminal, screen).context("terminal event loop failed")
}

/// Undoes raw mode, the alternate screen and mouse capture when dropped
struct TerminalGuard {
    restore: fn() -> io::Result<()>,
}

impl TerminalGuard {
    /// Arms the guard before `setup` runs, so a half-finished setup is undone too
    fn enter(setup: fn() -> io::Result<()>, restore: fn() -> io::Result<()>) -> io::Result<Self> {
        let guard = TerminalGuard { restore };
        setup()?;
        Ok(guard)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = (self.restore)() {
            tracing::warn!(error = %err, "failed to restore terminal");
        }
    }
}

fn setup_terminal() -> io::Result<()> {
    enable_raw_mode()?;
    execute!(io::stdout(), EnterAlternateScreen, EnableMouseCapture)
}

fn restore_terminal() -> io::Result<()> {
    let raw = disable_raw_mode();
    execute!(
        io::stdout(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        crossterm::cursor::Show
    )?;
    raw
}

// Redraws after every event and reads the edit buffer directly, so the
// keypad's change observers are left to embedders that render on change.
fn run_app<B: Backend>(terminal: &mut Terminal<B>, screen: &mut EditScreen) -> io::Result<()> {
    while !screen.should_quit {
        terminal.draw(|f| ui(f, screen))?;

        match event::read()? {
            Event::Key(key) => {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
                    screen.should_quit = true;
                    continue;
                }
                if let Some(input) = map_key(key) {
                    screen.handle(input);
                }
            }
            Event::Mouse(mouse) => {
                if let MouseEventKind::Down(_) = mouse.kind {
                    let area = to_sheet_rect(terminal.size()?);
                    if let Some(hit) = click_target(screen, area, mouse.column, mouse.row) {
                        screen.click(hit);
                    }
                }
            }
            _ => {}
        }
    }

    Ok(())
}

/// Translate a key press into a screen input
pub fn map_key(key: KeyEvent) -> Option<Input> {
    match key.code {
        KeyCode::Up => Some(Input::Up),
        KeyCode::Down => Some(Input::Down),
        KeyCode::Left => Some(Input::Left),
        KeyCode::Right => Some(Input::Right),
        KeyCode::Enter => Some(Input::Enter),
        KeyCode::Esc => Some(Input::Esc),
        KeyCode::Backspace | KeyCode::Delete => Some(Input::Backspace),
        KeyCode::Tab => Some(Input::Char('\t')),
        KeyCode::Char(c) => Some(Input::Char(c)),
        _ => None,
    }
}

/// What a mouse-down at (column, row) lands on in the open sheet
fn click_target(screen: &EditScreen, area: SheetRect, column: u16, row: u16) -> Option<SheetHit> {
    let kind = screen.active_modal()?;
    let sheet = sheet::sheet_area(area, kind.height_fraction());
    let (_, list) = sheet::list_layout(sheet::sheet_layout(sheet).body, kind.has_search());
    let offset = sheet::list_offset(list_cursor(screen, kind), list.height);
    sheet::hit_test(area, kind, offset, column, row)
}

fn list_cursor(screen: &EditScreen, kind: ModalKind) -> Option<usize> {
    match kind {
        ModalKind::App => screen.app_picker.cursor(),
        ModalKind::Category => screen.category_picker.cursor(),
        ModalKind::Frequency => screen.frequency_picker.cursor(),
        ModalKind::Reminder => screen.reminder_picker.cursor(),
        ModalKind::Amount | ModalKind::StartDate => None,
    }
}

fn to_sheet_rect(r: Rect) -> SheetRect {
    SheetRect::new(r.x, r.y, r.width, r.height)
}

fn to_rect(s: SheetRect) -> Rect {
    Rect::new(s.x, s.y, s.width, s.height)
}

// ============================================================================
// FORM
// ============================================================================

pub fn ui(f: &mut Frame, screen: &EditScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Header
            Constraint::Length(4), // App card
            Constraint::Min(0),    // Form rows
            Constraint::Length(3), // Status bar
        ])
        .split(f.size());

    render_header(f, chunks[0]);
    render_app_card(f, chunks[1], screen);
    render_form(f, chunks[2], screen);
    render_status_bar(f, chunks[3], screen);

    if let Some(kind) = screen.active_modal() {
        let area = sheet::sheet_area(to_sheet_rect(f.size()), kind.height_fraction());
        render_sheet(f, area, kind, screen);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let line = Line::from(vec![
        Span::styled("‹ Back", Style::default().fg(Color::White)),
        Span::raw("      "),
        Span::styled(
            "Edit Subscription",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw("      "),
        Span::styled(
            "Save",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ),
    ]);

    let header = Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::Cyan)));

    f.render_widget(header, area);
}

fn render_app_card(f: &mut Frame, area: Rect, screen: &EditScreen) {
    let record = screen.record();
    let badge_style = record
        .app
        .as_ref()
        .and_then(|app| app.rgb())
        .map(|(r, g, b)| Style::default().fg(Color::White).bg(Color::Rgb(r, g, b)))
        .unwrap_or_else(|| Style::default().fg(Color::Black).bg(Color::Gray));
    let icon = record.app.as_ref().map(|app| app.icon).unwrap_or("?");

    let content = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", icon), badge_style.add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(record.app_name(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw("       "),
            Span::styled(screen.formatted_amount(), Style::default().fg(MUTED)),
        ]),
    ];

    let card = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    f.render_widget(card, area);
}

fn render_form(f: &mut Frame, area: Rect, screen: &EditScreen) {
    let items: Vec<ListItem> = Row::ALL
        .iter()
        .map(|row| ListItem::new(form_line(screen, *row)))
        .collect();

    let selected = Row::ALL.iter().position(|r| *r == screen.focus);
    let mut state = ListState::default();
    state.select(selected);

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" Details "))
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, area, &mut state);
}

fn form_line(screen: &EditScreen, row: Row) -> Line<'static> {
    match row {
        Row::Delete => Line::from(Span::styled("Delete", Style::default().fg(DANGER))),
        Row::Active => {
            let (symbol, color) = if screen.record().active {
                ("● On", ON)
            } else {
                ("○ Off", MUTED)
            };
            Line::from(vec![
                Span::styled(format!("{:<14}", row.label()), Style::default().fg(LABEL)),
                Span::styled(symbol, Style::default().fg(color)),
            ])
        }
        _ => {
            let mut spans = vec![
                Span::styled(format!("{:<14}", row.label()), Style::default().fg(LABEL)),
            ];
            if row == Row::Category {
                if let Some(category) = &screen.record().category {
                    spans.push(Span::raw(format!("{} ", category.icon)));
                }
            }
            spans.push(Span::raw(screen.row_value(row)));
            if row != Row::Amount {
                spans.push(Span::styled(" ⇅", Style::default().fg(MUTED)));
            }
            Line::from(spans)
        }
    }
}

fn render_status_bar(f: &mut Frame, area: Rect, screen: &EditScreen) {
    let line = match &screen.form.status {
        Some(message) => Line::from(Span::styled(
            format!(" {}", message),
            Style::default().fg(if screen.confirm_delete { DANGER } else { ON }),
        )),
        None => Line::from(vec![
            Span::styled(" ↑/↓", Style::default().fg(Color::Yellow)),
            Span::raw(" Nav | "),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::raw(" Edit | "),
            Span::styled("s", Style::default().fg(Color::Yellow)),
            Span::raw(" Save | "),
            Span::styled("q", Style::default().fg(Color::Red)),
            Span::raw(" Back"),
        ]),
    };

    let status_bar = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
    f.render_widget(status_bar, area);
}

// ============================================================================
// SHEETS
// ============================================================================

// Every rectangle below comes from `sheet`, which also resolves clicks.

fn render_sheet(f: &mut Frame, area: SheetRect, kind: ModalKind, screen: &EditScreen) {
    f.render_widget(Clear, to_rect(area));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ACCENT));
    f.render_widget(block, to_rect(area));

    let layout = sheet::sheet_layout(area);
    if layout.title.height == 0 {
        return;
    }

    render_sheet_header(f, &layout, kind.title());

    let body = layout.body;
    match kind {
        ModalKind::Amount => render_amount_sheet(f, body, screen),
        ModalKind::StartDate => render_date_sheet(f, to_rect(body), screen),
        ModalKind::App => render_list_sheet(f, body, &screen.app_picker),
        ModalKind::Category => render_list_sheet(f, body, &screen.category_picker),
        ModalKind::Frequency => render_list_sheet(f, body, &screen.frequency_picker),
        ModalKind::Reminder => render_list_sheet(f, body, &screen.reminder_picker),
    }
}

fn render_sheet_header(f: &mut Frame, layout: &SheetLayout, title: &str) {
    f.render_widget(
        Paragraph::new(Span::styled("Esc", Style::default().fg(MUTED))),
        to_rect(layout.cancel),
    );
    f.render_widget(
        Paragraph::new(Span::styled(title.to_string(), Style::default().add_modifier(Modifier::BOLD)))
            .alignment(Alignment::Center),
        to_rect(layout.title),
    );
    f.render_widget(
        Paragraph::new(Span::styled(
            "Done",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Right),
        to_rect(layout.done),
    );
}

fn render_amount_sheet(f: &mut Frame, area: SheetRect, screen: &EditScreen) {
    let pad = sheet::keypad_layout(area);

    let input = Paragraph::new(Line::from(vec![
        Span::raw(format!("{} ", screen.currency_symbol())),
        Span::styled(
            screen.amount_editor.buffer().as_str().to_string(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]))
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(input, to_rect(pad.input));

    for (key, cell) in pad.keys() {
        render_key(f, to_rect(cell), key);
    }
}

fn render_key(f: &mut Frame, area: Rect, key: Key) {
    let mut lines = vec![Line::from(Span::styled(
        key.label(),
        Style::default().add_modifier(Modifier::BOLD),
    ))];
    if let Some(sub) = key.sub_label() {
        lines.push(Line::from(Span::styled(sub, Style::default().fg(MUTED))));
    }

    let block = if area.height >= 4 {
        Block::default().borders(Borders::ALL)
    } else {
        Block::default()
    };

    f.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_date_sheet(f: &mut Frame, area: Rect, screen: &EditScreen) {
    let picker = &screen.date_picker;
    let field_style = |field: DateField| {
        if picker.field() == field {
            Style::default().fg(Color::White).bg(ACCENT).add_modifier(Modifier::BOLD)
        } else {
            Style::default()
        }
    };

    let content = vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", month_name(picker.month())), field_style(DateField::Month)),
            Span::raw("  "),
            Span::styled(format!(" {:>2} ", picker.day()), field_style(DateField::Day)),
            Span::raw("  "),
            Span::styled(format!(" {} ", picker.year()), field_style(DateField::Year)),
        ]),
        Line::from(""),
        Line::from(Span::styled(
            "←/→ field  ↑/↓ change  Enter done",
            Style::default().fg(MUTED).add_modifier(Modifier::ITALIC),
        )),
    ];

    f.render_widget(Paragraph::new(content).alignment(Alignment::Center), area);
}

fn render_list_sheet<T: PickerItem + Clone>(f: &mut Frame, area: SheetRect, picker: &ListPicker<T>) {
    let (search_area, list_area) = sheet::list_layout(area, picker.is_searchable());

    if let Some(search_area) = search_area {
        let query = if picker.query().is_empty() {
            Span::styled("Search", Style::default().fg(MUTED))
        } else {
            Span::raw(picker.query().to_string())
        };
        let search = Paragraph::new(Line::from(vec![Span::raw("🔍 "), query]))
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(search, to_rect(search_area));
    }

    let items: Vec<ListItem> = picker
        .visible()
        .into_iter()
        .map(|item| {
            let mut spans = vec![Span::raw(item.label().to_string())];
            if picker.is_marked(item) {
                spans.push(Span::styled(" ✓", Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)));
            }
            ListItem::new(Line::from(spans))
        })
        .collect();

    let offset = sheet::list_offset(picker.cursor(), list_area.height);
    let mut state = ListState::default()
        .with_offset(offset)
        .with_selected(picker.cursor());

    let list = List::new(items)
        .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD))
        .highlight_symbol("→ ");

    f.render_stateful_widget(list, to_rect(list_area), &mut state);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feedback::PulseCounter;
    use crate::subscription::Subscription;
    use ratatui::backend::TestBackend;
    use std::rc::Rc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn buffer_to_string(buf: &ratatui::buffer::Buffer) -> String {
        let width = buf.area.width as usize;
        let mut s = String::new();
        for (i, cell) in buf.content.iter().enumerate() {
            s.push_str(cell.symbol());
            if (i + 1) % width == 0 {
                s.push('\n');
            }
        }
        s
    }

    fn render(screen: &EditScreen, width: u16, height: u16) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, screen)).unwrap();
        buffer_to_string(terminal.backend().buffer())
    }

    fn screen() -> EditScreen {
        EditScreen::new(Subscription::default(), "$", Rc::new(PulseCounter::new()))
    }

    #[test]
    fn test_renders_form_rows() {
        let output = render(&screen(), 70, 24);
        assert!(output.contains("Edit Subscription"));
        assert!(output.contains("Netflix"));
        assert!(output.contains("$50.00"));
        assert!(output.contains("Apr 12, 2025"));
        assert!(output.contains("2 days before"));
        assert!(output.contains("Delete"));
    }

    #[test]
    fn test_renders_amount_keypad() {
        let mut screen = screen();
        screen.open_modal(ModalKind::Amount);
        screen.handle(Input::Char('2'));

        let output = render(&screen, 60, 40);
        assert!(output.contains("Amount"));
        assert!(output.contains("$ 502"));
        assert!(output.contains("ABC"));
        assert!(output.contains("WXYZ"));
        assert!(output.contains("⌫"));
    }

    #[test]
    fn test_renders_app_sheet_with_mark() {
        let mut screen = screen();
        screen.open_modal(ModalKind::App);

        let output = render(&screen, 60, 40);
        assert!(output.contains("Search"));
        assert!(output.contains("Netflix ✓"));
        assert!(output.contains("Spotify"));
    }

    #[test]
    fn test_renders_date_sheet() {
        let mut screen = screen();
        screen.open_modal(ModalKind::StartDate);

        let output = render(&screen, 60, 40);
        assert!(output.contains("Start Date"));
        assert!(output.contains("Apr"));
        assert!(output.contains("2025"));
    }

    #[test]
    fn test_renders_status_message() {
        let mut screen = screen();
        screen.save();
        let output = render(&screen, 70, 24);
        assert!(output.contains("saved successfully"));
    }

    /// Text drawn inside `cell`, one line per row
    fn text_in(screen: &EditScreen, width: u16, height: u16, cell: SheetRect) -> String {
        let backend = TestBackend::new(width, height);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| ui(f, screen)).unwrap();
        let buf = terminal.backend().buffer();
        let mut s = String::new();
        for y in cell.y..cell.y + cell.height {
            for x in cell.x..cell.x + cell.width {
                s.push_str(buf.get(x, y).symbol());
            }
            s.push('\n');
        }
        s
    }

    #[test]
    fn test_keypad_click_lands_on_drawn_key() {
        let mut screen = screen();
        screen.open_modal(ModalKind::Amount);
        let area = SheetRect::new(0, 0, 80, 40);
        let sheet = sheet::sheet_area(area, ModalKind::Amount.height_fraction());
        let layout = sheet::sheet_layout(sheet);
        let two = sheet::keypad_layout(layout.body).cells[0][1];

        let drawn = text_in(&screen, 80, 40, two);
        assert!(drawn.contains('2'));
        assert!(drawn.contains("ABC"));

        let hit = click_target(&screen, area, two.x + two.width / 2, two.y + two.height / 2);
        assert_eq!(hit, Some(SheetHit::Key(Key::Digit(2))));
        screen.click(SheetHit::Key(Key::Digit(2)));
        assert_eq!(screen.amount_editor.buffer().as_str(), "502");

        assert!(text_in(&screen, 80, 40, layout.done).contains("Done"));
        let done = click_target(&screen, area, layout.done.x + layout.done.width - 1, layout.done.y);
        assert_eq!(done, Some(SheetHit::Done));
        screen.click(SheetHit::Done);
        assert_eq!(screen.record().amount, 502.0);
        assert_eq!(screen.active_modal(), None);
    }

    #[test]
    fn test_list_click_follows_scrolled_rows() {
        let mut screen = screen();
        // Category opens on Loan (index 3); a 12-row terminal shows 3 list rows
        screen.open_modal(ModalKind::Category);
        let area = SheetRect::new(0, 0, 60, 12);
        let sheet = sheet::sheet_area(area, ModalKind::Category.height_fraction());
        let (_, list) = sheet::list_layout(sheet::sheet_layout(sheet).body, false);
        assert_eq!(list.height, 3);

        let first_row = SheetRect::new(list.x, list.y, list.width, 1);
        assert!(text_in(&screen, 60, 12, first_row).contains("Utility"));

        let hit = click_target(&screen, area, list.x + 4, list.y);
        assert_eq!(hit, Some(SheetHit::ListRow(1)));
        screen.click(SheetHit::ListRow(1));
        assert_eq!(screen.record().category_name(), "Utility");
    }

    #[test]
    fn test_click_target_needs_open_sheet() {
        let screen = screen();
        assert_eq!(click_target(&screen, SheetRect::new(0, 0, 80, 40), 10, 30), None);
    }

    static RESTORES: AtomicUsize = AtomicUsize::new(0);

    fn count_restore() -> io::Result<()> {
        RESTORES.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn failing_setup() -> io::Result<()> {
        Err(io::Error::new(io::ErrorKind::Other, "no tty"))
    }

    #[test]
    fn test_terminal_restored_when_setup_fails() {
        let before = RESTORES.load(Ordering::SeqCst);
        assert!(TerminalGuard::enter(failing_setup, count_restore).is_err());
        assert_eq!(RESTORES.load(Ordering::SeqCst), before + 1);
    }

    #[test]
    fn test_map_key() {
        let key = KeyEvent::new(KeyCode::Char('5'), KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Input::Char('5')));
        let key = KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE);
        assert_eq!(map_key(key), Some(Input::Backspace));
        let key = KeyEvent::new(KeyCode::F(1), KeyModifiers::NONE);
        assert_eq!(map_key(key), None);
    }
}
