use anyhow::{Context, Result};
use crossterm::event::KeyCode;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::*;
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState, Wrap};
use ratatui::Frame;

use crate::models::Record;
use crate::store::RecordStore;

use super::forms::{ItemField, ItemForm, LABEL_WIDTH};
use super::helpers::{display_width, key_hint, single_line, surface_error};
use super::table::ItemTable;

/// Height of the search bar, borders included.
const SEARCH_HEIGHT: u16 = 3;
/// Height of the add form: three fields plus borders.
const FORM_HEIGHT: u16 = 5;
/// Footer space reserved for status messages and instructions.
const FOOTER_HEIGHT: u16 = 3;
/// Rows skipped by PageUp/PageDown in the items table.
const PAGE_STEP: isize = 10;
const SEARCH_PREFIX: &str = "Search: ";

/// Which widget receives typed characters.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Focus {
    Search,
    Form(ItemField),
    Items,
}

impl Focus {
    /// Tab order: search, the three form fields, then the table.
    fn next(self) -> Focus {
        match self {
            Focus::Search => Focus::Form(ItemField::Title),
            Focus::Form(field) => field.next().map(Focus::Form).unwrap_or(Focus::Items),
            Focus::Items => Focus::Search,
        }
    }

    fn previous(self) -> Focus {
        match self {
            Focus::Search => Focus::Items,
            Focus::Form(field) => field.previous().map(Focus::Form).unwrap_or(Focus::Search),
            Focus::Items => Focus::Form(ItemField::Tags),
        }
    }
}

/// Holds the footer message text plus its severity.
struct StatusMessage {
    text: String,
    kind: StatusKind,
}

/// Severity levels shown in the footer.
enum StatusKind {
    Info,
    Error,
}

impl StatusKind {
    fn style(&self) -> Style {
        match self {
            StatusKind::Info => Style::default().fg(Color::Green),
            StatusKind::Error => Style::default().fg(Color::Red),
        }
    }
}

/// State of the terminal UI. The app owns the store for the whole session and
/// only talks to it through [`RecordStore`].
pub struct App<S: RecordStore> {
    store: S,
    table: ItemTable,
    search: String,
    form: ItemForm,
    focus: Focus,
    status: Option<StatusMessage>,
}

impl<S: RecordStore> App<S> {
    /// Initialize the store and load every item for the first frame.
    pub fn new(mut store: S) -> Result<Self> {
        store.initialize().context("failed to initialize record store")?;
        let records = store.list_all().context("failed to load items")?;

        let mut table = ItemTable::default();
        table.set_records(records);

        Ok(Self {
            store,
            table,
            search: String::new(),
            form: ItemForm::default(),
            focus: Focus::Search,
            status: None,
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Give the store back, typically so the caller can close it.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Rows currently displayed, in store order.
    pub fn records(&self) -> &[Record] {
        self.table.records()
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Text of the footer status line, if any.
    pub fn status_text(&self) -> Option<&str> {
        self.status.as_ref().map(|status| status.text.as_str())
    }

    /// Process a plain key press. Returns `true` when the user asked to quit.
    pub fn handle_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Esc => return true,
            KeyCode::Tab => {
                self.focus = self.focus.next();
                return false;
            }
            KeyCode::BackTab => {
                self.focus = self.focus.previous();
                return false;
            }
            _ => {}
        }

        match self.focus {
            Focus::Search => self.handle_search_key(code),
            Focus::Form(field) => self.handle_form_key(code, field),
            Focus::Items => return self.handle_items_key(code),
        }
        false
    }

    /// Process a key pressed together with Ctrl. Returns `true` on quit.
    pub fn handle_ctrl_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('c') | KeyCode::Char('q') => return true,
            KeyCode::Char('l') => {
                self.search.clear();
                self.clear_status();
                self.refresh();
            }
            KeyCode::Char('u') => match self.focus {
                Focus::Search => {
                    if !self.search.is_empty() {
                        self.search.clear();
                        self.refresh();
                    }
                }
                Focus::Form(field) => self.form.clear_field(field),
                Focus::Items => {}
            },
            _ => {}
        }
        false
    }

    fn handle_search_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char(ch) if !ch.is_control() => {
                self.search.push(ch);
                self.refresh();
            }
            KeyCode::Backspace => {
                if self.search.pop().is_some() {
                    self.refresh();
                }
            }
            KeyCode::Enter => {
                self.focus = Focus::Items;
            }
            code => self.navigate_items(code),
        }
    }

    fn handle_form_key(&mut self, code: KeyCode, field: ItemField) {
        match code {
            KeyCode::Char(ch) => {
                self.form.push_char(field, ch);
            }
            KeyCode::Backspace => self.form.backspace(field),
            KeyCode::Enter => self.submit_form(),
            KeyCode::Up => {
                if let Some(previous) = field.previous() {
                    self.focus = Focus::Form(previous);
                }
            }
            KeyCode::Down => {
                if let Some(next) = field.next() {
                    self.focus = Focus::Form(next);
                }
            }
            _ => {}
        }
    }

    fn handle_items_key(&mut self, code: KeyCode) -> bool {
        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Char('/') => self.focus = Focus::Search,
            KeyCode::Char('a') | KeyCode::Char('+') => {
                self.focus = Focus::Form(ItemField::Title);
            }
            code => self.navigate_items(code),
        }
        false
    }

    fn navigate_items(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up => self.table.move_selection(-1),
            KeyCode::Down => self.table.move_selection(1),
            KeyCode::PageUp => self.table.move_selection(-PAGE_STEP),
            KeyCode::PageDown => self.table.move_selection(PAGE_STEP),
            KeyCode::Home => self.table.select_first(),
            KeyCode::End => self.table.select_last(),
            _ => {}
        }
    }

    /// Insert the form contents, clear the form, and re-run the current
    /// search so the table reflects the new row. On failure the typed values
    /// stay in the form.
    fn submit_form(&mut self) {
        let (title, description, tags) = self.form.take_inputs();
        match self.store.insert(&title, &description, &tags) {
            Ok(record) => {
                self.focus = Focus::Form(ItemField::Title);
                self.refresh();
                self.table.select_id(record.id);
                self.set_status(format!("Added item #{}.", record.id), StatusKind::Info);
            }
            Err(err) => {
                self.form = ItemForm {
                    title,
                    description,
                    tags,
                };
                let err = anyhow::Error::from(err);
                self.set_status(
                    format!("Could not add item: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    /// Reload the table from the store using the current search term. An
    /// empty term lists everything.
    fn refresh(&mut self) {
        match self.store.search(&self.search) {
            Ok(records) => {
                self.table.set_records(records);
                let stale_error = self
                    .status
                    .as_ref()
                    .is_some_and(|status| matches!(status.kind, StatusKind::Error));
                if stale_error {
                    self.clear_status();
                }
            }
            Err(err) => {
                let err = anyhow::Error::from(err);
                self.set_status(
                    format!("Could not load items: {}", surface_error(&err)),
                    StatusKind::Error,
                );
            }
        }
    }

    pub fn draw(&self, frame: &mut Frame) {
        let area = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(SEARCH_HEIGHT),
                Constraint::Length(FORM_HEIGHT),
                Constraint::Min(0),
                Constraint::Length(FOOTER_HEIGHT),
            ])
            .split(area);

        self.draw_search_bar(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_items(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn block(&self, title: String, focused: bool) -> Block<'static> {
        let border_style = if focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style)
            .title(title)
    }

    fn draw_search_bar(&self, frame: &mut Frame, area: Rect) {
        let focused = self.focus == Focus::Search;
        let block = self.block("Search".to_string(), focused);
        let inner = block.inner(area);
        let paragraph = Paragraph::new(Line::from(vec![
            Span::raw(SEARCH_PREFIX),
            Span::raw(self.search.clone()),
        ]))
        .block(block);
        frame.render_widget(paragraph, area);

        if focused && inner.height > 0 {
            let cursor_x = inner
                .x
                .saturating_add(display_width(SEARCH_PREFIX))
                .saturating_add(display_width(&self.search));
            frame.set_cursor_position((cursor_x.min(inner.right()), inner.y));
        }
    }

    fn draw_form(&self, frame: &mut Frame, area: Rect) {
        let active = match self.focus {
            Focus::Form(field) => Some(field),
            _ => None,
        };
        let block = self.block("Add New Item".to_string(), active.is_some());
        let inner = block.inner(area);

        let lines = ItemField::ALL
            .iter()
            .map(|&field| self.form.build_line(field, active == Some(field)))
            .collect::<Vec<_>>();
        frame.render_widget(Paragraph::new(lines).block(block), area);

        if let Some(field) = active {
            if field.row() < inner.height {
                let cursor_x = inner
                    .x
                    .saturating_add(LABEL_WIDTH as u16)
                    .saturating_add(self.form.value_width(field));
                frame.set_cursor_position((cursor_x.min(inner.right()), inner.y + field.row()));
            }
        }
    }

    fn draw_items(&self, frame: &mut Frame, area: Rect) {
        let title = if self.search.is_empty() {
            format!("Items ({})", self.table.len())
        } else {
            format!("Items ({} matching \"{}\")", self.table.len(), self.search)
        };
        let block = self.block(title, self.focus == Focus::Items);

        if self.table.is_empty() {
            let message = if self.search.is_empty() {
                "No items yet. Press Tab to reach the form and add one."
            } else {
                "No items match the search."
            };
            let paragraph = Paragraph::new(message)
                .block(block)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(Wrap { trim: true });
            frame.render_widget(paragraph, area);
            return;
        }

        let header = Row::new(["ID", "Title", "Description", "Tags", "Created"]).style(
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        );
        let rows = self.table.records().iter().map(|record| {
            Row::new([
                Cell::from(record.id.to_string()),
                Cell::from(single_line(&record.title)),
                Cell::from(single_line(&record.description)),
                Cell::from(single_line(&record.tags)),
                Cell::from(record.created_display()),
            ])
        });
        let widths = [
            Constraint::Length(6),
            Constraint::Percentage(20),
            Constraint::Fill(1),
            Constraint::Percentage(20),
            Constraint::Length(19),
        ];
        let table = Table::new(rows, widths)
            .header(header)
            .block(block)
            .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED))
            .highlight_symbol("> ");

        let mut state = TableState::default().with_selected(self.table.selected());
        frame.render_stateful_widget(table, area, &mut state);
    }

    fn draw_footer(&self, frame: &mut Frame, area: Rect) {
        let block = Block::default().borders(Borders::TOP);
        frame.render_widget(block.clone(), area);
        let inner = block.inner(area);

        let status_line = if let Some(status) = &self.status {
            Line::from(vec![Span::styled(status.text.clone(), status.kind.style())])
        } else {
            Line::from("")
        };

        let paragraph = Paragraph::new(vec![status_line, self.footer_instructions()])
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, inner);
    }

    fn footer_instructions(&self) -> Line<'static> {
        let mut spans = Vec::new();
        spans.extend(key_hint("[Tab]", " Next field   "));
        match self.focus {
            Focus::Search => {
                spans.extend(key_hint("[Ctrl+L]", " Clear search   "));
                spans.extend(key_hint("[↑↓]", " Scroll   "));
            }
            Focus::Form(_) => {
                spans.extend(key_hint("[Enter]", " Add item   "));
                spans.extend(key_hint("[Ctrl+U]", " Clear field   "));
            }
            Focus::Items => {
                spans.extend(key_hint("[↑↓]", " Navigate   "));
                spans.extend(key_hint("[/]", " Search   "));
                spans.extend(key_hint("[a]", " Add   "));
            }
        }
        spans.extend(key_hint("[Esc]", " Quit"));
        Line::from(spans)
    }

    fn set_status<T: Into<String>>(&mut self, text: T, kind: StatusKind) {
        self.status = Some(StatusMessage {
            text: text.into(),
            kind,
        });
    }

    fn clear_status(&mut self) {
        self.status = None;
    }
}
