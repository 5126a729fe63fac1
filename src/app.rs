//! Application state management.
//!
//! Holds what the screen shows (rows, notice, page label, detail dialog,
//! search input) and turns key presses into browser actions.

use crate::browser::{ListingsView, TableNotice};
use crate::listings::{Listing, ListingDetails};
use crossterm::event::{KeyCode, KeyModifiers};

/// Which part of the UI receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Row navigation and paging
    Table,
    /// Typing into the search input
    Search,
    /// Detail dialog is open
    Details,
}

/// Browser-level action requested by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    SubmitSearch,
    ClearSearch,
    PreviousPage,
    NextPage,
    /// Open the detail dialog for the row at this index
    ShowDetails(usize),
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Listings of the current page, in server order
    pub rows: Vec<Listing>,
    /// Single-row message shown instead of rows
    pub notice: Option<TableNotice>,
    /// Selected row index
    pub selected_index: usize,
    /// Search input text
    pub search_input: String,
    /// Name filter of the rows on screen
    pub active_filter: Option<String>,
    /// Page indicator text
    pub page_label: String,
    /// Content of the open detail dialog
    pub details: Option<ListingDetails>,
    /// Current UI mode
    pub mode: UiMode,
    /// Status message to display
    pub status_message: Option<String>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            rows: Vec::new(),
            notice: None,
            selected_index: 0,
            search_input: String::new(),
            active_filter: None,
            page_label: "Page 1".to_string(),
            details: None,
            mode: UiMode::Table,
            status_message: None,
        }
    }

    /// Handle a key press.
    ///
    /// # Arguments
    /// * `code` - Key code
    /// * `modifiers` - Active modifiers
    ///
    /// # Returns
    /// * `Option<Action>` - Action for the browser, if the key maps to one
    ///
    /// # Details
    /// Purely local effects (selection, typing, mode switches, closing the
    /// dialog) are applied here.
    pub fn handle_key(&mut self, code: KeyCode, modifiers: KeyModifiers) -> Option<Action> {
        if code == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Action::Quit);
        }

        match self.mode {
            UiMode::Table => match code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => Some(Action::Quit),
                KeyCode::Up | KeyCode::Char('k') => {
                    self.move_up();
                    None
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    self.move_down();
                    None
                }
                KeyCode::Enter => self
                    .selected_listing()
                    .map(|_| Action::ShowDetails(self.selected_index)),
                KeyCode::Char('/') => {
                    self.mode = UiMode::Search;
                    None
                }
                KeyCode::Char('c') => Some(Action::ClearSearch),
                KeyCode::Left | KeyCode::Char('p') => Some(Action::PreviousPage),
                KeyCode::Right | KeyCode::Char('n') => Some(Action::NextPage),
                _ => None,
            },
            UiMode::Search => match code {
                KeyCode::Enter => {
                    self.mode = UiMode::Table;
                    Some(Action::SubmitSearch)
                }
                KeyCode::Esc => {
                    self.mode = UiMode::Table;
                    None
                }
                KeyCode::Backspace => {
                    self.search_input.pop();
                    None
                }
                KeyCode::Char(c) => {
                    self.search_input.push(c);
                    None
                }
                _ => None,
            },
            UiMode::Details => {
                if matches!(
                    code,
                    KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') | KeyCode::Char('Q')
                ) {
                    self.close_details();
                }
                None
            }
        }
    }

    /// Handle a left click on table row `index`.
    pub fn click_row(&mut self, index: usize) -> Option<Action> {
        if self.mode != UiMode::Table || index >= self.rows.len() {
            return None;
        }
        self.selected_index = index;
        Some(Action::ShowDetails(index))
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = self.rows.len() - 1;
        } else {
            self.selected_index -= 1;
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        if self.rows.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.rows.len();
    }

    /// Get the currently selected listing.
    pub fn selected_listing(&self) -> Option<&Listing> {
        self.rows.get(self.selected_index)
    }

    /// Close the detail dialog.
    pub fn close_details(&mut self) {
        self.details = None;
        if self.mode == UiMode::Details {
            self.mode = UiMode::Table;
        }
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }

    /// Clear status message.
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }
}

impl ListingsView for App {
    fn render_rows(&mut self, rows: Vec<Listing>) {
        self.rows = rows;
        self.notice = None;
        self.selected_index = 0;
    }

    fn render_notice(&mut self, notice: TableNotice) {
        self.rows.clear();
        self.notice = Some(notice);
        self.selected_index = 0;
    }

    fn set_page_indicator(&mut self, page: u32) {
        self.page_label = format!("Page {}", page);
    }

    fn set_active_filter(&mut self, name: Option<&str>) {
        self.active_filter = name.map(str::to_string);
    }

    fn open_details(&mut self, details: ListingDetails) {
        self.details = Some(details);
        self.mode = UiMode::Details;
    }

    fn clear_search_input(&mut self) {
        self.search_input.clear();
    }
}
