//! TUI application state and event handling.
//!
//! The `App` owns an [`InventorySession`] and re-runs the current search whenever the
//! query, the selected character, or the underlying inventory changes. It manages:
//!
//! - **Live reload**: The session is polled once per [`POLL_INTERVAL`]; a completed pass is
//!   swapped in and the previous character selection is kept when it still exists
//! - **Character scope**: Up/Down cycle through the selector (wrapping), F2 jumps to `All`
//! - **Status messages**: Transient feedback for reloads and problems
//! - **Dirty state tracking**: Rendering only happens when state changes

use std::time::{Duration, Instant};

use anyhow::Result;
use ratatui::Terminal;
use ratatui::backend::Backend;

use super::events::{Action, poll_event};
use super::rendering::{RenderState, render_ui};
use crate::indexer::{NoInventory, POLL_INTERVAL};
use crate::models::{ALL_SCOPE, Scope, SearchResults};
use crate::session::{InventorySession, PollOutcome};

/// Duration for success status messages (milliseconds)
const STATUS_SUCCESS_DURATION_MS: u64 = 3000;
/// Duration for error status messages (milliseconds)
const STATUS_ERROR_DURATION_MS: u64 = 5000;
/// Longest accepted search query, in characters
const MAX_QUERY_CHARS: usize = 256;
/// Rows moved by PageUp/PageDown
const PAGE_ROWS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

/// Transient status message with expiry
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub message_type: MessageType,
    pub expires_at: Instant,
}

pub struct App {
    session: InventorySession,
    search_query: String,
    characters: Vec<String>,
    selected_character: usize,
    results: SearchResults,
    scroll: usize,
    should_quit: bool,
    status_message: Option<StatusMessage>,
    last_poll: Option<Instant>,
    needs_redraw: bool,
    last_draw_time: Instant,
}

impl App {
    pub fn new(session: InventorySession) -> Self {
        Self {
            session,
            search_query: String::new(),
            characters: vec![ALL_SCOPE.to_string()],
            selected_character: 0,
            results: SearchResults::default(),
            scroll: 0,
            should_quit: false,
            status_message: None,
            last_poll: None,
            needs_redraw: true,
            last_draw_time: Instant::now(),
        }
    }

    fn set_status(&mut self, text: impl Into<String>, message_type: MessageType, duration_ms: u64) {
        self.status_message = Some(StatusMessage {
            text: text.into(),
            message_type,
            expires_at: Instant::now() + Duration::from_millis(duration_ms),
        });
        self.needs_redraw = true;
    }

    fn check_and_clear_expired_status(&mut self) {
        let expired =
            self.status_message.as_ref().is_some_and(|msg| Instant::now() >= msg.expires_at);
        if expired {
            self.status_message = None;
            self.needs_redraw = true;
        }
    }

    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> Result<()> {
        while !self.should_quit {
            if self.last_poll.is_none_or(|at| at.elapsed() >= POLL_INTERVAL) {
                self.poll_session();
                self.last_poll = Some(Instant::now());
            }

            self.check_and_clear_expired_status();

            // Redraw at least once a second so the "loaded ... ago" text stays current
            let now = Instant::now();
            if self.needs_redraw || now.duration_since(self.last_draw_time) >= POLL_INTERVAL {
                let inventory = self.session.current();
                terminal.draw(|f| {
                    let state = RenderState {
                        search_query: &self.search_query,
                        characters: &self.characters,
                        selected_character: self.selected_character,
                        results: &self.results,
                        scroll: self.scroll,
                        inventory: inventory.as_deref(),
                        no_inventory: self.session.no_inventory(),
                        status_message: self.status_message.as_ref(),
                    };
                    render_ui(f, &state);
                })?;
                self.needs_redraw = false;
                self.last_draw_time = now;
            }

            let action = poll_event(Duration::from_millis(100))?;
            self.handle_action(action);
        }

        Ok(())
    }

    fn poll_session(&mut self) {
        match self.session.poll() {
            PollOutcome::Unchanged => {}
            PollOutcome::Reloaded => self.on_reloaded(),
            PollOutcome::NoInventory(reason) => self.on_no_inventory(reason),
        }
    }

    fn force_reload(&mut self) {
        match self.session.force_reload() {
            PollOutcome::Reloaded => {
                self.on_reloaded();
                if self.status_message.is_none() {
                    self.set_status(
                        "✓ Reloaded inventory",
                        MessageType::Success,
                        STATUS_SUCCESS_DURATION_MS,
                    );
                }
            }
            PollOutcome::NoInventory(reason) => self.on_no_inventory(reason),
            PollOutcome::Unchanged => {}
        }
    }

    fn on_reloaded(&mut self) {
        let Some(inventory) = self.session.current() else {
            return;
        };

        let previous = self.selected_label().to_string();
        self.characters = inventory.characters.clone();
        self.selected_character =
            self.characters.iter().position(|c| *c == previous).unwrap_or(0);

        if !inventory.warnings.is_empty() {
            self.set_status(
                format!("✗ {} (+{} more)", inventory.warnings[0], inventory.warnings.len() - 1),
                MessageType::Error,
                STATUS_ERROR_DURATION_MS,
            );
        }

        self.refresh_results();
    }

    fn on_no_inventory(&mut self, reason: NoInventory) {
        self.characters = vec![ALL_SCOPE.to_string()];
        self.selected_character = 0;
        self.set_status(format!("✗ {}", reason), MessageType::Error, STATUS_ERROR_DURATION_MS);
        self.refresh_results();
    }

    fn selected_label(&self) -> &str {
        self.characters.get(self.selected_character).map_or(ALL_SCOPE, String::as_str)
    }

    fn refresh_results(&mut self) {
        let scope = Scope::from_label(self.selected_label());
        self.results = self.session.search(&self.search_query, &scope);
        self.scroll = 0;
        self.needs_redraw = true;
    }

    /// Handle a user action (extracted for testing)
    fn handle_action(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::ClearSearch => {
                if self.search_query.is_empty() {
                    self.should_quit = true;
                } else {
                    self.search_query.clear();
                    self.refresh_results();
                }
            }
            Action::PreviousCharacter => self.cycle_character(false),
            Action::NextCharacter => self.cycle_character(true),
            Action::SelectAllCharacters => {
                if self.selected_character != 0 {
                    self.selected_character = 0;
                    self.refresh_results();
                }
            }
            Action::PageUp => self.scroll_by(-(PAGE_ROWS as isize)),
            Action::PageDown => self.scroll_by(PAGE_ROWS as isize),
            Action::ToggleItemIds => {
                let show = !self.session.settings().show_item_ids;
                self.session.set_show_item_ids(show);
                self.refresh_results();
            }
            Action::Reload => self.force_reload(),
            Action::UpdateSearch(c) => self.update_search(c),
            Action::DeleteChar => self.delete_char(),
            Action::None => {}
        }
    }

    fn cycle_character(&mut self, forward: bool) {
        let count = self.characters.len();
        if count <= 1 {
            return;
        }
        self.selected_character = if forward {
            (self.selected_character + 1) % count
        } else {
            (self.selected_character + count - 1) % count
        };
        self.refresh_results();
    }

    fn scroll_by(&mut self, delta: isize) {
        let total = self.results.flatten().len();
        if total == 0 {
            self.scroll = 0;
            return;
        }

        let old = self.scroll;
        self.scroll = self.scroll.saturating_add_signed(delta).min(total - 1);
        if old != self.scroll {
            self.needs_redraw = true;
        }
    }

    fn update_search(&mut self, c: char) {
        if self.search_query.chars().count() < MAX_QUERY_CHARS {
            self.search_query.push(c);
            self.refresh_results();
        }
    }

    fn delete_char(&mut self) {
        if self.search_query.pop().is_some() {
            self.refresh_results();
        }
    }
}
