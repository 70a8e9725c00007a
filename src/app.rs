use std::time::{Duration, Instant};

use chrono::{DateTime, Local};

use crate::config::Endpoint;
use crate::domain::block::{Header, SearchMode};

/// Panels the keyboard focus can sit on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Accounts,
    Blocks,
    Search,
}

impl Focus {
    pub fn title(&self) -> &'static str {
        match self {
            Focus::Accounts => "Accounts",
            Focus::Blocks => "Blocks",
            Focus::Search => "Search",
        }
    }

    pub fn next(&self) -> Focus {
        match self {
            Focus::Accounts => Focus::Blocks,
            Focus::Blocks => Focus::Search,
            Focus::Search => Focus::Accounts,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing into the search parameter field
    Editing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Warn,
    Error,
}

/// Transient message in the status line, expires after a few seconds
#[derive(Debug, Clone)]
pub struct StatusMessage {
    pub text: String,
    pub level: StatusLevel,
    pub since: Instant,
}

/// One row of the latest-blocks feed
#[derive(Debug, Clone)]
pub struct BlockRow {
    pub chain: String,
    pub number: u64,
    pub hash: String,
    pub seen_at: DateTime<Local>,
}

/// Where a search currently stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPhase {
    Idle,
    Resolving,
    Correlating,
    Done,
    Failed,
}

/// A submission handed to the worker, tagged for staleness checks
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub seq: u64,
    pub mode: SearchMode,
    pub param: String,
}

/// The block-search state machine.
///
/// Results arrive asynchronously tagged with the sequence number of
/// the submission that produced them; anything but the latest issued
/// sequence number is dropped, so overlapping submissions settle on
/// last-submission-wins.
#[derive(Debug)]
pub struct SearchSession {
    pub mode: SearchMode,
    pub param_text: String,
    pub status: Option<String>,
    pub report: Option<String>,
    pub phase: SearchPhase,
    next_seq: u64,
    current_seq: Option<u64>,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            mode: SearchMode::BlockNumber,
            param_text: String::new(),
            status: None,
            report: None,
            phase: SearchPhase::Idle,
            next_seq: 0,
            current_seq: None,
        }
    }

    /// Switch search mode. Clears the parameter only; a prior result
    /// stays visible until the next search replaces it.
    pub fn change_mode(&mut self, mode: SearchMode) {
        self.mode = mode;
        self.param_text.clear();
        self.phase = SearchPhase::Idle;
    }

    pub fn toggle_mode(&mut self) {
        self.change_mode(self.mode.toggled());
    }

    /// Submit the current parameter. Empty input is a boundary
    /// precondition failure and produces no request.
    pub fn submit(&mut self) -> Option<SearchRequest> {
        let param = self.param_text.trim().to_string();
        if param.is_empty() {
            return None;
        }
        self.next_seq += 1;
        let seq = self.next_seq;
        self.current_seq = Some(seq);
        self.phase = SearchPhase::Resolving;
        Some(SearchRequest {
            seq,
            mode: self.mode,
            param,
        })
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.phase, SearchPhase::Resolving | SearchPhase::Correlating)
    }

    fn is_current(&self, seq: u64) -> bool {
        self.current_seq == Some(seq)
    }

    /// The resolver found the block; correlation runs next
    pub fn apply_resolved(&mut self, seq: u64, status: String) {
        if !self.is_current(seq) {
            return;
        }
        self.status = Some(status);
        self.phase = SearchPhase::Correlating;
    }

    /// The report is ready; the parameter clears for the next search
    pub fn apply_completed(&mut self, seq: u64, report: String) {
        if !self.is_current(seq) {
            return;
        }
        self.report = Some(report);
        self.param_text.clear();
        self.phase = SearchPhase::Done;
    }

    /// The search failed. The status takes the error string; the
    /// report keeps whatever the previous search produced.
    pub fn apply_failed(&mut self, seq: u64, message: &str) {
        if !self.is_current(seq) {
            return;
        }
        self.status = Some(format!("ERROR: {message}"));
        self.phase = SearchPhase::Failed;
    }
}

#[derive(Debug)]
pub struct App {
    pub search: SearchSession,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub chain: String,
    pub connected: bool,
    pub endpoint: String,
    pub endpoints: Vec<Endpoint>,
    pub endpoint_index: usize,
    pub accounts: Vec<String>,
    pub selected_account: usize,
    pub blocks: Vec<BlockRow>,
    pub selected_block: usize,
    pub follow_blocks: bool,
    pub max_blocks: usize,
    pub status: Option<StatusMessage>,
    pub pending_search: Option<SearchRequest>,
    pub pending_endpoint_switch: Option<usize>,
    pub help_open: bool,
    pub should_quit: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            search: SearchSession::new(),
            focus: Focus::Search,
            input_mode: InputMode::Normal,
            chain: String::new(),
            connected: false,
            endpoint: String::new(),
            endpoints: Vec::new(),
            endpoint_index: 0,
            accounts: Vec::new(),
            selected_account: 0,
            blocks: Vec::new(),
            selected_block: 0,
            follow_blocks: true,
            max_blocks: 50,
            status: None,
            pending_search: None,
            pending_endpoint_switch: None,
            help_open: false,
            should_quit: false,
        }
    }

    pub fn set_status(&mut self, text: impl Into<String>, level: StatusLevel) {
        self.status = Some(StatusMessage {
            text: text.into(),
            level,
            since: Instant::now(),
        });
    }

    pub fn status_text(&self) -> Option<(&str, StatusLevel)> {
        self.status
            .as_ref()
            .map(|status| (status.text.as_str(), status.level))
    }

    pub fn on_tick(&mut self) {
        if let Some(status) = self.status.as_ref() {
            if status.since.elapsed() > Duration::from_secs(3) {
                self.status = None;
            }
        }
    }

    // --- runtime event application -------------------------------------

    pub fn apply_connected(&mut self, endpoint: String, chain: String, accounts: Vec<String>) {
        self.connected = true;
        self.endpoint = endpoint;
        self.chain = chain.clone();
        self.accounts = accounts;
        self.selected_account = 0;
        self.set_status(format!("Connected to {chain}"), StatusLevel::Info);
    }

    pub fn apply_runtime_error(&mut self, message: String) {
        self.connected = false;
        self.set_status(message, StatusLevel::Error);
    }

    /// Append a head row, dropping the oldest past `max_blocks`.
    /// Selection follows the tail unless the user moved off it.
    pub fn ingest_head(&mut self, chain: String, header: Header) {
        let was_tail = self.follow_blocks || self.selected_block + 1 == self.blocks.len();
        self.blocks.push(BlockRow {
            chain,
            number: header.number,
            hash: header.hash,
            seen_at: Local::now(),
        });
        if self.blocks.len() > self.max_blocks {
            let overflow = self.blocks.len() - self.max_blocks;
            self.blocks.drain(0..overflow);
            self.selected_block = self.selected_block.saturating_sub(overflow);
        }
        if was_tail {
            self.selected_block = self.blocks.len().saturating_sub(1);
        }
    }

    // --- search boundary ------------------------------------------------

    /// Submit the current search parameter; the request is picked up
    /// by the bridge pump on the next pass.
    pub fn submit_search(&mut self) {
        match self.search.submit() {
            Some(request) => {
                self.set_status("Searching…", StatusLevel::Info);
                self.pending_search = Some(request);
            }
            None => self.set_status("Enter a block number or hash first", StatusLevel::Warn),
        }
    }

    pub fn take_search_request(&mut self) -> Option<SearchRequest> {
        self.pending_search.take()
    }

    pub fn take_endpoint_switch_request(&mut self) -> Option<usize> {
        self.pending_endpoint_switch.take()
    }

    pub fn cycle_endpoint(&mut self, forward: bool) {
        if self.endpoints.len() < 2 {
            self.set_status("No other endpoints configured", StatusLevel::Warn);
            return;
        }
        let len = self.endpoints.len();
        self.endpoint_index = if forward {
            (self.endpoint_index + 1) % len
        } else {
            (self.endpoint_index + len - 1) % len
        };
        let label = self.endpoints[self.endpoint_index].label();
        self.pending_endpoint_switch = Some(self.endpoint_index);
        self.blocks.clear();
        self.selected_block = 0;
        self.follow_blocks = true;
        self.connected = false;
        self.set_status(format!("Switching to {label}…"), StatusLevel::Info);
    }

    // --- selection ------------------------------------------------------

    pub fn move_selection_up(&mut self) {
        match self.focus {
            Focus::Accounts => {
                if self.selected_account > 0 {
                    self.selected_account -= 1;
                }
            }
            Focus::Blocks => {
                if self.selected_block > 0 {
                    self.selected_block -= 1;
                }
                self.follow_blocks = false;
            }
            Focus::Search => {}
        }
    }

    pub fn move_selection_down(&mut self) {
        match self.focus {
            Focus::Accounts => {
                if self.selected_account + 1 < self.accounts.len() {
                    self.selected_account += 1;
                }
            }
            Focus::Blocks => {
                if self.selected_block + 1 < self.blocks.len() {
                    self.selected_block += 1;
                }
                self.follow_blocks = self.selected_block + 1 == self.blocks.len();
            }
            Focus::Search => {}
        }
    }

    pub fn selected_block_row(&self) -> Option<&BlockRow> {
        self.blocks.get(self.selected_block)
    }

    pub fn selected_account(&self) -> Option<&str> {
        self.accounts.get(self.selected_account).map(String::as_str)
    }

    /// What `y` copies: the focused panel's current item
    pub fn copy_payload(&self) -> Option<String> {
        match self.focus {
            Focus::Accounts => self.selected_account().map(str::to_string),
            Focus::Blocks => self.selected_block_row().map(|row| row.hash.clone()),
            Focus::Search => self.search.report.clone(),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}
