//! Scry: a local-first Substrate node TUI dashboard
//!
//! The library target exposes the domain and infrastructure modules
//! so integration tests can drive the search engine without a
//! terminal.

pub mod app;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod search;
pub mod ui;
