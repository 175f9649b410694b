//! `tempmail` — a disposable-mailbox simulator for the terminal.
//!
//! This crate provides the session core (address generation, expiry
//! countdown, simulated message feed) behind a presenter boundary, plus
//! a ratatui front end that drives it.

pub mod config;
pub mod error;
pub mod model;
pub mod session;
pub mod tui;
