//! Deckhand - a terminal deck for named command contexts
//!
//! This library provides the core functionality for storing contexts,
//! expanding and executing their commands, and driving the interactive
//! two-panel interface.

pub mod cli;
pub mod config;
pub mod exec;
pub mod store;
pub mod ui;
