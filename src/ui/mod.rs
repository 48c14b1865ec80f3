//! # UI Module
//!
//! The cursor-based terminal interface for deckhand.
//!
//! ## Components
//!
//! - [`App`] - selection-model state (snapshot, cursor, output buffer)
//! - [`mod@layout`] - pure panel split, windowing, truncation and wrapping
//! - [`mod@render`] - drawing the two panels with ratatui
//! - [`theme::Theme`] - resolved colors for the four themed slots
//!
//! ## Layout
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ Context Deck                                     │
//! │  >*[✓] Docker Services - Start/stop containers   │
//! │    [✗] VPN Connection - Connect to company VPN   │
//! │ ↑/↓ navigate • space run • q quit                │
//! ├──────────────────────────────────────────────────┤
//! │ Output / Details                                 │
//! │  Command: docker-compose up -d                   │
//! │  Exit Code: 0                                    │
//! └──────────────────────────────────────────────────┘
//! ```

pub mod app;
pub mod layout;
pub mod render;
pub mod theme;

pub use app::{App, AppEvent};
pub use render::render;
