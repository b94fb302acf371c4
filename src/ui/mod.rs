//! Terminal UI rendering using ratatui.
//!
//! This module contains all the view-specific rendering logic for the TUI.
//!
//! ## Submodules
//!
//! - [`card`]: Pure record → card-content transform
//! - [`grid`]: Card ownership (visibility flags) and the card grid view
//! - [`detail`]: Enlarged single-card view shown in place of the grid
//! - [`common`]: Shared components (header, status bar, help overlay)
//! - [`theme`]: Light/dark theme with toggle and terminal auto-detection
//!
//! ## Rendering Architecture
//!
//! The main loop in `main.rs` calls into these modules based on the
//! current view:
//!
//! ```text
//! ┌──────────────────────────────────────┐
//! │ Header (common::render_header)       │
//! ├──────────────────────────────────────┤
//! │                                      │
//! │ View Content                         │
//! │ (grid::render XOR detail::render)    │
//! │                                      │
//! ├──────────────────────────────────────┤
//! │ Status Bar (common::render_status)   │
//! └──────────────────────────────────────┘
//!         ↑
//!    Overlay rendered on top:
//!    - common::render_help
//! ```

pub mod card;
pub mod common;
pub mod detail;
pub mod grid;
pub mod theme;

pub use grid::{CardGrid, RenderedCard};
pub use theme::Theme;
