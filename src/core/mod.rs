//! Core logic – fade computation, the controller that keeps it in sync with a
//! viewport, and pager content sources.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod controller;
pub mod error;
pub mod fade;
pub mod source;
pub mod viewport;
