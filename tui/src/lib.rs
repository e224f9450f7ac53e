//! Menagerie TUI - Terminal interface for the animal of the day generator
//!
//! A thin client over `menagerie-core`: it converts key presses to
//! `UiEvent`s, applies `KeeperMessage`s to a display state, and renders
//! that state with ratatui. All orchestration lives in the core crate.

pub mod app;
pub mod clipboard;
pub mod display;
pub mod theme;

pub use app::App;
