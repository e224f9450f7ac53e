//! Menagerie Core - Headless Content Orchestration
//!
//! This crate provides the orchestration logic for menagerie, a generator
//! of fictional "animals of the day" and their derivative YouTube content,
//! completely independent of any UI framework. It can drive a TUI, a GUI,
//! or run headless for testing.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────┐
//! │                     UI Surface                       │
//! │              (menagerie-tui, headless)               │
//! │                         │                            │
//! │                  UiEvent (up)                        │
//! │               KeeperMessage (down)                   │
//! └─────────────────────────┼────────────────────────────┘
//! ┌─────────────────────────┼────────────────────────────┐
//! │                      KEEPER                          │
//! │  ┌──────────┐  ┌───────────────┐  ┌───────────────┐  │
//! │  │ Session  │  │ ContentFacade │  │ Backend (LLM) │  │
//! │  │  State   │  │  (4 requests) │  │   (Ollama)    │  │
//! │  └──────────┘  └───────────────┘  └───────────────┘  │
//! └──────────────────────────────────────────────────────┘
//! ```
//!
//! # Key Types
//!
//! - [`Keeper`]: the orchestrator that ties everything together
//! - [`SessionState`]: history, selection, and derived-content state
//! - [`ContentFacade`]: the four opaque content-generation operations
//! - [`KeeperMessage`] / [`UiEvent`]: the surface protocol
//!
//! # Module Overview
//!
//! - [`animal`]: generated-content data model
//! - [`backend`]: LLM backend abstraction (Ollama)
//! - [`config`]: keeper configuration
//! - [`events`]: events from the UI surface to the keeper
//! - [`facade`]: the content service facade
//! - [`keeper`]: the orchestrator
//! - [`messages`]: messages from the keeper to the UI surface
//! - [`prompts`]: prompt templates and model-output normalization
//! - [`session`]: the explicit session state container
//!
//! # No TUI Dependencies
//!
//! This crate has **zero** dependencies on ratatui, crossterm, or any other
//! UI framework. It's pure orchestration logic that can be used anywhere.

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod animal;
pub mod backend;
pub mod config;
pub mod events;
pub mod facade;
pub mod keeper;
pub mod messages;
pub mod prompts;
pub mod session;

// Re-exports for convenience
pub use animal::{AnimalRecord, DualLangContent, Language, VideoPrompts, YouTubeContent};
pub use backend::{BackendConfig, LlmBackend, LlmRequest, LlmResponse, ModelInfo, OllamaBackend};
pub use config::KeeperConfig;
pub use events::UiEvent;
pub use facade::{ContentFacade, FacadeError};
pub use keeper::Keeper;
pub use messages::{KeeperMessage, Section};
pub use prompts::normalize_prompt_lines;
pub use session::{DuplicateName, SectionState, SessionState};
