//! LLM Backend Abstraction
//!
//! The model service boundary. [`LlmBackend`] is the trait the rest of the
//! crate programs against; [`OllamaBackend`] is the shipped implementation.

pub mod ollama;
pub mod traits;

pub use ollama::OllamaBackend;
pub use traits::{BackendConfig, LlmBackend, LlmRequest, LlmResponse, ModelInfo};
