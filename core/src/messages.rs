//! Keeper Messages
//!
//! Messages sent from the Keeper to the UI surface. The surface is a pure
//! renderer: it applies these to its display state and draws, with no
//! business logic of its own. This separation keeps the orchestration core
//! free of UI dependencies and lets tests drive the keeper headless.

use serde::{Deserialize, Serialize};

use crate::animal::{AnimalRecord, DualLangContent, VideoPrompts};

/// One of the three derived-content sections.
///
/// Each section has fully independent loading and error state; a failure in
/// one never touches the other two.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Section {
    /// YouTube title and description (both languages).
    YouTube,
    /// YouTube tag string (English).
    Tags,
    /// Text-to-video prompts (both languages).
    Prompts,
}

impl Section {
    /// Human-readable section title.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Section::YouTube => "YouTube content",
            Section::Tags => "YouTube tags (EN)",
            Section::Prompts => "Video prompts",
        }
    }
}

/// Messages from Keeper to the UI surface.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum KeeperMessage {
    /// An animal generation request is in flight.
    GenerationStarted,

    /// A new animal was accepted into the history and selected.
    AnimalReady {
        /// The newly generated animal.
        animal: AnimalRecord,
        /// All history names, newest first (including this animal).
        history: Vec<String>,
    },

    /// Generation failed terminally for this invocation.
    GenerationFailed {
        /// Human-readable error to show near the generate control.
        error: String,
    },

    /// The user re-selected an animal from the history.
    SelectionChanged {
        /// The newly selected animal.
        animal: AnimalRecord,
        /// Its index in the history (0 = newest).
        index: usize,
    },

    /// A derived-content request is in flight.
    SectionStarted {
        /// Which section is loading.
        section: Section,
    },

    /// YouTube content for the current selection is ready.
    YouTubeReady {
        /// Title and description in both languages.
        content: DualLangContent,
    },

    /// The tag string for the current selection is ready.
    TagsReady {
        /// Comma-separated English tags.
        tags: String,
    },

    /// Video prompts for the current selection are ready.
    PromptsReady {
        /// Prompt lists in both languages.
        prompts: VideoPrompts,
    },

    /// A derived-content request failed.
    SectionFailed {
        /// Which section failed.
        section: Section,
        /// Human-readable error to show inside that section only.
        error: String,
    },

    /// Scroll the view back to the top (new animal or history selection).
    ScrollToTop,
}
