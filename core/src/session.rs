//! Session State
//!
//! The explicit state container for one session: the generation history,
//! the current selection, and the three independent derived-content
//! sections. All mutation goes through named transition functions; nothing
//! else in the crate touches the fields directly.
//!
//! # Invariants
//!
//! - No two history records share a name.
//! - History is ordered newest first and is prepend-only.
//! - Selecting never mutates the history.
//! - Changing the selection (including accepting a new animal) resets every
//!   derived section to [`SectionState::Idle`].

use thiserror::Error;

use crate::animal::{AnimalRecord, DualLangContent, VideoPrompts};
use crate::messages::Section;

/// Lifecycle of one derived-content section.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SectionState<T> {
    /// Nothing requested yet (or discarded by a selection change).
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// Content arrived.
    Ready(T),
    /// The request failed with a user-visible message.
    Failed(String),
}

impl<T> SectionState<T> {
    /// Whether a request is in flight.
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, SectionState::Loading)
    }

    /// The ready value, if any.
    #[must_use]
    pub fn value(&self) -> Option<&T> {
        match self {
            SectionState::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// The failure message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            SectionState::Failed(error) => Some(error),
            _ => None,
        }
    }
}

/// Rejected by [`SessionState::accept_animal`]: the name is already in the
/// history.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("animal \"{0}\" is already in the session history")]
pub struct DuplicateName(pub String);

/// All mutable state owned by one session.
#[derive(Debug, Default)]
pub struct SessionState {
    /// Generated animals, newest first.
    history: Vec<AnimalRecord>,
    /// Index of the displayed animal, if any.
    selected: Option<usize>,
    /// Whether an animal generation is in flight.
    generating: bool,
    /// Error from the last failed generation, cleared on the next attempt.
    generation_error: Option<String>,
    /// YouTube content section.
    youtube: SectionState<DualLangContent>,
    /// Tag string section.
    tags: SectionState<String>,
    /// Video prompts section.
    prompts: SectionState<VideoPrompts>,
}

impl SessionState {
    /// Create an empty session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // === Accessors ===

    /// The history, newest first.
    #[must_use]
    pub fn history(&self) -> &[AnimalRecord] {
        &self.history
    }

    /// The currently selected animal, if any.
    #[must_use]
    pub fn current(&self) -> Option<&AnimalRecord> {
        self.selected.and_then(|i| self.history.get(i))
    }

    /// Index of the current selection.
    #[must_use]
    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Whether a generation is in flight.
    #[must_use]
    pub fn is_generating(&self) -> bool {
        self.generating
    }

    /// The last generation error, if any.
    #[must_use]
    pub fn generation_error(&self) -> Option<&str> {
        self.generation_error.as_deref()
    }

    /// Snapshot of all history names, newest first. Used as the facade's
    /// exclusion list and as the history payload toward the surface.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.history.iter().map(|a| a.name.clone()).collect()
    }

    /// State of one derived section.
    #[must_use]
    pub fn youtube(&self) -> &SectionState<DualLangContent> {
        &self.youtube
    }

    /// State of the tags section.
    #[must_use]
    pub fn tags(&self) -> &SectionState<String> {
        &self.tags
    }

    /// State of the prompts section.
    #[must_use]
    pub fn prompts(&self) -> &SectionState<VideoPrompts> {
        &self.prompts
    }

    /// Whether the given section has a request in flight.
    #[must_use]
    pub fn section_loading(&self, section: Section) -> bool {
        match section {
            Section::YouTube => self.youtube.is_loading(),
            Section::Tags => self.tags.is_loading(),
            Section::Prompts => self.prompts.is_loading(),
        }
    }

    // === Transitions ===

    /// Start a generation attempt. Clears the previous error. Returns
    /// `false` if one is already in flight (the attempt is suppressed).
    pub fn begin_generation(&mut self) -> bool {
        if self.generating {
            return false;
        }
        self.generating = true;
        self.generation_error = None;
        true
    }

    /// Accept a freshly generated animal: prepend it to the history and
    /// select it, discarding all derived content.
    ///
    /// # Errors
    ///
    /// Returns [`DuplicateName`] without touching the history if the name
    /// is already present.
    pub fn accept_animal(&mut self, animal: AnimalRecord) -> Result<(), DuplicateName> {
        self.generating = false;
        if self.history.iter().any(|a| a.name == animal.name) {
            return Err(DuplicateName(animal.name));
        }
        self.history.insert(0, animal);
        self.selected = Some(0);
        self.clear_derived();
        Ok(())
    }

    /// Record a terminal generation failure.
    pub fn fail_generation(&mut self, error: impl Into<String>) {
        self.generating = false;
        self.generation_error = Some(error.into());
    }

    /// Select a history entry by index, discarding all derived content.
    /// Out-of-range indices are rejected with `None`. Pure state
    /// transition, no async.
    pub fn select(&mut self, index: usize) -> Option<&AnimalRecord> {
        if index >= self.history.len() {
            return None;
        }
        self.selected = Some(index);
        self.clear_derived();
        self.history.get(index)
    }

    /// Mark a section request as in flight. Replaces any previous error or
    /// content for that section only.
    pub fn begin_section(&mut self, section: Section) {
        match section {
            Section::YouTube => self.youtube = SectionState::Loading,
            Section::Tags => self.tags = SectionState::Loading,
            Section::Prompts => self.prompts = SectionState::Loading,
        }
    }

    /// Store ready YouTube content.
    pub fn complete_youtube(&mut self, content: DualLangContent) {
        self.youtube = SectionState::Ready(content);
    }

    /// Store a ready tag string.
    pub fn complete_tags(&mut self, tags: String) {
        self.tags = SectionState::Ready(tags);
    }

    /// Store ready video prompts.
    pub fn complete_prompts(&mut self, prompts: VideoPrompts) {
        self.prompts = SectionState::Ready(prompts);
    }

    /// Record a failure for one section, leaving the other two untouched.
    pub fn fail_section(&mut self, section: Section, error: impl Into<String>) {
        let error = error.into();
        match section {
            Section::YouTube => self.youtube = SectionState::Failed(error),
            Section::Tags => self.tags = SectionState::Failed(error),
            Section::Prompts => self.prompts = SectionState::Failed(error),
        }
    }

    /// Discard all derived content (explicit discard-on-switch).
    fn clear_derived(&mut self) {
        self.youtube = SectionState::Idle;
        self.tags = SectionState::Idle;
        self.prompts = SectionState::Idle;
    }
}
