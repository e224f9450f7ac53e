//! Display State
//!
//! The TUI is a thin client: `DisplayState` is built purely by applying
//! `KeeperMessage`s and is the only thing the renderer reads. It also owns
//! the purely-local UI state the keeper never sees: the two language
//! toggles, the history cursor, the scroll offset, and the transient
//! "copied" markers.
//!
//! The content-language toggle is intentionally shared between the YouTube
//! and video-prompt sections (one flag flips both); the article panel has
//! its own independent toggle.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use menagerie_core::{
    normalize_prompt_lines, AnimalRecord, DualLangContent, KeeperMessage, Language, Section,
    SectionState, VideoPrompts,
};

/// How long a copied marker stays visible.
pub const COPY_FLASH: Duration = Duration::from_secs(2);

/// One copyable block on screen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CopyTarget {
    /// The animal article (current article language).
    Article,
    /// YouTube title (current content language).
    Title,
    /// YouTube description (current content language).
    Description,
    /// The tag string.
    Tags,
    /// One video prompt line, by position in the normalized list.
    Prompt(usize),
}

/// Everything the renderer needs, derived from keeper messages.
pub struct DisplayState {
    /// History names, newest first.
    pub history: Vec<String>,
    /// Index of the displayed animal within `history`.
    pub selected: Option<usize>,
    /// History entry the cursor is on (keyboard navigation).
    pub cursor: usize,
    /// The displayed animal.
    pub current: Option<AnimalRecord>,
    /// Whether a generation is in flight.
    pub generating: bool,
    /// Error from the last failed generation.
    pub generation_error: Option<String>,
    /// YouTube content section.
    pub youtube: SectionState<DualLangContent>,
    /// Tags section.
    pub tags: SectionState<String>,
    /// Video prompts section.
    pub prompts: SectionState<VideoPrompts>,
    /// Language shown in the article panel.
    pub article_language: Language,
    /// Language shown in the YouTube and prompts sections (shared).
    pub content_language: Language,
    /// Lines scrolled down from the top of the document.
    pub scroll_offset: u16,
    /// Copied markers and when they were set.
    copied: HashMap<CopyTarget, Instant>,
}

impl DisplayState {
    /// Create an empty display state.
    pub fn new() -> Self {
        Self {
            history: Vec::new(),
            selected: None,
            cursor: 0,
            current: None,
            generating: false,
            generation_error: None,
            youtube: SectionState::Idle,
            tags: SectionState::Idle,
            prompts: SectionState::Idle,
            article_language: Language::default(),
            content_language: Language::default(),
            scroll_offset: 0,
            copied: HashMap::new(),
        }
    }

    /// Apply one message from the keeper.
    pub fn apply_message(&mut self, msg: KeeperMessage) {
        match msg {
            KeeperMessage::GenerationStarted => {
                self.generating = true;
                self.generation_error = None;
            }
            KeeperMessage::AnimalReady { animal, history } => {
                self.generating = false;
                self.history = history;
                self.selected = Some(0);
                self.cursor = 0;
                self.current = Some(animal);
                self.reset_derived();
            }
            KeeperMessage::GenerationFailed { error } => {
                self.generating = false;
                self.generation_error = Some(error);
            }
            KeeperMessage::SelectionChanged { animal, index } => {
                self.selected = Some(index);
                self.cursor = index;
                self.current = Some(animal);
                self.reset_derived();
            }
            KeeperMessage::SectionStarted { section } => match section {
                Section::YouTube => self.youtube = SectionState::Loading,
                Section::Tags => self.tags = SectionState::Loading,
                Section::Prompts => self.prompts = SectionState::Loading,
            },
            KeeperMessage::YouTubeReady { content } => {
                self.youtube = SectionState::Ready(content);
            }
            KeeperMessage::TagsReady { tags } => {
                self.tags = SectionState::Ready(tags);
            }
            KeeperMessage::PromptsReady { prompts } => {
                self.prompts = SectionState::Ready(prompts);
            }
            KeeperMessage::SectionFailed { section, error } => match section {
                Section::YouTube => self.youtube = SectionState::Failed(error),
                Section::Tags => self.tags = SectionState::Failed(error),
                Section::Prompts => self.prompts = SectionState::Failed(error),
            },
            KeeperMessage::ScrollToTop => {
                self.scroll_offset = 0;
            }
        }
    }

    /// Expire copied markers older than [`COPY_FLASH`]. Called once per
    /// frame with the current instant (tests pass constructed instants).
    pub fn update(&mut self, now: Instant) {
        self.copied
            .retain(|_, set_at| now.saturating_duration_since(*set_at) < COPY_FLASH);
    }

    /// Flash the copied marker for one block.
    pub fn mark_copied(&mut self, target: CopyTarget, now: Instant) {
        self.copied.insert(target, now);
    }

    /// Whether a block currently shows its copied marker.
    pub fn is_copied(&self, target: CopyTarget) -> bool {
        self.copied.contains_key(&target)
    }

    /// Flip the article-panel language.
    pub fn toggle_article_language(&mut self) {
        self.article_language = self.article_language.toggled();
    }

    /// Flip the shared content language (YouTube and prompts sections).
    pub fn toggle_content_language(&mut self) {
        self.content_language = self.content_language.toggled();
    }

    /// Move the history cursor without selecting.
    pub fn move_cursor(&mut self, delta: isize) {
        if self.history.is_empty() {
            return;
        }
        let last = self.history.len() - 1;
        self.cursor = self
            .cursor
            .saturating_add_signed(delta)
            .min(last);
    }

    /// The normalized video prompts for the current content language.
    pub fn prompt_lines(&self) -> Vec<String> {
        self.prompts
            .value()
            .map(|p| normalize_prompt_lines(p.prompts(self.content_language)))
            .unwrap_or_default()
    }

    /// Text behind a copyable block, if that block is on screen.
    pub fn copy_text(&self, target: CopyTarget) -> Option<String> {
        match target {
            CopyTarget::Article => self
                .current
                .as_ref()
                .map(|a| a.article(self.article_language).to_string()),
            CopyTarget::Title => self
                .youtube
                .value()
                .map(|c| c.content(self.content_language).title.clone()),
            CopyTarget::Description => self
                .youtube
                .value()
                .map(|c| c.content(self.content_language).description.clone()),
            CopyTarget::Tags => self.tags.value().cloned(),
            CopyTarget::Prompt(index) => self.prompt_lines().get(index).cloned(),
        }
    }

    fn reset_derived(&mut self) {
        self.youtube = SectionState::Idle;
        self.tags = SectionState::Idle;
        self.prompts = SectionState::Idle;
        self.article_language = Language::default();
        self.content_language = Language::default();
        self.copied.clear();
    }
}

impl Default for DisplayState {
    fn default() -> Self {
        Self::new()
    }
}
