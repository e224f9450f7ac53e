//! Keeper - Request Orchestration
//!
//! The Keeper is the orchestration core: it owns the session state and the
//! facade, turns surface events into facade requests, and reports results
//! back as [`KeeperMessage`]s. It is UI-agnostic and runs the same whether
//! driven by the TUI or by a headless test harness.
//!
//! # Concurrency model
//!
//! Each facade request runs in its own spawned task and reports through an
//! internal outcome channel, drained by [`Keeper::poll`] from the surface's
//! frame loop. The three derived-content sections are fully independent:
//! no mutual exclusion, no queueing, each with its own loading and error
//! state. Only animal generation is serialized — a second `Generate` while
//! one is in flight is suppressed.
//!
//! # Duplicate handling
//!
//! The facade is asked to avoid names already in the history but may not
//! comply. A duplicate answer is retried within the same invocation, up to
//! [`KeeperConfig::max_generation_attempts`] facade calls; exhaustion is a
//! terminal, user-visible error. Retries are bounded by design — the keeper
//! never chases uniqueness indefinitely.

use std::sync::Arc;

use tokio::sync::mpsc;

use crate::animal::{AnimalRecord, DualLangContent, VideoPrompts};
use crate::backend::LlmBackend;
use crate::config::KeeperConfig;
use crate::events::UiEvent;
use crate::facade::ContentFacade;
use crate::messages::{KeeperMessage, Section};
use crate::session::SessionState;

/// Result of a spawned facade request, routed back through the keeper.
///
/// Section outcomes carry the name of the animal they were generated for,
/// so results that arrive after the selection changed can be discarded.
enum Outcome {
    /// Animal generation finished (already deduplicated and retry-bounded).
    Animal(Result<AnimalRecord, String>),
    /// YouTube content finished.
    YouTube {
        /// Animal the request was issued for.
        name: String,
        /// The result or a display-ready error.
        result: Result<DualLangContent, String>,
    },
    /// Tag generation finished.
    Tags {
        /// Animal the request was issued for.
        name: String,
        /// The result or a display-ready error.
        result: Result<String, String>,
    },
    /// Video prompt generation finished.
    Prompts {
        /// Animal the request was issued for.
        name: String,
        /// The result or a display-ready error.
        result: Result<VideoPrompts, String>,
    },
}

/// The Keeper - headless orchestration core.
pub struct Keeper<B: LlmBackend + 'static> {
    /// Facade over the LLM backend, shared with spawned request tasks.
    facade: Arc<ContentFacade<B>>,
    /// Orchestration configuration.
    config: KeeperConfig,
    /// Session state, mutated only through its transition functions.
    session: SessionState,
    /// Channel toward the UI surface.
    surface_tx: mpsc::Sender<KeeperMessage>,
    /// Sender cloned into spawned request tasks.
    outcome_tx: mpsc::Sender<Outcome>,
    /// Receiver drained by [`Keeper::poll`].
    outcome_rx: mpsc::Receiver<Outcome>,
}

impl<B: LlmBackend + 'static> Keeper<B> {
    /// Create a keeper over the given backend.
    pub fn new(
        backend: Arc<B>,
        config: KeeperConfig,
        surface_tx: mpsc::Sender<KeeperMessage>,
    ) -> Self {
        let facade = Arc::new(ContentFacade::new(
            backend,
            config.model.clone(),
            config.temperature,
        ));
        let (outcome_tx, outcome_rx) = mpsc::channel(16);

        Self {
            facade,
            config,
            session: SessionState::new(),
            surface_tx,
            outcome_tx,
            outcome_rx,
        }
    }

    /// Read access to the session state (used by tests and status display).
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Handle one event from the UI surface.
    pub async fn handle_event(&mut self, event: UiEvent) {
        match event {
            UiEvent::Generate => self.start_generation().await,
            UiEvent::Select { index } => self.select(index).await,
            UiEvent::Request { section } => self.start_section(section).await,
        }
    }

    /// Drain completed request outcomes, apply them to the session, and
    /// forward the results to the surface. Called from the surface's frame
    /// loop.
    pub async fn poll(&mut self) {
        while let Ok(outcome) = self.outcome_rx.try_recv() {
            self.apply_outcome(outcome).await;
        }
    }

    // === Event handling ===

    async fn start_generation(&mut self) {
        if !self.session.begin_generation() {
            tracing::debug!("generation already in flight, ignoring");
            return;
        }
        self.send(KeeperMessage::GenerationStarted).await;

        let excluded = self.session.names();
        let facade = Arc::clone(&self.facade);
        let max_attempts = self.config.max_generation_attempts;
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let result = generate_unique(&facade, &excluded, max_attempts).await;
            let _ = tx.send(Outcome::Animal(result)).await;
        });
    }

    async fn select(&mut self, index: usize) {
        let Some(animal) = self.session.select(index) else {
            tracing::warn!(index, "history selection out of range, ignoring");
            return;
        };
        let animal = animal.clone();
        self.send(KeeperMessage::SelectionChanged { animal, index })
            .await;
        self.send(KeeperMessage::ScrollToTop).await;
    }

    async fn start_section(&mut self, section: Section) {
        let Some(animal) = self.session.current().cloned() else {
            tracing::warn!(?section, "section requested with no animal selected");
            return;
        };
        if self.session.section_loading(section) {
            tracing::debug!(?section, "section request already in flight, ignoring");
            return;
        }

        self.session.begin_section(section);
        self.send(KeeperMessage::SectionStarted { section }).await;

        let facade = Arc::clone(&self.facade);
        let tx = self.outcome_tx.clone();

        tokio::spawn(async move {
            let name = animal.name.clone();
            let outcome = match section {
                Section::YouTube => Outcome::YouTube {
                    name,
                    result: facade
                        .youtube_content(&animal)
                        .await
                        .map_err(|e| e.to_string()),
                },
                Section::Tags => Outcome::Tags {
                    name,
                    result: facade
                        .youtube_tags(&animal)
                        .await
                        .map_err(|e| e.to_string()),
                },
                Section::Prompts => Outcome::Prompts {
                    name,
                    result: facade
                        .video_prompts(&animal)
                        .await
                        .map_err(|e| e.to_string()),
                },
            };
            let _ = tx.send(outcome).await;
        });
    }

    // === Outcome handling ===

    async fn apply_outcome(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Animal(Ok(animal)) => match self.session.accept_animal(animal.clone()) {
                Ok(()) => {
                    let history = self.session.names();
                    self.send(KeeperMessage::AnimalReady { animal, history })
                        .await;
                    self.send(KeeperMessage::ScrollToTop).await;
                }
                Err(duplicate) => {
                    // generate_unique already filtered against the history
                    // snapshot, so this only fires if the snapshot went
                    // stale, which serialized generation rules out.
                    let error = duplicate.to_string();
                    self.session.fail_generation(error.clone());
                    self.send(KeeperMessage::GenerationFailed { error }).await;
                }
            },
            Outcome::Animal(Err(error)) => {
                tracing::warn!(%error, "animal generation failed");
                self.session.fail_generation(error.clone());
                self.send(KeeperMessage::GenerationFailed { error }).await;
            }
            Outcome::YouTube { name, result } => {
                if self.is_stale(&name, Section::YouTube) {
                    return;
                }
                match result {
                    Ok(content) => {
                        self.session.complete_youtube(content.clone());
                        self.send(KeeperMessage::YouTubeReady { content }).await;
                    }
                    Err(error) => self.fail_section(Section::YouTube, error).await,
                }
            }
            Outcome::Tags { name, result } => {
                if self.is_stale(&name, Section::Tags) {
                    return;
                }
                match result {
                    Ok(tags) => {
                        self.session.complete_tags(tags.clone());
                        self.send(KeeperMessage::TagsReady { tags }).await;
                    }
                    Err(error) => self.fail_section(Section::Tags, error).await,
                }
            }
            Outcome::Prompts { name, result } => {
                if self.is_stale(&name, Section::Prompts) {
                    return;
                }
                match result {
                    Ok(prompts) => {
                        self.session.complete_prompts(prompts.clone());
                        self.send(KeeperMessage::PromptsReady { prompts }).await;
                    }
                    Err(error) => self.fail_section(Section::Prompts, error).await,
                }
            }
        }
    }

    /// A section outcome is stale if the selection moved on while the
    /// request was in flight. Stale results are dropped silently; the
    /// section was already reset to Idle by the selection change.
    fn is_stale(&self, name: &str, section: Section) -> bool {
        let stale = self.session.current().map(|a| a.name.as_str()) != Some(name);
        if stale {
            tracing::debug!(name, ?section, "dropping derived content for stale selection");
        }
        stale
    }

    async fn fail_section(&mut self, section: Section, error: String) {
        tracing::warn!(?section, %error, "derived content request failed");
        self.session.fail_section(section, error.clone());
        self.send(KeeperMessage::SectionFailed { section, error })
            .await;
    }

    async fn send(&self, message: KeeperMessage) {
        if self.surface_tx.send(message).await.is_err() {
            tracing::debug!("surface channel closed, dropping message");
        }
    }
}

/// Call the facade until it returns a name outside `excluded`, up to
/// `max_attempts` calls. Backend and parse errors are terminal; only
/// duplicate names are retried.
async fn generate_unique<B: LlmBackend>(
    facade: &ContentFacade<B>,
    excluded: &[String],
    max_attempts: usize,
) -> Result<AnimalRecord, String> {
    for attempt in 1..=max_attempts {
        let animal = facade
            .generate_animal(excluded)
            .await
            .map_err(|e| e.to_string())?;

        if excluded.iter().any(|name| *name == animal.name) {
            tracing::warn!(name = %animal.name, attempt, "duplicate animal generated, retrying");
            continue;
        }
        return Ok(animal);
    }

    Err(format!(
        "the model kept returning animals already in the history ({max_attempts} attempts)"
    ))
}
