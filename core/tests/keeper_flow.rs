//! Integration tests for the Keeper
//!
//! These tests drive the orchestration core headless, with a scripted mock
//! LLM backend in place of Ollama, and verify the session-level properties:
//!
//! 1. **Uniqueness**: the history never contains two animals with one name;
//!    duplicate model answers are retried within a bounded budget.
//! 2. **Bounded retry**: a backend that keeps returning duplicates produces
//!    a terminal error instead of an infinite retry loop.
//! 3. **Section independence**: a failed derived-content request touches
//!    only its own section.
//! 4. **Discard-on-switch**: derived content that arrives after the
//!    selection changed is dropped.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;
use tokio::time::timeout;

use menagerie_core::{
    backend::{LlmBackend, LlmRequest, LlmResponse, ModelInfo},
    Keeper, KeeperConfig, KeeperMessage, Section, SectionState, UiEvent,
};

// ============================================================================
// Scripted Mock Backend
// ============================================================================

/// A backend that replays a fixed script of responses, one per `send` call.
///
/// Script entries are `Ok(raw model text)` or `Err(message)`. Running past
/// the end of the script is a test bug and fails loudly.
struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, String>>>,
    request_count: AtomicUsize,
}

impl ScriptedBackend {
    fn new(script: Vec<Result<String, String>>) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(script.into()),
            request_count: AtomicUsize::new(0),
        })
    }

    fn request_count(&self) -> usize {
        self.request_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    fn name(&self) -> &'static str {
        "scripted"
    }

    async fn health_check(&self) -> bool {
        true
    }

    async fn send(&self, _request: &LlmRequest) -> anyhow::Result<LlmResponse> {
        self.request_count.fetch_add(1, Ordering::SeqCst);
        let entry = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .expect("scripted backend ran out of responses");

        match entry {
            Ok(content) => Ok(LlmResponse {
                content,
                model: "scripted".to_string(),
                tokens_used: None,
                duration_ms: None,
            }),
            Err(message) => anyhow::bail!(message),
        }
    }

    async fn list_models(&self) -> anyhow::Result<Vec<ModelInfo>> {
        Ok(vec![])
    }
}

// ============================================================================
// Fixtures and helpers
// ============================================================================

fn animal_json(name: &str) -> Result<String, String> {
    Ok(format!(
        "{{\"animalName\": \"{name}\", \"russianArticle\": \"Статья о {name}\", \
         \"englishArticle\": \"Article about {name}\"}}"
    ))
}

fn harness(
    script: Vec<Result<String, String>>,
) -> (
    Keeper<ScriptedBackend>,
    mpsc::Receiver<KeeperMessage>,
    Arc<ScriptedBackend>,
) {
    let backend = ScriptedBackend::new(script);
    let (tx, rx) = mpsc::channel(64);
    let keeper = Keeper::new(Arc::clone(&backend), KeeperConfig::default(), tx);
    (keeper, rx, backend)
}

/// Poll the keeper until the surface produces a message matching `pred`,
/// collecting everything received along the way.
async fn wait_for<F>(
    keeper: &mut Keeper<ScriptedBackend>,
    rx: &mut mpsc::Receiver<KeeperMessage>,
    collected: &mut Vec<KeeperMessage>,
    pred: F,
) where
    F: Fn(&KeeperMessage) -> bool,
{
    timeout(Duration::from_secs(5), async {
        loop {
            keeper.poll().await;
            while let Ok(msg) = rx.try_recv() {
                let done = pred(&msg);
                collected.push(msg);
                if done {
                    return;
                }
            }
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("keeper never produced the expected message");
}

async fn generate_and_wait(
    keeper: &mut Keeper<ScriptedBackend>,
    rx: &mut mpsc::Receiver<KeeperMessage>,
    collected: &mut Vec<KeeperMessage>,
) {
    keeper.handle_event(UiEvent::Generate).await;
    wait_for(keeper, rx, collected, |msg| {
        matches!(
            msg,
            KeeperMessage::AnimalReady { .. } | KeeperMessage::GenerationFailed { .. }
        )
    })
    .await;
}

// ============================================================================
// Tests
// ============================================================================

/// End-to-end duplicate handling: generate "Fox", then a generation that
/// first answers "Fox" again (duplicate, retried) and then "Owl".
#[tokio::test]
async fn test_duplicate_is_retried_and_history_stays_unique() {
    let (mut keeper, mut rx, backend) = harness(vec![
        animal_json("Fox"),
        animal_json("Fox"), // duplicate, consumed by the retry
        animal_json("Owl"),
    ]);
    let mut collected = Vec::new();

    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;
    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;

    assert_eq!(backend.request_count(), 3);

    let histories: Vec<Vec<String>> = collected
        .iter()
        .filter_map(|msg| match msg {
            KeeperMessage::AnimalReady { history, .. } => Some(history.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(
        histories,
        vec![vec!["Fox".to_string()], vec!["Owl".to_string(), "Fox".to_string()]]
    );

    assert_eq!(keeper.session().current().unwrap().name, "Owl");
    assert_eq!(keeper.session().names(), vec!["Owl", "Fox"]);

    // ScrollToTop accompanies every accepted generation
    let scrolls = collected
        .iter()
        .filter(|msg| matches!(msg, KeeperMessage::ScrollToTop))
        .count();
    assert_eq!(scrolls, 2);
}

/// A backend that only ever returns duplicates exhausts the bounded retry
/// budget and surfaces a terminal error.
#[tokio::test]
async fn test_retry_budget_is_bounded() {
    let attempts = KeeperConfig::default().max_generation_attempts;
    let mut script = vec![animal_json("Fox")];
    script.extend((0..attempts).map(|_| animal_json("Fox")));

    let (mut keeper, mut rx, backend) = harness(script);
    let mut collected = Vec::new();

    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;
    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;

    // 1 accepted + exactly `attempts` duplicate draws, then it gave up
    assert_eq!(backend.request_count(), 1 + attempts);
    assert_eq!(keeper.session().names(), vec!["Fox"]);

    let error = collected
        .iter()
        .find_map(|msg| match msg {
            KeeperMessage::GenerationFailed { error } => Some(error.clone()),
            _ => None,
        })
        .expect("expected a terminal generation failure");
    assert!(error.contains("already in the history"), "got: {error}");
    assert_eq!(keeper.session().generation_error(), Some(error.as_str()));
}

/// A backend error during generation is terminal for the invocation and
/// leaves the session retryable.
#[tokio::test]
async fn test_backend_error_fails_generation() {
    let (mut keeper, mut rx, _backend) = harness(vec![
        Err("connection refused".to_string()),
        animal_json("Fox"),
    ]);
    let mut collected = Vec::new();

    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;
    assert!(keeper.session().generation_error().is_some());
    assert!(keeper.session().history().is_empty());

    // The next attempt clears the error and succeeds
    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;
    assert_eq!(keeper.session().generation_error(), None);
    assert_eq!(keeper.session().names(), vec!["Fox"]);
}

/// A failed section request shows an error in its own section and leaves
/// the other two untouched.
#[tokio::test]
async fn test_section_failure_is_isolated() {
    let (mut keeper, mut rx, _backend) = harness(vec![
        animal_json("Fox"),
        Err("boom".to_string()), // tags request
        Ok("{\"ru\": {\"title\": \"Заголовок\", \"description\": \"Описание\"}, \
            \"en\": {\"title\": \"Title\", \"description\": \"Description\"}}"
            .to_string()),
    ]);
    let mut collected = Vec::new();

    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;

    keeper
        .handle_event(UiEvent::Request {
            section: Section::Tags,
        })
        .await;
    wait_for(&mut keeper, &mut rx, &mut collected, |msg| {
        matches!(msg, KeeperMessage::SectionFailed { .. })
    })
    .await;

    assert!(keeper.session().tags().error().is_some());
    assert_eq!(*keeper.session().youtube(), SectionState::Idle);
    assert_eq!(*keeper.session().prompts(), SectionState::Idle);

    // The failure does not block the other sections
    keeper
        .handle_event(UiEvent::Request {
            section: Section::YouTube,
        })
        .await;
    wait_for(&mut keeper, &mut rx, &mut collected, |msg| {
        matches!(msg, KeeperMessage::YouTubeReady { .. })
    })
    .await;

    assert_eq!(
        keeper
            .session()
            .youtube()
            .value()
            .map(|c| c.en.title.as_str()),
        Some("Title")
    );
    // Tags error is still shown in its own section
    assert!(keeper.session().tags().error().is_some());
}

/// Derived content that completes after the selection changed is discarded
/// instead of being shown for the wrong animal.
#[tokio::test]
async fn test_stale_section_result_is_discarded() {
    let (mut keeper, mut rx, backend) = harness(vec![
        animal_json("Fox"),
        animal_json("Owl"),
        Ok("owl, fictional animal".to_string()), // tags for Owl
    ]);
    let mut collected = Vec::new();

    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;
    generate_and_wait(&mut keeper, &mut rx, &mut collected).await;

    // Request tags for Owl, then switch back to Fox before polling
    keeper
        .handle_event(UiEvent::Request {
            section: Section::Tags,
        })
        .await;
    keeper.handle_event(UiEvent::Select { index: 1 }).await;
    assert_eq!(keeper.session().current().unwrap().name, "Fox");

    // Let the spawned request finish, then drain outcomes
    timeout(Duration::from_secs(5), async {
        while backend.request_count() < 3 {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("tags request never reached the backend");
    tokio::time::sleep(Duration::from_millis(20)).await;
    keeper.poll().await;

    while let Ok(msg) = rx.try_recv() {
        assert!(
            !matches!(msg, KeeperMessage::TagsReady { .. }),
            "stale tags result must not reach the surface"
        );
        collected.push(msg);
    }
    assert_eq!(*keeper.session().tags(), SectionState::Idle);
}

/// Section requests with no selected animal are ignored.
#[tokio::test]
async fn test_section_request_without_selection_is_ignored() {
    let (mut keeper, _rx, backend) = harness(vec![]);

    keeper
        .handle_event(UiEvent::Request {
            section: Section::Prompts,
        })
        .await;
    keeper.poll().await;

    assert_eq!(backend.request_count(), 0);
    assert_eq!(*keeper.session().prompts(), SectionState::Idle);
}
