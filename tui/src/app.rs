//! Main Application
//!
//! The App struct manages the TUI lifecycle as a thin display client:
//! - Event loop (keyboard, resize)
//! - Embedded Keeper for orchestration
//! - DisplayState for rendering
//!
//! The App converts terminal events to `UiEvent`s, forwards them to the
//! Keeper, applies the resulting `KeeperMessage`s to the DisplayState, and
//! renders from that state. No business logic lives here.

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, EventStream, KeyCode, KeyEventKind, KeyModifiers};
use futures::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, Paragraph, Wrap};
use ratatui::{Frame, Terminal};

use menagerie_core::{
    Keeper, KeeperConfig, KeeperMessage, OllamaBackend, Section, SectionState, UiEvent,
};

use crate::clipboard::Clipboard;
use crate::display::{CopyTarget, DisplayState};
use crate::theme;

/// Width of the history sidebar
const HISTORY_WIDTH: u16 = 26;

/// Main application state
pub struct App {
    /// Is the app still running?
    running: bool,
    /// The embedded orchestration core
    keeper: Keeper<OllamaBackend>,
    /// Messages from the keeper
    messages: tokio::sync::mpsc::Receiver<KeeperMessage>,
    /// Display state derived from KeeperMessages
    display: DisplayState,
    /// Best-effort system clipboard
    clipboard: Clipboard,
}

impl App {
    /// Create a new App instance with the Ollama backend from env.
    pub fn new() -> Self {
        let (tx, rx) = tokio::sync::mpsc::channel(100);
        let backend = Arc::new(OllamaBackend::from_env());
        let keeper = Keeper::new(backend, KeeperConfig::from_env(), tx);

        Self {
            running: true,
            keeper,
            messages: rx,
            display: DisplayState::new(),
            clipboard: Clipboard::new(),
        }
    }

    /// Main event loop
    pub async fn run(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    ) -> anyhow::Result<()> {
        // ~10 FPS is plenty for a text dashboard
        let frame_duration = Duration::from_millis(100);
        let mut event_stream = EventStream::new();

        // Render the initial frame immediately so the user sees UI
        terminal.draw(|frame| Self::render(frame, &self.display))?;

        while self.running {
            let frame_start = Instant::now();

            tokio::select! {
                biased;

                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        match event {
                            // Only handle Press events (not Release or Repeat)
                            Event::Key(key) if key.kind == KeyEventKind::Press => {
                                self.handle_key(key).await;
                            }
                            Event::Resize(..) => {}
                            _ => {}
                        }
                    }
                }

                _ = tokio::time::sleep(Duration::from_millis(50)) => {}
            }

            // Drain completed facade requests
            self.keeper.poll().await;

            // Apply keeper messages to the display state
            while let Ok(msg) = self.messages.try_recv() {
                self.display.apply_message(msg);
            }

            // Expire copied markers
            self.display.update(Instant::now());

            terminal.draw(|frame| Self::render(frame, &self.display))?;

            // Frame rate limiting
            let elapsed = frame_start.elapsed();
            if elapsed < frame_duration {
                tokio::time::sleep(frame_duration - elapsed).await;
            }
        }

        Ok(())
    }

    /// Handle keyboard input
    async fn handle_key(&mut self, key: event::KeyEvent) {
        match key.code {
            // Quit
            KeyCode::Esc | KeyCode::Char('q') => {
                self.running = false;
            }
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.running = false;
            }

            // Generate a new animal (trigger disabled while in flight)
            KeyCode::Char('g') => {
                if !self.display.generating {
                    self.keeper.handle_event(UiEvent::Generate).await;
                }
            }

            // Derived-content sections
            KeyCode::Char('y') => self.request_section(Section::YouTube).await,
            KeyCode::Char('t') => self.request_section(Section::Tags).await,
            KeyCode::Char('v') => self.request_section(Section::Prompts).await,

            // Language toggles
            KeyCode::Char('a') => self.display.toggle_article_language(),
            KeyCode::Char('l') => self.display.toggle_content_language(),

            // History navigation and selection
            KeyCode::Up => self.display.move_cursor(-1),
            KeyCode::Down => self.display.move_cursor(1),
            KeyCode::Enter => {
                if !self.display.history.is_empty() {
                    let index = self.display.cursor;
                    self.keeper.handle_event(UiEvent::Select { index }).await;
                }
            }

            // Copy actions
            KeyCode::Char('c') => self.copy(CopyTarget::Article),
            KeyCode::Char('Y') => self.copy(CopyTarget::Title),
            KeyCode::Char('D') => self.copy(CopyTarget::Description),
            KeyCode::Char('T') => self.copy(CopyTarget::Tags),
            KeyCode::Char(c @ '1'..='9') => {
                let index = (c as usize) - ('1' as usize);
                self.copy(CopyTarget::Prompt(index));
            }

            // Document scrolling
            KeyCode::PageUp => {
                self.display.scroll_offset = self.display.scroll_offset.saturating_sub(10);
            }
            KeyCode::PageDown => {
                self.display.scroll_offset = self.display.scroll_offset.saturating_add(10);
            }

            _ => {}
        }
    }

    /// Request a derived-content section, if one can be requested.
    async fn request_section(&mut self, section: Section) {
        if self.display.current.is_none() {
            return;
        }
        let loading = match section {
            Section::YouTube => self.display.youtube.is_loading(),
            Section::Tags => self.display.tags.is_loading(),
            Section::Prompts => self.display.prompts.is_loading(),
        };
        if !loading {
            self.keeper.handle_event(UiEvent::Request { section }).await;
        }
    }

    /// Copy a block to the clipboard and flash its marker on success.
    fn copy(&mut self, target: CopyTarget) {
        let Some(text) = self.display.copy_text(target) else {
            return;
        };
        if self.clipboard.copy(&text) {
            self.display.mark_copied(target, Instant::now());
        }
    }

    // === Rendering ===

    /// Render the UI
    fn render(frame: &mut Frame, display: &DisplayState) {
        let [header, body, status] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(frame.area());

        Self::render_header(frame, header, display);
        Self::render_status(frame, status, display);

        if display.history.is_empty() {
            Self::render_document(frame, body, display);
        } else {
            let [document, history] =
                Layout::horizontal([Constraint::Min(30), Constraint::Length(HISTORY_WIDTH)])
                    .areas(body);
            Self::render_document(frame, document, display);
            Self::render_history(frame, history, display);
        }
    }

    fn render_header(frame: &mut Frame, area: Rect, display: &DisplayState) {
        let state = if display.generating {
            Span::styled("generating...", Style::default().fg(theme::ACCENT_CYAN))
        } else {
            Span::styled("g: generate animal", Style::default().fg(theme::DIM_GRAY))
        };
        let line = Line::from(vec![
            Span::styled(
                " Menagerie — animal of the day  ",
                Style::default()
                    .fg(theme::ACCENT_CYAN)
                    .add_modifier(Modifier::BOLD),
            ),
            state,
        ]);
        frame.render_widget(Paragraph::new(line), area);
    }

    fn render_status(frame: &mut Frame, area: Rect, display: &DisplayState) {
        let help = " y/t/v sections | a/l language | c/Y/D/T/1-9 copy | Up/Down+Enter history | PgUp/PgDn | q quit";
        let line = if display.scroll_offset > 0 {
            format!("{help} [^{} lines]", display.scroll_offset)
        } else {
            help.to_string()
        };
        frame.render_widget(
            Paragraph::new(line).style(Style::default().fg(theme::DIM_GRAY)),
            area,
        );
    }

    fn render_history(frame: &mut Frame, area: Rect, display: &DisplayState) {
        let items: Vec<ListItem> = display
            .history
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let mut style = Style::default().fg(theme::TEXT);
                let mut prefix = "  ";
                if Some(i) == display.selected {
                    style = Style::default().fg(theme::ACCENT_CYAN);
                    prefix = "* ";
                }
                if i == display.cursor {
                    style = style.add_modifier(Modifier::REVERSED);
                }
                ListItem::new(format!("{prefix}{name}")).style(style)
            })
            .collect();

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::LEFT)
                .title(" History ")
                .title_style(Style::default().fg(theme::DIM_GRAY)),
        );
        frame.render_widget(list, area);
    }

    fn render_document(frame: &mut Frame, area: Rect, display: &DisplayState) {
        let paragraph = Paragraph::new(Self::document_lines(display))
            .wrap(Wrap { trim: false })
            .scroll((display.scroll_offset, 0));
        frame.render_widget(paragraph, area);
    }

    /// Build the scrollable main document from the display state.
    fn document_lines(display: &DisplayState) -> Vec<Line<'static>> {
        let mut lines: Vec<Line> = Vec::new();
        let dim = Style::default().fg(theme::DIM_GRAY);
        let text = Style::default().fg(theme::TEXT);
        let error_style = Style::default().fg(theme::ERROR_RED);

        if let Some(ref error) = display.generation_error {
            lines.push(Line::from(Span::styled(
                format!("Generation failed: {error}"),
                error_style,
            )));
            lines.push(Line::default());
        }

        let Some(ref animal) = display.current else {
            lines.push(Line::from(Span::styled(
                "Press g to generate your first animal of the day.",
                text,
            )));
            return lines;
        };

        // Animal name
        lines.push(Line::from(Span::styled(
            animal.name.clone(),
            Style::default()
                .fg(theme::ACCENT_CYAN)
                .add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::default());

        // Article panel with its own language toggle
        lines.push(Line::from(vec![
            Span::styled(
                format!("Article [{}]", display.article_language.label()),
                Style::default()
                    .fg(theme::ACCENT_CYAN)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  a: language  c: copy", dim),
            copied_marker(display, CopyTarget::Article),
        ]));
        lines.push(Line::from(Span::styled(
            animal.article(display.article_language).to_string(),
            text,
        )));
        lines.push(Line::default());

        // YouTube content section
        let lang = display.content_language;
        section_header(
            &mut lines,
            display,
            Section::YouTube,
            theme::SECTION_PURPLE,
            "y",
            &display.youtube,
        );
        if let Some(content) = display.youtube.value() {
            let variant = content.content(lang);
            lines.push(Line::from(vec![
                Span::styled(format!("Title ({}): ", lang.label()), dim),
                Span::styled(variant.title.clone(), text),
                Span::styled("  Y: copy", dim),
                copied_marker(display, CopyTarget::Title),
            ]));
            lines.push(Line::from(vec![
                Span::styled(format!("Description ({}): ", lang.label()), dim),
                Span::styled(variant.description.clone(), text),
                Span::styled("  D: copy", dim),
                copied_marker(display, CopyTarget::Description),
            ]));
        }
        lines.push(Line::default());

        // Tags section (English only)
        section_header(
            &mut lines,
            display,
            Section::Tags,
            theme::SECTION_EMERALD,
            "t",
            &display.tags,
        );
        if let Some(tags) = display.tags.value() {
            lines.push(Line::from(vec![
                Span::styled(tags.clone(), text),
                Span::styled("  T: copy", dim),
                copied_marker(display, CopyTarget::Tags),
            ]));
        }
        lines.push(Line::default());

        // Video prompts section
        section_header(
            &mut lines,
            display,
            Section::Prompts,
            theme::SECTION_SKY,
            "v",
            &display.prompts,
        );
        for (i, prompt) in display.prompt_lines().iter().enumerate() {
            let mut spans = vec![
                Span::styled(format!("{}. ", i + 1), dim),
                Span::styled(prompt.clone(), text),
            ];
            if i < 9 {
                spans.push(Span::styled(format!("  {}: copy", i + 1), dim));
                spans.push(copied_marker(display, CopyTarget::Prompt(i)));
            }
            lines.push(Line::from(spans));
        }

        lines
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

/// The " copied" flash, or an empty span.
fn copied_marker(display: &DisplayState, target: CopyTarget) -> Span<'static> {
    if display.is_copied(target) {
        Span::styled(" copied", Style::default().fg(theme::SUCCESS_GREEN))
    } else {
        Span::raw("")
    }
}

/// Push a section title line plus its loading/error state.
fn section_header(
    lines: &mut Vec<Line<'static>>,
    display: &DisplayState,
    section: Section,
    color: ratatui::style::Color,
    key: &str,
    state: &SectionState<impl Clone>,
) {
    let mut spans = vec![Span::styled(
        section.title().to_string(),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    )];

    // The shared content-language marker covers YouTube and prompts
    if matches!(section, Section::YouTube | Section::Prompts) {
        spans.push(Span::styled(
            format!(" [{}]", display.content_language.label()),
            Style::default().fg(color),
        ));
    }
    spans.push(Span::styled(
        format!("  {key}: generate"),
        Style::default().fg(theme::DIM_GRAY),
    ));

    if state.is_loading() {
        spans.push(Span::styled(
            "  generating...",
            Style::default().fg(color),
        ));
    }
    lines.push(Line::from(spans));

    if let Some(error) = state.error() {
        lines.push(Line::from(Span::styled(
            error.to_string(),
            Style::default().fg(theme::ERROR_RED),
        )));
    }
}
