//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::action::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! ```text
//!  terminal events ──▶ InputBox / MessageList ──▶ update() ──▶ Effect
//!                                                    ▲            │
//!                                                    │   tokio::spawn(perform)
//!                                                    └── mpsc ◀───┘
//! ```
//!
//! The loop thread is the only mutator of `ConversationState`. Effects run on
//! tokio tasks and report back through a `std::sync::mpsc` channel drained
//! once per iteration.
//!
//! ## Redraw Strategy
//!
//! - **Loading**: draws every ~80ms so the spinner animates.
//! - **Idle**: sleeps up to 500ms, only redraws on events or resize.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::{self, stdout};
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::api::{ChatService, HttpChatClient};
use crate::core::action::{self, Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::effects;
use crate::core::state::ConversationState;
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const ANIMATION_TICK: Duration = Duration::from_millis(80);
const IDLE_TICK: Duration = Duration::from_millis(500);

/// TUI-specific presentation state (not part of the session controller)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBar
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady bar cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            SetCursorStyle::DefaultUserShape
        );
    }
}

pub fn run(config: ResolvedConfig) -> io::Result<()> {
    let client = HttpChatClient::new(&config.base_url, config.generation)
        .map_err(|e| io::Error::other(e.to_string()))?;
    let service: Arc<dyn ChatService> = Arc::new(client);

    let mut terminal = ratatui::init();
    let result = TerminalModeGuard::new().and_then(|_guard| event_loop(&mut terminal, service));
    ratatui::restore();

    if let Err(ref e) = result {
        warn!("Event loop exited with error: {}", e);
    }
    info!("Chatbot TUI shutting down");
    result
}

fn event_loop(terminal: &mut ratatui::DefaultTerminal, service: Arc<dyn ChatService>) -> io::Result<()> {
    let (mut state, startup) = action::init();
    let mut tui = TuiState::new();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    spawn_effect(startup, &service, &tx);

    let start_time = Instant::now();
    let mut needs_redraw = true;

    loop {
        tui.input_box.set_disabled(state.is_loading());

        let animating = state.is_loading();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if animating { ANIMATION_TICK } else { IDLE_TICK };
        let first_event = poll_event_timeout(timeout)?;
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process the first event and drain everything pending before the next draw
        let mut pending = first_event;
        while let Some(event) = pending {
            if handle_event(event, &mut state, &mut tui, &service, &tx) == Effect::Quit {
                return Ok(());
            }
            pending = poll_event_immediate()?;
        }

        // Settle background work
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            let effect = update(&mut state, action);
            if effect == Effect::Quit {
                return Ok(());
            }
            spawn_effect(effect, &service, &tx);
        }
    }
}

/// Route one terminal event. Returns the effect of any resulting action.
fn handle_event(
    event: TuiEvent,
    state: &mut ConversationState,
    tui: &mut TuiState,
    service: &Arc<dyn ChatService>,
    tx: &mpsc::Sender<Action>,
) -> Effect {
    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::Quit => update(state, Action::Quit),
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown
        | TuiEvent::ScrollToBottom => {
            tui.message_list.handle_event(&event);
            Effect::None
        }
        _ => match tui.input_box.handle_event(&event) {
            Some(InputEvent::Submit(text)) => {
                let effect = update(state, Action::Submit(text));
                tui.input_box.set_disabled(state.is_loading());
                spawn_effect(effect.clone(), service, tx);
                effect
            }
            Some(InputEvent::ContentChanged) | None => Effect::None,
        },
    }
}

/// Run an I/O effect on a tokio task; its resulting action comes back over `tx`.
fn spawn_effect(effect: Effect, service: &Arc<dyn ChatService>, tx: &mpsc::Sender<Action>) {
    if matches!(effect, Effect::None | Effect::Quit) {
        return;
    }
    info!("Spawning effect: {:?}", effect);
    let service = Arc::clone(service);
    let tx = tx.clone();
    tokio::spawn(async move {
        if let Some(action) = effects::perform(service.as_ref(), effect).await
            && tx.send(action).is_err()
        {
            warn!("Failed to deliver effect result: receiver dropped");
        }
    });
}
