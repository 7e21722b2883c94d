use crate::event::{Event, InputMode};
use crate::interval::{DraftField, IntervalDraft};
use crate::notification::{NotificationGateway, Permission};
use crate::persist::{self, Snapshot, Store};
use crate::session::{State, TickOutcome};
use crate::tui::{DisplayData, Tui, TuiError};
use rand::rngs::ThreadRng;
use std::ops::Deref;
use std::time::Duration;
use thiserror::Error;
use tokio::select;
use tokio::time::{interval, Interval, MissedTickBehavior};

pub struct App {
    state: State,
    ui: UiState,
    tui: Tui,
    store: Box<dyn Store>,
    notifier: Box<dyn NotificationGateway>,
    rng: ThreadRng,
}

/// Transient presentation state: input focus, buffers, the status line.
struct UiState {
    mode: InputMode,
    cursor: usize,
    input: String,
    draft: IntervalDraft,
    focus: DraftField,
    status: Option<String>,
}

impl App {
    pub fn new(
        state: State,
        store: Box<dyn Store>,
        notifier: Box<dyn NotificationGateway>,
    ) -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;
        let draft = IntervalDraft::from_duration(state.interval());

        Ok(Self {
            state,
            ui: UiState {
                mode: InputMode::Normal,
                cursor: 0,
                input: String::new(),
                draft,
                focus: DraftField::Hours,
                status: None,
            },
            tui,
            store,
            notifier,
            rng: rand::thread_rng(),
        })
    }

    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        self.tui.disable()?;

        maybe_err
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        let mut clock = interval(Duration::from_secs(1));
        clock.set_missed_tick_behavior(MissedTickBehavior::Skip);

        loop {
            let display = self.display_data();
            self.tui.render(&display)?;

            select! {
                _ = clock.tick() => {
                    if let TickOutcome::Expired(drawn) = self.state.tick(&mut self.rng) {
                        match drawn {
                            Some(exercise) => {
                                log::debug!("countdown expired, selected: {exercise}");
                                self.notifier.notify(exercise.as_str());
                            }
                            None => log::debug!("countdown expired with an empty exercise list"),
                        }
                    }
                }
                tui_event = self.tui.read_event(self.ui.mode) => {
                    let event = tui_event?;
                    if *self.handle_event(&event, &mut clock) {
                        break;
                    }
                }
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: &Event, clock: &mut Interval) -> AppShouldQuit {
        let timer_was_stopped = !self.state.timer_is_active();
        self.ui.status = None;

        match self.ui.mode {
            InputMode::Normal => {
                if *self.handle_normal_event(event) {
                    return AppShouldQuit(true);
                }
            }
            InputMode::Adding => {
                if *self.handle_adding_event(event) {
                    return AppShouldQuit(true);
                }
            }
            InputMode::EditingInterval => {
                if *self.handle_interval_event(event) {
                    return AppShouldQuit(true);
                }
            }
        }

        // Resuming from a pause must not inherit a partially elapsed tick.
        if timer_was_stopped && self.state.timer_is_active() {
            clock.reset();
        }

        AppShouldQuit(false)
    }

    fn handle_normal_event(&mut self, event: &Event) -> AppShouldQuit {
        match event {
            Event::Quit => return AppShouldQuit(true),
            Event::ToggleTimer => self.state.toggle_timer(&mut self.rng),
            Event::SkipExercise => self.state.skip_exercise(&mut self.rng),
            Event::CursorUp => self.ui.cursor = self.ui.cursor.saturating_sub(1),
            Event::CursorDown => {
                let last = self.state.exercises.len().saturating_sub(1);
                self.ui.cursor = (self.ui.cursor + 1).min(last);
            }
            Event::StartAdding => {
                self.ui.input.clear();
                self.ui.mode = InputMode::Adding;
            }
            Event::DeleteSelected => {
                if self.state.exercises.remove_at(self.ui.cursor) {
                    let last = self.state.exercises.len().saturating_sub(1);
                    self.ui.cursor = self.ui.cursor.min(last);
                }
            }
            Event::OpenIntervalSettings => {
                self.ui.draft = IntervalDraft::from_duration(self.state.interval());
                self.ui.focus = DraftField::Hours;
                self.ui.mode = InputMode::EditingInterval;
            }
            Event::RequestPermission => self.request_permission(),
            Event::Save => self.save_settings(),
            _ => (),
        }

        AppShouldQuit(false)
    }

    fn handle_adding_event(&mut self, event: &Event) -> AppShouldQuit {
        match event {
            Event::Quit => return AppShouldQuit(true),
            Event::Confirm => {
                // Blank input adds nothing; either way the line is done.
                self.state.exercises.add(&self.ui.input);
                self.ui.input.clear();
                self.ui.mode = InputMode::Normal;
            }
            Event::Cancel => {
                self.ui.input.clear();
                self.ui.mode = InputMode::Normal;
            }
            Event::Input(c) => self.ui.input.push(*c),
            Event::Backspace => {
                self.ui.input.pop();
            }
            _ => (),
        }

        AppShouldQuit(false)
    }

    fn handle_interval_event(&mut self, event: &Event) -> AppShouldQuit {
        match event {
            Event::Quit => return AppShouldQuit(true),
            Event::Confirm => match self.state.apply_interval(&self.ui.draft) {
                Ok(()) => {
                    self.ui.mode = InputMode::Normal;
                    self.ui.status = Some(format!("interval set to {}", self.state.interval()));
                    log::info!("interval committed: {}", self.state.interval());
                }
                Err(err) => {
                    self.ui.status = Some(err.to_string());
                }
            },
            Event::Cancel => self.ui.mode = InputMode::Normal,
            Event::NextField => self.ui.focus = self.ui.focus.next(),
            Event::PrevField => self.ui.focus = self.ui.focus.prev(),
            Event::Input(c) => self.ui.draft.push_digit(self.ui.focus, *c),
            Event::Backspace => self.ui.draft.backspace(self.ui.focus),
            _ => (),
        }

        AppShouldQuit(false)
    }

    fn request_permission(&mut self) {
        if self.notifier.permission() == Permission::Granted {
            return;
        }

        let permission = self.notifier.request_permission();
        log::info!("notification permission is now {permission}");
        self.ui.status = Some(format!("notifications {permission}"));
    }

    fn save_settings(&mut self) {
        let snapshot = Snapshot {
            exercises: self.state.exercises.entries(),
            interval: self.state.interval(),
        };

        match persist::save(self.store.as_mut(), &snapshot) {
            Ok(()) => {
                log::info!(
                    "saved {} exercises and interval {}",
                    self.state.exercises.len(),
                    self.state.interval()
                );
                self.ui.status = Some("settings saved".to_string());
            }
            Err(err) => {
                log::error!("failed to save settings: {err}");
                self.ui.status = Some(format!("save failed: {err}"));
            }
        }
    }

    fn display_data(&self) -> DisplayData {
        let cursor = if self.state.exercises.is_empty() {
            None
        } else {
            Some(self.ui.cursor.min(self.state.exercises.len() - 1))
        };

        DisplayData {
            current_exercise: self.state.current_exercise().map(|e| e.to_string()),
            timer_text: self.state.time_remaining().to_string(),
            interval_text: self.state.interval().to_string(),
            is_paused: !self.state.timer_is_active(),
            exercises: self.state.exercises.iter().map(|e| e.to_string()).collect(),
            cursor,
            permission: self.notifier.permission(),
            mode: self.ui.mode,
            input_buffer: self.ui.input.clone(),
            draft: self.ui.draft.clone(),
            focus: self.ui.focus,
            status_message: self.ui.status.clone(),
        }
    }
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to initialize logging: {0}")]
    Logging(#[from] log::SetLoggerError),
}
