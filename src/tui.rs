use crate::event::{Event, InputMode};
use crate::interval::{DraftField, IntervalDraft};
use crate::notification::Permission;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyModifiers};
use futures::StreamExt;
use std::io;
use thiserror::Error;
use tui::{backend::CrosstermBackend, Terminal};

pub mod render;
pub mod widgets;

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: EventStream,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events: EventStream::new(),
            raw_mode_enabled: false,
            alternate_screen_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors
    /// that have to be caught. Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
        }

        Ok(())
    }

    pub fn render(&mut self, display: &DisplayData) -> Result<(), TuiError> {
        self.terminal
            .draw(|frame| render::render_ui(frame, display))
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next keystroke that maps to an action under `mode`.
    pub async fn read_event(&mut self, mode: InputMode) -> Result<Event, TuiError> {
        loop {
            match self.events.next().await {
                Some(Ok(raw)) => {
                    if let Some(event) = translate(mode, &raw) {
                        return Ok(event);
                    }
                }
                Some(Err(err)) => return Err(TuiError::ReadInputEvent(err)),
                None => return Err(TuiError::InputStreamClosed),
            }
        }
    }
}

/// Everything the render pass needs, snapshotted from the app state.
pub struct DisplayData {
    pub current_exercise: Option<String>,
    pub timer_text: String,
    pub interval_text: String,
    pub is_paused: bool,
    pub exercises: Vec<String>,
    pub cursor: Option<usize>,
    pub permission: Permission,
    pub mode: InputMode,
    pub input_buffer: String,
    pub draft: IntervalDraft,
    pub focus: DraftField,
    pub status_message: Option<String>,
}

fn translate(mode: InputMode, raw: &CrosstermEvent) -> Option<Event> {
    let key = match raw {
        CrosstermEvent::Key(key) => key,
        _ => return None,
    };

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') => Some(Event::Quit),
            _ => None,
        };
    }

    match mode {
        InputMode::Normal => match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Some(Event::Quit),
            KeyCode::Char(' ') => Some(Event::ToggleTimer),
            KeyCode::Char('s') => Some(Event::SkipExercise),
            KeyCode::Char('a') => Some(Event::StartAdding),
            KeyCode::Char('d') | KeyCode::Delete => Some(Event::DeleteSelected),
            KeyCode::Char('i') => Some(Event::OpenIntervalSettings),
            KeyCode::Char('n') => Some(Event::RequestPermission),
            KeyCode::Char('w') => Some(Event::Save),
            KeyCode::Up => Some(Event::CursorUp),
            KeyCode::Down => Some(Event::CursorDown),
            _ => None,
        },
        InputMode::Adding => match key.code {
            KeyCode::Enter => Some(Event::Confirm),
            KeyCode::Esc => Some(Event::Cancel),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) => Some(Event::Input(c)),
            _ => None,
        },
        InputMode::EditingInterval => match key.code {
            KeyCode::Enter => Some(Event::Confirm),
            KeyCode::Esc => Some(Event::Cancel),
            KeyCode::Tab | KeyCode::Right => Some(Event::NextField),
            KeyCode::BackTab | KeyCode::Left => Some(Event::PrevField),
            KeyCode::Backspace => Some(Event::Backspace),
            KeyCode::Char(c) if c.is_ascii_digit() => Some(Event::Input(c)),
            _ => None,
        },
    }
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed unexpectedly")]
    InputStreamClosed,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn ctrl_c_quits_in_every_mode() {
        let ctrl_c = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));

        for mode in [InputMode::Normal, InputMode::Adding, InputMode::EditingInterval] {
            assert_eq!(translate(mode, &ctrl_c), Some(Event::Quit));
        }
    }

    #[test]
    fn normal_mode_maps_command_keys() {
        assert_eq!(translate(InputMode::Normal, &key(KeyCode::Char(' '))), Some(Event::ToggleTimer));
        assert_eq!(translate(InputMode::Normal, &key(KeyCode::Char('s'))), Some(Event::SkipExercise));
        assert_eq!(translate(InputMode::Normal, &key(KeyCode::Char('w'))), Some(Event::Save));
        assert_eq!(translate(InputMode::Normal, &key(KeyCode::Char('q'))), Some(Event::Quit));
        assert_eq!(translate(InputMode::Normal, &key(KeyCode::Char('x'))), None);
    }

    #[test]
    fn adding_mode_treats_command_keys_as_text() {
        assert_eq!(translate(InputMode::Adding, &key(KeyCode::Char('q'))), Some(Event::Input('q')));
        assert_eq!(translate(InputMode::Adding, &key(KeyCode::Char(' '))), Some(Event::Input(' ')));
        assert_eq!(translate(InputMode::Adding, &key(KeyCode::Enter)), Some(Event::Confirm));
        assert_eq!(translate(InputMode::Adding, &key(KeyCode::Esc)), Some(Event::Cancel));
    }

    #[test]
    fn interval_mode_accepts_digits_only() {
        assert_eq!(
            translate(InputMode::EditingInterval, &key(KeyCode::Char('5'))),
            Some(Event::Input('5'))
        );
        assert_eq!(translate(InputMode::EditingInterval, &key(KeyCode::Char('x'))), None);
        assert_eq!(translate(InputMode::EditingInterval, &key(KeyCode::Tab)), Some(Event::NextField));
        assert_eq!(
            translate(InputMode::EditingInterval, &key(KeyCode::BackTab)),
            Some(Event::PrevField)
        );
    }
}
