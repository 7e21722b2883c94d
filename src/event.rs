/// How keystrokes are currently being interpreted.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    /// Typing a new exercise into the input line.
    Adding,
    /// Editing the hours/minutes/seconds interval fields.
    EditingInterval,
}

/// A user action, independent of the input device that produced it.
#[derive(Debug, PartialEq, Eq)]
pub enum Event {
    Quit,
    ToggleTimer,
    SkipExercise,
    CursorUp,
    CursorDown,
    StartAdding,
    DeleteSelected,
    OpenIntervalSettings,
    RequestPermission,
    Save,
    Input(char),
    Backspace,
    Confirm,
    Cancel,
    NextField,
    PrevField,
}
