#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Browse,
    Form,
    Command,
    Filter,
}

/// Actions available while moving around the two pools
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    // Cursor
    MoveUp,
    MoveDown,
    MoveTop,
    MoveBottom,
    FocusEnabled,
    FocusDisabled,
    FocusOther,

    // Entries
    SelectEntry,
    ToggleEntry,
    EnableAll,
    DisableAll,
    ShiftUp,
    ShiftDown,
    ClearSelection,
    SetForAll,

    // Files and output
    Export,
    YankExport,

    // Mode transitions
    EditForm,
    EnterCommandMode,
    EnterFilterMode,
    ToggleHelp,
}

/// Actions available while the form has focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    NextField,
    PrevField,
    Increase,
    Decrease,
    Input(char),
    Backspace,
    Commit,
    ClearSelection,
    SetForAll,
    Leave,
}
