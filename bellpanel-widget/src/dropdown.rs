use serde::{Deserialize, Serialize};

use crate::document::Key;

/// Visibility of the notification panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DropdownState {
    #[default]
    Closed,
    Open,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropdownInput {
    TriggerClicked,
    /// Pointer event outside both trigger and panel.
    OutsidePointer,
    KeyPressed(Key),
    PanelFocused,
    PanelBlurred,
    EntryActivated,
}

impl DropdownState {
    pub fn is_open(self) -> bool {
        matches!(self, DropdownState::Open)
    }

    pub fn toggled(self) -> Self {
        match self {
            DropdownState::Open => DropdownState::Closed,
            DropdownState::Closed => DropdownState::Open,
        }
    }

    pub fn next(self, input: &DropdownInput) -> Self {
        use DropdownInput::*;
        match input {
            TriggerClicked => self.toggled(),
            OutsidePointer | KeyPressed(Key::Escape) if self.is_open() => DropdownState::Closed,
            OutsidePointer | KeyPressed(_) => self,
            PanelFocused => DropdownState::Open,
            PanelBlurred | EntryActivated => DropdownState::Closed,
        }
    }
}
