use serde::{Deserialize, Serialize};

use crate::types::HintLevel;

/// Input from whatever front end drives the game.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UiEvent {
    AddPlayer(String),
    /// Asks for confirmation first.
    RemovePlayer(usize),
    ReorderPlayer { from: usize, to: usize },
    SetImpostorCount(usize),
    SetHintsEnabled(bool),
    SetHintLevel(HintLevel),
    StartGame,
    PointerDown { y: f32 },
    PointerMove { y: f32 },
    PointerUp,
    PointerCancel,
    Next,
    /// Asks for confirmation first, then discards the deal.
    Exit,
    BackToMenu,
    ReviewLastDeal,
}

impl UiEvent {
    pub fn is_pointer(&self) -> bool {
        matches!(
            self,
            UiEvent::PointerDown { .. }
                | UiEvent::PointerMove { .. }
                | UiEvent::PointerUp
                | UiEvent::PointerCancel
        )
    }
}
