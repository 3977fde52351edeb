use serde::{Deserialize, Serialize};

use crate::roster::MIN_PLAYERS;
use crate::types::{HintLevel, Role, View};

/// Everything a renderer needs after each event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub view: View,
    pub current_player_name: Option<String>,
    /// `"<1-based index>/<total>"` during a deal.
    pub progress: Option<String>,
    pub is_last_turn: bool,
    pub revealed: bool,
    pub lift_pixels: f32,
    /// Set only while the current turn is revealed.
    pub role_label: Option<Role>,
    /// Disclosed text while revealed: the solution for civilians, the hint for
    /// impostors when hints are enabled.
    pub hint_text: Option<String>,
    pub starter_name: Option<String>,
    pub players: Vec<String>,
    pub impostor_count: usize,
    pub max_impostors: usize,
    pub impostor_max_label: String,
    pub hints_enabled: bool,
    pub hint_level: HintLevel,
    pub roster_status: String,
    pub roster_warning: bool,
    pub can_review: bool,
    pub error: Option<String>,
}

pub fn format_progress(index: usize, total: usize) -> String {
    format!("{}/{}", index + 1, total)
}

pub fn format_impostor_max(max: usize) -> String {
    format!("Max: {max}")
}

pub fn format_roster_status(len: usize) -> String {
    format!("Minimum {MIN_PLAYERS}. No duplicates. ({len})")
}
