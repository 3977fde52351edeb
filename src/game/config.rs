use serde::{Deserialize, Serialize};

use crate::types::HintLevel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub impostor_count: usize,
    pub hints_enabled: bool,
    pub hint_level: HintLevel,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            impostor_count: 1,
            hints_enabled: false,
            hint_level: HintLevel::One,
        }
    }
}

/// Distances, in the front end's vertical units, for the hold-and-lift peek.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RevealConfig {
    /// Minimum upward drag that counts as a deliberate peek.
    pub threshold: f32,
    /// Visual clamp on the reported lift. Does not affect reveal.
    pub max_lift: f32,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 90.0,
            max_lift: 140.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Seed for every random draw. `None` seeds from entropy.
    pub seed: Option<u64>,
    pub reveal: RevealConfig,
}
