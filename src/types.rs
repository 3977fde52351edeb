use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::game::GameError;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
pub enum Role {
    Civilian,
    Impostor,
}

/// Screen the front end should show.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum View {
    Menu,
    Deal,
    Start,
}

/// How specific the hint shown to impostors is. `One` is the vaguest.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Default,
    Serialize,
    Deserialize,
    Display,
    EnumIter,
)]
#[serde(try_from = "u8", into = "u8")]
pub enum HintLevel {
    #[default]
    #[strum(serialize = "1")]
    One,
    #[strum(serialize = "2")]
    Two,
    #[strum(serialize = "3")]
    Three,
}

impl HintLevel {
    pub const ALL: [HintLevel; 3] = [HintLevel::One, HintLevel::Two, HintLevel::Three];

    /// Zero-based position into a secret's hint list.
    pub const fn index(self) -> usize {
        match self {
            HintLevel::One => 0,
            HintLevel::Two => 1,
            HintLevel::Three => 2,
        }
    }

    pub const fn as_u8(self) -> u8 {
        self.index() as u8 + 1
    }
}

impl TryFrom<u8> for HintLevel {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(HintLevel::One),
            2 => Ok(HintLevel::Two),
            3 => Ok(HintLevel::Three),
            other => Err(GameError::InvalidHintLevel(other)),
        }
    }
}

impl From<HintLevel> for u8 {
    fn from(level: HintLevel) -> Self {
        level.as_u8()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_labels() {
        assert_eq!(Role::Impostor.to_string(), "Impostor");
        assert_eq!(Role::Civilian.to_string(), "Civilian");
    }

    #[test]
    fn test_view_serializes_lowercase() {
        assert_eq!(View::Start.to_string(), "start");
        assert_eq!(serde_json::to_string(&View::Deal).unwrap(), "\"deal\"");
    }

    #[test]
    fn test_hint_level_conversions() {
        for level in HintLevel::ALL {
            assert_eq!(HintLevel::try_from(level.as_u8()).unwrap(), level);
        }
        assert!(HintLevel::try_from(0).is_err());
        assert!(HintLevel::try_from(4).is_err());
        assert_eq!(serde_json::from_str::<HintLevel>("3").unwrap(), HintLevel::Three);
        assert!(serde_json::from_str::<HintLevel>("7").is_err());
    }
}
