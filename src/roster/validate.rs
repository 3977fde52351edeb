use std::collections::HashSet;

use crate::game::{GameError, SessionConfig};
use crate::roster::{Player, identity_key};

pub const MIN_PLAYERS: usize = 3;

/// Checks a roster and configuration before a deal. The first failing check
/// wins, in this order: size, empty names, duplicates, impostor count.
pub fn validate(roster: &[Player], config: &SessionConfig) -> Result<(), GameError> {
    if roster.len() < MIN_PLAYERS {
        return Err(GameError::TooFewPlayers {
            min: MIN_PLAYERS,
            actual: roster.len(),
        });
    }

    let keys: Vec<String> = roster.iter().map(|p| identity_key(&p.display_name)).collect();
    if keys.iter().any(|key| key.is_empty()) {
        return Err(GameError::EmptyName);
    }

    let mut seen = HashSet::with_capacity(keys.len());
    for (player, key) in roster.iter().zip(&keys) {
        if !seen.insert(key.as_str()) {
            return Err(GameError::DuplicateName(player.display_name.clone()));
        }
    }

    let max = max_impostors(roster.len());
    if config.impostor_count > max {
        return Err(GameError::ImpostorCountOutOfRange {
            requested: config.impostor_count,
            max,
        });
    }

    Ok(())
}

pub fn max_impostors(roster_len: usize) -> usize {
    roster_len.saturating_sub(1)
}

/// Caps a requested impostor count to what the roster size allows.
pub fn clamp_impostor_count(roster: &[Player], requested: usize) -> usize {
    requested.min(max_impostors(roster.len()))
}

/// Whether any two players share an identity key.
pub fn has_duplicates(roster: &[Player]) -> bool {
    let mut seen = HashSet::with_capacity(roster.len());
    roster
        .iter()
        .any(|player| !seen.insert(identity_key(&player.display_name)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn roster(names: &[&str]) -> Vec<Player> {
        names.iter().map(|name| Player::new(*name)).collect()
    }

    fn config(impostor_count: usize) -> SessionConfig {
        SessionConfig {
            impostor_count,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_too_few_players_checked_first() {
        let err = validate(&roster(&["", ""]), &config(9)).unwrap_err();
        assert!(matches!(err, GameError::TooFewPlayers { min: 3, actual: 2 }));
        assert!(matches!(
            validate(&[], &config(0)),
            Err(GameError::TooFewPlayers { actual: 0, .. })
        ));
    }

    #[test]
    fn test_empty_name_before_duplicates() {
        let err = validate(&roster(&["Ana", "  ", "ana"]), &config(1)).unwrap_err();
        assert!(matches!(err, GameError::EmptyName));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = validate(&roster(&["Ana", "Beto", "Ana"]), &config(1)).unwrap_err();
        assert!(matches!(err, GameError::DuplicateName(ref name) if name == "Ana"));

        let err = validate(&roster(&["Ana", "Beto", " ANA "]), &config(0)).unwrap_err();
        assert!(matches!(err, GameError::DuplicateName(_)));
    }

    #[test]
    fn test_impostor_count_bounds() {
        let players = roster(&["Ana", "Beto", "Carla"]);
        assert!(validate(&players, &config(0)).is_ok());
        assert!(validate(&players, &config(2)).is_ok());
        let err = validate(&players, &config(3)).unwrap_err();
        assert!(matches!(
            err,
            GameError::ImpostorCountOutOfRange { requested: 3, max: 2 }
        ));
    }

    #[test]
    fn test_clamp_impostor_count() {
        assert_eq!(clamp_impostor_count(&roster(&["a", "b", "c"]), 5), 2);
        assert_eq!(clamp_impostor_count(&roster(&["a", "b", "c"]), 1), 1);
        assert_eq!(clamp_impostor_count(&roster(&["a"]), 1), 0);
        assert_eq!(clamp_impostor_count(&[], 3), 0);
    }

    #[test]
    fn test_has_duplicates() {
        assert!(has_duplicates(&roster(&["Ana", "Beto", "ana "])));
        assert!(!has_duplicates(&roster(&["Ana", "Beto"])));
    }

    proptest! {
        #[test]
        fn unique_rosters_validate(n in 3usize..24, pick in 0usize..1000) {
            let players: Vec<Player> =
                (0..n).map(|i| Player::new(format!("Player {i}"))).collect();
            let count = pick % n;
            prop_assert!(validate(&players, &config(count)).is_ok());
        }

        #[test]
        fn short_rosters_always_too_few(n in 0usize..3, count in 0usize..10) {
            let players: Vec<Player> = (0..n).map(|_| Player::new("")).collect();
            let is_too_few = matches!(
                validate(&players, &config(count)),
                Err(GameError::TooFewPlayers { .. })
            );
            prop_assert!(is_too_few);
        }
    }
}
