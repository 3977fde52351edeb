use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::{Builder, Uuid};

use crate::game::{GameError, RoleAssignment, SessionConfig};
use crate::roster::Player;
use crate::types::{HintLevel, Role};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DealPhase {
    InTurn { index: usize, revealed: bool },
    Completed { starter: usize },
}

/// Impostor hint settings, read from the live config whenever a role is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HintSettings {
    pub enabled: bool,
    pub level: HintLevel,
}

impl From<&SessionConfig> for HintSettings {
    fn from(config: &SessionConfig) -> Self {
        Self {
            enabled: config.hints_enabled,
            level: config.hint_level,
        }
    }
}

/// The pass-the-device walk over one deal.
///
/// The session keeps the roster it was dealt with, so replaying it later is
/// unaffected by edits made to the live roster in the meantime.
#[derive(Debug, Clone)]
pub struct DealSession {
    pub id: Uuid,
    players: Vec<Player>,
    assignment: RoleAssignment,
    phase: DealPhase,
}

impl DealSession {
    /// `players` must be non-empty. The id is drawn from `rng`, so seeded
    /// runs produce the same ids.
    pub fn start(players: Vec<Player>, assignment: RoleAssignment, rng: &mut impl Rng) -> Self {
        Self {
            id: Builder::from_random_bytes(rng.r#gen()).into_uuid(),
            players,
            assignment,
            phase: DealPhase::InTurn {
                index: 0,
                revealed: false,
            },
        }
    }

    pub fn phase(&self) -> DealPhase {
        self.phase
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn assignment(&self) -> &RoleAssignment {
        &self.assignment
    }

    pub fn is_completed(&self) -> bool {
        matches!(self.phase, DealPhase::Completed { .. })
    }

    pub fn current_index(&self) -> Option<usize> {
        match self.phase {
            DealPhase::InTurn { index, .. } => Some(index),
            DealPhase::Completed { .. } => None,
        }
    }

    pub fn current_player(&self) -> Option<&Player> {
        self.current_index().and_then(|index| self.players.get(index))
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.phase, DealPhase::InTurn { revealed: true, .. })
    }

    pub fn is_last_turn(&self) -> bool {
        self.current_index() == Some(self.players.len().saturating_sub(1))
    }

    pub fn current_role(&self) -> Option<Role> {
        self.current_index()
            .map(|index| self.assignment.role_of(index))
    }

    /// Text disclosed to the current player while revealed: the solution for
    /// civilians, the hint at `hints.level` for impostors when hints are on.
    pub fn disclosure(&self, hints: HintSettings) -> Option<&str> {
        if !self.is_revealed() {
            return None;
        }
        let secret = self.assignment.secret();
        match self.current_role()? {
            Role::Civilian => Some(secret.solution.as_str()),
            Role::Impostor if hints.enabled => Some(secret.hint(hints.level)),
            Role::Impostor => None,
        }
    }

    pub fn starter(&self) -> Option<&Player> {
        match self.phase {
            DealPhase::Completed { starter } => self.players.get(starter),
            DealPhase::InTurn { .. } => None,
        }
    }

    pub fn set_revealed(&mut self, revealed: bool) -> Result<(), GameError> {
        match &mut self.phase {
            DealPhase::InTurn { revealed: current, .. } => {
                *current = revealed;
                Ok(())
            }
            DealPhase::Completed { .. } => Err(GameError::NotInTurn),
        }
    }

    /// Hands the device to the next player, or draws the starter after the
    /// last turn. Any player may start, impostor or not.
    pub fn advance(&mut self, rng: &mut impl Rng) -> Result<DealPhase, GameError> {
        let DealPhase::InTurn { index, .. } = self.phase else {
            return Err(GameError::NotInTurn);
        };
        self.phase = if index + 1 < self.players.len() {
            DealPhase::InTurn {
                index: index + 1,
                revealed: false,
            }
        } else {
            DealPhase::Completed {
                starter: rng.gen_range(0..self.players.len()),
            }
        };
        Ok(self.phase)
    }

    /// Walks the same deal again from the first player. Roles and secret are
    /// reused; the starter is drawn afresh when the walk completes.
    pub fn replay(&mut self) -> Result<(), GameError> {
        if !self.is_completed() {
            return Err(GameError::DealNotCompleted);
        }
        self.phase = DealPhase::InTurn {
            index: 0,
            revealed: false,
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::SecretCatalog;
    use crate::game::assign;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn players(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(format!("P{i}"))).collect()
    }

    fn session(n: usize, config: SessionConfig, rng: &mut StdRng) -> DealSession {
        let roster = players(n);
        let assignment = assign(&roster, &config, &SecretCatalog::builtin(), rng);
        DealSession::start(roster, assignment, rng)
    }

    fn config(impostor_count: usize, hints_enabled: bool) -> SessionConfig {
        SessionConfig {
            impostor_count,
            hints_enabled,
            hint_level: HintLevel::Two,
        }
    }

    #[test]
    fn test_starts_hidden_at_first_player() {
        let mut rng = StdRng::seed_from_u64(1);
        let session = session(4, config(1, false), &mut rng);
        assert_eq!(
            session.phase(),
            DealPhase::InTurn {
                index: 0,
                revealed: false
            }
        );
        assert_eq!(session.current_player().unwrap().display_name, "P0");
        assert!(session.disclosure(HintSettings::from(&config(1, true))).is_none());
    }

    #[test]
    fn test_id_follows_seed() {
        let a = session(3, config(1, false), &mut StdRng::seed_from_u64(12));
        let b = session(3, config(1, false), &mut StdRng::seed_from_u64(12));
        let c = session(3, config(1, false), &mut StdRng::seed_from_u64(13));
        assert_eq!(a.id, b.id);
        assert_ne!(a.id, c.id);
        assert_eq!(a.id.get_version_num(), 4);
    }

    #[test]
    fn test_completes_exactly_on_nth_advance() {
        let mut rng = StdRng::seed_from_u64(2);
        for n in 3..8 {
            let mut session = session(n, config(1, false), &mut rng);
            for call in 1..n {
                let phase = session.advance(&mut rng).unwrap();
                assert_eq!(
                    phase,
                    DealPhase::InTurn {
                        index: call,
                        revealed: false
                    }
                );
            }
            assert!(session.is_last_turn());
            assert!(matches!(
                session.advance(&mut rng).unwrap(),
                DealPhase::Completed { starter } if starter < n
            ));
            assert!(session.starter().is_some());
            assert_eq!(session.advance(&mut rng), Err(GameError::NotInTurn));
        }
    }

    #[test]
    fn test_advance_resets_reveal() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = session(3, config(1, false), &mut rng);
        session.set_revealed(true).unwrap();
        assert!(session.is_revealed());
        session.advance(&mut rng).unwrap();
        assert!(!session.is_revealed());
    }

    #[test]
    fn test_set_revealed_false_is_idempotent() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut session = session(3, config(1, false), &mut rng);
        session.set_revealed(false).unwrap();
        let once = session.phase();
        session.set_revealed(false).unwrap();
        assert_eq!(session.phase(), once);
    }

    #[test]
    fn test_set_revealed_rejected_when_completed() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut session = session(3, config(0, false), &mut rng);
        for _ in 0..3 {
            session.advance(&mut rng).unwrap();
        }
        assert_eq!(session.set_revealed(true), Err(GameError::NotInTurn));
    }

    #[test]
    fn test_disclosure_by_role() {
        let mut rng = StdRng::seed_from_u64(6);
        let mut session = session(4, config(1, true), &mut rng);
        let secret = session.assignment().secret().clone();
        for _ in 0..4 {
            session.set_revealed(true).unwrap();
            let expected = match session.current_role().unwrap() {
                Role::Civilian => secret.solution.as_str(),
                Role::Impostor => secret.hints[1].as_str(),
            };
            let hints = HintSettings::from(&config(1, true));
            assert_eq!(session.disclosure(hints), Some(expected));
            session.advance(&mut rng).unwrap();
        }
    }

    #[test]
    fn test_impostor_without_hints_sees_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut session = session(3, config(2, false), &mut rng);
        let impostor = *session.assignment().impostors().iter().next().unwrap();
        for _ in 0..impostor {
            session.advance(&mut rng).unwrap();
        }
        session.set_revealed(true).unwrap();
        assert_eq!(session.current_role(), Some(Role::Impostor));
        assert_eq!(session.disclosure(HintSettings::from(&config(2, false))), None);
    }

    #[test]
    fn test_replay_reuses_assignment() {
        let mut rng = StdRng::seed_from_u64(8);
        let mut session = session(3, config(1, true), &mut rng);
        assert_eq!(session.replay(), Err(GameError::DealNotCompleted));

        let before = session.assignment().clone();
        for _ in 0..3 {
            session.advance(&mut rng).unwrap();
        }
        session.replay().unwrap();
        assert_eq!(
            session.phase(),
            DealPhase::InTurn {
                index: 0,
                revealed: false
            }
        );
        assert_eq!(session.assignment(), &before);

        for _ in 0..3 {
            session.advance(&mut rng).unwrap();
        }
        assert!(session.is_completed());
        assert_eq!(session.assignment(), &before);
    }

    #[test]
    fn test_starter_is_redrawn_each_completion() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = session(3, config(1, false), &mut rng);
        let mut starters = std::collections::HashSet::new();
        for _ in 0..60 {
            for _ in 0..3 {
                session.advance(&mut rng).unwrap();
            }
            if let DealPhase::Completed { starter } = session.phase() {
                starters.insert(starter);
            }
            session.replay().unwrap();
        }
        assert_eq!(starters.len(), 3);
    }
}
