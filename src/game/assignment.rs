use std::collections::BTreeSet;

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::catalog::{SecretCatalog, SecretEntry};
use crate::game::SessionConfig;
use crate::roster::Player;
use crate::types::Role;

/// Roles for one deal: which seats are impostors, and the shared secret.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleAssignment {
    impostors: BTreeSet<usize>,
    secret: SecretEntry,
}

impl RoleAssignment {
    pub fn impostors(&self) -> &BTreeSet<usize> {
        &self.impostors
    }

    pub fn secret(&self) -> &SecretEntry {
        &self.secret
    }

    pub fn is_impostor(&self, index: usize) -> bool {
        self.impostors.contains(&index)
    }

    pub fn role_of(&self, index: usize) -> Role {
        if self.is_impostor(index) {
            Role::Impostor
        } else {
            Role::Civilian
        }
    }
}

/// Draws `config.impostor_count` distinct seats uniformly and one secret.
///
/// The roster and config must already have passed
/// [`validate`](crate::roster::validate).
pub fn assign(
    roster: &[Player],
    config: &SessionConfig,
    catalog: &SecretCatalog,
    rng: &mut impl Rng,
) -> RoleAssignment {
    let mut seats: Vec<usize> = (0..roster.len()).collect();
    seats.shuffle(rng);
    let impostors = seats
        .into_iter()
        .take(config.impostor_count)
        .collect::<BTreeSet<_>>();
    let secret = catalog.choose(rng).clone();

    RoleAssignment { impostors, secret }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn players(n: usize) -> Vec<Player> {
        (0..n).map(|i| Player::new(format!("P{i}"))).collect()
    }

    fn config(impostor_count: usize) -> SessionConfig {
        SessionConfig {
            impostor_count,
            ..SessionConfig::default()
        }
    }

    #[test]
    fn test_exact_count_of_distinct_indices() {
        let catalog = SecretCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(1);
        for n in 3..12 {
            let roster = players(n);
            for k in 0..n {
                let assignment = assign(&roster, &config(k), &catalog, &mut rng);
                assert_eq!(assignment.impostors().len(), k);
                assert!(assignment.impostors().iter().all(|&i| i < n));
            }
        }
    }

    #[test]
    fn test_secret_comes_from_catalog() {
        let catalog = SecretCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(2);
        let assignment = assign(&players(4), &config(1), &catalog, &mut rng);
        assert!(catalog.entries().contains(assignment.secret()));
    }

    #[test]
    fn test_same_seed_same_assignment() {
        let catalog = SecretCatalog::builtin();
        let roster = players(6);
        let a = assign(&roster, &config(2), &catalog, &mut StdRng::seed_from_u64(99));
        let b = assign(&roster, &config(2), &catalog, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn test_roles_follow_impostor_set() {
        let catalog = SecretCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(3);
        let assignment = assign(&players(5), &config(2), &catalog, &mut rng);
        let impostor_roles = (0..5)
            .filter(|&i| assignment.role_of(i) == Role::Impostor)
            .count();
        assert_eq!(impostor_roles, 2);
    }

    #[test]
    fn test_civilian_seat_is_uniform() {
        // With n - 1 impostors exactly one civilian is left; it should land on
        // every seat about equally often.
        let n = 10;
        let trials = 20_000;
        let roster = players(n);
        let catalog = SecretCatalog::builtin();
        let mut rng = StdRng::seed_from_u64(2024);
        let mut civilian_counts = vec![0u32; n];
        for _ in 0..trials {
            let assignment = assign(&roster, &config(n - 1), &catalog, &mut rng);
            let civilian = (0..n).find(|&i| !assignment.is_impostor(i)).unwrap();
            civilian_counts[civilian] += 1;
        }
        let expected = trials as f64 / n as f64;
        for count in civilian_counts {
            let deviation = (count as f64 - expected).abs() / expected;
            assert!(deviation < 0.1, "seat count {count} too far from {expected}");
        }
    }
}
