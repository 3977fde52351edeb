use std::collections::HashMap;
use std::time::Duration;

use crate::game::{DealPhase, DealSession};

/// Per-seat tallies over many completed deals.
#[derive(Debug, Default, Clone)]
pub struct DealStats {
    pub deals: u32,
    pub impostors_by_seat: Vec<u32>,
    pub starters_by_seat: Vec<u32>,
    pub impostor_starts: u32,
    pub secrets: HashMap<String, u32>,
    pub total_duration: Duration,
}

impl DealStats {
    pub fn new(seats: usize) -> Self {
        Self {
            impostors_by_seat: vec![0; seats],
            starters_by_seat: vec![0; seats],
            ..Self::default()
        }
    }

    pub fn record_deal(&mut self, session: &DealSession, duration: Duration) {
        self.deals += 1;
        self.total_duration += duration;

        for &seat in session.assignment().impostors() {
            if let Some(count) = self.impostors_by_seat.get_mut(seat) {
                *count += 1;
            }
        }

        if let DealPhase::Completed { starter } = session.phase() {
            if let Some(count) = self.starters_by_seat.get_mut(starter) {
                *count += 1;
            }
            if session.assignment().is_impostor(starter) {
                self.impostor_starts += 1;
            }
        }

        *self
            .secrets
            .entry(session.assignment().secret().solution.clone())
            .or_insert(0) += 1;
    }

    /// Fraction of deals in which `seat` was an impostor.
    pub fn impostor_rate(&self, seat: usize) -> f64 {
        if self.deals == 0 {
            return 0.0;
        }
        self.impostors_by_seat.get(seat).copied().unwrap_or(0) as f64 / self.deals as f64
    }

    pub fn starter_rate(&self, seat: usize) -> f64 {
        if self.deals == 0 {
            return 0.0;
        }
        self.starters_by_seat.get(seat).copied().unwrap_or(0) as f64 / self.deals as f64
    }

    pub fn get_avg_duration(&self) -> Duration {
        if self.deals == 0 {
            return Duration::ZERO;
        }
        self.total_duration / self.deals
    }
}
