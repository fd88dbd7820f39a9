/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Constrained deadlines and the execution costs derived from them.
//!
//! Each task's relative deadline is drawn uniformly from the integers in
//! `[floor, period]`, so every generated task satisfies the constrained
//! deadline model `deadline <= period`.  The worst-case execution cost then
//! scales the task's utilization share by its *deadline* rather than its
//! period: a task that must finish well before its next activation gets a
//! proportionally smaller budget.

use rand::Rng;

use super::error::GenError;

// ── Deadline generator ────────────────────────────────────────────────────────

/// Draws one relative deadline per period from `[floor, period]`.
#[derive(Debug, Clone)]
pub struct DeadlineGenerator {
    floor: u64,
}

impl DeadlineGenerator {
    /// Builds a generator with the given lower bound.
    ///
    /// `period_min` is the smallest period the paired [`PeriodGenerator`] can
    /// produce; the floor must not exceed it, otherwise the draw range
    /// `[floor, period]` would be empty for the shortest periods.
    ///
    /// # Errors
    /// [`GenError::InvalidDeadlineFloor`] if `floor == 0` or
    /// `floor > period_min`.
    ///
    /// [`PeriodGenerator`]: super::period::PeriodGenerator
    pub fn new(floor: u64, period_min: u64) -> Result<Self, GenError> {
        if floor == 0 || floor > period_min {
            return Err(GenError::InvalidDeadlineFloor { floor, period_min });
        }
        Ok(DeadlineGenerator { floor })
    }

    /// Draws one deadline per period, uniform over the integers in
    /// `[floor, period]`.
    ///
    /// Periods must respect the `period_min` the generator was constructed
    /// against.
    pub fn generate<R: Rng>(&self, rng: &mut R, periods: &[u64]) -> Vec<u64> {
        periods
            .iter()
            .map(|&period| {
                debug_assert!(
                    period >= self.floor,
                    "period {period} below the deadline floor {}",
                    self.floor
                );
                rng.random_range(self.floor..=period)
            })
            .collect()
    }
}

// ── Cost derivation ───────────────────────────────────────────────────────────

/// Worst-case execution cost for a utilization share and its deadline:
/// `round(utilization × deadline)`, rounded half away from zero.
///
/// A share small enough that the product rounds below one yields a zero cost;
/// the generator emits such descriptors unchanged and leaves rejecting them
/// to admission control.
pub fn derive_cost(utilization: f64, deadline: u64) -> u64 {
    (utilization * deadline as f64).round() as u64
}

// ── Tests ─────────────────────────────────────────────────────────────────────
