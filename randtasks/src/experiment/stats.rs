/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Schedulability statistics.
//!
//! One [`SchedulabilityAggregator`] accumulates admission outcomes for the
//! lifetime of a single experiment run and finalizes into an
//! [`AggregateStats`].  Two metrics are tracked:
//!
//! * **schedulable fraction** — the share of task sets whose *every* task
//!   was admitted.  A set with one rejection counts as unschedulable, no
//!   matter how many of its tasks ran.
//! * **mean execution ratio** — the average over sets of
//!   `admitted / total`, which credits partially admitted sets
//!   proportionally.
//!
//! The second metric always dominates the first: a fully admitted set
//! contributes 1.0 to both, a partial set contributes 0 to the fraction but
//! its ratio to the mean.

// ── AggregateStats ────────────────────────────────────────────────────────────

/// Final metrics of one experiment run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AggregateStats {
    /// Fraction of task sets in which every task was admitted, in `[0, 1]`.
    pub schedulable_fraction: f64,

    /// Mean over task sets of the per-set fraction of admitted tasks, in
    /// `[0, 1]`.
    pub mean_execution_ratio: f64,
}

// ── SchedulabilityAggregator ──────────────────────────────────────────────────

/// Accumulates per-set admission outcomes.
///
/// Create one aggregator per experiment run; the counters only ever grow.
/// [`finalize`](Self::finalize) may be called at any point to observe the
/// statistics so far.
#[derive(Debug, Clone, Default)]
pub struct SchedulabilityAggregator {
    sets: usize,
    fully_admitted: usize,
    execution_ratio_sum: f64,
}

impl SchedulabilityAggregator {
    /// Creates an empty aggregator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one consumed task set: `admitted` of its `total` tasks entered
    /// the harness.
    ///
    /// An empty set counts as fully admitted; its execution ratio is 1.0 by
    /// vacuous truth.
    pub fn record_set(&mut self, admitted: usize, total: usize) {
        debug_assert!(
            admitted <= total,
            "recorded {admitted} admitted tasks out of {total}"
        );

        let ratio = if total == 0 {
            1.0
        } else {
            admitted as f64 / total as f64
        };

        self.sets += 1;
        self.execution_ratio_sum += ratio;
        if admitted == total {
            self.fully_admitted += 1;
        }
    }

    /// Number of task sets recorded so far.
    pub fn sets_recorded(&self) -> usize {
        self.sets
    }

    /// Divides the accumulated counters by the number of recorded sets.
    ///
    /// With no recorded sets both metrics are 0.0.
    pub fn finalize(&self) -> AggregateStats {
        if self.sets == 0 {
            return AggregateStats {
                schedulable_fraction: 0.0,
                mean_execution_ratio: 0.0,
            };
        }
        AggregateStats {
            schedulable_fraction: self.fully_admitted as f64 / self.sets as f64,
            mean_execution_ratio: self.execution_ratio_sum / self.sets as f64,
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
