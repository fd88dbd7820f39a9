/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Core task data structures for the random task-set generator.
//!
//! One type flows through the whole pipeline:
//!
//! ```text
//! TaskSetGenerator ──(Vec<TaskDescriptor>)──► ExecutionHarness ──► SchedulabilityAggregator
//!                      ↑ one generation run        ↑ admission          ↑ fleet statistics
//! ```
//!
//! # Ownership model
//! A [`TaskSet`] is **owned** by the experiment driver for the duration of one
//! run.  The generator produces it, the driver feeds each descriptor to the
//! harness by reference, and the set is dropped once its admission outcome has
//! been recorded.  Nothing else holds onto generated tasks.

// ── TaskDescriptor ────────────────────────────────────────────────────────────

/// Timing parameters of one synthetic periodic task.
///
/// All three fields are integral time units on a shared abstract timeline; the
/// consumer decides whether a unit is a microsecond, a nanosecond or a tick.
/// The generator guarantees `relative_deadline <= period` (constrained-deadline
/// model) and `execution_cost <= relative_deadline` for every descriptor it
/// emits, but the type itself does not enforce those bounds — admission control
/// re-checks them at the harness boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TaskDescriptor {
    /// Worst-case execution cost per job.
    ///
    /// Derived as `round(utilization × relative_deadline)`, so a sufficiently
    /// small utilization share rounds to zero.  Zero-cost descriptors are
    /// representable and are rejected by admission control, not by the
    /// generator.
    pub execution_cost: u64,

    /// Activation period.  Always positive for generated tasks.
    pub period: u64,

    /// Relative deadline, measured from each activation.  Generated tasks
    /// satisfy `relative_deadline <= period`.
    pub relative_deadline: u64,
}

impl TaskDescriptor {
    /// Density fraction: `execution_cost / min(relative_deadline, period)`.
    ///
    /// For constrained-deadline tasks this is the deadline-based utilization
    /// the generator targeted.  Returns `0.0` when the denominator is zero to
    /// avoid division by zero.
    pub fn density(&self) -> f64 {
        let window = self.relative_deadline.min(self.period);
        if window == 0 {
            0.0
        } else {
            self.execution_cost as f64 / window as f64
        }
    }
}

// ── TaskSet ───────────────────────────────────────────────────────────────────

/// One generated task set, in generation order.
///
/// Plain `Vec` ownership: the driver moves the set around as a whole and the
/// descriptors are `Copy`, so no reference counting or interior mutability is
/// needed anywhere in the pipeline.
pub type TaskSet = Vec<TaskDescriptor>;

/// Sum of [`TaskDescriptor::density`] over a set.
///
/// Tracks the total utilization the fixed-sum sampler distributed across the
/// set, up to the rounding applied when integral costs were derived.
pub fn total_density(tasks: &[TaskDescriptor]) -> f64 {
    tasks.iter().map(TaskDescriptor::density).sum()
}

// ── Tests ─────────────────────────────────────────────────────────────────────
