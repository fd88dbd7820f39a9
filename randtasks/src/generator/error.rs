/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Structured error type for the generation pipeline.
//!
//! Every parameter problem is caught when a component is constructed, never
//! in the middle of a drawing loop.  A [`TaskSetGenerator`] that was built
//! successfully can generate forever without failing, which is why the
//! experiment driver validates once and then runs unattended.
//!
//! [`TaskSetGenerator`]: super::TaskSetGenerator

use thiserror::Error;

/// Validation failure raised while building a generation component.
///
/// Each variant names the constructor that produces it:
///
/// | Variant | Raised by |
/// |---|---|
/// | `ZeroDimension` / `UtilizationOutOfRange` | [`fixed_sum::sample`](super::fixed_sum::sample) |
/// | `EmptyTaskCountRange` / `UtilizationExceedsTaskCount` | [`TaskSetGenerator::new`](super::TaskSetGenerator::new) |
/// | `InvalidPeriodRange` / `InvalidGranularity` / `PeriodRangeTooLarge` | [`PeriodGenerator::new`](super::period::PeriodGenerator::new) |
/// | `InvalidDeadlineFloor` | [`DeadlineGenerator::new`](super::deadline::DeadlineGenerator::new) |
#[derive(Debug, Error)]
pub enum GenError {
    /// A fixed-sum sample was requested for zero dimensions.
    #[error("fixed-sum sample requested for 0 dimensions")]
    ZeroDimension,

    /// The requested column sum cannot be met with entries in `[0, 1]`.
    ///
    /// An n-dimensional unit hypercube only contains points whose coordinates
    /// sum to a value in `[0, n]`.
    #[error("target sum {utilization} is outside [0, {dimension}] for a {dimension}-dimensional sample")]
    UtilizationOutOfRange { utilization: f64, dimension: usize },

    /// The task count range contains no drawable value.
    #[error("task count range [{low}, {high}] is empty or starts below 1")]
    EmptyTaskCountRange { low: usize, high: usize },

    /// The total utilization can exceed the number of tasks in a drawn set.
    ///
    /// The bound is checked against the *smallest* drawable count so that
    /// every possible draw satisfies the fixed-sum precondition `u <= n`.
    #[error(
        "total utilization {utilization} must lie in [0, {tasks_min}] (the smallest drawable task count)"
    )]
    UtilizationExceedsTaskCount { utilization: f64, tasks_min: usize },

    /// The period range is empty or starts at zero.
    #[error("period range [{min}, {max}] is empty or starts at 0")]
    InvalidPeriodRange { min: u64, max: u64 },

    /// The granularity is not an integer value ≥ 1 dividing both period
    /// bounds.
    ///
    /// Quantization floors each draw onto the granularity grid; if the bounds
    /// are off-grid the floored values can escape `[min, max]`, and a
    /// fractional grid cannot produce integral periods.
    #[error(
        "granularity {granularity} must be an integer ≥ 1 dividing both period bounds [{min}, {max}]"
    )]
    InvalidGranularity { granularity: f64, min: u64, max: u64 },

    /// The period bounds are too large to draw through `f64` arithmetic.
    ///
    /// Sampling extends the range to `max + granularity` and converts the
    /// bounds to `f64`; past 2^53 the extension is absorbed by rounding and
    /// the draw interval can collapse to an empty range.
    #[error("period max {max} exceeds the largest exactly drawable bound {limit}")]
    PeriodRangeTooLarge { max: u64, limit: u64 },

    /// The deadline floor is zero or larger than the smallest drawable period.
    ///
    /// Deadlines are drawn from `[floor, period]`, so the floor must not
    /// exceed any period the period generator can produce.
    #[error("deadline floor {floor} must lie in [1, {period_min}] (the smallest drawable period)")]
    InvalidDeadlineFloor { floor: u64, period_min: u64 },
}
