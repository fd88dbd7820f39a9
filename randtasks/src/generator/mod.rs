//! Random task-set generation.
//!
//! [`TaskSetGenerator`] turns one draw of randomness into one [`TaskSet`]:
//!
//! ```text
//! task count ──► fixed_sum::sample ──► period::PeriodGenerator ──► deadline::DeadlineGenerator
//!   n ∈ [min,max]   n shares, Σ = u       n periods on the grid       n deadlines ≤ period
//!                                                                          │
//!                                          execution_cost = round(share × deadline)
//! ```
//!
//! All parameter validation happens in the constructors.  A generator that
//! was built successfully cannot fail while drawing, so the experiment loop
//! runs without per-iteration error handling.
//!
//! # Statistical contract
//! The utilization shares are drawn uniformly over the fixed-sum simplex (see
//! [`fixed_sum`]), which keeps batches of generated sets comparable across
//! total-utilization sweeps.  Requiring `u <= tasks_min` up front means every
//! drawable task count can absorb the requested total.

pub mod deadline;
pub mod error;
pub mod fixed_sum;
pub mod period;

pub use error::GenError;

use rand::Rng;
use tracing::debug;

use crate::task::{TaskDescriptor, TaskSet};

use deadline::{derive_cost, DeadlineGenerator};
use period::PeriodGenerator;

// ── TaskSetGenerator ──────────────────────────────────────────────────────────

/// Draws complete task sets with a fixed total utilization.
///
/// Construction validates the task count range against the utilization
/// target; the period and deadline generators validate their own parameters
/// before they are handed in.
#[derive(Debug, Clone)]
pub struct TaskSetGenerator {
    tasks_min: usize,
    tasks_max: usize,
    total_utilization: f64,
    periods: PeriodGenerator,
    deadlines: DeadlineGenerator,
}

impl TaskSetGenerator {
    /// Builds a generator drawing `tasks_min..=tasks_max` tasks per set whose
    /// utilization shares sum to `total_utilization`.
    ///
    /// # Errors
    /// * [`GenError::EmptyTaskCountRange`] if `tasks_min == 0` or
    ///   `tasks_max < tasks_min`.
    /// * [`GenError::UtilizationExceedsTaskCount`] if `total_utilization` is
    ///   not a finite value in `[0, tasks_min]`.  The bound uses the range's
    ///   *low* end so the fixed-sum precondition `u <= n` holds for every
    ///   count the generator can draw.
    pub fn new(
        tasks_min: usize,
        tasks_max: usize,
        total_utilization: f64,
        periods: PeriodGenerator,
        deadlines: DeadlineGenerator,
    ) -> Result<Self, GenError> {
        if tasks_min == 0 || tasks_max < tasks_min {
            return Err(GenError::EmptyTaskCountRange {
                low: tasks_min,
                high: tasks_max,
            });
        }
        if !total_utilization.is_finite()
            || total_utilization < 0.0
            || total_utilization > tasks_min as f64
        {
            return Err(GenError::UtilizationExceedsTaskCount {
                utilization: total_utilization,
                tasks_min,
            });
        }
        Ok(TaskSetGenerator {
            tasks_min,
            tasks_max,
            total_utilization,
            periods,
            deadlines,
        })
    }

    /// Draws one task set.
    ///
    /// The task count is uniform over the inclusive configured range; every
    /// count in `[tasks_min, tasks_max]` is drawn with equal probability.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<TaskSet, GenError> {
        let count = rng.random_range(self.tasks_min..=self.tasks_max);

        let shares = fixed_sum::sample(count, self.total_utilization, 1, rng)?;
        let shares = shares.column(0);
        let periods = self.periods.generate(rng, count);
        let deadlines = self.deadlines.generate(rng, &periods);

        let mut tasks = TaskSet::with_capacity(count);
        for i in 0..count {
            let descriptor = TaskDescriptor {
                execution_cost: derive_cost(shares[i], deadlines[i]),
                period: periods[i],
                relative_deadline: deadlines[i],
            };
            debug!(
                index = i,
                share = shares[i],
                cost = descriptor.execution_cost,
                period = descriptor.period,
                deadline = descriptor.relative_deadline,
                "task drawn"
            );
            tasks.push(descriptor);
        }

        debug!(
            count,
            total_utilization = self.total_utilization,
            "task set generated"
        );
        Ok(tasks)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
