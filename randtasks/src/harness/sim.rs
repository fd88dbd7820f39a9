/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! In-process harness implementations.
//!
//! Two simulators cover the two baselines an experiment needs:
//!
//! * [`StubHarness`] admits everything.  Running an experiment against it
//!   must report a schedulability of 1.0, which makes it the reference point
//!   for validating the statistics pipeline itself.
//! * [`SimHarness`] applies the parameter checks a kernel admission control
//!   performs before accepting a reservation, so experiments exercise the
//!   full admit/reject path without a real-time backend.
//!
//! Both count job invocations against a configured per-task bound; neither
//! consumes wall-clock time.

use tracing::debug;

use super::{Admission, ExecutionHarness, JobStatus};
use crate::task::TaskDescriptor;

/// Default number of bounded job iterations per admitted task.
pub const DEFAULT_JOB_ITERATIONS: u32 = 5;

// ── StubHarness ───────────────────────────────────────────────────────────────

/// Harness that admits every task unconditionally.
#[derive(Debug, Clone)]
pub struct StubHarness {
    iterations: u32,
    jobs_run: u32,
}

impl StubHarness {
    /// Builds a stub whose job loop reports [`JobStatus::Done`] after
    /// `iterations` invocations.
    pub fn new(iterations: u32) -> Self {
        StubHarness {
            iterations,
            jobs_run: 0,
        }
    }
}

impl Default for StubHarness {
    fn default() -> Self {
        StubHarness::new(DEFAULT_JOB_ITERATIONS)
    }
}

impl ExecutionHarness for StubHarness {
    fn admit(&mut self, _task: &TaskDescriptor) -> Admission {
        // Fresh job counter per task.
        self.jobs_run = 0;
        Admission::Admitted
    }

    fn run_periodic_job(&mut self) -> JobStatus {
        self.jobs_run += 1;
        if self.jobs_run >= self.iterations {
            JobStatus::Done
        } else {
            JobStatus::Continue
        }
    }
}

// ── SimHarness ────────────────────────────────────────────────────────────────

/// Harness that mirrors a kernel admission check on the task parameters.
///
/// A task is rejected when any of the following holds:
///
/// * `execution_cost == 0` — the reservation would be empty.  This is the
///   rejection that actually occurs for generated sets: a small utilization
///   share rounds to a zero cost.
/// * `execution_cost > relative_deadline` — the job could not finish inside
///   its own deadline even alone on the CPU.
/// * `relative_deadline > period` — outside the constrained-deadline model.
///
/// The last two cannot be produced by the generator; they guard descriptors
/// assembled by hand, the same way a kernel validates whatever userspace
/// passes in.
#[derive(Debug, Clone)]
pub struct SimHarness {
    iterations: u32,
    jobs_run: u32,
}

impl SimHarness {
    /// Builds a simulator whose job loop reports [`JobStatus::Done`] after
    /// `iterations` invocations.
    pub fn new(iterations: u32) -> Self {
        SimHarness {
            iterations,
            jobs_run: 0,
        }
    }
}

impl Default for SimHarness {
    fn default() -> Self {
        SimHarness::new(DEFAULT_JOB_ITERATIONS)
    }
}

impl ExecutionHarness for SimHarness {
    fn admit(&mut self, task: &TaskDescriptor) -> Admission {
        self.jobs_run = 0;

        if task.execution_cost == 0 {
            debug!(
                period = task.period,
                deadline = task.relative_deadline,
                "rejected: zero execution cost"
            );
            return Admission::Rejected;
        }
        if task.execution_cost > task.relative_deadline {
            debug!(
                cost = task.execution_cost,
                deadline = task.relative_deadline,
                "rejected: cost exceeds deadline"
            );
            return Admission::Rejected;
        }
        if task.relative_deadline > task.period {
            debug!(
                deadline = task.relative_deadline,
                period = task.period,
                "rejected: deadline exceeds period"
            );
            return Admission::Rejected;
        }

        Admission::Admitted
    }

    fn run_periodic_job(&mut self) -> JobStatus {
        self.jobs_run += 1;
        if self.jobs_run >= self.iterations {
            JobStatus::Done
        } else {
            JobStatus::Continue
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
