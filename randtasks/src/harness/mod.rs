//! Execution-harness boundary.
//!
//! The experiment driver never talks to a scheduling facility directly; it
//! drives an [`ExecutionHarness`].  The trait models the two calls every
//! backend shares, whether it is a kernel scheduling class, a remote
//! scheduler service or the in-process simulators in [`sim`]:
//!
//! 1. [`admit`](ExecutionHarness::admit) — offer one task to admission
//!    control.
//! 2. [`run_periodic_job`](ExecutionHarness::run_periodic_job) — run one
//!    bounded job of the task admitted last, until the harness reports
//!    [`JobStatus::Done`].
//!
//! Keeping the boundary this narrow is what lets the statistics pipeline be
//! tested without any real-time backend: swap in [`StubHarness`] and every
//! task is admitted, swap in [`SimHarness`] and admission behaves like a
//! kernel parameter check.

pub mod sim;

pub use sim::{SimHarness, StubHarness};

use crate::task::TaskDescriptor;

// ── Outcome types ─────────────────────────────────────────────────────────────

/// Outcome of offering one task to admission control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The harness accepted the task; its job loop may be driven.
    Admitted,
    /// The harness refused the task; it runs no jobs and counts against the
    /// set's execution ratio.
    Rejected,
}

impl Admission {
    /// Returns `true` for [`Admission::Admitted`].
    pub fn is_admitted(self) -> bool {
        matches!(self, Admission::Admitted)
    }
}

/// Progress report from one periodic job invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JobStatus {
    /// The bounded job loop has more iterations to run.
    Continue,
    /// The bounded job loop is complete; the driver moves to the next task.
    Done,
}

// ── Harness trait ─────────────────────────────────────────────────────────────

/// Interface between the experiment driver and a scheduling facility.
///
/// # Call protocol
/// For each task the driver calls [`admit`](Self::admit) exactly once.  When
/// the answer is [`Admission::Admitted`] it then calls
/// [`run_periodic_job`](Self::run_periodic_job) repeatedly until the harness
/// returns [`JobStatus::Done`].  Rejected tasks receive no job calls, and a
/// new `admit` call always refers to a new task.
pub trait ExecutionHarness {
    /// Offers one task for admission.
    fn admit(&mut self, task: &TaskDescriptor) -> Admission;

    /// Runs one bounded periodic job of the most recently admitted task.
    fn run_periodic_job(&mut self) -> JobStatus;
}

// ── Tests ─────────────────────────────────────────────────────────────────────
