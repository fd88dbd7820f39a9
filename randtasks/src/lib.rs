/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! randtasks – synthetic real-time task-set generation for schedulability
//! experiments.
//!
//! Module layout:
//!
//! ```text
//! lib.rs
//! ├── task.rs        – TaskDescriptor / TaskSet data model
//! ├── generator/     – fixed-sum sampler, period & deadline draws
//! ├── harness/       – ExecutionHarness trait + in-process simulators
//! ├── experiment/    – run driver + schedulability statistics
//! └── config.rs      – YAML experiment configuration
//! ```
//!
//! A run owns exactly one seeded random source (`rand::rngs::StdRng` in the
//! shipped binary) and threads it `&mut` through every draw, so one seed
//! reproduces the complete experiment.

pub mod config;
pub mod experiment;
pub mod generator;
pub mod harness;
pub mod task;
