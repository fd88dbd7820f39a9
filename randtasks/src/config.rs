//! Experiment configuration loading.
//!
//! The expected YAML structure is:
//! ```yaml
//! task_sets: 4
//! seed: 42
//! tasks_min: 2
//! tasks_max: 10
//! total_utilization: 2.0
//! period_min: 100
//! period_max: 10000
//! period_granularity: 1
//! period_distribution: uniform   # or: log_uniform
//! deadline_floor: 100
//! job_iterations: 5
//! ```
//!
//! Every key is optional; a partial file (or no file at all) falls back to
//! the defaults above.  Structural validity is checked at parse time, value
//! validity when [`build_generator`](ExperimentConfig::build_generator)
//! hands the numbers to the generation constructors.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::{debug, info};

use crate::generator::deadline::DeadlineGenerator;
use crate::generator::period::{PeriodDistribution, PeriodGenerator};
use crate::generator::{GenError, TaskSetGenerator};

// ── ExperimentConfig ──────────────────────────────────────────────────────────

/// Experiment parameters as they appear in the YAML file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Number of task sets to generate and execute per run.
    pub task_sets: usize,

    /// Seed for the random source.  Absent means one run seeds itself from
    /// OS entropy and is not reproducible.
    pub seed: Option<u64>,

    /// Smallest drawable task count per set.
    pub tasks_min: usize,

    /// Largest drawable task count per set (inclusive).
    pub tasks_max: usize,

    /// Total utilization distributed across each set.
    pub total_utilization: f64,

    /// Smallest drawable period.
    pub period_min: u64,

    /// Largest drawable period (inclusive).
    pub period_max: u64,

    /// Period grid step; `period_min` and `period_max` must be multiples.
    pub period_granularity: f64,

    /// Shape of the period distribution.
    pub period_distribution: PeriodDistribution,

    /// Smallest drawable relative deadline.
    pub deadline_floor: u64,

    /// Bounded job-loop length the harness runs per admitted task.
    pub job_iterations: u32,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        ExperimentConfig {
            task_sets: 4,
            seed: None,
            tasks_min: 2,
            tasks_max: 10,
            total_utilization: 2.0,
            period_min: 100,
            period_max: 10_000,
            period_granularity: 1.0,
            period_distribution: PeriodDistribution::Uniform,
            deadline_floor: 100,
            job_iterations: 5,
        }
    }
}

impl ExperimentConfig {
    /// Parses `path` into a configuration; missing keys keep their defaults.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened or if the YAML is
    /// structurally invalid.
    pub fn load_from_file(path: &Path) -> Result<Self> {
        info!("Loading experiment configuration from: {}", path.display());

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Cannot open configuration file: {}", path.display()))?;

        let config: ExperimentConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse YAML file: {}", path.display()))?;

        debug!(?config, "parsed experiment configuration");
        Ok(config)
    }

    /// Builds the validated [`TaskSetGenerator`] this configuration
    /// describes.
    ///
    /// # Errors
    /// Propagates the [`GenError`] of the first constructor that rejects its
    /// parameters.
    pub fn build_generator(&self) -> Result<TaskSetGenerator, GenError> {
        let periods = PeriodGenerator::new(
            self.period_min,
            self.period_max,
            self.period_granularity,
            self.period_distribution,
        )?;
        let deadlines = DeadlineGenerator::new(self.deadline_floor, periods.min())?;
        TaskSetGenerator::new(
            self.tasks_min,
            self.tasks_max,
            self.total_utilization,
            periods,
            deadlines,
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    /// Helper: write a YAML string to a temp file and return it.
    fn yaml_tempfile(content: &str) -> NamedTempFile {
        let mut f = NamedTempFile::new().unwrap();
        f.write_all(content.as_bytes()).unwrap();
        f
    }

    #[test]
    fn defaults_describe_a_buildable_generator() {
        let config = ExperimentConfig::default();
        assert_eq!(config.task_sets, 4);
        assert_eq!(config.seed, None);
        assert_eq!(config.tasks_min, 2);
        assert_eq!(config.tasks_max, 10);
        assert_eq!(config.total_utilization, 2.0);
        assert_eq!(config.period_min, 100);
        assert_eq!(config.period_max, 10_000);
        assert_eq!(config.period_distribution, PeriodDistribution::Uniform);
        assert_eq!(config.deadline_floor, 100);
        assert_eq!(config.job_iterations, 5);

        assert!(config.build_generator().is_ok());
    }

    #[test]
    fn load_full_yaml() {
        let yaml = r#"
task_sets: 16
seed: 42
tasks_min: 3
tasks_max: 8
total_utilization: 1.5
period_min: 200
period_max: 20000
period_granularity: 200
period_distribution: log_uniform
deadline_floor: 150
job_iterations: 9
"#;
        let f = yaml_tempfile(yaml);
        let config = ExperimentConfig::load_from_file(f.path()).unwrap();

        assert_eq!(config.task_sets, 16);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.tasks_min, 3);
        assert_eq!(config.tasks_max, 8);
        assert_eq!(config.total_utilization, 1.5);
        assert_eq!(config.period_min, 200);
        assert_eq!(config.period_max, 20_000);
        assert_eq!(config.period_granularity, 200.0);
        assert_eq!(config.period_distribution, PeriodDistribution::LogUniform);
        assert_eq!(config.deadline_floor, 150);
        assert_eq!(config.job_iterations, 9);

        assert!(config.build_generator().is_ok());
    }

    #[test]
    fn partial_yaml_keeps_defaults_for_missing_keys() {
        let yaml = "task_sets: 7\nseed: 5\n";
        let f = yaml_tempfile(yaml);
        let config = ExperimentConfig::load_from_file(f.path()).unwrap();

        assert_eq!(config.task_sets, 7);
        assert_eq!(config.seed, Some(5));
        // Everything else stays at its default.
        assert_eq!(config.tasks_min, 2);
        assert_eq!(config.tasks_max, 10);
        assert_eq!(config.total_utilization, 2.0);
    }

    #[test]
    fn empty_mapping_is_the_default_config() {
        let f = yaml_tempfile("{}\n");
        let config = ExperimentConfig::load_from_file(f.path()).unwrap();
        assert_eq!(config.task_sets, 4);
        assert!(config.build_generator().is_ok());
    }

    #[test]
    fn missing_file_returns_error() {
        let result = ExperimentConfig::load_from_file(Path::new("/nonexistent/experiment.yaml"));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_yaml_returns_error() {
        let f = yaml_tempfile("this is: not: valid: yaml: content:::");
        assert!(ExperimentConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn unknown_distribution_name_fails_at_parse_time() {
        let f = yaml_tempfile("period_distribution: parabolic\n");
        assert!(ExperimentConfig::load_from_file(f.path()).is_err());
    }

    #[test]
    fn inconsistent_values_fail_when_building_the_generator() {
        // Parses fine; the utilization bound is a generator-level rule.
        let yaml = "tasks_min: 2\ntotal_utilization: 5.0\n";
        let f = yaml_tempfile(yaml);
        let config = ExperimentConfig::load_from_file(f.path()).unwrap();

        assert!(matches!(
            config.build_generator(),
            Err(GenError::UtilizationExceedsTaskCount { .. })
        ));
    }

    #[test]
    fn deadline_floor_above_period_min_fails_when_building() {
        let yaml = "period_min: 100\ndeadline_floor: 500\n";
        let f = yaml_tempfile(yaml);
        let config = ExperimentConfig::load_from_file(f.path()).unwrap();

        assert!(matches!(
            config.build_generator(),
            Err(GenError::InvalidDeadlineFloor { .. })
        ));
    }
}
