/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Period generation on a quantized grid.
//!
//! Periods are drawn from `[min, max + granularity)` in either linear or
//! logarithmic space and then floored onto multiples of the granularity.  The
//! half-granularity extension of the upper bound is what gives the top grid
//! point `max` the same selection probability as every other grid point; a
//! draw from a closed `[min, max]` range would reach `max` only on the exact
//! endpoint, i.e. with probability zero.

use rand::Rng;
use serde::Deserialize;

use super::error::GenError;

// ── Distribution choice ───────────────────────────────────────────────────────

/// Shape of the period distribution over `[min, max]`.
///
/// Deserializes from the configuration file as `uniform` / `log_uniform`.
/// The typed enum replaces string comparison at draw time, so a misspelled
/// distribution name fails at parse time instead of silently selecting a
/// default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodDistribution {
    /// Every grid point is equally likely.
    #[default]
    Uniform,
    /// Uniform in log-space: each order of magnitude gets equal probability
    /// mass, which matches period spreads observed in embedded workloads.
    LogUniform,
}

// ── Period generator ──────────────────────────────────────────────────────────

/// Draws task periods from a validated `[min, max]` range.
///
/// Construction checks the range once; afterwards every draw is guaranteed to
/// land on a granularity multiple inside the range.
#[derive(Debug, Clone)]
pub struct PeriodGenerator {
    min: u64,
    max: u64,
    granularity: f64,
    distribution: PeriodDistribution,
}

/// Largest value `max + granularity` may reach.
///
/// Up to 2^53 every integer in the draw interval has an exact `f64` image;
/// past it the `+ granularity` extension is absorbed by rounding and the
/// interval can collapse to an empty range.
const EXACT_DRAW_BOUND: u64 = 1 << 53;

impl PeriodGenerator {
    /// Builds a generator for periods in `[min, max]` on multiples of
    /// `granularity`.
    ///
    /// The granularity must itself be an integer value: periods are integral
    /// time units, so a fractional grid would produce off-grid values after
    /// the final integer conversion.
    ///
    /// # Errors
    /// * [`GenError::InvalidPeriodRange`] if `min == 0` or `max < min`.
    /// * [`GenError::InvalidGranularity`] if `granularity` is not an integer
    ///   value ≥ 1 dividing both bounds.
    /// * [`GenError::PeriodRangeTooLarge`] if `max + granularity` exceeds
    ///   2^53 and the draw bounds would lose exactness in `f64`.
    pub fn new(
        min: u64,
        max: u64,
        granularity: f64,
        distribution: PeriodDistribution,
    ) -> Result<Self, GenError> {
        if min == 0 || max < min {
            return Err(GenError::InvalidPeriodRange { min, max });
        }
        let invalid = GenError::InvalidGranularity {
            granularity,
            min,
            max,
        };
        if !granularity.is_finite() || granularity < 1.0 || granularity.fract() != 0.0 {
            return Err(invalid);
        }
        let step = granularity as u64;
        if min % step != 0 || max % step != 0 {
            return Err(invalid);
        }
        if max.saturating_add(step) > EXACT_DRAW_BOUND {
            return Err(GenError::PeriodRangeTooLarge {
                max,
                limit: EXACT_DRAW_BOUND.saturating_sub(step),
            });
        }
        Ok(PeriodGenerator {
            min,
            max,
            granularity,
            distribution,
        })
    }

    /// Smallest period this generator can produce.
    pub fn min(&self) -> u64 {
        self.min
    }

    /// Draws `count` periods.
    pub fn generate<R: Rng>(&self, rng: &mut R, count: usize) -> Vec<u64> {
        let low = self.min as f64;
        let high = self.max as f64 + self.granularity;
        let (log_low, log_high) = (low.ln(), high.ln());

        (0..count)
            .map(|_| {
                let raw = match self.distribution {
                    PeriodDistribution::Uniform => rng.random_range(low..high),
                    // A narrow range at large magnitude can round to zero
                    // width in log space; every draw is then the lower bound.
                    PeriodDistribution::LogUniform if log_low < log_high => {
                        rng.random_range(log_low..log_high).exp()
                    }
                    PeriodDistribution::LogUniform => low,
                };
                self.quantize(raw)
            })
            .collect()
    }

    /// Floors a raw draw onto the granularity grid.
    ///
    /// The ln/exp round trip of the log-uniform path can land one ulp below
    /// `min`; the final clamp folds that back onto the smallest grid point.
    fn quantize(&self, raw: f64) -> u64 {
        let step = self.granularity as u64;
        let snapped = (raw / self.granularity).floor() as u64 * step;
        snapped.clamp(self.min, self.max)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
