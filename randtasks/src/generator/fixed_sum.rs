/*
SPDX-FileCopyrightText: Copyright 2026 LG Electronics Inc.
SPDX-License-Identifier: MIT
*/

//! Fixed-sum simplex sampling.
//!
//! Implements Roger Stafford's `randfixedsum` (MATLAB File Exchange, 2006):
//! draw `m` vectors of `n` values, each value in `[0, 1]`, such that every
//! vector sums to exactly `u`.  The draws are uniform over the portion of the
//! hyperplane `x₁ + … + xₙ = u` that lies inside the unit hypercube, which is
//! what makes the resulting utilization vectors statistically unbiased — naive
//! scale-to-sum approaches oversample the centre of the simplex.
//!
//! The construction has two phases:
//!
//! 1. **Probability tables** (once per `(n, u)` pair): a weight table `w` is
//!    built row by row, where `w[i][j]` is proportional to the probability
//!    mass of reaching lattice cell `j` after `i` of the `n` dimensions have
//!    been placed.  From consecutive rows a transition table `t` of
//!    conditional branch probabilities is derived.
//! 2. **Randomized walk** (once per sample): starting at the lattice cell
//!    containing `u`, walk down through the dimensions.  At each step a
//!    uniform draw against `t` decides whether the walk descends one integer
//!    cell, and a second draw fixes the coordinate inside the current cell
//!    via an inverse-CDF power transform.
//!
//! The walk fills coordinates in a fixed dimension order, which skews the
//! marginal distribution of individual rows.  A uniform random permutation of
//! each finished column restores exchangeability across rows; it never changes
//! the column's multiset of values or its sum.

use rand::seq::SliceRandom;
use rand::Rng;

use super::error::GenError;

// ── Sample matrix ─────────────────────────────────────────────────────────────

/// Dense column-major matrix returned by [`sample`].
///
/// Each of the `m` columns is one independent fixed-sum vector of `n` rows.
/// Column-major storage keeps a single sample contiguous, so consumers can
/// borrow it as a plain slice via [`column`](SampleMatrix::column).
#[derive(Debug, Clone, PartialEq)]
pub struct SampleMatrix {
    rows: usize,
    data: Vec<f64>,
}

impl SampleMatrix {
    fn zeroed(rows: usize, cols: usize) -> Self {
        SampleMatrix {
            rows,
            data: vec![0.0; rows * cols],
        }
    }

    /// Number of rows (the dimension `n` of each sample).
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns (the number of samples `m`).
    pub fn cols(&self) -> usize {
        self.data.len() / self.rows
    }

    /// Borrows one sample as a contiguous slice of length [`rows`](Self::rows).
    pub fn column(&self, col: usize) -> &[f64] {
        &self.data[col * self.rows..(col + 1) * self.rows]
    }

    fn column_mut(&mut self, col: usize) -> &mut [f64] {
        &mut self.data[col * self.rows..(col + 1) * self.rows]
    }
}

// ── Sampler ───────────────────────────────────────────────────────────────────

/// Draws `m` vectors of `n` entries in `[0, 1]` that each sum to `u`,
/// uniformly over the constrained simplex.
///
/// # Errors
/// * [`GenError::ZeroDimension`] if `n == 0`.
/// * [`GenError::UtilizationOutOfRange`] if `u` is not a finite value in
///   `[0, n]` — outside that range the target plane misses the unit
///   hypercube entirely.
///
/// `m == 0` is valid and returns an empty matrix.  `n == 1` degenerates to
/// the constant vector `[u]`.
///
/// # Guarantees
/// For every returned column: the entries sum to `u` up to floating-point
/// accumulation error, and each entry lies in `[0, min(1, u)]` up to one unit
/// in the last place at the boundaries.
pub fn sample<R: Rng>(n: usize, u: f64, m: usize, rng: &mut R) -> Result<SampleMatrix, GenError> {
    if n == 0 {
        return Err(GenError::ZeroDimension);
    }
    if !u.is_finite() || u < 0.0 || u > n as f64 {
        return Err(GenError::UtilizationOutOfRange {
            utilization: u,
            dimension: n,
        });
    }

    // Lattice cell containing the target sum.  The clamp keeps the cell index
    // a valid table row at the inclusive boundary u == n, where floor(u)
    // would land one past the last cell.
    let k = (u.floor() as usize).min(n - 1);
    let s = u.clamp(k as f64, (k + 1) as f64);

    let (s1, s2) = lattice_gaps(n, s, k);
    let t = transition_table(n, &s1, &s2);

    let mut matrix = SampleMatrix::zeroed(n, m);
    for col in 0..m {
        let column = matrix.column_mut(col);
        walk_simplex(column, &t, s, k, rng);
        column.shuffle(rng);
    }

    Ok(matrix)
}

/// Distances from the target sum `s` to the integer lattice points on either
/// side: `s1[i] = s - k + i` (gap above cell `k - i`) and
/// `s2[i] = k + n - i - s` (gap below cell `k + n - i`).
///
/// With `k = ⌊s⌋` both vectors are non-negative, and the identity
/// `s1[y] + s2[n-i+y] = i` keeps every weight-table row bounded by the
/// previous row's maximum, so the `f64::MAX` scale never overflows.
fn lattice_gaps(n: usize, s: f64, k: usize) -> (Vec<f64>, Vec<f64>) {
    let s1 = (0..n).map(|i| s - k as f64 + i as f64).collect();
    let s2 = (0..n).map(|i| (k + n - i) as f64 - s).collect();
    (s1, s2)
}

/// Builds the `(n-1) × n` table of downward-branch probabilities consumed by
/// [`walk_simplex`].
///
/// Row `i - 2` is derived while the weight table advances from `i - 1` to `i`
/// placed dimensions.  The weights carry an `f64::MAX` scale factor to use
/// the full double range; each division is floored by `f64::MIN_POSITIVE` in
/// the denominator so cells with zero mass yield probability 0 instead of
/// NaN.
fn transition_table(n: usize, s1: &[f64], s2: &[f64]) -> Vec<Vec<f64>> {
    let tiny = f64::MIN_POSITIVE;

    // w[i-1][j] ∝ probability mass of cell j after i dimensions are placed.
    // Column 0 stays zero; the sentinel seeds the single reachable cell.
    let mut w = vec![vec![0.0; n + 1]; n];
    w[0][1] = f64::MAX;

    let mut t = vec![vec![0.0; n]; n.saturating_sub(1)];

    let mut tmp1 = vec![0.0; n];
    let mut tmp2 = vec![0.0; n];

    for i in 2..=n {
        for y in 0..i {
            tmp1[y] = w[i - 2][y + 1] * s1[y] / i as f64;
            tmp2[y] = w[i - 2][y] * s2[n - i + y] / i as f64;
        }
        for y in 0..i {
            w[i - 1][y + 1] = tmp1[y] + tmp2[y];
        }

        // Evaluate the branch away from the side with more tail mass; the
        // complement form keeps the stored probability numerically accurate.
        let tail_below: f64 = s2[n - i..n].iter().sum();
        let tail_above: f64 = s1[..i].iter().sum();
        let use_lower = tail_below > tail_above;

        for y in 0..i {
            let denom = w[i - 1][y + 1] + tiny;
            t[i - 2][y] = if use_lower {
                tmp2[y] / denom
            } else {
                1.0 - tmp1[y] / denom
            };
        }
    }

    t
}

/// Fills `out` with one fixed-sum vector (pre-permutation).
///
/// Walks dimensions `x = n-1 … 1`, consuming two uniform draws per step: one
/// decides against `t` whether the walk descends a lattice cell, the other
/// places the coordinate inside the current cell.  The remaining mass after
/// the last step becomes the final coordinate, which is what makes the sum
/// exact by construction.
fn walk_simplex<R: Rng>(out: &mut [f64], t: &[Vec<f64>], s: f64, k: usize, rng: &mut R) {
    let n = out.len();

    let mut remaining = s; // sum still to be distributed
    let mut cell = k + 1; // lattice cell index, 1-based into t's columns
    let mut offset = 0.0; // accumulated lower bound for the next coordinate
    let mut scale = 1.0; // product of the power-transform factors so far

    for x in (1..n).rev() {
        let branch_draw: f64 = rng.random();
        let position_draw: f64 = rng.random();

        // A descent consumes one integer unit of the remaining sum.  Draws
        // lie in [0, 1), so a certain branch (probability 1) always fires
        // and an impossible one (probability 0) never does.  At cell 1 the
        // lower branch carries no mass and is excluded outright.
        let descend = cell > 1 && branch_draw < t[x - 1][cell - 1];

        let root = position_draw.powf(1.0 / x as f64);
        offset += (1.0 - root) * scale * remaining / (x + 1) as f64;
        scale *= root;

        out[n - 1 - x] = offset + if descend { scale } else { 0.0 };
        if descend {
            remaining -= 1.0;
            cell -= 1;
        }
    }

    out[n - 1] = offset + scale * remaining;
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    /// Absolute tolerance for sums accumulated over at most a few dozen
    /// entries of magnitude ≤ 1.
    const SUM_TOL: f64 = 1e-9;

    /// One-ulp-scale slack for entry bounds at the simplex boundary.
    const ENTRY_TOL: f64 = 1e-12;

    fn assert_column_invariants(column: &[f64], u: f64) {
        let sum: f64 = column.iter().sum();
        assert!(
            (sum - u).abs() < SUM_TOL,
            "column sums to {sum}, expected {u}"
        );
        let cap = u.min(1.0);
        for &entry in column {
            assert!(
                entry >= -ENTRY_TOL && entry <= cap + ENTRY_TOL,
                "entry {entry} escapes [0, {cap}]"
            );
        }
    }

    #[test]
    fn column_sums_hit_the_target_across_the_grid() {
        let mut rng = SmallRng::seed_from_u64(42);
        for n in 1..=8 {
            for fraction in [0.0, 0.25, 0.5, 0.75, 1.0] {
                let u = fraction * n as f64;
                let matrix = sample(n, u, 4, &mut rng).unwrap();
                assert_eq!(matrix.rows(), n);
                assert_eq!(matrix.cols(), 4);
                for col in 0..matrix.cols() {
                    assert_column_invariants(matrix.column(col), u);
                }
            }
        }
    }

    #[test]
    fn high_dimension_stays_within_bounds() {
        let mut rng = SmallRng::seed_from_u64(7);
        let matrix = sample(50, 17.3, 3, &mut rng).unwrap();
        for col in 0..matrix.cols() {
            assert_column_invariants(matrix.column(col), 17.3);
        }
    }

    #[test]
    fn single_dimension_returns_the_constant_vector() {
        let mut rng = SmallRng::seed_from_u64(1);
        let matrix = sample(1, 0.77, 5, &mut rng).unwrap();
        for col in 0..5 {
            assert_eq!(matrix.column(col), &[0.77]);
        }
    }

    #[test]
    fn zero_target_pins_every_entry_to_zero() {
        let mut rng = SmallRng::seed_from_u64(2);
        let matrix = sample(6, 0.0, 3, &mut rng).unwrap();
        for col in 0..3 {
            for &entry in matrix.column(col) {
                assert!(entry.abs() < ENTRY_TOL);
            }
        }
    }

    #[test]
    fn full_target_pins_every_entry_to_one() {
        let mut rng = SmallRng::seed_from_u64(3);
        let matrix = sample(6, 6.0, 3, &mut rng).unwrap();
        for col in 0..3 {
            for &entry in matrix.column(col) {
                assert!((entry - 1.0).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn zero_samples_yield_an_empty_matrix() {
        let mut rng = SmallRng::seed_from_u64(4);
        let matrix = sample(5, 2.5, 0, &mut rng).unwrap();
        assert_eq!(matrix.rows(), 5);
        assert_eq!(matrix.cols(), 0);
    }

    #[test]
    fn zero_dimension_is_rejected() {
        let mut rng = SmallRng::seed_from_u64(5);
        assert!(matches!(
            sample(0, 0.0, 1, &mut rng),
            Err(GenError::ZeroDimension)
        ));
    }

    #[test]
    fn out_of_range_targets_are_rejected() {
        let mut rng = SmallRng::seed_from_u64(6);
        assert!(matches!(
            sample(3, 3.5, 1, &mut rng),
            Err(GenError::UtilizationOutOfRange { .. })
        ));
        assert!(matches!(
            sample(3, -0.1, 1, &mut rng),
            Err(GenError::UtilizationOutOfRange { .. })
        ));
        assert!(matches!(
            sample(3, f64::NAN, 1, &mut rng),
            Err(GenError::UtilizationOutOfRange { .. })
        ));
    }

    #[test]
    fn identical_seeds_reproduce_the_matrix_exactly() {
        let first = sample(5, 2.0, 3, &mut SmallRng::seed_from_u64(9)).unwrap();
        let second = sample(5, 2.0, 3, &mut SmallRng::seed_from_u64(9)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn permutation_preserves_the_multiset_and_sum() {
        // Drive the private walk directly so the pre-permutation column is
        // observable, then permute it the way sample() does.
        let n = 6;
        let u: f64 = 2.3;
        let k = (u.floor() as usize).min(n - 1);
        let s = u.clamp(k as f64, (k + 1) as f64);
        let (s1, s2) = lattice_gaps(n, s, k);
        let t = transition_table(n, &s1, &s2);

        let mut rng = SmallRng::seed_from_u64(11);
        let mut column = vec![0.0; n];
        walk_simplex(&mut column, &t, s, k, &mut rng);

        let mut permuted = column.clone();
        permuted.shuffle(&mut rng);

        let mut original_sorted = column.clone();
        let mut permuted_sorted = permuted.clone();
        original_sorted.sort_by(f64::total_cmp);
        permuted_sorted.sort_by(f64::total_cmp);

        // Bitwise equality: the permutation moves values, never alters them.
        assert_eq!(original_sorted, permuted_sorted);
        let original_sum: f64 = original_sorted.iter().sum();
        let permuted_sum: f64 = permuted_sorted.iter().sum();
        assert_eq!(original_sum, permuted_sum);
    }

    #[test]
    fn three_task_draws_cover_multiple_orderings() {
        // 3 entries summing to 1.5: every coordinate must stay in [0, 1],
        // and over many seeds the permutation must surface more than one
        // relative ordering while the sorted shape stays stable.
        let trials = 200;
        let mut orderings = std::collections::BTreeSet::new();
        let mut smallest_total = 0.0;
        let mut largest_total = 0.0;

        for seed in 0..trials {
            let mut rng = SmallRng::seed_from_u64(seed);
            let matrix = sample(3, 1.5, 1, &mut rng).unwrap();
            let column = matrix.column(0);
            assert_column_invariants(column, 1.5);

            let mut ranked: Vec<usize> = (0..3).collect();
            ranked.sort_by(|&a, &b| column[a].total_cmp(&column[b]));
            orderings.insert(ranked);

            let mut sorted = column.to_vec();
            sorted.sort_by(f64::total_cmp);
            smallest_total += sorted[0];
            largest_total += sorted[2];
        }

        assert!(
            orderings.len() > 1,
            "permutation never changed the coordinate order"
        );

        // By symmetry each coordinate averages 0.5; the extreme order
        // statistics must straddle it by a clear margin over 200 draws.
        let mean_smallest = smallest_total / trials as f64;
        let mean_largest = largest_total / trials as f64;
        assert!(mean_smallest < 0.45, "mean smallest {mean_smallest}");
        assert!(mean_largest > 0.55, "mean largest {mean_largest}");
    }

    #[test]
    fn complementary_targets_mirror_sorted_coordinates() {
        // Reflecting every entry through 1 maps the law at target u onto
        // the law at target n - u, so the per-rank means of the sorted
        // columns at 0.4 and 2.6 must mirror each other.
        const TRIALS: usize = 4000;
        let low = sample(3, 0.4, TRIALS, &mut SmallRng::seed_from_u64(31)).unwrap();
        let high = sample(3, 2.6, TRIALS, &mut SmallRng::seed_from_u64(32)).unwrap();

        let mut low_rank_sums = [0.0_f64; 3];
        let mut high_rank_sums = [0.0_f64; 3];
        for col in 0..TRIALS {
            let mut lo = low.column(col).to_vec();
            let mut hi = high.column(col).to_vec();
            lo.sort_by(f64::total_cmp);
            hi.sort_by(f64::total_cmp);
            for rank in 0..3 {
                low_rank_sums[rank] += lo[rank];
                high_rank_sums[rank] += hi[rank];
            }
        }

        for rank in 0..3 {
            let high_mean = high_rank_sums[rank] / TRIALS as f64;
            let mirrored_low = 1.0 - low_rank_sums[2 - rank] / TRIALS as f64;
            assert!(
                (high_mean - mirrored_low).abs() < 0.04,
                "rank {rank}: {high_mean} vs mirrored {mirrored_low}"
            );
        }
    }

    #[test]
    fn integer_target_between_cells_is_handled() {
        // u exactly on an interior lattice point exercises the clamp that
        // pins s to the cell boundary.
        let mut rng = SmallRng::seed_from_u64(13);
        for n in 2..=6 {
            for u in 1..n {
                let matrix = sample(n, u as f64, 2, &mut rng).unwrap();
                for col in 0..matrix.cols() {
                    assert_column_invariants(matrix.column(col), u as f64);
                }
            }
        }
    }
}
