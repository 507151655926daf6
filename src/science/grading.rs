// SPDX-FileCopyrightText: 2026 Santhosh Shyamsundar, Prabhu S., and Studio Tyto
// SPDX-License-Identifier: MIT
//
// Dreux-Gorisse Mix Design Core
// GradingEngine: blended particle-size curve of the aggregate skeleton

use crate::science::materials::{Aggregate, SieveReading};

pub struct GradingEngine;

impl GradingEngine {
    /// Sum of the declared proportions (expected 100, not enforced)
    pub fn total_proportion(aggregates: &[Aggregate]) -> f64 {
        aggregates.iter().map(|a| a.proportion).sum()
    }

    /// Proportion-weighted passing curve over every sieve size present in the blend.
    ///
    /// An aggregate with no reading at a size contributes 0 % there; readings are
    /// not interpolated. Proportions are normalised by their sum, and a zero sum
    /// yields 0 % at every size.
    pub fn combine_curve(aggregates: &[Aggregate]) -> Vec<SieveReading> {
        let total = Self::total_proportion(aggregates);

        Self::sieve_sizes(aggregates)
            .into_iter()
            .map(|size| {
                if total == 0.0 {
                    return SieveReading::new(size, 0.0);
                }
                let passing = aggregates
                    .iter()
                    .filter_map(|agg| {
                        agg.passing_at(size)
                            .map(|p| p * (agg.proportion / total))
                    })
                    .sum();
                SieveReading::new(size, passing)
            })
            .collect()
    }

    /// Dmax: largest sieve at which any aggregate passes at least `threshold` %,
    /// or `fallback` when no reading reaches it.
    pub fn max_aggregate_size(aggregates: &[Aggregate], threshold: f64, fallback: f64) -> f64 {
        aggregates
            .iter()
            .flat_map(|a| a.sieves.iter())
            .filter(|s| s.passing >= threshold)
            .map(|s| s.size)
            .reduce(f64::max)
            .unwrap_or(fallback)
    }

    /// Distinct sieve sizes across all aggregates, ascending
    fn sieve_sizes(aggregates: &[Aggregate]) -> Vec<f64> {
        let mut sizes: Vec<f64> = aggregates
            .iter()
            .flat_map(|a| a.sieves.iter().map(|s| s.size))
            .collect();
        sizes.sort_by(|a, b| a.total_cmp(b));
        sizes.dedup();
        sizes
    }
}
