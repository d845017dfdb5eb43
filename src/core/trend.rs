// CompanyScope - core/trend.rs
//
// Decorative sparkline series for the stat cards. The values are jittered
// around the real figure and carry no information; the random source is
// passed in so callers (and tests) control determinism.

use crate::core::aggregate::StatsBundle;
use crate::util::constants::{
    SPARKLINE_EMPLOYEE_DIVISOR, SPARKLINE_MIN_FACTOR, SPARKLINE_POINTS, SPARKLINE_SPREAD,
};
use rand::Rng;
use serde::Serialize;

/// `count` points of `floor(base * (0.8 + r * 0.4))` with `r` in [0, 1).
pub fn trend<R: Rng>(base: f64, count: usize, rng: &mut R) -> Vec<u64> {
    (0..count)
        .map(|_| {
            let factor = SPARKLINE_MIN_FACTOR + rng.random::<f64>() * SPARKLINE_SPREAD;
            (base * factor).floor().max(0.0) as u64
        })
        .collect()
}

/// One series per stat card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SparklineSet {
    pub companies: Vec<u64>,
    pub employees: Vec<u64>,
    pub countries: Vec<u64>,
    pub industries: Vec<u64>,
}

impl SparklineSet {
    pub fn from_stats<R: Rng>(stats: &StatsBundle, rng: &mut R) -> Self {
        Self {
            companies: trend(stats.unique_company_count as f64, SPARKLINE_POINTS, rng),
            employees: trend(
                stats.total_employees as f64 / SPARKLINE_EMPLOYEE_DIVISOR,
                SPARKLINE_POINTS,
                rng,
            ),
            countries: trend(stats.unique_country_count as f64, SPARKLINE_POINTS, rng),
            industries: trend(stats.unique_industry_count as f64, SPARKLINE_POINTS, rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_points_stay_within_band() {
        let mut rng = StdRng::seed_from_u64(7);
        let points = trend(1000.0, 200, &mut rng);
        assert_eq!(points.len(), 200);
        assert!(points.iter().all(|&p| (800..1200).contains(&p)), "{points:?}");
    }

    #[test]
    fn test_same_seed_same_series() {
        let stats = StatsBundle {
            unique_company_count: 40,
            total_employees: 125_000,
            unique_country_count: 9,
            unique_industry_count: 5,
            employees_per_industry: Vec::new(),
        };
        let a = SparklineSet::from_stats(&stats, &mut StdRng::seed_from_u64(42));
        let b = SparklineSet::from_stats(&stats, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert_eq!(a.employees.len(), SPARKLINE_POINTS);
        // Employee series is scaled down by the divisor: 1250 * [0.8, 1.2).
        assert!(a.employees.iter().all(|&p| (1000..1500).contains(&p)));
    }

    #[test]
    fn test_zero_base_is_flat_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(trend(0.0, 3, &mut rng), vec![0, 0, 0]);
    }
}
