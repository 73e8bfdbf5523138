//! Scoring evaluated chromosomes against a target, and keeping a running total of scores.

use crate::{chromosome::Total, gene::OperatorTable};
use core::ops::AddAssign;

/// What a population is evolving towards: a target value, and how operator codes are read.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Puzzle {
    pub target: f64,
    pub operators: OperatorTable,
}

impl Puzzle {
    pub fn new(target: f64, operators: OperatorTable) -> Self {
        Self { target, operators }
    }
}

/// Inverse distance from `total` to `target`.
///
/// Unset and non-finite totals score 0 and are never selected. A total equal to the target
/// scores `+inf`, which callers must treat as a found solution (see [is_solution]) rather
/// than feeding it into further arithmetic.
#[inline]
pub fn score(total: Total, target: f64) -> f64 {
    match total {
        Total::Value(v) if v.is_finite() => (1. / (target - v)).abs(),
        _ => 0.,
    }
}

/// whether a score can only have come from an exact match
#[inline]
pub fn is_solution(score: f64) -> bool {
    !score.is_finite()
}

/// Compensated (Neumaier) running sum of fitness scores. Adding many small scores onto a
/// large total keeps the low order bits in `compensation` instead of dropping them.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FitnessSum {
    sum: f64,
    compensation: f64,
}

impl FitnessSum {
    pub fn add(&mut self, score: f64) {
        let t = self.sum + score;
        if self.sum.abs() >= score.abs() {
            self.compensation += (self.sum - t) + score;
        } else {
            self.compensation += (score - t) + self.sum;
        }
        self.sum = t;
    }

    /// Combine two partial sums, as produced by independent workers
    pub fn merge(mut self, other: Self) -> Self {
        self.add(other.sum);
        self.add(other.compensation);
        self
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.sum + self.compensation
    }

    /// Sum a slice of scores from scratch
    #[cfg(not(feature = "parallel"))]
    pub fn of(scores: &[f64]) -> Self {
        scores.iter().copied().collect()
    }

    /// Sum a slice of scores from scratch, one partial sum per worker
    #[cfg(feature = "parallel")]
    pub fn of(scores: &[f64]) -> Self {
        use rayon::prelude::*;

        scores
            .par_chunks(4096)
            .map(|chunk| chunk.iter().copied().collect::<FitnessSum>())
            .reduce(FitnessSum::default, FitnessSum::merge)
    }
}

impl AddAssign<f64> for FitnessSum {
    fn add_assign(&mut self, score: f64) {
        self.add(score);
    }
}

impl FromIterator<f64> for FitnessSum {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut sum = Self::default();
        for score in iter {
            sum.add(score);
        }
        sum
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::assert_f64_approx;

    #[test]
    fn test_score() {
        assert_f64_approx!(score(Total::Value(8.), 10.), 0.5);
        assert_f64_approx!(score(Total::Value(12.), 10.), 0.5);
        assert_f64_approx!(score(Total::Value(6.), 10.), 0.25);
        assert_f64_approx!(score(Total::Value(-10.), 10.), 0.05);
    }

    #[test]
    fn test_score_worst_case() {
        for total in [
            Total::Unset,
            Total::Value(f64::NAN),
            Total::Value(f64::INFINITY),
            Total::Value(f64::NEG_INFINITY),
        ] {
            assert_eq!(0., score(total, 10.), "{total:?}");
            assert!(!is_solution(score(total, 10.)));
        }
    }

    #[test]
    fn test_score_exact() {
        let s = score(Total::Value(10.), 10.);
        assert_eq!(f64::INFINITY, s);
        assert!(is_solution(s));

        let s = score(Total::Value(0.), 0.);
        assert_eq!(f64::INFINITY, s);
        assert!(is_solution(s));
    }

    #[test]
    fn test_score_closer_is_fitter() {
        let target = 145.;
        let mut last = 0.;
        for v in [0., 100., 140., 144., 144.5, 144.9] {
            let s = score(Total::Value(v), target);
            assert!(s > last, "{v}: {s} <= {last}");
            last = s;
        }
    }

    #[test]
    fn test_sum_compensates() {
        let mut naive = 1e16;
        let mut sum = FitnessSum::default();
        sum += 1e16;
        for _ in 0..10_000 {
            naive += 1.;
            sum += 1.;
        }
        // every +1 is lost to rounding without compensation
        assert_eq!(1e16, naive);
        assert_f64_approx!(sum.total(), 1e16 + 10_000., epsilon = 1.);
    }

    #[test]
    fn test_sum_of() {
        let scores = (1..=10_000).map(|n| 1. / n as f64).collect::<Vec<_>>();
        let sequential = scores.iter().copied().collect::<FitnessSum>();
        assert_f64_approx!(FitnessSum::of(&scores).total(), sequential.total(), epsilon = 1e-12);
        assert_eq!(0., FitnessSum::of(&[]).total());
    }

    #[test]
    fn test_merge() {
        let l = [0.1, 0.2, 0.3].into_iter().collect::<FitnessSum>();
        let r = [0.4, 0.5].into_iter().collect::<FitnessSum>();
        assert_f64_approx!(l.merge(r).total(), 1.5, epsilon = 1e-12);
        assert_f64_approx!(FitnessSum::default().merge(r).total(), 0.9, epsilon = 1e-12);
    }
}
