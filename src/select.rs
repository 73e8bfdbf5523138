//! Fitness-proportionate ("roulette wheel") parent selection.

use crate::{
    error::{CountdownError, Result},
    fitness::{is_solution, FitnessSum},
    random::RandomSource,
};
use core::ops::ControlFlow;

/// Cumulative selection probabilities over a population, entry `i` being the share of total
/// fitness held by members `0..=i`. Non-decreasing, and ends at about 1.
#[derive(Debug, Clone)]
pub struct RouletteWheel {
    cumulative: Vec<f64>,
}

impl RouletteWheel {
    /// Build a wheel over `scores`, whose sum is `total`.
    ///
    /// Breaks with the index of the first member whose score marks an exact solution, since
    /// such a member can't be placed on the wheel and should be reported instead.
    pub fn spin_up(scores: &[f64], total: f64) -> Result<ControlFlow<usize, Self>> {
        if let Some(idx) = scores.iter().position(|s| is_solution(*s)) {
            return Ok(ControlFlow::Break(idx));
        }

        if !total.is_finite() || total <= 0. {
            return Err(CountdownError::DegenerateFitnessSum(total));
        }

        let mut running = FitnessSum::default();
        let cumulative = scores
            .iter()
            .map(|s| {
                running += *s;
                running.total() / total
            })
            .collect();

        Ok(ControlFlow::Continue(Self { cumulative }))
    }

    #[inline]
    pub fn probabilities(&self) -> &[f64] {
        &self.cumulative
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cumulative.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cumulative.is_empty()
    }

    /// Index of the first member whose cumulative probability reaches a uniform draw. A draw
    /// past the last entry, possible when the running total drifted, picks the last member.
    pub fn select(&self, rng: &mut impl RandomSource) -> usize {
        let u = rng.uniform();
        self.cumulative
            .partition_point(|p| *p < u)
            .min(self.cumulative.len().saturating_sub(1))
    }

    /// Two independent selections, which may pick the same member
    pub fn select_pair(&self, rng: &mut impl RandomSource) -> (usize, usize) {
        (self.select(rng), self.select(rng))
    }
}
