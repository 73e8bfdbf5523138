//! The growing collection of scored chromosomes evolution works on.

use crate::{
    chromosome::Chromosome,
    error::Result,
    fitness::{is_solution, FitnessSum, Puzzle},
    random::RandomSource,
};

/// Chromosomes in insertion order, each with its cached fitness score. Members are only ever
/// appended.
#[derive(Debug, Clone, Default)]
pub struct Population {
    members: Vec<Chromosome>,
    scores: Vec<f64>,
}

impl Population {
    /// Score and collect an existing set of chromosomes, for seeding or resuming a run
    pub fn from_chromosomes(chromosomes: Vec<Chromosome>, puzzle: &Puzzle) -> Self {
        let scores = score_all(&chromosomes, puzzle);
        Self {
            members: chromosomes,
            scores,
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<(&Chromosome, f64)> {
        Some((self.members.get(idx)?, *self.scores.get(idx)?))
    }

    #[inline]
    pub fn chromosomes(&self) -> &[Chromosome] {
        &self.members
    }

    #[inline]
    pub fn scores(&self) -> &[f64] {
        &self.scores
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Chromosome, f64)> {
        self.members.iter().zip(self.scores.iter().copied())
    }

    /// Append a chromosome whose score has already been computed
    pub fn push(&mut self, chromosome: Chromosome, score: f64) {
        self.members.push(chromosome);
        self.scores.push(score);
    }

    /// Sum of every member's score, from scratch
    pub fn fitness_sum(&self) -> FitnessSum {
        FitnessSum::of(&self.scores)
    }

    /// Index of the first member that solves the puzzle exactly
    pub fn solution(&self) -> Option<usize> {
        self.scores.iter().position(|s| is_solution(*s))
    }

    /// Index of the highest scoring member, ties going to whichever came first. A population
    /// where nobody scores above 0 yields its first member.
    pub fn fittest(&self) -> Option<usize> {
        let (first, rest) = self.scores.split_first()?;
        let (best, _) = rest
            .iter()
            .enumerate()
            .fold((0, *first), |(best, best_score), (idx, score)| {
                if *score > best_score {
                    (idx + 1, *score)
                } else {
                    (best, best_score)
                }
            });
        Some(best)
    }
}

#[cfg(not(feature = "parallel"))]
fn score_all(chromosomes: &[Chromosome], puzzle: &Puzzle) -> Vec<f64> {
    chromosomes.iter().map(|c| c.fitness(puzzle)).collect()
}

#[cfg(feature = "parallel")]
fn score_all(chromosomes: &[Chromosome], puzzle: &Puzzle) -> Vec<f64> {
    use rayon::prelude::*;

    chromosomes.par_iter().map(|c| c.fitness(puzzle)).collect()
}

/// An initial population of `size` chromosomes of `genes` genes each, drawn from the secure
/// byte source
pub fn population_init(
    size: usize,
    genes: usize,
    puzzle: &Puzzle,
    rng: &mut impl RandomSource,
) -> Result<Population> {
    let chromosomes = (0..size)
        .map(|_| Chromosome::random(genes, rng))
        .collect::<Result<Vec<_>>>()?;
    Ok(Population::from_chromosomes(chromosomes, puzzle))
}
