//! The evolution loop: grow a population by fitness-proportionate mating until it reaches its
//! final size or somebody solves the puzzle.

use crate::{
    chromosome::{Chromosome, Total},
    config::Config,
    error::{CountdownError, Result},
    fitness::{is_solution, Puzzle},
    population::{population_init, Population},
    random::RandomSource,
    select::RouletteWheel,
};
use core::{fmt, ops::ControlFlow};
use log::{debug, info, trace};

/// How the reported chromosome was arrived at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// it evaluates to the target exactly
    Exact,
    /// the population reached its final size, it's the fittest member
    Fittest,
    /// a hook stopped evolution early, it's the fittest member so far
    Stopped,
}

#[derive(Debug, Clone)]
pub struct Solution {
    pub chromosome: Chromosome,
    pub fitness: f64,
    pub total: Total,
    pub outcome: Outcome,
    /// position of the chromosome in the population
    pub index: usize,
    /// population size when evolution ended
    pub population: usize,
    /// offspring produced
    pub offspring: usize,
    pub puzzle: Puzzle,
}

impl Solution {
    fn new(
        population: &Population,
        index: usize,
        outcome: Outcome,
        offspring: usize,
        puzzle: Puzzle,
    ) -> Self {
        let chromosome = population.chromosomes()[index].clone();
        Self {
            fitness: population.scores()[index],
            total: chromosome.evaluate(&puzzle.operators),
            chromosome,
            outcome,
            index,
            population: population.len(),
            offspring,
            puzzle,
        }
    }
}

impl fmt::Display for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.chromosome.expression(&self.puzzle.operators))?;
        write!(
            f,
            "Expected: {:.2}, Best Solution: {}",
            self.puzzle.target, self.total
        )
    }
}

/// Progress of a run, handed to every hook after each offspring is inserted
pub struct Stats<'a> {
    pub offspring: usize,
    pub population: &'a Population,
    pub fitness_sum: f64,
}

impl Stats<'_> {
    pub fn fittest(&self) -> Option<(&Chromosome, f64)> {
        self.population
            .fittest()
            .and_then(|idx| self.population.get(idx))
    }

    pub fn any_fitter_than(&self, score: f64) -> bool {
        self.population.scores().iter().any(|s| *s > score)
    }

    pub fn mean_fitness(&self) -> f64 {
        self.fitness_sum / self.population.len() as f64
    }
}

pub type Hook<'h> = Box<dyn FnMut(&Stats<'_>) -> ControlFlow<()> + 'h>;

/// Callbacks run after every offspring. Any of them breaking stops the run.
#[derive(Default)]
pub struct EvolutionHooks<'h> {
    hooks: Vec<Hook<'h>>,
}

impl<'h> EvolutionHooks<'h> {
    pub fn new(hooks: Vec<Hook<'h>>) -> Self {
        Self { hooks }
    }

    pub fn push(&mut self, hook: Hook<'h>) {
        self.hooks.push(hook);
    }

    fn fire(&mut self, stats: &Stats<'_>) -> ControlFlow<()> {
        for hook in self.hooks.iter_mut() {
            hook(stats)?;
        }
        ControlFlow::Continue(())
    }
}

/// A hook logging the fittest member every `interval` offspring
pub fn progress_hook<'h>(interval: usize) -> Hook<'h> {
    Box::new(move |stats: &Stats<'_>| {
        if interval != 0 && stats.offspring % interval == 0 {
            if let Some((_, fit)) = stats.fittest() {
                info!(
                    "offspring {}: population {}, fittest {fit:.4}, mean {:.4}",
                    stats.offspring,
                    stats.population.len(),
                    stats.mean_fitness(),
                );
            }
        }
        ControlFlow::Continue(())
    })
}

/// Generate an initial population from `config` and evolve it
pub fn run(
    config: &Config,
    rng: &mut impl RandomSource,
    hooks: EvolutionHooks<'_>,
) -> Result<Solution> {
    config.validate()?;
    info!(
        "generating {} chromosomes of {} genes",
        config.initial_population, config.genes
    );
    let population = population_init(
        config.initial_population,
        config.genes,
        &config.puzzle(),
        rng,
    )?;
    evolve(config, population, rng, hooks)
}

/// Grow `population` one offspring at a time until it holds `config.final_population`
/// members, returning the first exact solution as soon as one exists.
///
/// Each offspring is the first of two roulette-selected parents, possibly crossed over with the
/// second, then mutated. Nothing is ever removed from the population.
pub fn evolve(
    config: &Config,
    mut population: Population,
    rng: &mut impl RandomSource,
    mut hooks: EvolutionHooks<'_>,
) -> Result<Solution> {
    let puzzle = config.puzzle();

    if population.is_empty() {
        return Err(CountdownError::Configuration(
            "cannot evolve an empty population".into(),
        ));
    }

    if let Some(idx) = population.solution() {
        info!("initial population already solves {}", puzzle.target);
        return Ok(Solution::new(&population, idx, Outcome::Exact, 0, puzzle));
    }

    let mut fitness_sum = population.fitness_sum();
    debug!(
        "initial fitness sum {} over {}",
        fitness_sum.total(),
        population.len()
    );

    let mut offspring = 0;
    while population.len() < config.final_population {
        let wheel = match RouletteWheel::spin_up(population.scores(), fitness_sum.total())? {
            ControlFlow::Continue(wheel) => wheel,
            ControlFlow::Break(idx) => {
                return Ok(Solution::new(&population, idx, Outcome::Exact, offspring, puzzle));
            }
        };

        let (l, r) = wheel.select_pair(rng);
        trace!("mating {l} with {r}");
        let members = population.chromosomes();
        let child = members[l]
            .mate(&members[r], config.crossover_rate, rng)?
            .mutate(config.mutation_rate, rng);
        let score = child.fitness(&puzzle);

        population.push(child, score);
        offspring += 1;

        if is_solution(score) {
            info!("exact solution after {offspring} offspring");
            let idx = population.len() - 1;
            return Ok(Solution::new(&population, idx, Outcome::Exact, offspring, puzzle));
        }

        fitness_sum += score;
        if config.resync_interval != 0 && offspring % config.resync_interval == 0 {
            let fresh = population.fitness_sum();
            trace!(
                "fitness sum resync: running {}, fresh {}",
                fitness_sum.total(),
                fresh.total()
            );
            fitness_sum = fresh;
        }

        let stats = Stats {
            offspring,
            population: &population,
            fitness_sum: fitness_sum.total(),
        };
        if hooks.fire(&stats).is_break() {
            info!("stopped by hook after {offspring} offspring");
            return fittest(&population, Outcome::Stopped, offspring, puzzle);
        }
    }

    fittest(&population, Outcome::Fittest, offspring, puzzle)
}

fn fittest(
    population: &Population,
    outcome: Outcome,
    offspring: usize,
    puzzle: Puzzle,
) -> Result<Solution> {
    let idx = population.fittest().ok_or_else(|| {
        CountdownError::Configuration("cannot evolve an empty population".into())
    })?;
    let solution = Solution::new(population, idx, outcome, offspring, puzzle);
    info!(
        "fittest of {} members: {} (fitness {:.4})",
        solution.population, solution.total, solution.fitness
    );
    Ok(solution)
}
