pub mod chromosome;
pub mod config;
pub mod constants;
pub mod error;
pub mod fitness;
pub mod gene;
pub mod population;
pub mod random;
pub mod scenario;
pub mod select;

mod macros;

pub use chromosome::{Chromosome, Total};
pub use config::Config;
pub use error::{CountdownError, Result};
pub use fitness::{FitnessSum, Puzzle};
pub use gene::{Gene, Operator, OperatorTable};
pub use population::Population;
pub use random::{default_source, RandomSource};
pub use scenario::{evolve, run, EvolutionHooks, Outcome, Solution, Stats};
pub use select::RouletteWheel;
