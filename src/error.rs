use thiserror::Error;

#[derive(Error, Debug)]
pub enum CountdownError {
    #[error("gene {0} is a number, not an operator")]
    InvalidOperatorGene(u8),

    #[error("gene code {0} does not fit in a nibble")]
    GeneOutOfRange(u8),

    #[error("chromosomes must hold an even, non-zero number of genes (got {0})")]
    OddGeneCount(usize),

    #[error("cannot mate chromosomes of {left} and {right} bytes")]
    IncompatibleChromosomeLength { left: usize, right: usize },

    #[error("cannot select from a population with total fitness {0}")]
    DegenerateFitnessSum(f64),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("secure byte source failed: {0}")]
    Entropy(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, CountdownError>;
