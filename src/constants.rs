//! Centralized defaults for countdown evolution parameters.
//!
//! Every configurable parameter has a `COUNTDOWN_` prefixed default here, and is overridable
//! through [crate::config::Config].

// ============================================================================
// Puzzle Parameters
// ============================================================================

/// Value the evolved expression should evaluate to
pub const COUNTDOWN_TARGET: f64 = 145.0;

/// Genes per chromosome, packed two per byte
pub const COUNTDOWN_GENES: usize = 8;

// ============================================================================
// Population Parameters
// ============================================================================

/// Chromosomes generated from the secure byte source before growth starts
pub const COUNTDOWN_INITIAL_POPULATION: usize = 3333;

/// Population size at which growth stops and the fittest member is reported
pub const COUNTDOWN_FINAL_POPULATION: usize = 10000;

// ============================================================================
// Reproduction Parameters
// ============================================================================

/// Probability that two selected parents recombine instead of the first being copied
pub const COUNTDOWN_CROSSOVER_RATE: f64 = 0.7;

/// Per-bit flip probability during mutation
pub const COUNTDOWN_MUTATION_RATE: f64 = 0.001;

// ============================================================================
// Bookkeeping
// ============================================================================

/// Offspring between full recomputations of the running fitness sum
pub const COUNTDOWN_RESYNC_INTERVAL: usize = 1000;

/// Offspring between progress reports
pub const COUNTDOWN_REPORT_INTERVAL: usize = 1000;
