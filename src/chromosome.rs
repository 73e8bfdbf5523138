//! Candidate expressions, packed two genes per byte.

use crate::{
    error::{CountdownError, Result},
    fitness::{score, Puzzle},
    gene::{Gene, Operator, OperatorTable},
    random::RandomSource,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Result of reading a chromosome left to right. `Unset` when no numeric gene was ever read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Total {
    Unset,
    Value(f64),
}

impl Total {
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Unset => None,
            Self::Value(v) => Some(v),
        }
    }
}

impl fmt::Display for Total {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unset => f.write_str("unset"),
            Self::Value(v) => write!(f, "{v:.2}"),
        }
    }
}

/// A fixed-length sequence of [Gene]s, the high nibble of each byte holding the earlier gene.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Chromosome {
    body: Vec<u8>,
}

impl Chromosome {
    /// `genes` random genes drawn from the secure byte source
    pub fn random(genes: usize, rng: &mut impl RandomSource) -> Result<Self> {
        if genes == 0 || genes % 2 != 0 {
            return Err(CountdownError::OddGeneCount(genes));
        }
        let mut body = vec![0u8; genes / 2];
        rng.fill_secure(&mut body)?;
        Ok(Self { body })
    }

    pub fn from_body(body: Vec<u8>) -> Self {
        Self { body }
    }

    pub fn from_genes(genes: &[Gene]) -> Result<Self> {
        if genes.is_empty() || genes.len() % 2 != 0 {
            return Err(CountdownError::OddGeneCount(genes.len()));
        }
        Ok(Self {
            body: genes
                .chunks_exact(2)
                .map(|pair| pair[0].code() << 4 | pair[1].code())
                .collect(),
        })
    }

    #[inline]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// number of genes, always even
    #[inline]
    pub fn len(&self) -> usize {
        self.body.len() * 2
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    #[inline]
    pub fn gene(&self, idx: usize) -> Option<Gene> {
        let b = *self.body.get(idx / 2)?;
        Some(if idx % 2 == 0 {
            Gene::from_nibble(b >> 4)
        } else {
            Gene::from_nibble(b)
        })
    }

    /// Overwrite the gene at `idx`, leaving its neighbour in the same byte intact.
    /// Returns `None` if `idx` is out of range.
    pub fn set_gene(&mut self, idx: usize, gene: Gene) -> Option<()> {
        let b = self.body.get_mut(idx / 2)?;
        *b = if idx % 2 == 0 {
            (*b & 0x0f) | gene.code() << 4
        } else {
            (*b & 0xf0) | gene.code()
        };
        Some(())
    }

    pub fn genes(&self) -> impl Iterator<Item = Gene> + '_ {
        self.body
            .iter()
            .flat_map(|b| [Gene::from_nibble(b >> 4), Gene::from_nibble(*b)])
    }

    /// Read the genes as an alternating number / operator stream, left to right with no
    /// precedence. Genes that don't fit the expected kind are skipped.
    pub fn evaluate(&self, table: &OperatorTable) -> Total {
        let mut total = Total::Unset;
        let mut pending: Option<Operator> = None;
        let mut want_number = true;

        for gene in self.genes() {
            if want_number {
                let Some(n) = gene.numeric_value() else {
                    continue;
                };
                total = match (total, pending.take()) {
                    (Total::Value(t), Some(op)) => Total::Value(op.apply(t, n)),
                    _ => Total::Value(n),
                };
                want_number = false;
            } else if let Some(op) = table.decode(gene) {
                pending = Some(op);
                want_number = true;
            }
        }

        total
    }

    /// See [crate::fitness::score]
    #[inline]
    pub fn fitness(&self, puzzle: &Puzzle) -> f64 {
        score(self.evaluate(&puzzle.operators), puzzle.target)
    }

    /// With probability `crossover_rate`, an offspring taking the first half of its bytes from
    /// `self` and the rest from `other`. Otherwise a copy of `self`.
    pub fn mate(
        &self,
        other: &Self,
        crossover_rate: f64,
        rng: &mut impl RandomSource,
    ) -> Result<Self> {
        if self.body.len() != other.body.len() {
            return Err(CountdownError::IncompatibleChromosomeLength {
                left: self.body.len(),
                right: other.body.len(),
            });
        }

        if rng.uniform() >= crossover_rate {
            return Ok(self.clone());
        }

        let mid = self.body.len() / 2;
        let mut body = Vec::with_capacity(self.body.len());
        body.extend_from_slice(&self.body[..mid]);
        body.extend_from_slice(&other.body[mid..]);
        Ok(Self { body })
    }

    /// Flip each of bits 1 through 7 of every byte with probability of about `rate`, drawn as a
    /// one in `round(1 / rate)` chance. Bit 0 is never touched. A `rate` at or below 0 leaves
    /// the chromosome as is.
    pub fn mutate(mut self, rate: f64, rng: &mut impl RandomSource) -> Self {
        if rate.is_nan() || rate <= 0. {
            return self;
        }

        // saturating cast, a vanishing rate becomes a one in u64::MAX chance
        let odds = ((1. / rate).round() as u64).max(1);
        for b in self.body.iter_mut() {
            for bit in 1..8 {
                if rng.below(odds) == 0 {
                    *b ^= 1 << bit;
                }
            }
        }
        self
    }

    /// Render against `table`, see [Expression]
    pub fn expression<'a>(&'a self, table: &'a OperatorTable) -> Expression<'a> {
        Expression {
            chromosome: self,
            table,
        }
    }
}

/// Every gene of a chromosome separated by spaces, numbers to two decimals and operators as
/// their symbol.
pub struct Expression<'a> {
    chromosome: &'a Chromosome,
    table: &'a OperatorTable,
}

impl fmt::Display for Expression<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, gene) in self.chromosome.genes().enumerate() {
            if idx != 0 {
                f.write_str(" ")?;
            }
            f.write_str(&self.table.render(gene))?;
        }
        Ok(())
    }
}
