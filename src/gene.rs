//! The 4-bit symbols a chromosome is made of.

use crate::error::{CountdownError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Codes below this are numeric literals, the rest are operators
pub const FIRST_OPERATOR: u8 = 12;

/// A 4-bit symbol read out of a [crate::Chromosome]. Codes `0..=11` are numeric literals whose
/// value is the code itself, codes `12..=15` are operators resolved through an [OperatorTable].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Gene(u8);

impl Gene {
    pub fn new(code: u8) -> Result<Self> {
        if code > 0x0f {
            return Err(CountdownError::GeneOutOfRange(code));
        }
        Ok(Self(code))
    }

    /// Gene held in the low nibble of `n`, high bits are discarded
    #[inline]
    pub(crate) const fn from_nibble(n: u8) -> Self {
        Self(n & 0x0f)
    }

    #[inline]
    pub fn code(self) -> u8 {
        self.0
    }

    #[inline]
    pub fn is_number(self) -> bool {
        self.0 < FIRST_OPERATOR
    }

    #[inline]
    pub fn is_operator(self) -> bool {
        !self.is_number()
    }

    /// The literal value of a numeric gene, `None` for operators
    #[inline]
    pub fn numeric_value(self) -> Option<f64> {
        self.is_number().then_some(f64::from(self.0))
    }

    /// Apply this operator gene to `x` and `y`. Division by zero is not special-cased, and
    /// yields a non-finite result.
    pub fn apply(self, table: &OperatorTable, x: f64, y: f64) -> Result<f64> {
        table
            .decode(self)
            .map(|op| op.apply(x, y))
            .ok_or(CountdownError::InvalidOperatorGene(self.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
}

impl Operator {
    #[inline]
    pub fn apply(self, x: f64, y: f64) -> f64 {
        match self {
            Self::Add => x + y,
            Self::Sub => x - y,
            Self::Mul => x * y,
            Self::Div => x / y,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Which operator each of the codes `12..=15` stands for.
///
/// The default maps 12 to `+`, 13 to `-`, 14 to `/` and 15 to `*`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OperatorTable([Operator; 4]);

impl Default for OperatorTable {
    fn default() -> Self {
        Self([Operator::Add, Operator::Sub, Operator::Div, Operator::Mul])
    }
}

impl OperatorTable {
    pub fn new(ops: [Operator; 4]) -> Self {
        Self(ops)
    }

    #[inline]
    pub fn decode(&self, gene: Gene) -> Option<Operator> {
        gene.code()
            .checked_sub(FIRST_OPERATOR)
            .map(|idx| self.0[usize::from(idx)])
    }

    /// The first code mapped to `op`, if any
    pub fn encode(&self, op: Operator) -> Option<Gene> {
        self.0
            .iter()
            .position(|o| *o == op)
            .map(|idx| Gene(FIRST_OPERATOR + idx as u8))
    }

    /// whether every operator is reachable through exactly one code
    pub fn is_bijective(&self) -> bool {
        [Operator::Add, Operator::Sub, Operator::Mul, Operator::Div]
            .iter()
            .all(|op| self.0.iter().filter(|o| *o == op).count() == 1)
    }

    pub fn operators(&self) -> &[Operator; 4] {
        &self.0
    }

    /// Human readable form of `gene`: numbers with two decimals, operators as their symbol
    pub fn render(&self, gene: Gene) -> String {
        match self.decode(gene) {
            Some(op) => op.symbol().to_string(),
            None => format!("{:.2}", f64::from(gene.code())),
        }
    }
}
