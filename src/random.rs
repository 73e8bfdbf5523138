use crate::error::{CountdownError, Result};
use rand::{rngs::OsRng, Rng, RngCore, SeedableRng, TryRngCore};
use std::fmt::Display;

/// Randomness needed by evolution, passed explicitly wherever it is consumed.
pub trait RandomSource {
    /// Fill `dst` with cryptographically unpredictable bytes
    fn fill_secure(&mut self, dst: &mut [u8]) -> Result<()>;

    /// A uniform real in `[0, 1)`
    fn uniform(&mut self) -> f64;

    /// A uniform integer in `[0, n)`, `n` must be non-zero
    fn below(&mut self, n: u64) -> u64;
}

/// Binds a secure byte source used to seed chromosomes with a fast generator used for every
/// selection, crossover and mutation draw.
pub struct SourceBinding<S: TryRngCore, R: RngCore> {
    secure: S,
    r: R,
}

impl<S: TryRngCore, R: RngCore> SourceBinding<S, R> {
    pub fn new(secure: S, r: R) -> Self {
        Self { secure, r }
    }
}

impl<S: TryRngCore + SeedableRng, R: RngCore + SeedableRng> SourceBinding<S, R> {
    /// A fully deterministic source, for reproducible runs
    pub fn seed_from_u64(state: u64) -> Self {
        Self {
            secure: S::seed_from_u64(state),
            r: R::seed_from_u64(state.wrapping_add(1)),
        }
    }
}

impl<S: TryRngCore, R: RngCore> RandomSource for SourceBinding<S, R>
where
    S::Error: Display,
{
    fn fill_secure(&mut self, dst: &mut [u8]) -> Result<()> {
        self.secure
            .try_fill_bytes(dst)
            .map_err(|e| CountdownError::Entropy(e.to_string()))
    }

    #[inline]
    fn uniform(&mut self) -> f64 {
        self.r.random::<f64>()
    }

    #[inline]
    fn below(&mut self, n: u64) -> u64 {
        self.r.random_range(0..n)
    }
}

pub struct WyRng {
    state: u64,
}

impl WyRng {
    pub fn seeded(state: u64) -> Self {
        Self { state }
    }
}

impl RngCore for WyRng {
    fn next_u32(&mut self) -> u32 {
        self.next_u64() as u32
    }

    fn next_u64(&mut self) -> u64 {
        const WY_CONST_0: u64 = 0x2d35_8dcc_aa6c_78a5;
        const WY_CONST_1: u64 = 0x8bb8_4b93_962e_acc9;
        self.state = self.state.wrapping_add(WY_CONST_0);
        let t = u128::from(self.state) * u128::from(self.state ^ WY_CONST_1);
        (t as u64) ^ (t >> 64) as u64
    }

    fn fill_bytes(&mut self, dst: &mut [u8]) {
        for chunk in dst.chunks_mut(8) {
            let len = chunk.len();
            chunk.copy_from_slice(&self.next_u64().to_le_bytes()[..len]);
        }
    }
}

impl SeedableRng for WyRng {
    type Seed = [u8; 8];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::seeded(u64::from_le_bytes(seed))
    }
}

/// A per-process seed drawn from the operating system
pub fn seed_entropy() -> Result<u64> {
    OsRng
        .try_next_u64()
        .map_err(|e| CountdownError::Entropy(e.to_string()))
}

pub type DefaultSource = SourceBinding<OsRng, WyRng>;

pub fn default_source() -> Result<DefaultSource> {
    Ok(SourceBinding::new(OsRng, WyRng::seeded(seed_entropy()?)))
}

/// A source whose uniform draws are replayed from a script, for forcing particular
/// selections and crossovers in tests.
#[cfg(test)]
pub(crate) struct Scripted {
    uniforms: std::collections::VecDeque<f64>,
    /// whether `below` always rolls 0, which flips every bit a mutation trial looks at
    flip: bool,
    byte: u8,
}

#[cfg(test)]
impl Scripted {
    pub(crate) fn new(uniforms: &[f64], flip: bool) -> Self {
        Self {
            uniforms: uniforms.iter().copied().collect(),
            flip,
            byte: 0,
        }
    }

    pub(crate) fn with_byte(mut self, byte: u8) -> Self {
        self.byte = byte;
        self
    }
}

#[cfg(test)]
impl RandomSource for Scripted {
    fn fill_secure(&mut self, dst: &mut [u8]) -> Result<()> {
        dst.fill(self.byte);
        Ok(())
    }

    fn uniform(&mut self) -> f64 {
        self.uniforms.pop_front().expect("script ran out of uniform draws")
    }

    fn below(&mut self, n: u64) -> u64 {
        if self.flip {
            0
        } else {
            n - 1
        }
    }
}
