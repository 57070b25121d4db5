//! Randomness used by the generators, behind a seam tests can script.

use derive_more::{Display, Error};
use rand::{rngs::StdRng, Rng, SeedableRng as _};

/// A uniform source of indices.
///
/// Production code hands the generators a seeded [`StdRng`]; any [`Rng`] works.
pub trait RandomSource {
    /// Returns an index in `0..bound`. Callers never pass a zero `bound`.
    fn next_index(&mut self, bound: usize) -> usize;
}

impl<R: Rng + ?Sized> RandomSource for R {
    fn next_index(&mut self, bound: usize) -> usize {
        self.gen_range(0..bound)
    }
}

/// The 32 bytes a puzzle was generated from.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Seed(pub [u8; 32]);

/// A seed string that is not 32 hex-encoded bytes.
#[derive(Debug, Clone, Display, Error)]
#[display("Invalid seed: {reason}")]
pub struct SeedError {
    reason: String,
}

impl Seed {
    /// A seed from the operating system's entropy source.
    pub fn fresh() -> Result<Self, getrandom::Error> {
        let mut seed = [0u8; 32];
        getrandom::getrandom(&mut seed)?;
        Ok(Self(seed))
    }

    pub fn from_hex(hex_seed: &str) -> Result<Self, SeedError> {
        let bytes = hex::decode(hex_seed.trim()).map_err(|decode_err| SeedError {
            reason: format!("decoding hex: {decode_err}"),
        })?;
        <[u8; 32]>::try_from(bytes.as_slice())
            .map(Self)
            .map_err(|_| SeedError {
                reason: format!("seed is {} bytes long, expected 32", bytes.len()),
            })
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    pub fn rng(&self) -> StdRng {
        StdRng::from_seed(self.0)
    }
}

impl std::fmt::Display for Seed {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}
