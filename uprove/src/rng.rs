use crate::error::UProveError;
use ark_ff::PrimeField;
use ark_std::{rand::RngCore, vec::Vec};

/// Draws `random_nonzero_zq_element` makes on a real random source before giving up
pub const MAX_NONZERO_DRAWS: usize = 64;

/// Source of the random scalars used by the issuer and prover.
pub trait RandomNumberGenerator<F: PrimeField> {
    fn random_zq_element(&mut self) -> F;

    /// Number of draws after which a source returning only zeros is considered broken
    fn max_draws(&self) -> usize {
        MAX_NONZERO_DRAWS
    }

    /// Draws until a non-zero scalar comes up, for keys and blinding factors that must be invertible
    fn random_nonzero_zq_element(&mut self) -> Result<F, UProveError> {
        for _ in 0..self.max_draws() {
            let x = self.random_zq_element();
            if !x.is_zero() {
                return Ok(x);
            }
        }
        Err(UProveError::InvalidRandomSource(
            "no non-zero value was drawn",
        ))
    }
}

impl<F: PrimeField, R: RngCore> RandomNumberGenerator<F> for R {
    fn random_zq_element(&mut self) -> F {
        F::rand(self)
    }
}

/// Replays a fixed sequence of scalars, restarting from the first when exhausted. Makes protocol
/// runs reproducible, e.g. to check against recorded test vectors.
#[derive(Clone, Debug)]
pub struct TestVectorRng<F: PrimeField> {
    values: Vec<F>,
    next: usize,
}

impl<F: PrimeField> TestVectorRng<F> {
    pub fn new(values: Vec<F>) -> Result<Self, UProveError> {
        if values.is_empty() {
            return Err(UProveError::InvalidRandomSource("no test vector values"));
        }
        Ok(Self { values, next: 0 })
    }
}

impl<F: PrimeField> RandomNumberGenerator<F> for TestVectorRng<F> {
    fn random_zq_element(&mut self) -> F {
        let v = self.values[self.next];
        self.next = (self.next + 1) % self.values.len();
        v
    }

    /// One pass over the values
    fn max_draws(&self) -> usize {
        self.values.len()
    }
}
