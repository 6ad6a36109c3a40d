//! Deterministic generator used by the search engines.
//!
//! A 32-bit linear recurrence whose top 16 bits are the output. It is fast,
//! reproducible from a seed, and not suitable for anything security related.

use rand::{Error, RngCore, SeedableRng};

const MULTIPLIER: u32 = 0x915f_77f5;

/// 32-bit linear congruential generator with 16-bit output.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Lcg16 {
    state: u32,
}

impl Lcg16 {
    /// Create a generator from a raw state.
    pub const fn new(seed: u32) -> Self {
        Self { state: seed }
    }

    /// Current internal state.
    pub const fn state(&self) -> u32 {
        self.state
    }

    /// Advance the recurrence and return the top 16 bits.
    #[inline]
    pub fn next_u16(&mut self) -> u16 {
        self.state = MULTIPLIER.wrapping_mul(self.state).wrapping_add(1);
        (self.state >> 16) as u16
    }
}

impl Default for Lcg16 {
    fn default() -> Self {
        Self::new(1)
    }
}

impl RngCore for Lcg16 {
    #[inline]
    fn next_u32(&mut self) -> u32 {
        let high = self.next_u16() as u32;
        let low = self.next_u16() as u32;
        (high << 16) | low
    }

    #[inline]
    fn next_u64(&mut self) -> u64 {
        rand_core::impls::next_u64_via_u32(self)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        rand_core::impls::fill_bytes_via_next(self, dest)
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

impl SeedableRng for Lcg16 {
    type Seed = [u8; 4];

    fn from_seed(seed: Self::Seed) -> Self {
        Self::new(u32::from_le_bytes(seed))
    }
}
