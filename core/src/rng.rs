use serde::{Deserialize, Serialize};

use crate::Seed;

/// 32-bit xorshift generator (shift triple 13, 17, 5).
///
/// Every draw is a pure function of the seed and the number of previous draws, so a seed saved with a game
/// reproduces its mine layout exactly. The arithmetic matches the unsigned 32-bit reference sequence bit for bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShift32 {
    state: u32,
}

impl XorShift32 {
    /// Substituted for a zero state, which xorshift can never leave.
    pub const ZERO_STATE_REPLACEMENT: u32 = 0x9E37_79B9;

    pub fn new(seed: Seed) -> Self {
        // truncation keeps the low 32 bits, same as an unsigned 32-bit conversion
        let state = seed as u32;
        if state == 0 {
            log::warn!(
                "Seed {} truncates to a zero state, using {:#x} instead",
                seed,
                Self::ZERO_STATE_REPLACEMENT
            );
            return Self {
                state: Self::ZERO_STATE_REPLACEMENT,
            };
        }
        Self { state }
    }

    pub const fn state(&self) -> u32 {
        self.state
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Next value scaled into `[0, 1]`; `1.0` is only returned for a state of `u32::MAX`.
    pub fn next_f64(&mut self) -> f64 {
        f64::from(self.next_u32()) / f64::from(u32::MAX)
    }

    /// `floor(next_f64() * bound)`. Can equal `bound` on the rare `1.0` draw, callers must redraw.
    pub fn next_scaled(&mut self, bound: u32) -> u32 {
        (self.next_f64() * f64::from(bound)).floor() as u32
    }
}
