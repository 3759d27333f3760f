//! Loan amount type.
//!
//! Amounts are fixed-point integers (u128) in the ledger's smallest currency
//! unit, avoiding floating-point errors in volume accumulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A loan amount — approval limits and processed volume.
///
/// Internally stored as raw units (u128) for precision. Accumulation is
/// checked: overflow surfaces as `None` at the call site, never wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct LoanAmount(u128);

impl LoanAmount {
    pub const ZERO: Self = Self(0);

    pub fn new(raw: u128) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Self) -> Option<Self> {
        self.0.checked_add(other.0).map(Self)
    }
}

impl fmt::Display for LoanAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
