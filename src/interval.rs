use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{One, Zero};

use crate::error::{Error, Result};

/// A half-open interval `[low, high)` of exact rationals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interval {
    low: BigRational,
    high: BigRational,
}

impl Interval {
    /// `[0, 1)`, where every arithmetic coding run starts.
    pub fn unit() -> Self {
        Self {
            low: BigRational::zero(),
            high: BigRational::one(),
        }
    }

    pub fn low(&self) -> &BigRational {
        &self.low
    }

    pub fn high(&self) -> &BigRational {
        &self.high
    }

    pub fn width(&self) -> BigRational {
        &self.high - &self.low
    }

    fn is_empty(&self) -> bool {
        self.low >= self.high
    }

    /// The part of this interval between the fractions `lower` and `upper`
    /// of its width. Fails unless `lower < upper`, so an interval is never
    /// empty.
    pub fn narrow(&self, lower: &BigRational, upper: &BigRational) -> Result<Self> {
        let width = self.width();
        let narrowed = Self {
            low: &self.low + &width * lower,
            high: &self.low + &width * upper,
        };
        if narrowed.is_empty() {
            return Err(Error::EmptyInterval {
                low: narrowed.low.to_string(),
                high: narrowed.high.to_string(),
            });
        }
        Ok(narrowed)
    }

    pub fn midpoint(&self) -> BigRational {
        (&self.low + &self.high) / BigInt::from(2)
    }

    /// `ceil(-log2(width)) + 1`: enough bits after the binary point for the
    /// truncated midpoint to stay inside the interval.
    pub fn precision(&self) -> u64 {
        let width = self.width();
        let (numer, denom) = (width.numer(), width.denom());
        if numer >= denom {
            return 1;
        }

        // Smallest k with numer * 2^k >= denom.
        let mut k = denom.bits().saturating_sub(numer.bits());
        while (numer << k) < *denom {
            k += 1;
        }
        while k > 0 && (numer << (k - 1)) >= *denom {
            k -= 1;
        }
        k + 1
    }

    /// The code for this interval: the binary expansion of its midpoint,
    /// truncated to [`precision`](Self::precision) bits.
    pub fn code(&self) -> String {
        binary_fraction(&self.midpoint(), self.precision())
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.low, self.high)
    }
}

/// The first `bits` binary digits after the point of the fractional part of
/// `value`.
pub fn binary_fraction(value: &BigRational, bits: u64) -> String {
    let fraction = value.fract();
    let denom = fraction.denom();
    let mut numer = fraction.numer().clone();

    let mut digits = String::with_capacity(bits as usize);
    for _ in 0..bits {
        numer <<= 1u32;
        if numer >= *denom {
            digits.push('1');
            numer -= denom;
        } else {
            digits.push('0');
        }
    }
    digits
}
