use std::collections::BTreeMap;
use std::collections::btree_map::Entry;
use std::fmt::Debug;

use num_rational::BigRational;
use num_traits::Zero;

use crate::error::{Error, Result};

/// Anything that can appear in an input stream. Symbols are ordered so that
/// alphabets have a canonical (lexicographic) order.
pub trait Symbol: Ord + Copy + Debug {}

impl Symbol for char {}
impl Symbol for u8 {}

/// An immutable mapping from symbol to probability.
///
/// Probabilities are kept exactly as supplied. Nothing checks that they sum
/// to one: that is the caller's responsibility, and the coders' output for a
/// distribution that does not is meaningless.
#[derive(Debug, Clone, PartialEq)]
pub struct Distribution<S: Symbol> {
    pub(crate) probabilities: BTreeMap<S, f64>,
}

impl<S: Symbol> Distribution<S> {
    /// Create a distribution from `(symbol, probability)` pairs.
    pub fn new<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        let mut probabilities = BTreeMap::new();
        for (symbol, probability) in entries {
            match probabilities.entry(symbol) {
                Entry::Vacant(slot) => {
                    slot.insert(probability);
                }
                Entry::Occupied(_) => return Err(Error::DuplicateSymbol(format!("{symbol:?}"))),
            }
        }

        if probabilities.is_empty() {
            return Err(Error::EmptyDistribution);
        }
        Ok(Self { probabilities })
    }

    /// Create a distribution from non-negative weights, dividing each by
    /// their sum.
    pub fn from_weights<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
    {
        let raw = Self::new(entries)?;
        let total: f64 = raw.probabilities.values().sum();
        if !(total.is_finite() && total > 0.0) {
            return Err(Error::InvalidProbability(total));
        }
        Ok(Self {
            probabilities: raw
                .probabilities
                .into_iter()
                .map(|(symbol, weight)| (symbol, weight / total))
                .collect(),
        })
    }

    /// The empirical distribution of a stream: each symbol's count divided by
    /// the stream length.
    pub fn from_counts<I>(stream: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
    {
        let mut counts: BTreeMap<S, u64> = BTreeMap::new();
        let mut total = 0u64;
        for symbol in stream {
            *counts.entry(symbol).or_insert(0) += 1;
            total += 1;
        }

        if total == 0 {
            return Err(Error::EmptyDistribution);
        }
        Ok(Self {
            probabilities: counts
                .into_iter()
                .map(|(symbol, count)| (symbol, count as f64 / total as f64))
                .collect(),
        })
    }

    /// The symbols of the alphabet, in ascending order.
    pub fn symbols(&self) -> impl Iterator<Item = &S> {
        self.probabilities.keys()
    }

    /// `(symbol, probability)` pairs in ascending symbol order.
    pub fn iter(&self) -> impl Iterator<Item = (&S, f64)> {
        self.probabilities.iter().map(|(s, &p)| (s, p))
    }

    pub fn probabilities(&self) -> impl Iterator<Item = f64> + '_ {
        self.probabilities.values().copied()
    }

    pub fn probability(&self, symbol: &S) -> Option<f64> {
        self.probabilities.get(symbol).copied()
    }

    pub fn contains(&self, symbol: &S) -> bool {
        self.probabilities.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Fail on the first probability that is zero, negative or not finite.
    pub fn validate_probabilities(&self) -> Result<()> {
        match self.probabilities().find(|p| !(p.is_finite() && *p > 0.0)) {
            Some(bad) => Err(Error::InvalidProbability(bad)),
            None => Ok(()),
        }
    }

    /// The cumulative probability of every symbol ordered before this one,
    /// summed exactly from each probability's binary value.
    ///
    /// This is c_j.
    pub fn interval_lower_bound(&self, symbol: &S) -> Result<BigRational> {
        if !self.contains(symbol) {
            return Err(Error::SymbolNotFound(format!("{symbol:?}")));
        }
        self.probabilities
            .range(..*symbol)
            .try_fold(BigRational::zero(), |sum, (_, &p)| Ok(sum + exact(p)?))
    }

    /// This is d_j.
    pub fn interval_upper_bound(&self, symbol: &S) -> Result<BigRational> {
        let lower = self.interval_lower_bound(symbol)?;
        let p = self
            .probability(symbol)
            .ok_or_else(|| Error::SymbolNotFound(format!("{symbol:?}")))?;
        Ok(lower + exact(p)?)
    }
}

fn exact(probability: f64) -> Result<BigRational> {
    BigRational::from_float(probability).ok_or(Error::InvalidProbability(probability))
}
