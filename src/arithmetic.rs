//! Arithmetic coding with exact rational arithmetic.
//!
//! The working interval is never renormalized, so the numbers involved grow
//! with every symbol coded: the precision needed is proportional to the
//! length of the input. This keeps the output identical to the textbook
//! construction at the cost of time and memory on long inputs.

use std::collections::BTreeMap;

use log::{debug, trace};
use num_rational::BigRational;

use crate::alphabet::{Distribution, Symbol};
use crate::error::{Error, Result};
use crate::interval::Interval;

/// Encodes whole symbol sequences as a single binary fraction.
#[derive(Debug, Clone)]
pub struct ArithmeticEncoder<S: Symbol> {
    /// Each symbol's `[c_j, d_j)` range of the cumulative distribution, with
    /// the alphabet in ascending symbol order.
    bounds: BTreeMap<S, (BigRational, BigRational)>,
}

impl<S: Symbol> ArithmeticEncoder<S> {
    /// Create an encoder for sequences drawn from `distribution`. Every
    /// probability must be positive and finite.
    pub fn new(distribution: &Distribution<S>) -> Result<Self> {
        distribution.validate_probabilities()?;

        let mut bounds = BTreeMap::new();
        for symbol in distribution.symbols() {
            let lower = distribution.interval_lower_bound(symbol)?;
            let upper = distribution.interval_upper_bound(symbol)?;
            bounds.insert(*symbol, (lower, upper));
        }
        Ok(Self { bounds })
    }

    /// The interval after each symbol of `input` has been coded.
    pub fn narrow<I>(&self, input: I) -> Narrowing<'_, S, I::IntoIter>
    where
        I: IntoIterator<Item = S>,
    {
        Narrowing {
            encoder: self,
            input: input.into_iter(),
            interval: Interval::unit(),
            failed: false,
        }
    }

    /// Encode `input` as the binary expansion of the midpoint of its final
    /// interval, truncated to `ceil(-log2(width)) + 1` bits.
    ///
    /// An empty input leaves the interval at `[0, 1)` and encodes as `"1"`.
    pub fn encode<I>(&self, input: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
    {
        let mut interval = Interval::unit();
        let mut length = 0usize;
        for step in self.narrow(input) {
            interval = step?;
            length += 1;
        }

        let code = interval.code();
        debug!("arithmetic coded {length} symbols into {} bits", code.len());
        Ok(code)
    }
}

/// Iterator returned by [`ArithmeticEncoder::narrow`]. It stops after the
/// first error.
pub struct Narrowing<'e, S: Symbol, I> {
    encoder: &'e ArithmeticEncoder<S>,
    input: I,
    interval: Interval,
    failed: bool,
}

impl<S: Symbol, I: Iterator<Item = S>> Iterator for Narrowing<'_, S, I> {
    type Item = Result<Interval>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let symbol = self.input.next()?;

        let Some((lower, upper)) = self.encoder.bounds.get(&symbol) else {
            self.failed = true;
            return Some(Err(Error::SymbolNotFound(format!("{symbol:?}"))));
        };
        self.interval = match self.interval.narrow(lower, upper) {
            Ok(interval) => interval,
            Err(e) => {
                self.failed = true;
                return Some(Err(e));
            }
        };
        trace!("{symbol:?} -> {}", self.interval);
        Some(Ok(self.interval.clone()))
    }
}

/// A distribution and an input sequence, with the coded sequence computed on
/// first request and kept until either is replaced.
#[derive(Debug, Clone)]
pub struct ArithmeticCoder<S: Symbol> {
    distribution: Distribution<S>,
    sequence: Vec<S>,
    coded: Option<String>,
}

impl<S: Symbol> ArithmeticCoder<S> {
    pub fn new<I>(distribution: Distribution<S>, sequence: I) -> Self
    where
        I: IntoIterator<Item = S>,
    {
        Self {
            distribution,
            sequence: sequence.into_iter().collect(),
            coded: None,
        }
    }

    pub fn alphabet(&self) -> impl Iterator<Item = &S> {
        self.distribution.symbols()
    }

    pub fn distribution(&self) -> &Distribution<S> {
        &self.distribution
    }

    pub fn sequence(&self) -> &[S] {
        &self.sequence
    }

    pub fn set_distribution(&mut self, distribution: Distribution<S>) {
        self.distribution = distribution;
        self.coded = None;
    }

    pub fn set_sequence<I>(&mut self, sequence: I)
    where
        I: IntoIterator<Item = S>,
    {
        self.sequence = sequence.into_iter().collect();
        self.coded = None;
    }

    pub fn coded_string(&mut self) -> Result<&str> {
        let coded = match self.coded.take() {
            Some(coded) => coded,
            None => ArithmeticEncoder::new(&self.distribution)?
                .encode(self.sequence.iter().copied())?,
        };
        Ok(self.coded.insert(coded))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::example;

    fn encode(distribution: &Distribution<char>, input: &str) -> Result<String> {
        ArithmeticEncoder::new(distribution)?.encode(input.chars())
    }

    fn halves() -> Distribution<char> {
        Distribution::new([('a', 0.5), ('b', 0.5)]).unwrap()
    }

    #[test_log::test]
    fn encode_exercise_message() {
        assert_eq!(
            encode(&example::four_letters(), example::ARITHMETIC_INPUT),
            Ok("01000111101".to_string())
        );
    }

    #[test]
    fn encode_empty_message() {
        assert_eq!(encode(&example::four_letters(), ""), Ok("1".to_string()));
    }

    #[test]
    fn encode_single_symbols() {
        assert_eq!(encode(&halves(), "a"), Ok("01".to_string()));
        assert_eq!(encode(&halves(), "b"), Ok("11".to_string()));
        assert_eq!(encode(&halves(), "ab"), Ok("011".to_string()));
    }

    #[test]
    fn error_on_unknown_symbol() {
        assert_eq!(
            encode(&example::four_letters(), "abz"),
            Err(Error::SymbolNotFound("'z'".to_string()))
        );
    }

    #[test]
    fn error_on_zero_probability() {
        let distribution = Distribution::new([('a', 1.0), ('b', 0.0)]).unwrap();
        assert_eq!(
            ArithmeticEncoder::new(&distribution).map(|_| ()),
            Err(Error::InvalidProbability(0.0))
        );
    }

    #[test]
    fn bounds_match_the_distribution() {
        let distribution = example::four_letters();
        let encoder = ArithmeticEncoder::new(&distribution).unwrap();
        for (symbol, (lower, upper)) in &encoder.bounds {
            assert_eq!(distribution.interval_lower_bound(symbol).as_ref(), Ok(lower));
            assert_eq!(distribution.interval_upper_bound(symbol).as_ref(), Ok(upper));
        }
        assert_eq!(encoder.bounds.len(), distribution.len());
    }

    #[test]
    fn narrowing_stops_after_an_error() {
        let distribution = example::four_letters();
        let encoder = ArithmeticEncoder::new(&distribution).unwrap();
        let steps: Vec<_> = encoder.narrow("azb".chars()).collect();
        assert_eq!(steps.len(), 2);
        assert!(steps[0].is_ok());
        assert!(steps[1].is_err());
    }

    #[test]
    fn intervals_shrink_and_stay_non_empty() {
        let distribution = example::four_letters();
        let encoder = ArithmeticEncoder::new(&distribution).unwrap();
        let mut previous = Interval::unit();
        for step in encoder.narrow("dcbaabcd".chars()) {
            let interval = step.unwrap();
            assert!(interval.low() < interval.high());
            assert!(interval.width() <= previous.width());
            assert!(interval.low() >= previous.low());
            assert!(interval.high() <= previous.high());
            previous = interval;
        }
    }

    #[test]
    fn coder_caches_until_sequence_changes() {
        let mut coder = ArithmeticCoder::new(halves(), "a".chars());
        assert_eq!(coder.coded_string().unwrap(), "01");
        assert_eq!(coder.coded_string().unwrap(), "01");

        coder.set_sequence("b".chars());
        assert_eq!(coder.sequence(), &['b']);
        assert_eq!(coder.coded_string().unwrap(), "11");

        coder.set_distribution(Distribution::new([('a', 0.25), ('b', 0.75)]).unwrap());
        // [1/4, 1): midpoint 5/8, precision 2.
        assert_eq!(coder.coded_string().unwrap(), "10");
        assert_eq!(coder.alphabet().collect::<Vec<_>>(), vec![&'a', &'b']);
    }

    #[test]
    fn coder_reports_errors_without_caching() {
        let mut coder = ArithmeticCoder::new(halves(), "x".chars());
        assert!(coder.coded_string().is_err());
        coder.set_sequence("a".chars());
        assert_eq!(coder.coded_string().unwrap(), "01");
    }
}
