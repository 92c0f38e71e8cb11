use std::collections::BTreeMap;

use crate::alphabet::{Distribution, Symbol};
use crate::error::{Error, Result};

/// A mapping from symbol to binary codeword, each codeword a string of `'0'`
/// and `'1'` characters. Iteration is in ascending symbol order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeTable<S: Symbol> {
    codes: BTreeMap<S, String>,
}

impl<S: Symbol> CodeTable<S> {
    pub(crate) fn from_codes(codes: BTreeMap<S, String>) -> Self {
        Self { codes }
    }

    pub fn get(&self, symbol: &S) -> Option<&str> {
        self.codes.get(symbol).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&S, &str)> {
        self.codes.iter().map(|(s, c)| (s, c.as_str()))
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// The expected codeword length under `distribution`:
    /// `Σ p(s)·len(code(s))`. Symbols without a codeword contribute nothing.
    pub fn average_length(&self, distribution: &Distribution<S>) -> f64 {
        distribution
            .iter()
            .filter_map(|(symbol, p)| self.get(symbol).map(|code| p * code.len() as f64))
            .sum()
    }

    /// `Σ 2^-len(code)`, at most one for any prefix-free code.
    pub fn kraft_sum(&self) -> f64 {
        self.codes
            .values()
            .map(|code| 2f64.powi(-(code.len() as i32)))
            .sum()
    }

    /// Whether no codeword is a proper prefix of another (or equal to it).
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&str> = self.codes.values().map(String::as_str).collect();
        // After sorting, a prefix sorts immediately before some word it
        // prefixes, so comparing neighbours is enough.
        codes.sort_unstable();
        codes.windows(2).all(|pair| !pair[1].starts_with(pair[0]))
    }

    pub fn encode<I>(&self, input: I) -> Result<String>
    where
        I: IntoIterator<Item = S>,
    {
        let mut bits = String::new();
        for symbol in input {
            let code = self
                .get(&symbol)
                .ok_or_else(|| Error::SymbolNotFound(format!("{symbol:?}")))?;
            bits.push_str(code);
        }
        Ok(bits)
    }
}
