use crate::alphabet::{Distribution, Symbol};
use crate::code_table::CodeTable;
use crate::error::Result;

/// Builds a prefix-free code for a probability distribution.
pub trait PrefixCodeBuilder {
    /// Build a code table for `distribution`.
    ///
    /// The table has one codeword per symbol and no codeword is a prefix of
    /// another. A single-symbol distribution gets the one-bit code `"0"`.
    fn build<S: Symbol>(&self, distribution: &Distribution<S>) -> Result<CodeTable<S>>;

    /// The expected codeword length of `table` under `distribution`. For a
    /// valid construction this is never below the entropy of `distribution`.
    fn average_length<S: Symbol>(
        &self,
        table: &CodeTable<S>,
        distribution: &Distribution<S>,
    ) -> f64 {
        table.average_length(distribution)
    }
}

/// A distribution paired with a prefix-code builder. The code table and its
/// average length are computed on first request and kept until the
/// distribution is replaced.
#[derive(Debug, Clone)]
pub struct PrefixCoder<B: PrefixCodeBuilder, S: Symbol> {
    builder: B,
    distribution: Distribution<S>,
    table: Option<CodeTable<S>>,
    average_length: Option<f64>,
}

impl<B: PrefixCodeBuilder, S: Symbol> PrefixCoder<B, S> {
    pub fn new(builder: B, distribution: Distribution<S>) -> Self {
        Self {
            builder,
            distribution,
            table: None,
            average_length: None,
        }
    }

    pub fn distribution(&self) -> &Distribution<S> {
        &self.distribution
    }

    pub fn set_distribution(&mut self, distribution: Distribution<S>) {
        self.distribution = distribution;
        self.table = None;
        self.average_length = None;
    }

    pub fn code_table(&mut self) -> Result<&CodeTable<S>> {
        let table = match self.table.take() {
            Some(table) => table,
            None => self.builder.build(&self.distribution)?,
        };
        Ok(self.table.insert(table))
    }

    pub fn average_length(&mut self) -> Result<f64> {
        if let Some(length) = self.average_length {
            return Ok(length);
        }
        let table = match self.table.take() {
            Some(table) => table,
            None => self.builder.build(&self.distribution)?,
        };
        let length = self.builder.average_length(&table, &self.distribution);
        self.table = Some(table);
        self.average_length = Some(length);
        Ok(length)
    }
}
