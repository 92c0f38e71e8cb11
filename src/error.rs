use thiserror::Error;

/// Errors that can occur while building codes or encoding input.
#[derive(Error, Debug)]
pub enum Error {
    /// A distribution must contain at least one symbol.
    #[error("distribution has no symbols")]
    EmptyDistribution,

    /// The same symbol was given two probabilities.
    #[error("symbol {0} appears more than once in the distribution")]
    DuplicateSymbol(String),

    /// A probability was zero, negative or not finite where a logarithm of it
    /// (or of an interval derived from it) is required.
    #[error("invalid probability: {0}")]
    InvalidProbability(f64),

    /// The input contains a symbol the code or distribution does not know.
    #[error("symbol not found: {0}")]
    SymbolNotFound(String),

    /// Narrowing would leave an interval with `low >= high`.
    #[error("empty interval: [{low}, {high})")]
    EmptyInterval { low: String, high: String },

    /// The dictionary coder was given nothing to parse.
    #[error("malformed input: sequence is empty")]
    EmptyInput,

    /// Reading or writing a file failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl PartialEq for Error {
    fn eq(&self, other: &Self) -> bool {
        use Error::*;
        match (self, other) {
            (EmptyDistribution, EmptyDistribution) | (EmptyInput, EmptyInput) => true,
            (
                EmptyInterval { low, high },
                EmptyInterval {
                    low: other_low,
                    high: other_high,
                },
            ) => low == other_low && high == other_high,
            (DuplicateSymbol(a), DuplicateSymbol(b)) | (SymbolNotFound(a), SymbolNotFound(b)) => {
                a == b
            }
            (InvalidProbability(a), InvalidProbability(b)) => a.to_bits() == b.to_bits(),
            (Io(a), Io(b)) => a.kind() == b.kind(),
            _ => false,
        }
    }
}

/// A specialized Result type for coding operations.
pub type Result<T> = std::result::Result<T, Error>;
