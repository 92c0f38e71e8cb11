//! Classical lossless entropy coders: Huffman and Shannon-Fano prefix codes,
//! arithmetic coding and LZ78 dictionary coding, along with the Shannon
//! entropy they are measured against.
//!
//! ```
//! use entropy_coding::{Distribution, HuffmanBuilder, PrefixCodeBuilder};
//!
//! let distribution = Distribution::new([('a', 0.5), ('b', 0.25), ('c', 0.25)])?;
//! let table = HuffmanBuilder.build(&distribution)?;
//! assert_eq!(table.get(&'a'), Some("0"));
//! assert_eq!(table.average_length(&distribution), distribution.entropy()?);
//! # Ok::<(), entropy_coding::Error>(())
//! ```

pub mod alphabet;
pub mod arithmetic;
pub mod code_table;
pub mod compressor;
pub mod entropy;
pub mod error;
pub mod example;
pub mod fano;
pub mod huffman;
pub mod interval;
pub mod lz78;
pub mod prefix;

pub use alphabet::{Distribution, Symbol};
pub use arithmetic::{ArithmeticCoder, ArithmeticEncoder};
pub use code_table::CodeTable;
pub use entropy::entropy;
pub use error::{Error, Result};
pub use fano::FanoBuilder;
pub use huffman::HuffmanBuilder;
pub use interval::Interval;
pub use lz78::{Lz78Coder, Lz78Output};
pub use prefix::{PrefixCodeBuilder, PrefixCoder};
