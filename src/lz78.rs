//! LZ78 dictionary coding.
//!
//! The input is split greedily into phrases, each the shortest word starting
//! at the current position that is not yet in the dictionary (or whatever is
//! left at the end of the input). A new phrase is emitted as the code of the
//! phrase one symbol shorter, followed by its last symbol, and is then added
//! to the dictionary under the next free number.
//!
//! All codes are written with the same number of bits, `ceil(log2(n))` for a
//! dictionary of `n` phrases including the empty one, so the width grows as
//! phrases are added. The very first phrase is always a single new symbol and
//! is emitted as that symbol alone: no code for the empty phrase precedes it,
//! unlike every later new phrase. Decoders must expect a bare symbol first.

use std::collections::HashMap;

use log::{debug, trace};

use crate::error::{Error, Result};

/// The result of coding one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lz78Output {
    /// Codes interleaved with literal symbols.
    pub bits: String,
    /// Every phrase in order of first appearance, with its code at the final
    /// width. The empty phrase is not listed.
    pub phrases: Vec<(String, String)>,
}

struct Dictionary {
    numbers: HashMap<String, usize>,
    order: Vec<String>,
}

impl Dictionary {
    fn new() -> Self {
        Self {
            numbers: HashMap::from([(String::new(), 0)]),
            order: Vec::new(),
        }
    }

    /// Number of phrases, counting the empty one.
    fn len(&self) -> usize {
        self.numbers.len()
    }

    fn contains(&self, phrase: &str) -> bool {
        self.numbers.contains_key(phrase)
    }

    fn insert(&mut self, phrase: &str) {
        let number = self.len();
        self.numbers.insert(phrase.to_string(), number);
        self.order.push(phrase.to_string());
    }

    /// `ceil(log2(len))`.
    fn width(&self) -> usize {
        self.len().next_power_of_two().trailing_zeros() as usize
    }

    fn code(&self, phrase: &str) -> Option<String> {
        let number = self.numbers.get(phrase)?;
        Some(format!("{number:0width$b}", width = self.width()))
    }
}

/// Code `input` with LZ78. Fails on empty input.
pub fn encode(input: &str) -> Result<Lz78Output> {
    if input.is_empty() {
        return Err(Error::EmptyInput);
    }

    // Byte offset of every symbol boundary, so phrases can be sliced out of
    // `input` directly.
    let boundaries: Vec<usize> = input
        .char_indices()
        .map(|(offset, _)| offset)
        .chain(std::iter::once(input.len()))
        .collect();
    let symbols = boundaries.len() - 1;

    let mut dictionary = Dictionary::new();
    let mut bits = String::new();
    let mut start = 0;

    while start < symbols {
        let mut end = start + 1;
        while end < symbols && dictionary.contains(&input[boundaries[start]..boundaries[end]]) {
            end += 1;
        }
        let word = &input[boundaries[start]..boundaries[end]];

        if start == 0 {
            bits.push_str(word);
            dictionary.insert(word);
        } else if !dictionary.contains(word) {
            let (prefix, last) = word.split_at(boundaries[end - 1] - boundaries[start]);
            let code = dictionary
                .code(prefix)
                .ok_or_else(|| Error::SymbolNotFound(prefix.to_string()))?;
            bits.push_str(&code);
            bits.push_str(last);
            dictionary.insert(word);
        } else {
            // Only the tail of the input can repeat a known phrase.
            let code = dictionary
                .code(word)
                .ok_or_else(|| Error::SymbolNotFound(word.to_string()))?;
            bits.push_str(&code);
        }
        trace!("phrase {word:?}, dictionary size {}", dictionary.len());

        start = end;
    }

    let mut phrases = Vec::with_capacity(dictionary.order.len());
    for phrase in &dictionary.order {
        if let Some(code) = dictionary.code(phrase) {
            phrases.push((phrase.clone(), code));
        }
    }

    debug!(
        "LZ78 coded {symbols} symbols into {} phrases, {} output symbols",
        phrases.len(),
        bits.chars().count()
    );
    Ok(Lz78Output { bits, phrases })
}

/// An input string with its LZ78 coding computed on first request and kept
/// until the input is replaced.
#[derive(Debug, Clone)]
pub struct Lz78Coder {
    input: String,
    output: Option<Lz78Output>,
}

impl Lz78Coder {
    pub fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: None,
        }
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn set_input(&mut self, input: impl Into<String>) {
        self.input = input.into();
        self.output = None;
    }

    pub fn output(&mut self) -> Result<&Lz78Output> {
        let output = match self.output.take() {
            Some(output) => output,
            None => encode(&self.input)?,
        };
        Ok(self.output.insert(output))
    }

    pub fn coded_string(&mut self) -> Result<&str> {
        Ok(&self.output()?.bits)
    }

    pub fn codes(&mut self) -> Result<&[(String, String)]> {
        Ok(&self.output()?.phrases)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::example;

    fn phrases(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|&(p, c)| (p.to_string(), c.to_string()))
            .collect()
    }

    #[test_log::test]
    fn encode_exercise_input() {
        let output = encode(example::LZ78_INPUT).unwrap();
        assert_eq!(output.bits, "110100000100010011011");
        assert_eq!(
            output.phrases,
            phrases(&[
                ("1", "001"),
                ("10", "010"),
                ("100", "011"),
                ("0", "100"),
                ("00", "101"),
                ("01", "110"),
                ("001", "111"),
            ])
        );
    }

    #[test]
    fn encode_single_symbol() {
        let output = encode("a").unwrap();
        assert_eq!(output.bits, "a");
        assert_eq!(output.phrases, phrases(&[("a", "1")]));
    }

    #[test]
    fn known_phrase_at_end_is_emitted_as_its_code() {
        let output = encode("aaaa").unwrap();
        assert_eq!(output.bits, "a1a01");
        assert_eq!(output.phrases, phrases(&[("a", "01"), ("aa", "10")]));
    }

    #[test]
    fn codes_widen_as_dictionary_grows() {
        let output = encode("abab").unwrap();
        assert_eq!(output.bits, "a0b01b");
        assert_eq!(
            output.phrases,
            phrases(&[("a", "01"), ("b", "10"), ("ab", "11")])
        );
    }

    #[test]
    fn encode_abracadabra() {
        let output = encode("abracadabra").unwrap();
        assert_eq!(output.bits, "a0b00r01c001d001b011a");
        assert_eq!(output.phrases.len(), 7);
        assert_eq!(output.phrases[6], ("ra".to_string(), "111".to_string()));
    }

    #[test]
    fn multibyte_symbols() {
        let output = encode("ééé").unwrap();
        assert_eq!(output.bits, "é1é");
        assert_eq!(output.phrases, phrases(&[("é", "01"), ("éé", "10")]));
    }

    #[test]
    fn empty_input_is_rejected() {
        assert_eq!(encode(""), Err(Error::EmptyInput));
    }

    #[test]
    fn dictionary_width() {
        let mut dictionary = Dictionary::new();
        assert_eq!(dictionary.width(), 0);
        dictionary.insert("a");
        assert_eq!(dictionary.width(), 1);
        dictionary.insert("b");
        assert_eq!(dictionary.width(), 2);
        dictionary.insert("c");
        assert_eq!(dictionary.width(), 2);
        dictionary.insert("d");
        assert_eq!(dictionary.width(), 3);
        assert_eq!(dictionary.code("a"), Some("001".to_string()));
        assert_eq!(dictionary.code("z"), None);
    }

    #[test]
    fn coder_caches_until_input_changes() {
        let mut coder = Lz78Coder::new("aaaa");
        assert_eq!(coder.coded_string().unwrap(), "a1a01");
        assert_eq!(coder.codes().unwrap().len(), 2);

        coder.set_input("abab");
        assert_eq!(coder.input(), "abab");
        assert_eq!(coder.coded_string().unwrap(), "a0b01b");
        assert_eq!(coder.codes().unwrap().len(), 3);
    }
}
