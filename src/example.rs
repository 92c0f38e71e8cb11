use crate::alphabet::Distribution;

/// Letter frequencies of English text, in percent.
const ENGLISH_LETTER_FREQUENCIES: [(char, f64); 26] = [
    ('a', 8.167),
    ('b', 1.492),
    ('c', 2.782),
    ('d', 4.253),
    ('e', 12.702),
    ('f', 2.228),
    ('g', 2.015),
    ('h', 6.094),
    ('i', 6.966),
    ('j', 0.153),
    ('k', 0.772),
    ('l', 4.025),
    ('m', 2.406),
    ('n', 6.749),
    ('o', 7.507),
    ('p', 1.929),
    ('q', 0.095),
    ('r', 5.987),
    ('s', 6.327),
    ('t', 9.056),
    ('u', 2.758),
    ('v', 0.978),
    ('w', 2.360),
    ('x', 0.150),
    ('y', 1.974),
    ('z', 0.074),
];

pub const LZ78_INPUT: &str = "11010000001001";

/// The arithmetic coding exercise input, coded with [`four_letters`].
pub const ARITHMETIC_INPUT: &str = "acbaa";

/// An eight-letter distribution whose probabilities are all dyadic
/// fractions, so sums are exact.
pub fn textbook() -> Distribution<char> {
    Distribution {
        probabilities: [
            ('a', 1.0 / 64.0),
            ('b', 1.0 / 32.0),
            ('c', 3.0 / 64.0),
            ('d', 1.0 / 2.0),
            ('e', 3.0 / 32.0),
            ('f', 3.0 / 16.0),
            ('g', 1.0 / 16.0),
            ('h', 1.0 / 16.0),
        ]
        .into_iter()
        .collect(),
    }
}

pub fn four_letters() -> Distribution<char> {
    Distribution {
        probabilities: [('a', 0.41), ('b', 0.23), ('c', 0.1), ('d', 0.26)]
            .into_iter()
            .collect(),
    }
}

pub fn english_letters() -> Distribution<char> {
    let total: f64 = ENGLISH_LETTER_FREQUENCIES.iter().map(|&(_, f)| f).sum();
    Distribution {
        probabilities: ENGLISH_LETTER_FREQUENCIES
            .iter()
            .map(|&(letter, frequency)| (letter, frequency / total))
            .collect(),
    }
}
