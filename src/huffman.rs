use std::collections::BTreeMap;

use log::{debug, trace};

use crate::alphabet::{Distribution, Symbol};
use crate::code_table::CodeTable;
use crate::error::Result;
use crate::prefix::PrefixCodeBuilder;

/// Repeatedly merges the two least probable groups of symbols, prepending a
/// bit to the code of every symbol in each of them.
///
/// Groups are ordered by probability, then by label (the concatenation of
/// the symbols merged into them). Of the two groups merged, the more probable
/// one gets `0`; on equal probability the lexicographically smaller label
/// gets `0`.
#[derive(Debug, Clone, Copy, Default)]
pub struct HuffmanBuilder;

struct Group<S> {
    label: Vec<S>,
    probability: f64,
}

fn sort_groups<S: Symbol>(groups: &mut [Group<S>]) {
    groups.sort_by(|a, b| {
        a.probability
            .total_cmp(&b.probability)
            .then_with(|| a.label.cmp(&b.label))
    });
}

impl PrefixCodeBuilder for HuffmanBuilder {
    fn build<S: Symbol>(&self, distribution: &Distribution<S>) -> Result<CodeTable<S>> {
        let mut groups: Vec<Group<S>> = distribution
            .iter()
            .map(|(&symbol, probability)| Group {
                label: vec![symbol],
                probability,
            })
            .collect();
        sort_groups(&mut groups);

        // Bits are appended here and reversed at the end, so the bit of the
        // latest merge ends up first.
        let mut reversed: BTreeMap<S, String> = BTreeMap::new();

        while groups.len() > 1 {
            let second = groups.remove(1);
            let first = groups.remove(0);

            let first_gets_zero = first.probability > second.probability
                || (first.probability == second.probability && first.label < second.label);
            let (first_bit, second_bit) = if first_gets_zero { ('0', '1') } else { ('1', '0') };

            for symbol in &first.label {
                reversed.entry(*symbol).or_default().push(first_bit);
            }
            for symbol in &second.label {
                reversed.entry(*symbol).or_default().push(second_bit);
            }
            trace!(
                "merged {:?} ({}) with {:?} ({})",
                first.label, first_bit, second.label, second_bit
            );

            let mut label = first.label;
            label.extend(second.label);
            groups.push(Group {
                label,
                probability: first.probability + second.probability,
            });
            sort_groups(&mut groups);
        }

        let codes: BTreeMap<S, String> = distribution
            .symbols()
            .map(|symbol| {
                let code = match reversed.get(symbol) {
                    Some(bits) => bits.chars().rev().collect(),
                    // Only a lone symbol never takes part in a merge.
                    None => "0".to_string(),
                };
                (*symbol, code)
            })
            .collect();

        debug!("built Huffman code for {} symbols", codes.len());
        Ok(CodeTable::from_codes(codes))
    }
}
