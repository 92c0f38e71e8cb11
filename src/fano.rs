use std::collections::BTreeMap;

use log::{debug, trace};

use crate::alphabet::{Distribution, Symbol};
use crate::code_table::CodeTable;
use crate::error::Result;
use crate::prefix::PrefixCodeBuilder;

/// Sorts the alphabet by ascending probability (then by symbol) and splits
/// it, level by level, into a left run that gets `1` and a right run that
/// gets `0`.
///
/// The split starts with a single symbol on the left and moves right only
/// while doing so strictly reduces `|left - right|`. On a tie the shorter
/// left run wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FanoBuilder;

/// The number of leading entries of `probabilities` that form the left run.
fn split_point(probabilities: &[f64]) -> usize {
    let total: f64 = probabilities.iter().sum();
    let imbalance = |left: f64| (left - (total - left)).abs();

    let mut split = 1;
    let mut left = probabilities[0];
    while split < probabilities.len() - 1 {
        let extended = left + probabilities[split];
        if imbalance(extended) < imbalance(left) {
            left = extended;
            split += 1;
        } else {
            break;
        }
    }
    split
}

impl PrefixCodeBuilder for FanoBuilder {
    fn build<S: Symbol>(&self, distribution: &Distribution<S>) -> Result<CodeTable<S>> {
        let mut entries: Vec<(S, f64)> = distribution.iter().map(|(&s, p)| (s, p)).collect();
        entries.sort_by(|a, b| a.1.total_cmp(&b.1).then_with(|| a.0.cmp(&b.0)));
        let probabilities: Vec<f64> = entries.iter().map(|&(_, p)| p).collect();

        let mut codes: BTreeMap<S, String> =
            entries.iter().map(|&(s, _)| (s, String::new())).collect();

        // Ranges of `entries` still to be split. Each symbol's bits depend
        // only on the ranges containing it, so the visiting order is free.
        let mut pending = vec![0..entries.len()];
        while let Some(range) = pending.pop() {
            if range.len() < 2 {
                continue;
            }
            let split = range.start + split_point(&probabilities[range.clone()]);
            trace!(
                "split {:?} into {:?} | {:?}",
                range,
                range.start..split,
                split..range.end
            );

            for (i, (symbol, _)) in entries[range.clone()].iter().enumerate() {
                let bit = if range.start + i < split { '1' } else { '0' };
                if let Some(code) = codes.get_mut(symbol) {
                    code.push(bit);
                }
            }
            pending.push(range.start..split);
            pending.push(split..range.end);
        }

        for code in codes.values_mut() {
            if code.is_empty() {
                // A lone symbol is never split.
                code.push('0');
            }
        }

        debug!("built Shannon-Fano code for {} symbols", codes.len());
        Ok(CodeTable::from_codes(codes))
    }
}
