//! Read-only top-N tables and summary statistics over a [FrequencyIndex].

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use crate::index::FrequencyIndex;

/// A co-occurring `(symptom, diagnosis)` pair.
pub type Pair = (SmolStr, SmolStr);

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total_records: usize,
    pub distinct_symptoms: usize,
    pub distinct_diagnoses: usize,
    pub average_symptoms_per_record: f64,
}

/// Everything the `export` command writes out.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct FrequencyReport {
    pub summary: DatasetSummary,
    pub top_symptoms: Vec<(SmolStr, usize)>,
    pub top_diagnoses: Vec<(SmolStr, usize)>,
    pub top_pairs: Vec<(Pair, usize)>,
}

impl FrequencyReport {
    pub fn new(index: &FrequencyIndex, n: usize) -> FrequencyReport {
        FrequencyReport {
            summary: summarize(index),
            top_symptoms: top_symptoms(index, n),
            top_diagnoses: top_diagnoses(index, n),
            top_pairs: top_co_occurring_pairs(index, n),
        }
    }
}

pub fn summarize(index: &FrequencyIndex) -> DatasetSummary {
    let average_symptoms_per_record = if index.is_empty() {
        0.0
    } else {
        index.symptom_occurrences() as f64 / index.total_records() as f64
    };

    DatasetSummary {
        total_records: index.total_records(),
        distinct_symptoms: index.symptoms().count(),
        distinct_diagnoses: index.diagnoses().count(),
        average_symptoms_per_record,
    }
}

/// Sort by descending count, then ascending key, and keep the first `n`.
fn top<K: Ord>(entries: impl Iterator<Item = (K, usize)>, n: usize) -> Vec<(K, usize)> {
    entries
        .sorted_by(|(akey, acount), (bkey, bcount)| {
            bcount.cmp(acount).then_with(|| akey.cmp(bkey))
        })
        .take(n)
        .collect()
}

pub fn top_symptoms(index: &FrequencyIndex, n: usize) -> Vec<(SmolStr, usize)> {
    top(index.symptoms().map(|(s, c)| (s.clone(), c)), n)
}

pub fn top_diagnoses(index: &FrequencyIndex, n: usize) -> Vec<(SmolStr, usize)> {
    top(index.diagnoses().map(|(d, c)| (d.clone(), c)), n)
}

/// The most frequent `(symptom, diagnosis)` pairs. Ties are ordered by symptom, then diagnosis.
pub fn top_co_occurring_pairs(index: &FrequencyIndex, n: usize) -> Vec<(Pair, usize)> {
    top(
        index
            .co_occurrences()
            .map(|((s, d), c)| ((s.clone(), d.clone()), c)),
        n,
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{index::build, record::Record};

    fn index() -> FrequencyIndex {
        build(&[
            Record::new(["fever", "cough"], "flu"),
            Record::new(["fever", "rash"], "measles"),
            Record::new(["fever", "cough"], "flu"),
        ])
    }

    fn owned(entries: &[(&str, usize)]) -> Vec<(SmolStr, usize)> {
        entries
            .iter()
            .map(|(k, c)| (SmolStr::from(*k), *c))
            .collect()
    }

    #[test]
    fn symptoms() {
        assert_eq!(
            top_symptoms(&index(), 10),
            owned(&[("fever", 3), ("cough", 2), ("rash", 1)])
        );
        assert_eq!(top_symptoms(&index(), 1), owned(&[("fever", 3)]));
    }

    #[test]
    fn diagnoses() {
        assert_eq!(
            top_diagnoses(&index(), 5),
            owned(&[("flu", 2), ("measles", 1)])
        );
    }

    #[test]
    fn pairs_break_ties_by_key() {
        let pairs = top_co_occurring_pairs(&index(), 3);
        let pairs = pairs
            .iter()
            .map(|((s, d), c)| (s.as_str(), d.as_str(), *c))
            .collect::<Vec<_>>();

        assert_eq!(
            pairs,
            vec![("cough", "flu", 2), ("fever", "flu", 2), ("fever", "measles", 1)]
        );
    }

    #[test]
    fn summary() {
        let summary = summarize(&index());
        assert_eq!(summary.total_records, 3);
        assert_eq!(summary.distinct_symptoms, 3);
        assert_eq!(summary.distinct_diagnoses, 2);
        assert_eq!(summary.average_symptoms_per_record, 2.0);
    }

    #[test]
    fn empty_index() {
        let index = FrequencyIndex::default();
        assert_eq!(summarize(&index).average_symptoms_per_record, 0.0);
        assert!(top_symptoms(&index, 5).is_empty());
        assert!(top_co_occurring_pairs(&index, 5).is_empty());
        assert!(top_diagnoses(&index, 0).is_empty());
    }
}
