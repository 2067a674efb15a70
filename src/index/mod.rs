use ahash::HashMap;
use smol_str::SmolStr;

pub mod build;

pub use build::{build, build_parallel, IndexBuilder};

/// Symptom, diagnosis and co-occurrence tallies over a set of records.
///
/// The index is immutable once built. Reloading a dataset means building a new one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyIndex {
    symptom_count: HashMap<SmolStr, usize>,
    diagnosis_count: HashMap<SmolStr, usize>,
    /// Keyed by diagnosis, then symptom, so a diagnosis row can be scanned without touching
    /// the rest of the table.
    co_occurrence: HashMap<SmolStr, HashMap<SmolStr, usize>>,
    total_records: usize,
}

impl FrequencyIndex {
    /// The number of records that were counted. Records with no symptoms are not included.
    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    /// The number of records containing `symptom`, or 0 if it was never seen.
    pub fn symptom_count(&self, symptom: &str) -> usize {
        self.symptom_count.get(symptom).copied().unwrap_or(0)
    }

    /// The number of records labeled `diagnosis`, or 0 if it was never seen.
    pub fn diagnosis_count(&self, diagnosis: &str) -> usize {
        self.diagnosis_count.get(diagnosis).copied().unwrap_or(0)
    }

    /// The number of records where `symptom` appears with `diagnosis`.
    pub fn co_occurrence(&self, symptom: &str, diagnosis: &str) -> usize {
        self.co_occurrence
            .get(diagnosis)
            .and_then(|row| row.get(symptom))
            .copied()
            .unwrap_or(0)
    }

    pub fn contains_symptom(&self, symptom: &str) -> bool {
        self.symptom_count.contains_key(symptom)
    }

    /// Every symptom with its record count, in no particular order.
    pub fn symptoms(&self) -> impl Iterator<Item = (&SmolStr, usize)> + '_ {
        self.symptom_count.iter().map(|(s, &c)| (s, c))
    }

    /// Every diagnosis with its record count, in no particular order.
    pub fn diagnoses(&self) -> impl Iterator<Item = (&SmolStr, usize)> + '_ {
        self.diagnosis_count.iter().map(|(d, &c)| (d, c))
    }

    /// Every `(symptom, diagnosis)` pair with a nonzero count, in no particular order.
    pub fn co_occurrences(&self) -> impl Iterator<Item = ((&SmolStr, &SmolStr), usize)> + '_ {
        self.co_occurrence.iter().flat_map(|(diagnosis, row)| {
            row.iter()
                .map(move |(symptom, &count)| ((symptom, diagnosis), count))
        })
    }

    /// Each diagnosis with its record count and its symptom co-occurrence row.
    pub(crate) fn diagnosis_rows(
        &self,
    ) -> impl Iterator<Item = (&SmolStr, usize, &HashMap<SmolStr, usize>)> + '_ {
        self.co_occurrence
            .iter()
            .map(|(diagnosis, row)| (diagnosis, self.diagnosis_count(diagnosis), row))
    }

    /// The total number of symptom occurrences across all counted records.
    pub fn symptom_occurrences(&self) -> usize {
        self.symptom_count.values().sum()
    }
}
