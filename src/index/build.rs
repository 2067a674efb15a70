use rayon::prelude::*;
use tracing::debug;

use crate::record::Record;

use super::FrequencyIndex;

/// Accumulates counts for a [FrequencyIndex]. Builders for disjoint sets of records can be
/// combined with [IndexBuilder::merge], which only adds counts together, so the order in which
/// records or shards are combined never changes the result.
#[derive(Debug, Default)]
pub struct IndexBuilder {
    index: FrequencyIndex,
}

impl IndexBuilder {
    pub fn new() -> IndexBuilder {
        IndexBuilder::default()
    }

    /// Count one record. Records with no symptoms are skipped entirely.
    pub fn add(&mut self, record: &Record) {
        if record.is_empty() {
            return;
        }

        let index = &mut self.index;
        let diagnosis = record.diagnosis();

        index.total_records += 1;
        *index.diagnosis_count.entry(diagnosis.clone()).or_insert(0) += 1;

        let row = index.co_occurrence.entry(diagnosis.clone()).or_default();
        for symptom in record.symptoms() {
            *index.symptom_count.entry(symptom.clone()).or_insert(0) += 1;
            *row.entry(symptom.clone()).or_insert(0) += 1;
        }
    }

    /// Combine the counts of two builders.
    pub fn merge(mut self, other: IndexBuilder) -> IndexBuilder {
        let index = &mut self.index;
        let other = other.index;

        index.total_records += other.total_records;

        for (symptom, count) in other.symptom_count {
            *index.symptom_count.entry(symptom).or_insert(0) += count;
        }

        for (diagnosis, count) in other.diagnosis_count {
            *index.diagnosis_count.entry(diagnosis).or_insert(0) += count;
        }

        for (diagnosis, other_row) in other.co_occurrence {
            let row = index.co_occurrence.entry(diagnosis).or_default();
            for (symptom, count) in other_row {
                *row.entry(symptom).or_insert(0) += count;
            }
        }

        self
    }

    pub fn finish(self) -> FrequencyIndex {
        let index = self.index;
        debug!(
            records = index.total_records,
            symptoms = index.symptom_count.len(),
            diagnoses = index.diagnosis_count.len(),
            "built frequency index"
        );
        index
    }
}

/// Build an index from a sequence of records. An empty sequence gives an empty index.
pub fn build<'a, I>(records: I) -> FrequencyIndex
where
    I: IntoIterator<Item = &'a Record>,
{
    let mut builder = IndexBuilder::new();
    for record in records {
        builder.add(record);
    }

    builder.finish()
}

/// Build an index by counting shards of `records` on the rayon thread pool and merging the
/// partial counts. The result is identical to [build].
pub fn build_parallel(records: &[Record]) -> FrequencyIndex {
    records
        .par_iter()
        .fold(IndexBuilder::new, |mut builder, record| {
            builder.add(record);
            builder
        })
        .reduce(IndexBuilder::new, IndexBuilder::merge)
        .finish()
}
