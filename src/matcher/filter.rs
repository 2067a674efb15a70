use std::fmt;

use itertools::Itertools;
use serde::Serialize;
use smol_str::SmolStr;

use crate::{
    error::{check_top_n, Result},
    record::Record,
};

use super::{query::KnownSymptoms, Query};

/// Something the user should know about how a query was interpreted.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub enum Note {
    NoSymptoms,
    UnknownSymptoms(Vec<SmolStr>),
    NoKnownSymptoms,
    NoMatchingRecords,
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Note::NoSymptoms => write!(f, "No symptoms entered."),
            Note::UnknownSymptoms(symptoms) => {
                write!(f, "Ignored unknown symptom(s): {}", symptoms.iter().join(", "))
            }
            Note::NoKnownSymptoms => {
                write!(f, "None of the entered symptoms appear in the dataset.")
            }
            Note::NoMatchingRecords => write!(f, "No records have all of those symptoms."),
        }
    }
}

#[derive(Serialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// How many records contain every known query symptom.
    pub matched_records: usize,
    /// The most frequent diagnoses among the matched records.
    pub suggestions: Vec<(SmolStr, usize)>,
    pub notes: Vec<Note>,
}

/// Find the records that have every known symptom in `query` and report the most frequent
/// diagnoses among them. Symptoms missing from `known` are ignored and reported in the notes.
/// `known` is usually the dataset's symptom columns, so a real symptom that no record has
/// yields [Note::NoMatchingRecords] rather than being called unknown.
pub fn filter_matching<K>(
    records: &[Record],
    known: &K,
    query: &Query,
    top_n: usize,
) -> Result<FilterOutcome>
where
    K: KnownSymptoms + ?Sized,
{
    check_top_n(top_n)?;

    let mut outcome = FilterOutcome::default();

    if query.is_empty() {
        outcome.notes.push(Note::NoSymptoms);
        return Ok(outcome);
    }

    let unknown = query.unknown_symptoms(known);
    if !unknown.is_empty() {
        outcome
            .notes
            .push(Note::UnknownSymptoms(unknown.into_iter().cloned().collect()));
    }

    let wanted = query.known_symptoms(known);
    if wanted.is_empty() {
        outcome.notes.push(Note::NoKnownSymptoms);
        return Ok(outcome);
    }

    let counts = records
        .iter()
        .filter(|r| wanted.iter().all(|s| r.symptoms().contains(*s)))
        .counts_by(|r| r.diagnosis());

    outcome.matched_records = counts.values().sum();
    if outcome.matched_records == 0 {
        outcome.notes.push(Note::NoMatchingRecords);
        return Ok(outcome);
    }

    outcome.suggestions = counts
        .into_iter()
        .sorted_by(|(a, acount), (b, bcount)| bcount.cmp(acount).then_with(|| a.cmp(b)))
        .take(top_n)
        .map(|(diagnosis, count)| (diagnosis.clone(), count))
        .collect();

    Ok(outcome)
}
