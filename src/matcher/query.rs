use std::collections::BTreeSet;

use smol_str::SmolStr;

use crate::{
    index::FrequencyIndex,
    record::{normalize_token, parse_symptom_input},
};

/// The set of symptoms a query is resolved against.
pub trait KnownSymptoms {
    fn knows(&self, symptom: &str) -> bool;
}

/// Symptoms that occur in at least one counted record.
impl KnownSymptoms for FrequencyIndex {
    fn knows(&self, symptom: &str) -> bool {
        self.contains_symptom(symptom)
    }
}

/// An explicit vocabulary, such as the symptom columns of a dataset.
impl KnownSymptoms for BTreeSet<SmolStr> {
    fn knows(&self, symptom: &str) -> bool {
        self.contains(symptom)
    }
}

/// A set of normalized symptom tokens to match against an index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Query {
    symptoms: BTreeSet<SmolStr>,
}

impl Query {
    /// Build a query from raw tokens. Tokens are normalized the same way records are, blank
    /// tokens are dropped and duplicates collapse to one.
    pub fn new<I, S>(symptoms: I) -> Query
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Query {
            symptoms: symptoms
                .into_iter()
                .filter_map(|s| normalize_token(s.as_ref()))
                .collect(),
        }
    }

    /// Parse comma-separated input such as `"fever, cough"`.
    pub fn parse(raw: &str) -> Query {
        Query {
            symptoms: parse_symptom_input(raw).into_iter().collect(),
        }
    }

    pub fn symptoms(&self) -> &BTreeSet<SmolStr> {
        &self.symptoms
    }

    pub fn len(&self) -> usize {
        self.symptoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }

    /// The query symptoms that `known` does not contain.
    pub fn unknown_symptoms<'a, K>(&'a self, known: &K) -> Vec<&'a SmolStr>
    where
        K: KnownSymptoms + ?Sized,
    {
        self.symptoms.iter().filter(|s| !known.knows(s)).collect()
    }

    /// The query symptoms that `known` contains.
    pub fn known_symptoms<'a, K>(&'a self, known: &K) -> Vec<&'a SmolStr>
    where
        K: KnownSymptoms + ?Sized,
    {
        self.symptoms.iter().filter(|s| known.knows(s)).collect()
    }
}
