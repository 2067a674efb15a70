use std::collections::BTreeSet;

use itertools::Itertools;
use smol_str::SmolStr;

/// The label used for records whose diagnosis is blank.
pub const UNKNOWN_DIAGNOSIS: &str = "unknown";

/// One patient: a set of normalized symptom tokens and a diagnosis label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    symptoms: BTreeSet<SmolStr>,
    diagnosis: SmolStr,
}

impl Record {
    /// Create a record, normalizing every symptom and the diagnosis. Symptoms that are blank
    /// after normalization are dropped and duplicates collapse to one.
    pub fn new<I, S>(symptoms: I, diagnosis: &str) -> Record
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let symptoms = symptoms
            .into_iter()
            .filter_map(|s| normalize_token(s.as_ref()))
            .collect();

        Record {
            symptoms,
            diagnosis: normalize_label(diagnosis),
        }
    }

    pub fn symptoms(&self) -> &BTreeSet<SmolStr> {
        &self.symptoms
    }

    pub fn diagnosis(&self) -> &SmolStr {
        &self.diagnosis
    }

    /// Records without symptoms carry no signal and are left out of every count.
    pub fn is_empty(&self) -> bool {
        self.symptoms.is_empty()
    }
}

/// Normalize a symptom token: trimmed, lower-cased, with runs of internal whitespace replaced
/// by a single underscore. Returns `None` for a blank token.
pub fn normalize_token(token: &str) -> Option<SmolStr> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let joined = token.split_whitespace().join("_");
    Some(SmolStr::from(joined.to_lowercase()))
}

/// Normalize a diagnosis label. Blank labels become [UNKNOWN_DIAGNOSIS].
pub fn normalize_label(label: &str) -> SmolStr {
    let label = label.trim();
    if label.is_empty() {
        SmolStr::new_inline(UNKNOWN_DIAGNOSIS)
    } else {
        SmolStr::from(label.to_lowercase())
    }
}

/// Split comma-separated user input into normalized symptom tokens, skipping blanks.
pub fn parse_symptom_input(raw: &str) -> Vec<SmolStr> {
    raw.split(',').filter_map(normalize_token).collect()
}
