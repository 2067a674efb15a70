use std::collections::BTreeSet;

use serde::Serialize;
use smol_str::SmolStr;

use crate::{
    error::{check_top_n, Result},
    index::FrequencyIndex,
};

pub mod filter;
pub mod query;
pub mod similar;

pub use query::Query;

/// A diagnosis suggested for a query, with the evidence behind its score.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RankedSuggestion {
    pub diagnosis: SmolStr,
    pub score: f64,
    /// The query symptoms that have been seen with this diagnosis.
    pub matched_symptoms: BTreeSet<SmolStr>,
    /// The sum of co-occurrence counts over the matched symptoms.
    pub evidence_count: usize,
}

/// Rank diagnoses for `query` and return at most `top_n` of them.
///
/// Each diagnosis that shares at least one symptom with the query is scored as
///
/// ```text
/// sum(co_occurrence(s, d) / diagnosis_count(d) for s in matched) * (|matched| / |query|)
/// ```
///
/// The first factor measures how characteristic the matched symptoms are of the diagnosis and
/// the second how much of the query it explains. Unknown query symptoms never match but still
/// count towards `|query|`.
///
/// Results are ordered by descending score, then by descending diagnosis count, then by
/// diagnosis label. Scores are compared exactly.
pub fn suggest(
    index: &FrequencyIndex,
    query: &Query,
    top_n: usize,
) -> Result<Vec<RankedSuggestion>> {
    check_top_n(top_n)?;

    if query.is_empty() {
        return Ok(Vec::new());
    }

    let query_len = query.len() as f64;

    let mut scored = index
        .diagnosis_rows()
        .filter(|(_, diagnosis_count, _)| *diagnosis_count > 0)
        .filter_map(|(diagnosis, diagnosis_count, row)| {
            let mut characteristic = 0.0;
            let mut evidence_count = 0;
            let mut matched_symptoms = BTreeSet::new();

            // Query symptoms are visited in sorted order so the float sum is reproducible.
            for symptom in query.symptoms() {
                let count = row.get(symptom).copied().unwrap_or(0);
                if count > 0 {
                    characteristic += count as f64 / diagnosis_count as f64;
                    evidence_count += count;
                    matched_symptoms.insert(symptom.clone());
                }
            }

            if matched_symptoms.is_empty() {
                return None;
            }

            let coverage = matched_symptoms.len() as f64 / query_len;
            let suggestion = RankedSuggestion {
                diagnosis: diagnosis.clone(),
                score: characteristic * coverage,
                matched_symptoms,
                evidence_count,
            };

            Some((diagnosis_count, suggestion))
        })
        .collect::<Vec<_>>();

    scored.sort_by(|(a_count, a), (b_count, b)| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| b_count.cmp(a_count))
            .then_with(|| a.diagnosis.cmp(&b.diagnosis))
    });

    Ok(scored
        .into_iter()
        .take(top_n)
        .map(|(_, suggestion)| suggestion)
        .collect())
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{error::Error, index::build, record::Record};

    fn index() -> FrequencyIndex {
        build(&[
            Record::new(["fever", "cough"], "flu"),
            Record::new(["fever", "rash"], "measles"),
            Record::new(["fever", "cough"], "flu"),
        ])
    }

    #[test]
    fn flu_before_measles() {
        let results = suggest(&index(), &Query::parse("fever,cough"), 2).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].diagnosis, "flu");
        assert_eq!(results[0].score, 2.0);
        assert_eq!(
            results[0].matched_symptoms,
            BTreeSet::from([SmolStr::from("cough"), SmolStr::from("fever")])
        );
        assert_eq!(results[0].evidence_count, 4);

        assert_eq!(results[1].diagnosis, "measles");
        assert_eq!(results[1].score, 0.5);
        assert_eq!(
            results[1].matched_symptoms,
            BTreeSet::from([SmolStr::from("fever")])
        );
        assert_eq!(results[1].evidence_count, 1);
    }

    #[test]
    fn top_n_truncates() {
        let results = suggest(&index(), &Query::parse("fever,cough"), 1).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].diagnosis, "flu");
    }

    #[test]
    fn zero_top_n_is_invalid() {
        let err = suggest(&index(), &Query::parse("fever"), 0).unwrap_err();
        assert!(matches!(err, Error::InvalidArgument(_)));
    }

    #[test]
    fn empty_query() {
        let results = suggest(&index(), &Query::default(), 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn empty_index() {
        let results = suggest(&FrequencyIndex::default(), &Query::parse("fever"), 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn unknown_symptom_counts_towards_coverage() {
        let results = suggest(&index(), &Query::parse("fever, cough, unicorn_bite"), 3).unwrap();

        // flu: (2/2 + 2/2) * 2/3
        assert_eq!(results[0].diagnosis, "flu");
        assert_eq!(results[0].score, 2.0 * (2.0 / 3.0));
        // measles: (1/1) * 1/3
        assert_eq!(results[1].diagnosis, "measles");
        assert_eq!(results[1].score, 1.0 / 3.0);
        assert!(results
            .iter()
            .all(|r| !r.matched_symptoms.contains("unicorn_bite")));
    }

    #[test]
    fn only_unknown_symptoms() {
        let results = suggest(&index(), &Query::parse("unicorn_bite"), 3).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn ties_break_on_prevalence_then_label() {
        let index = build(&[
            Record::new(["fever"], "cold"),
            Record::new(["fever"], "cold"),
            Record::new(["fever"], "flu"),
            Record::new(["fever"], "ague"),
        ]);

        // Every diagnosis scores 1.0 for fever alone.
        let results = suggest(&index, &Query::parse("fever"), 3).unwrap();
        let order = results
            .iter()
            .map(|r| r.diagnosis.as_str())
            .collect::<Vec<_>>();
        assert_eq!(order, vec!["cold", "ague", "flu"]);
    }
}
