use std::collections::BTreeSet;

use smol_str::SmolStr;
use symptoms::{
    index::{build, build_parallel},
    suggest, FrequencyIndex, Query, Record,
};

fn scenario() -> Vec<Record> {
    vec![
        Record::new(["fever", "cough"], "flu"),
        Record::new(["fever", "rash"], "measles"),
        Record::new(["fever", "cough"], "flu"),
    ]
}

/// A larger set of records with overlapping symptoms and uneven diagnosis counts.
fn synthetic() -> Vec<Record> {
    let symptoms = [
        "fever",
        "cough",
        "fatigue",
        "headache",
        "muscle_pain",
        "nausea",
        "vomiting",
        "diarrhea",
        "skin_rash",
        "loss_smell",
        "loss_taste",
    ];
    let diagnoses = ["flu", "covid", "cold", "measles", "gastroenteritis", ""];

    (0..300usize)
        .map(|i| {
            let present = symptoms
                .iter()
                .enumerate()
                .filter(|(j, _)| (i * 7 + j * 3) % (2 + i % 5) == 0)
                .map(|(_, s)| *s);
            Record::new(present, diagnoses[i % diagnoses.len()])
        })
        .collect()
}

fn check_invariants(records: &[Record], index: &FrequencyIndex) {
    let counted = records.iter().filter(|r| !r.is_empty()).count();
    assert_eq!(index.total_records(), counted);
    assert_eq!(
        index.diagnoses().map(|(_, c)| c).sum::<usize>(),
        index.total_records()
    );

    for ((symptom, diagnosis), count) in index.co_occurrences() {
        assert!(count > 0);
        assert!(count <= index.symptom_count(symptom));
        assert!(count <= index.diagnosis_count(diagnosis));
    }
}

#[test]
fn scenario_counts() {
    let index = build(&scenario());

    assert_eq!(index.diagnosis_count("flu"), 2);
    assert_eq!(index.diagnosis_count("measles"), 1);
    assert_eq!(index.symptom_count("fever"), 3);
    assert_eq!(index.symptom_count("cough"), 2);
    assert_eq!(index.symptom_count("rash"), 1);
    assert_eq!(index.co_occurrence("fever", "flu"), 2);
    check_invariants(&scenario(), &index);
}

#[test]
fn scenario_suggestions() {
    let index = build(&scenario());
    let results = suggest(&index, &Query::new(["fever", "cough"]), 2).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].diagnosis, "flu");
    assert_eq!(results[0].score, 2.0);
    assert_eq!(
        results[0].matched_symptoms,
        BTreeSet::from([SmolStr::from("fever"), SmolStr::from("cough")])
    );
    assert_eq!(results[1].diagnosis, "measles");
    assert_eq!(results[1].score, 0.5);
    assert_eq!(
        results[1].matched_symptoms,
        BTreeSet::from([SmolStr::from("fever")])
    );
}

#[test]
fn unknown_token_only_widens_coverage_denominator() {
    let index = build(&scenario());
    let with_unknown = suggest(&index, &Query::parse("fever, cough, unicorn_bite"), 5).unwrap();
    let without = suggest(&index, &Query::parse("fever, cough"), 5).unwrap();

    assert_eq!(with_unknown.len(), without.len());
    for (a, b) in with_unknown.iter().zip(&without) {
        assert_eq!(a.diagnosis, b.diagnosis);
        assert_eq!(a.matched_symptoms, b.matched_symptoms);
        assert_eq!(a.evidence_count, b.evidence_count);
        // Coverage goes from |matched|/2 to |matched|/3.
        let characteristic = b.score * 2.0 / b.matched_symptoms.len() as f64;
        assert_eq!(
            a.score,
            characteristic * (a.matched_symptoms.len() as f64 / 3.0)
        );
    }
}

#[test]
fn invariants_hold_on_synthetic_data() {
    let records = synthetic();
    let index = build(&records);
    assert!(index.diagnosis_count("unknown") > 0);
    check_invariants(&records, &index);
}

#[test]
fn build_is_order_independent() {
    let records = synthetic();
    let expected = build(&records);

    let mut reversed = records.clone();
    reversed.reverse();
    assert_eq!(build(&reversed), expected);

    let mut rotated = records.clone();
    rotated.rotate_left(117);
    assert_eq!(build(&rotated), expected);

    let interleaved = records
        .iter()
        .step_by(2)
        .chain(records.iter().skip(1).step_by(2));
    assert_eq!(build(interleaved), expected);

    assert_eq!(build_parallel(&rotated), expected);
}

#[test]
fn suggestions_are_well_formed_and_repeatable() {
    let records = synthetic();
    let index = build(&records);

    let queries = [
        "fever",
        "fever, cough",
        "nausea, vomiting, diarrhea",
        "loss smell, Loss Taste, unicorn_bite",
        "skin_rash, headache, fatigue, muscle_pain",
    ];

    for raw in queries {
        let query = Query::parse(raw);
        let first = suggest(&index, &query, 4).unwrap();
        let second = suggest(&index, &query, 4).unwrap();
        assert_eq!(first, second);

        assert!(first.len() <= 4);
        assert!(first.iter().all(|r| !r.matched_symptoms.is_empty()));
        assert!(first.iter().all(|r| r.score > 0.0));

        for pair in first.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(a.score >= b.score);
            if a.score == b.score {
                let (ac, bc) = (
                    index.diagnosis_count(&a.diagnosis),
                    index.diagnosis_count(&b.diagnosis),
                );
                assert!(ac > bc || (ac == bc && a.diagnosis < b.diagnosis));
            }
        }
    }
}

#[test]
fn empty_query_and_empty_index() {
    let index = build(&synthetic());
    assert!(suggest(&index, &Query::parse(" , ,"), 3).unwrap().is_empty());

    let empty = build(&[]);
    assert_eq!(empty.total_records(), 0);
    assert!(suggest(&empty, &Query::parse("fever"), 3).unwrap().is_empty());
}
