use clap::Args;
use eyre::Result;
use itertools::Itertools;
use smol_str::SmolStr;
use symptoms::{
    matcher::{similar::similar_symptoms, suggest},
    FrequencyIndex, Query,
};

use super::Session;

#[derive(Args, Debug)]
pub struct SuggestArgs {
    /// Symptoms separated by commas, e.g. "fever, cough"
    pub symptoms: String,

    /// The maximum number of diagnoses to suggest
    #[arg(short = 'n', long = "limit", default_value_t = 3)]
    pub n: usize,

    /// Print the suggestions as JSON
    #[arg(long)]
    pub json: bool,
}

/// Tell the user about symptoms the dataset has never seen, with close matches if there are any.
pub(super) fn print_unknown<'a>(
    index: &FrequencyIndex,
    unknown: impl IntoIterator<Item = &'a SmolStr>,
) {
    for symptom in unknown {
        let similar = similar_symptoms(index, symptom, 3);
        if similar.is_empty() {
            eprintln!("Unknown symptom {symptom}");
        } else {
            eprintln!(
                "Unknown symptom {symptom}, did you mean: {}",
                similar.iter().map(|(s, _)| s).join(", ")
            );
        }
    }
}

pub fn run(session: &Session, args: SuggestArgs) -> Result<()> {
    let index = &session.index;
    let query = Query::parse(&args.symptoms);

    let start_time = std::time::Instant::now();
    let results = suggest(index, &query, args.n)?;
    let duration = start_time.elapsed();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_unknown(index, query.unknown_symptoms(index));
    println!("Scored in {}us", duration.as_micros());

    if results.is_empty() {
        println!("No matching diagnoses");
        return Ok(());
    }

    println!("Likely diagnoses:");
    for result in results {
        println!(
            "  {} ({:.3}) - matched {} - evidence {}",
            result.diagnosis,
            result.score,
            result.matched_symptoms.iter().join(", "),
            result.evidence_count
        );
    }

    Ok(())
}
