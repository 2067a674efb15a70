use clap::Args;
use eyre::Result;
use symptoms::{
    matcher::filter::{filter_matching, Note},
    Query,
};

use super::Session;

#[derive(Args, Debug)]
pub struct FilterArgs {
    /// Symptoms separated by commas, e.g. "fever, cough"
    pub symptoms: String,

    /// The maximum number of diagnoses to list
    #[arg(short = 'n', long = "limit", default_value_t = 3)]
    pub n: usize,
}

pub fn run(session: &Session, args: FilterArgs) -> Result<()> {
    let query = Query::parse(&args.symptoms);
    let outcome = filter_matching(&session.records, &session.symptoms, &query, args.n)?;

    for note in &outcome.notes {
        println!("NOTE: {note}");
        if let Note::UnknownSymptoms(unknown) = note {
            super::suggest::print_unknown(&session.index, unknown);
        }
    }

    if outcome.matched_records > 0 {
        println!("Matched records: {}", outcome.matched_records);
        println!("Most frequent diagnoses among matches:");
        for (diagnosis, count) in outcome.suggestions {
            println!("  {diagnosis}: {count}");
        }
    }

    Ok(())
}
