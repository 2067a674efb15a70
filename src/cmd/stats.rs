use clap::Args;
use eyre::Result;
use symptoms::report::{summarize, top_diagnoses, top_symptoms};

use super::{check_limit, Session};

#[derive(Args, Debug)]
pub struct StatsArgs {
    /// How many diagnoses and symptoms to list
    #[arg(short = 'n', long = "limit", default_value_t = 5)]
    n: usize,
}

pub fn run(session: &Session, args: StatsArgs) -> Result<()> {
    check_limit(args.n)?;

    let index = &session.index;
    let summary = summarize(index);

    println!("Records: {}", summary.total_records);
    println!("Distinct symptoms: {}", summary.distinct_symptoms);
    println!("Distinct diagnoses: {}", summary.distinct_diagnoses);
    println!(
        "Average number of symptoms per patient: {:.2}",
        summary.average_symptoms_per_record
    );

    println!("\nMost common diagnoses:");
    for (diagnosis, count) in top_diagnoses(index, args.n) {
        println!("  {diagnosis}: {count}");
    }

    println!("\nMost common symptoms:");
    for (symptom, count) in top_symptoms(index, args.n) {
        println!("  {symptom}: {count}");
    }

    Ok(())
}
