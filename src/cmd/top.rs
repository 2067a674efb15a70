use clap::{Args, ValueEnum};
use eyre::Result;
use symptoms::report::{top_co_occurring_pairs, top_diagnoses, top_symptoms};

use super::{check_limit, Session};

#[derive(ValueEnum, Clone, Copy, Debug)]
pub enum Table {
    Symptoms,
    Diagnoses,
    Pairs,
}

#[derive(Args, Debug)]
pub struct TopArgs {
    /// The table to show
    #[arg(value_enum)]
    table: Table,

    /// The number of rows to show
    #[arg(short = 'n', long = "limit", default_value_t = 10)]
    n: usize,
}

pub fn run(session: &Session, args: TopArgs) -> Result<()> {
    check_limit(args.n)?;

    let index = &session.index;

    match args.table {
        Table::Symptoms => top_symptoms(index, args.n)
            .into_iter()
            .for_each(|(symptom, count)| println!("{symptom} - {count}")),
        Table::Diagnoses => top_diagnoses(index, args.n)
            .into_iter()
            .for_each(|(diagnosis, count)| println!("{diagnosis} - {count}")),
        Table::Pairs => top_co_occurring_pairs(index, args.n)
            .into_iter()
            .for_each(|((symptom, diagnosis), count)| {
                println!("{symptom} + {diagnosis} - {count}")
            }),
    }

    Ok(())
}
