mod export;
mod filter;
mod stats;
mod suggest;
mod top;

use std::{collections::BTreeSet, path::PathBuf};

use clap::{Parser, Subcommand};
use eyre::{eyre, Result};
use smol_str::SmolStr;
use symptoms::{
    dataset::{load_records, DatasetOptions, Layout},
    index::build_parallel,
    FrequencyIndex, Record,
};

#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Args {
    #[arg(
        short,
        long,
        env = "SYMPTOMS_DATASET",
        default_value = "synthetic_medical_symptoms_and_diagnosis_dataset.csv",
        help = "The CSV dataset to load. Files ending in .gz are decompressed"
    )]
    pub dataset: PathBuf,

    /// The column holding the diagnosis label
    #[arg(long, env = "SYMPTOMS_DIAGNOSIS_COLUMN", default_value = "diagnosis")]
    pub diagnosis_column: String,

    /// Read symptoms from this comma-separated list column instead of one column per symptom
    #[arg(long)]
    pub symptoms_column: Option<String>,

    /// A symptom column. Repeat for each one. When none are given, every column holding only
    /// 0 and 1 values is used
    #[arg(short = 's', long = "symptom")]
    pub symptoms: Vec<String>,

    /// Columns that are not symptoms even though they hold only 0 and 1 values
    #[arg(short = 'x', long = "exclude")]
    pub exclude: Vec<String>,

    /// A symptom cell must be greater than this value to count as present
    #[arg(short, long, default_value_t = 0.0)]
    pub threshold: f64,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Show dataset statistics and the most common diagnoses and symptoms
    Stats(stats::StatsArgs),
    /// Show a top-N frequency table
    Top(top::TopArgs),
    /// Suggest likely diagnoses for a set of symptoms
    Suggest(suggest::SuggestArgs),
    /// Show the most common diagnoses among records having all of the given symptoms
    Filter(filter::FilterArgs),
    /// Write the summary and frequency tables to a JSON file
    Export(export::ExportArgs),
}

/// The records of the loaded dataset and the index built from them.
pub struct Session {
    pub records: Vec<Record>,
    /// Every symptom the dataset can express, including ones no record has.
    pub symptoms: BTreeSet<SmolStr>,
    pub index: FrequencyIndex,
}

impl Session {
    fn load(args: &Args) -> Result<Session> {
        let layout = match &args.symptoms_column {
            Some(column) => Layout::List {
                column: column.as_str().into(),
            },
            None => Layout::Wide {
                symptoms: (!args.symptoms.is_empty()).then(|| {
                    args.symptoms
                        .iter()
                        .map(|c| SmolStr::from(c.as_str()))
                        .collect()
                }),
                exclude: args.exclude.iter().map(|c| SmolStr::from(c.as_str())).collect(),
            },
        };

        let options = DatasetOptions {
            diagnosis_column: args.diagnosis_column.as_str().into(),
            layout,
            threshold: args.threshold,
        };

        let dataset = load_records(&args.dataset, &options)?;
        let index = build_parallel(&dataset.records);

        Ok(Session {
            records: dataset.records,
            symptoms: dataset.symptoms,
            index,
        })
    }
}

/// Reject a row limit of zero.
pub(crate) fn check_limit(n: usize) -> Result<()> {
    if n == 0 {
        return Err(eyre!("The row limit must be at least 1"));
    }

    Ok(())
}

pub fn run(args: Args) -> Result<()> {
    let session = Session::load(&args)?;

    match args.command {
        Command::Stats(cmd_args) => stats::run(&session, cmd_args),
        Command::Top(cmd_args) => top::run(&session, cmd_args),
        Command::Suggest(cmd_args) => suggest::run(&session, cmd_args),
        Command::Filter(cmd_args) => filter::run(&session, cmd_args),
        Command::Export(cmd_args) => export::run(&session, cmd_args),
    }
}
