use std::{io::Write, path::PathBuf};

use clap::Args;
use eyre::Result;
use symptoms::report::FrequencyReport;
use tracing::info;

use super::{check_limit, Session};

#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long, help = "The file to write the JSON report to")]
    pub output: PathBuf,

    /// The number of rows in each frequency table
    #[arg(short = 'n', long = "limit", default_value_t = 10)]
    pub n: usize,
}

pub fn run(session: &Session, args: ExportArgs) -> Result<()> {
    check_limit(args.n)?;

    let report = FrequencyReport::new(&session.index, args.n);

    let mut writer = std::io::BufWriter::new(std::fs::File::create(&args.output)?);
    serde_json::to_writer_pretty(&mut writer, &report)?;
    writeln!(writer)?;
    writer.flush()?;

    info!(path = %args.output.display(), "wrote report");
    Ok(())
}
