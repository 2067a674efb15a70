//! Loading a symptom/diagnosis CSV into normalized [Record]s.

use std::{collections::BTreeSet, io::Read, path::Path};

use eyre::{eyre, Result, WrapErr};
use flate2::read::GzDecoder;
use itertools::Itertools;
use smol_str::SmolStr;
use tracing::{debug, info};

use crate::record::{normalize_token, parse_symptom_input, Record};

/// How symptoms are laid out in the file.
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    /// One column per symptom. A symptom is present when its cell is a number greater than the
    /// threshold.
    Wide {
        /// The symptom columns. When `None`, every column other than the diagnosis and `exclude`
        /// whose cells are all blank, 0 or 1 is taken as a symptom column.
        symptoms: Option<Vec<SmolStr>>,
        exclude: Vec<SmolStr>,
    },
    /// A single column holding a comma-separated list of symptoms.
    List { column: SmolStr },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOptions {
    pub diagnosis_column: SmolStr,
    pub layout: Layout,
    /// Wide layout only. Cells must be strictly greater than this to count as present.
    pub threshold: f64,
}

impl Default for DatasetOptions {
    fn default() -> Self {
        DatasetOptions {
            diagnosis_column: SmolStr::new_inline("diagnosis"),
            layout: Layout::Wide {
                symptoms: None,
                exclude: Vec::new(),
            },
            threshold: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    /// Rows that had no symptoms present and were left out.
    pub dropped: usize,
    /// Every symptom the dataset can express: the symptom columns in the wide layout, or every
    /// symptom listed in the list layout. Includes symptoms that are never present.
    pub symptoms: BTreeSet<SmolStr>,
}

fn find_column(headers: &csv::StringRecord, name: &str) -> Result<usize> {
    let wanted = normalize_token(name).unwrap_or_default();
    headers
        .iter()
        .position(|h| normalize_token(h).as_ref() == Some(&wanted))
        .ok_or_else(|| eyre!("Column {name} not found in dataset header"))
}

/// A column looks like a symptom flag when it has at least one value and every value is 0 or 1.
fn is_binary_column(rows: &[csv::StringRecord], idx: usize) -> bool {
    let mut seen = false;
    for cell in rows.iter().filter_map(|row| row.get(idx)) {
        if cell.is_empty() {
            continue;
        }

        match cell.parse::<f64>() {
            Ok(value) if value == 0.0 || value == 1.0 => seen = true,
            _ => return false,
        }
    }

    seen
}

/// Resolve the (column index, symptom token) pairs of a wide layout file.
fn wide_columns(
    headers: &csv::StringRecord,
    rows: &[csv::StringRecord],
    diagnosis_idx: usize,
    symptoms: Option<&[SmolStr]>,
    exclude: &[SmolStr],
) -> Result<Vec<(usize, SmolStr)>> {
    if let Some(symptoms) = symptoms {
        return symptoms
            .iter()
            .map(|name| {
                let idx = find_column(headers, name)?;
                let token = normalize_token(name).unwrap_or_default();
                Ok::<_, eyre::Report>((idx, token))
            })
            .collect();
    }

    let exclude = exclude
        .iter()
        .filter_map(|c| normalize_token(c))
        .collect::<Vec<_>>();

    let columns = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != diagnosis_idx)
        .filter_map(|(i, h)| normalize_token(h).map(|token| (i, token)))
        .filter(|(_, token)| !exclude.contains(token))
        .filter(|(i, _)| is_binary_column(rows, *i))
        .collect::<Vec<_>>();

    Ok(columns)
}

/// Read records from CSV data with a header row.
pub fn read_records<R: Read>(reader: R, options: &DatasetOptions) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = reader.headers()?.clone();
    let rows = reader.records().collect::<Result<Vec<_>, _>>()?;

    let diagnosis_idx = find_column(&headers, &options.diagnosis_column)?;

    let (symptom_columns, list_idx) = match &options.layout {
        Layout::Wide { symptoms, exclude } => {
            let columns = wide_columns(
                &headers,
                &rows,
                diagnosis_idx,
                symptoms.as_deref(),
                exclude,
            )?;
            debug!(
                columns = %columns.iter().map(|(_, token)| token).join(", "),
                "using wide layout"
            );
            (columns, None)
        }
        Layout::List { column } => (Vec::new(), Some(find_column(&headers, column)?)),
    };

    let mut dataset = Dataset {
        symptoms: symptom_columns
            .iter()
            .map(|(_, token)| token.clone())
            .collect(),
        ..Default::default()
    };

    for line in &rows {
        let diagnosis = line.get(diagnosis_idx).unwrap_or_default();

        let record = match list_idx {
            Some(idx) => {
                let listed = parse_symptom_input(line.get(idx).unwrap_or_default());
                dataset.symptoms.extend(listed.iter().cloned());
                Record::new(listed, diagnosis)
            }
            None => {
                let present = symptom_columns
                    .iter()
                    .filter(|(idx, _)| {
                        line.get(*idx)
                            .and_then(|cell| cell.parse::<f64>().ok())
                            .map(|value| value > options.threshold)
                            .unwrap_or(false)
                    })
                    .map(|(_, token)| token);
                Record::new(present, diagnosis)
            }
        };

        if record.is_empty() {
            dataset.dropped += 1;
        } else {
            dataset.records.push(record);
        }
    }

    info!(
        records = dataset.records.len(),
        dropped = dataset.dropped,
        symptoms = dataset.symptoms.len(),
        "loaded dataset"
    );

    Ok(dataset)
}

/// Read records from a CSV file. Files ending in `.gz` are decompressed.
pub fn load_records(path: &Path, options: &DatasetOptions) -> Result<Dataset> {
    let file = std::fs::File::open(path)
        .wrap_err_with(|| format!("Failed to open dataset {}", path.display()))?;

    let compressed = path.extension().map(|e| e == "gz").unwrap_or(false);
    let reader: Box<dyn Read> = if compressed {
        Box::new(GzDecoder::new(std::io::BufReader::new(file)))
    } else {
        Box::new(std::io::BufReader::new(file))
    };

    read_records(reader, options).wrap_err_with(|| format!("Failed to read {}", path.display()))
}
