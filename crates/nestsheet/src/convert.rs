//! File-level conversions between spreadsheets and JSON record sets
//!
//! Every conversion reads its whole source into memory, transforms it and
//! writes the destination in a single save. Output files are named after the
//! source's file stem with the opposite extension and land in the output
//! directory, which is created when missing.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use nestsheet_core::{Record, Workbook};
use nestsheet_json::{JsonReader, JsonWriteOptions, JsonWriter};
use nestsheet_schema::{read_records, resolve, write_records, AnalyzeOptions, MergeMode};

use crate::error::{ConvertError, ConvertResult};
use crate::options::{ConvertOptions, ExistingPolicy};
use crate::{lowercase_extension, WorkbookExt};

/// Which way a conversion runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// `.xlsx` source, `.json` output
    TabularToRecords,
    /// `.json` source, `.xlsx` output
    RecordsToTabular,
}

impl Direction {
    /// Pick the direction from a source file's extension
    pub fn from_path(path: &Path) -> ConvertResult<Self> {
        match lowercase_extension(path).as_deref() {
            Some("xlsx") => Ok(Direction::TabularToRecords),
            Some("json") => Ok(Direction::RecordsToTabular),
            _ => Err(ConvertError::UnsupportedInput(path.to_path_buf())),
        }
    }

    /// Extension of the files this direction writes
    pub fn output_extension(self) -> &'static str {
        match self {
            Direction::TabularToRecords => "json",
            Direction::RecordsToTabular => "xlsx",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::TabularToRecords => write!(f, "xlsx -> json"),
            Direction::RecordsToTabular => write!(f, "json -> xlsx"),
        }
    }
}

/// Outcome of [`convert_file`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversion {
    pub direction: Direction,
    /// Path of the file that was written
    pub output: PathBuf,
    /// Records in the written file, after any merge
    pub records: usize,
}

fn base_name(source: &Path) -> ConvertResult<String> {
    source
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| ConvertError::MissingFileName(source.to_path_buf()))
}

/// Read the active sheet of a spreadsheet as records
pub fn convert_tabular_to_records<P: AsRef<Path>>(source: P) -> ConvertResult<Vec<Record>> {
    let workbook = Workbook::open(source.as_ref())?;
    let sheet = workbook
        .active_worksheet()
        .ok_or(ConvertError::NoActiveSheet)?;
    Ok(read_records(sheet))
}

/// Write records as `{base_name}.json` in `output_dir` with default formatting
pub fn write_records_to_json<P: AsRef<Path>>(
    records: &[Record],
    output_dir: P,
    base_name: &str,
) -> ConvertResult<PathBuf> {
    write_records_to_json_with_options(records, output_dir, base_name, &JsonWriteOptions::default())
}

/// Write records as `{base_name}.json` in `output_dir`
pub fn write_records_to_json_with_options<P: AsRef<Path>>(
    records: &[Record],
    output_dir: P,
    base_name: &str,
    options: &JsonWriteOptions,
) -> ConvertResult<PathBuf> {
    let output_dir = output_dir.as_ref();
    fs::create_dir_all(output_dir)?;
    let target = output_dir.join(format!("{}.json", base_name));
    JsonWriter::write_file(records, &target, options)?;
    Ok(target)
}

/// Convert a spreadsheet into a JSON file named after it
pub fn convert_tabular_to_records_and_write_json<P, Q>(
    source: P,
    output_dir: Q,
) -> ConvertResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let records = convert_tabular_to_records(source)?;
    write_records_to_json(&records, output_dir, &base_name(source)?)
}

/// Convert a JSON record set into a spreadsheet named after it
///
/// An existing spreadsheet at the target is merged with, not replaced.
pub fn convert_records_to_tabular<P, Q>(source: P, output_dir: Q) -> ConvertResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    convert_records_to_tabular_with_options(source, output_dir, &ConvertOptions::default())
}

/// Convert a JSON record set into a spreadsheet with explicit options
pub fn convert_records_to_tabular_with_options<P, Q>(
    source: P,
    output_dir: Q,
    options: &ConvertOptions,
) -> ConvertResult<PathBuf>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (target, _) = records_to_tabular(source.as_ref(), output_dir.as_ref(), options)?;
    Ok(target)
}

fn records_to_tabular(
    source: &Path,
    output_dir: &Path,
    options: &ConvertOptions,
) -> ConvertResult<(PathBuf, usize)> {
    let records = JsonReader::read_file(source, &options.json_read)?;
    fs::create_dir_all(output_dir)?;
    let target = output_dir.join(format!("{}.xlsx", base_name(source)?));

    let mode = match options.existing {
        ExistingPolicy::MergeIfExists if target.exists() => {
            tracing::debug!(target = %target.display(), "merging with existing spreadsheet");
            MergeMode::Merge(convert_tabular_to_records(&target)?)
        }
        _ => MergeMode::Replace,
    };

    let written = write_records_to_tabular(records, &target, mode, options)?;
    Ok((target, written))
}

/// Resolve `mode` against `records` and save the result as a new spreadsheet
///
/// Returns the number of records written.
pub fn write_records_to_tabular<P: AsRef<Path>>(
    records: Vec<Record>,
    target: P,
    mode: MergeMode,
    options: &ConvertOptions,
) -> ConvertResult<usize> {
    let records = resolve(mode, records, options.merge_key.as_deref());
    let analyze = AnalyzeOptions {
        strict: options.strict_shapes,
    };

    let mut workbook = Workbook::new();
    let sheet = workbook
        .active_worksheet_mut()
        .ok_or(ConvertError::NoActiveSheet)?;
    write_records(&records, sheet, &analyze)?;
    workbook.save(target.as_ref())?;

    tracing::debug!(
        target = %target.as_ref().display(),
        records = records.len(),
        "wrote spreadsheet"
    );
    Ok(records.len())
}

/// Convert `source` into `output_dir`, choosing the direction by extension
pub fn convert_file<P, Q>(
    source: P,
    output_dir: Q,
    options: &ConvertOptions,
) -> ConvertResult<Conversion>
where
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let source = source.as_ref();
    let output_dir = output_dir.as_ref();
    let direction = Direction::from_path(source)?;
    tracing::info!(source = %source.display(), %direction, "converting");

    let (output, records) = match direction {
        Direction::TabularToRecords => {
            let records = convert_tabular_to_records(source)?;
            let output = write_records_to_json_with_options(
                &records,
                output_dir,
                &base_name(source)?,
                &options.json,
            )?;
            (output, records.len())
        }
        Direction::RecordsToTabular => records_to_tabular(source, output_dir, options)?,
    };

    Ok(Conversion {
        direction,
        output,
        records,
    })
}
