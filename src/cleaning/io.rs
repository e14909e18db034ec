use super::excel;
use super::validation::extension_of;
use crate::config::CsvConfig;
use crate::error::{Result, TabcleanError};
use polars::prelude::*;
use std::path::Path;

/// Extension the cleaned artifact is written with.
///
/// Workbooks are always written as Office Open XML, so a legacy `xls` input
/// yields an `xlsx` artifact.
pub fn output_extension(input_ext: &str) -> &'static str {
    if input_ext.eq_ignore_ascii_case("csv") {
        "csv"
    } else {
        "xlsx"
    }
}

/// Load a staged upload.
///
/// `csv` parses comma-separated text with a header row; every other
/// extension is read as a workbook, first sheet, header row.
pub fn load_df(path: &Path, ext: &str, csv: &CsvConfig) -> Result<DataFrame> {
    if ext.eq_ignore_ascii_case("csv") {
        load_csv(path, csv)
    } else {
        excel::read_first_sheet(path)
    }
}

fn load_csv(path: &Path, csv: &CsvConfig) -> Result<DataFrame> {
    let file = std::fs::File::open(path)?;
    let null_values = NullValues::AllColumns(
        csv.null_markers
            .iter()
            .map(|marker| PlSmallStr::from(marker.as_str()))
            .collect(),
    );

    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(csv.infer_schema_length))
        .map_parse_options(|opts| opts.with_null_values(Some(null_values.clone())))
        .into_reader_with_file_handle(file)
        .finish()
        .map_err(|e| TabcleanError::Parse(format!("Failed to read CSV {}: {e}", path.display())))
}

/// Write a dataset to `path`, format chosen by the path's extension.
pub fn save_df(df: &mut DataFrame, path: &Path) -> Result<()> {
    let ext = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(extension_of)
        .unwrap_or_default();

    if ext == "csv" {
        let mut file = std::fs::File::create(path)?;
        CsvWriter::new(&mut file)
            .include_header(true)
            .finish(df)
            .map_err(|e| {
                TabcleanError::DataProcessing(format!(
                    "Failed to write CSV {}: {e}",
                    path.display()
                ))
            })?;
    } else {
        excel::write_first_sheet(df, path)?;
    }

    Ok(())
}
