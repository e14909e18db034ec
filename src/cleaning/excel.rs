//! Workbook reading (calamine) and writing (rust_xlsxwriter).
//!
//! Cells are mapped onto one dtype per column: all-numeric columns become
//! `Int64` when every value is integral and `Float64` otherwise, all-boolean
//! columns become `Boolean`, anything else is rendered as `String`. Empty and
//! error cells are null.

use crate::error::{Result, TabcleanError};
use calamine::{Data, DataType as _, Range, Reader as _, open_workbook_auto_from_rs};
use polars::prelude::*;
use rust_xlsxwriter::{Workbook, Worksheet};
use std::collections::HashSet;
use std::io::Cursor;
use std::path::Path;

// Integral floats beyond this no longer round-trip through i64 exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

pub fn read_first_sheet(path: &Path) -> Result<DataFrame> {
    let bytes = std::fs::read(path)?;
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes)).map_err(|e| {
        TabcleanError::Parse(format!("Failed to open workbook {}: {e}", path.display()))
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| {
            TabcleanError::Parse(format!("Workbook {} has no worksheets", path.display()))
        })?
        .map_err(|e| {
            TabcleanError::Parse(format!("Failed to read first sheet of {}: {e}", path.display()))
        })?;

    range_to_df(&range)
}

pub fn range_to_df(range: &Range<Data>) -> Result<DataFrame> {
    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        return Ok(DataFrame::empty());
    };
    let body: Vec<&[Data]> = rows.collect();

    let columns = header_names(header)
        .into_iter()
        .enumerate()
        .map(|(idx, name)| {
            let cells: Vec<Option<&Data>> = body.iter().map(|row| row.get(idx)).collect();
            build_column(&name, &cells)
        })
        .collect::<Vec<_>>();

    Ok(DataFrame::new(columns)?)
}

/// Blank headers become `Unnamed: <idx>`; repeats get a `_duplicated_<n>` suffix.
fn header_names(header: &[Data]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = 0usize;

    header
        .iter()
        .enumerate()
        .map(|(idx, cell)| {
            let base = render_cell(cell).unwrap_or_else(|| format!("Unnamed: {idx}"));
            let name = if seen.contains(&base) {
                let renamed = format!("{base}_duplicated_{duplicates}");
                duplicates += 1;
                renamed
            } else {
                base
            };
            seen.insert(name.clone());
            name
        })
        .collect()
}

fn is_blank(cell: &Data) -> bool {
    match cell {
        Data::Empty | Data::Error(_) => true,
        Data::String(s) => s.is_empty(),
        _ => false,
    }
}

fn as_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Int(i) => Some(*i as f64),
        Data::Float(f) => Some(*f),
        _ => None,
    }
}

fn render_cell(cell: &Data) -> Option<String> {
    if is_blank(cell) {
        return None;
    }
    let rendered = match cell {
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => f.to_string(),
        Data::Bool(b) => b.to_string(),
        other => match other.as_datetime() {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            None => other.to_string(),
        },
    };
    Some(rendered)
}

fn build_column(name: &str, cells: &[Option<&Data>]) -> Column {
    let present: Vec<&Data> = cells
        .iter()
        .flatten()
        .copied()
        .filter(|cell| !is_blank(cell))
        .collect();

    let numeric = !present.is_empty()
        && present
            .iter()
            .all(|cell| matches!(cell, Data::Int(_) | Data::Float(_)));
    let boolean = !present.is_empty() && present.iter().all(|cell| matches!(cell, Data::Bool(_)));

    let series = if numeric {
        let values: Vec<Option<f64>> = cells.iter().map(|cell| cell.and_then(as_number)).collect();
        let integral = values
            .iter()
            .flatten()
            .all(|v| v.fract() == 0.0 && v.abs() <= MAX_EXACT_INT);
        if integral {
            let ints: Vec<Option<i64>> = values.iter().map(|v| v.map(|v| v as i64)).collect();
            Series::new(name.into(), ints)
        } else {
            Series::new(name.into(), values)
        }
    } else if boolean {
        let values: Vec<Option<bool>> = cells
            .iter()
            .map(|cell| match cell {
                Some(Data::Bool(b)) => Some(*b),
                _ => None,
            })
            .collect();
        Series::new(name.into(), values)
    } else {
        let values: Vec<Option<String>> = cells
            .iter()
            .map(|cell| cell.and_then(render_cell))
            .collect();
        Series::new(name.into(), values)
    };

    Column::from(series)
}

pub fn write_first_sheet(df: &DataFrame, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();

    for (idx, column) in df.get_columns().iter().enumerate() {
        let col_num = u16::try_from(idx).map_err(|_| {
            TabcleanError::DataProcessing(format!("Too many columns for a worksheet: {}", df.width()))
        })?;
        sheet.write_string(0, col_num, column.name().as_str())?;
        write_cells(sheet, col_num, column.as_materialized_series())?;
    }

    workbook.save(path)?;
    Ok(())
}

fn row_num(idx: usize) -> Result<u32> {
    u32::try_from(idx + 1)
        .map_err(|_| TabcleanError::DataProcessing("Too many rows for a worksheet".to_owned()))
}

fn write_cells(sheet: &mut Worksheet, col: u16, series: &Series) -> Result<()> {
    let dtype = series.dtype();

    if dtype.is_bool() {
        for (idx, value) in series.bool()?.into_iter().enumerate() {
            if let Some(b) = value {
                sheet.write_boolean(row_num(idx)?, col, b)?;
            }
        }
    } else if dtype.is_integer() || dtype.is_float() {
        let floats = series.cast(&DataType::Float64)?;
        for (idx, value) in floats.f64()?.into_iter().enumerate() {
            if let Some(v) = value
                && v.is_finite()
            {
                sheet.write_number(row_num(idx)?, col, v)?;
            }
        }
    } else {
        let strings = series.cast(&DataType::String)?;
        for (idx, value) in strings.str()?.into_iter().enumerate() {
            if let Some(s) = value {
                sheet.write_string(row_num(idx)?, col, s)?;
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range_from(rows: Vec<Vec<Data>>) -> Range<Data> {
        let height = rows.len() as u32;
        let width = rows.iter().map(Vec::len).max().unwrap_or(0) as u32;
        let mut range = Range::new((0, 0), (height - 1, width - 1));
        for (r, row) in rows.into_iter().enumerate() {
            for (c, cell) in row.into_iter().enumerate() {
                range.set_value((r as u32, c as u32), cell);
            }
        }
        range
    }

    #[test]
    fn test_dtype_mapping() {
        let range = range_from(vec![
            vec![
                Data::String("id".to_owned()),
                Data::String("score".to_owned()),
                Data::String("ok".to_owned()),
                Data::String("label".to_owned()),
            ],
            vec![Data::Float(1.0), Data::Float(2.5), Data::Bool(true), Data::String("a".to_owned())],
            vec![Data::Float(2.0), Data::Empty, Data::Bool(false), Data::Int(7)],
        ]);

        let df = range_to_df(&range).unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.column("id").unwrap().dtype(), &DataType::Int64);
        assert_eq!(df.column("score").unwrap().dtype(), &DataType::Float64);
        assert_eq!(df.column("score").unwrap().null_count(), 1);
        assert_eq!(df.column("ok").unwrap().dtype(), &DataType::Boolean);
        let labels = df.column("label").unwrap().as_materialized_series().clone();
        assert_eq!(labels.str().unwrap().get(1), Some("7"));
    }

    #[test]
    fn test_header_names_fill_and_dedupe() {
        let names = header_names(&[
            Data::String("a".to_owned()),
            Data::Empty,
            Data::String("a".to_owned()),
        ]);
        assert_eq!(names, vec!["a", "Unnamed: 1", "a_duplicated_0"]);
    }
}
