use super::{column_names, column_strings};
use crate::cleaning::*;
use crate::config::CsvConfig;
use crate::error::TabcleanError;
use anyhow::Result;
use polars::prelude::*;

#[test]
fn test_csv_round_trip_without_cleaning() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("people.csv");
    std::fs::write(&input, "name,age,city\nAda,36,London\nLinus,,Helsinki\nGrace,85,\n")?;

    let mut df = load_df(&input, "csv", &CsvConfig::default())?;
    assert_eq!(column_names(&df), vec!["name", "age", "city"]);
    assert_eq!(df.height(), 3);
    assert_eq!(df.column("age")?.null_count(), 1);

    let output = dir.path().join("out.csv");
    save_df(&mut df, &output)?;
    let reloaded = load_df(&output, "csv", &CsvConfig::default())?;

    assert!(reloaded.equals_missing(&df));
    assert_eq!(
        std::fs::read_to_string(&output)?,
        "name,age,city\nAda,36,London\nLinus,,Helsinki\nGrace,85,\n"
    );
    Ok(())
}

#[test]
fn test_csv_null_markers() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("markers.csv");
    std::fs::write(&input, "a,b\n1,NA\n2,x\nN/A,y\n")?;

    let df = load_df(&input, "csv", &CsvConfig::default())?;
    assert_eq!(df.column("a")?.null_count(), 1);
    assert_eq!(df.column("b")?.null_count(), 1);
    assert!(df.column("a")?.dtype().is_integer());
    Ok(())
}

#[test]
fn test_xlsx_round_trip_without_cleaning() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut df = df!(
        "id" => &[1i64, 2, 3],
        "price" => &[Some(9.5), None, Some(12.25)],
        "label" => &[Some("alpha"), Some("beta"), None],
        "active" => &[true, false, true]
    )?;

    let path = dir.path().join("stock.xlsx");
    save_df(&mut df, &path)?;
    let reloaded = load_df(&path, "xlsx", &CsvConfig::default())?;

    assert_eq!(column_names(&reloaded), vec!["id", "price", "label", "active"]);
    assert_eq!(reloaded.height(), 3);
    for name in ["id", "price", "label", "active"] {
        assert_eq!(column_strings(&reloaded, name), column_strings(&df, name), "column {name}");
    }
    Ok(())
}

#[test]
fn test_xls_extension_reads_workbook_content() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut df = df!("a" => &[1i64, 2])?;
    let xlsx = dir.path().join("book.xlsx");
    save_df(&mut df, &xlsx)?;

    // Workbook detection is content based, not name based.
    let renamed = dir.path().join("book.xls");
    std::fs::rename(&xlsx, &renamed)?;
    let reloaded = load_df(&renamed, "xls", &CsvConfig::default())?;
    assert_eq!(column_strings(&reloaded, "a"), column_strings(&df, "a"));
    Ok(())
}

#[test]
fn test_corrupt_workbook_is_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("broken.xlsx");
    std::fs::write(&path, b"definitely not a zip archive")?;

    let err = load_df(&path, "xlsx", &CsvConfig::default()).unwrap_err();
    assert!(matches!(err, TabcleanError::Parse(_)), "got {err}");
    Ok(())
}

#[test]
fn test_invalid_utf8_csv_is_parse_error() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("latin1.csv");
    std::fs::write(&path, b"name\n\xff\xfe\xfd\n")?;

    let err = load_df(&path, "csv", &CsvConfig::default()).unwrap_err();
    assert!(matches!(err, TabcleanError::Parse(_)), "got {err}");
    Ok(())
}

#[test]
fn test_missing_file_is_io_error() {
    let err = load_df(
        std::path::Path::new("/nonexistent/tabclean/input.csv"),
        "csv",
        &CsvConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, TabcleanError::Io(_)));
}

#[test]
fn test_output_extension() {
    assert_eq!(output_extension("csv"), "csv");
    assert_eq!(output_extension("CSV"), "csv");
    assert_eq!(output_extension("xlsx"), "xlsx");
    assert_eq!(output_extension("xls"), "xlsx");
}
