use anyhow::Result;
use rust_xlsxwriter::Workbook;
use std::fs;
use std::path::{Path, PathBuf};

use sheet2csv::csv_export::{ConvertOptions, Converter, SheetSelection};
use sheet2csv::error::ConvertError;

fn write_book(dir: &Path) -> Result<PathBuf> {
    let path = dir.join("book.xlsx");
    let mut workbook = Workbook::new();

    let sheet = workbook.add_worksheet().set_name("Sheet1")?;
    sheet.write_string(0, 0, "a")?;
    sheet.write_string(0, 1, "b")?;
    sheet.write_string(1, 0, "c")?;
    sheet.write_string(1, 1, "d,e")?;

    let sheet = workbook.add_worksheet().set_name("Sheet2")?;
    sheet.write_string(0, 0, "name")?;
    sheet.write_string(0, 1, "qty")?;
    sheet.write_string(1, 0, "say \"hi\"")?;
    sheet.write_number(1, 1, 42)?;
    sheet.write_string(2, 0, "line\nbreak")?;
    sheet.write_number(2, 1, 3.5)?;

    workbook.save(&path)?;
    Ok(path)
}

fn read_records(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut records = Vec::new();
    for record in reader.records() {
        records.push(record?.iter().map(str::to_string).collect());
    }
    Ok(records)
}

#[test]
fn test_every_sheet_gets_a_file() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_book(dir.path())?;

    let report = Converter::new(ConvertOptions::default()).convert_all([&input]);

    assert!(!report.has_failures());
    let outputs: Vec<_> = report.outputs().cloned().collect();
    assert_eq!(
        outputs,
        vec![
            dir.path().join("book_0_Sheet1.csv"),
            dir.path().join("book_1_Sheet2.csv"),
        ]
    );

    let content = fs::read_to_string(dir.path().join("book_0_Sheet1.csv"))?;
    assert_eq!(content, "a,b\nc,\"d,e\"\n");
    Ok(())
}

#[test]
fn test_selection_restricts_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_book(dir.path())?;

    let options = ConvertOptions {
        selection: SheetSelection::from_ordinals([1, 4]),
        ..ConvertOptions::default()
    };
    let report = Converter::new(options).convert_all([&input]);

    assert!(!report.has_failures());
    assert!(!dir.path().join("book_0_Sheet1.csv").exists());
    assert!(dir.path().join("book_1_Sheet2.csv").exists());
    assert_eq!(report.outputs().count(), 1);
    Ok(())
}

#[test]
fn test_csv_reads_back_as_sheet_text() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_book(dir.path())?;

    Converter::new(ConvertOptions::default()).convert_file(&input)?;

    let records = read_records(&dir.path().join("book_1_Sheet2.csv"))?;
    assert_eq!(
        records,
        vec![
            vec!["name", "qty"],
            vec!["say \"hi\"", "42"],
            vec!["line\nbreak", "3.5"],
        ]
    );
    Ok(())
}

#[test]
fn test_values_keep_their_cell_position() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = dir.path().join("offset.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet().set_name("Data")?;
    sheet.write_string(1, 1, "b2")?;
    sheet.write_boolean(2, 2, true)?;
    workbook.add_worksheet().set_name("Empty")?;
    workbook.save(&input)?;

    let report = Converter::new(ConvertOptions::default()).convert_file(&input)?;
    assert_eq!(report.sheets.len(), 2);

    let content = fs::read_to_string(dir.path().join("offset_0_Data.csv"))?;
    assert_eq!(content, ",,\n,b2,\n,,TRUE\n");

    let empty = fs::read_to_string(dir.path().join("offset_1_Empty.csv"))?;
    assert!(empty.is_empty());
    Ok(())
}

#[test]
fn test_rerun_gives_identical_output() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let input = write_book(dir.path())?;
    let output = dir.path().join("book_1_Sheet2.csv");
    let converter = Converter::new(ConvertOptions::default());

    converter.convert_file(&input)?;
    let first = fs::read(&output)?;
    converter.convert_file(&input)?;
    let second = fs::read(&output)?;

    assert_eq!(first, second);
    Ok(())
}

#[test]
fn test_unreadable_workbook_is_skipped() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let broken = dir.path().join("notes.xlsx");
    fs::write(&broken, "this is not a workbook")?;
    let input = write_book(dir.path())?;

    let report = Converter::new(ConvertOptions::default()).convert_all([&broken, &input]);

    assert_eq!(report.failed_inputs.len(), 1);
    assert!(matches!(report.failed_inputs[0].1, ConvertError::Open { .. }));
    assert_eq!(report.outputs().count(), 2);
    assert!(!dir.path().join("notes_0_Sheet1.csv").exists());
    Ok(())
}
