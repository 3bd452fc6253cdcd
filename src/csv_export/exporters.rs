use csv::{Writer, WriterBuilder};
use log::{debug, error, info, warn};
use std::io::Write;
use std::path::Path;

use crate::csv_export::paths::OutputNamer;
use crate::csv_export::types::{
    BatchReport, ConvertOptions, FileReport, SheetFailure, SheetReport,
};
use crate::error::{ConvertError, Result};
use crate::excel::{CalamineOpener, OpenWorkbook, RowCursor, SheetSource};

/// Converts workbooks into one CSV file per sheet.
///
/// Failures are isolated to the smallest unit they affect: a bad row is
/// skipped, a bad sheet is skipped, and a workbook that cannot be opened is
/// skipped. Nothing is retried and the batch always runs to the end.
pub struct Converter<O = CalamineOpener> {
    opener: O,
    options: ConvertOptions,
}

impl Converter<CalamineOpener> {
    pub fn new(options: ConvertOptions) -> Self {
        Self::with_opener(CalamineOpener, options)
    }
}

impl<O: OpenWorkbook> Converter<O> {
    pub fn with_opener(opener: O, options: ConvertOptions) -> Self {
        Self { opener, options }
    }

    /// Convert each input in order.
    pub fn convert_all<I, P>(&self, inputs: I) -> BatchReport
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut report = BatchReport::default();

        for input in inputs {
            let input = input.as_ref();
            match self.convert_file(input) {
                Ok(file_report) => report.files.push(file_report),
                Err(err) => {
                    error!("{}", err);
                    report.failed_inputs.push((input.to_path_buf(), err));
                }
            }
        }

        report
    }

    /// Convert the selected sheets of one workbook.
    ///
    /// Returns an error only when the input has no file name or the workbook
    /// cannot be opened; sheet failures are collected in the report.
    pub fn convert_file(&self, input: &Path) -> Result<FileReport> {
        debug!("path: {}", input.display());

        let namer = OutputNamer::new(input, self.options.sanitize_names)?;

        let mut book = self
            .opener
            .open(input)
            .map_err(|source| ConvertError::Open {
                path: input.to_path_buf(),
                source,
            })?;

        let sheet_names = book.sheet_names();
        let selection = &self.options.selection;

        for ordinal in selection.out_of_range(sheet_names.len()) {
            warn!(
                "{}: sheet {} requested but the workbook has {} sheets",
                input.display(),
                ordinal,
                sheet_names.len()
            );
        }

        let mut report = FileReport {
            input: input.to_path_buf(),
            sheets: Vec::new(),
            failed_sheets: Vec::new(),
        };

        for ordinal in selection.select(sheet_names.len()) {
            let name = &sheet_names[ordinal];
            debug!("sheet {}: {}", ordinal, name);

            match convert_sheet(&mut book, &namer, ordinal, name) {
                Ok(sheet_report) => report.sheets.push(sheet_report),
                Err(err) => {
                    error!("{}", err);
                    report.failed_sheets.push(SheetFailure {
                        ordinal,
                        name: name.clone(),
                        error: err,
                    });
                }
            }
        }

        Ok(report)
    }
}

fn convert_sheet<B: SheetSource>(
    book: &mut B,
    namer: &OutputNamer,
    ordinal: usize,
    name: &str,
) -> Result<SheetReport> {
    let output = namer.path(ordinal, name);

    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(&output)
        .map_err(|source| ConvertError::CreateOutput {
            path: output.clone(),
            source,
        })?;

    let rows = book.rows(name).map_err(|source| ConvertError::OpenRows {
        sheet: name.to_string(),
        source,
    })?;

    let (rows_written, rows_skipped) = write_rows(&mut writer, rows, name, &output)?;

    info!("{}", output.display());

    Ok(SheetReport {
        ordinal,
        name: name.to_string(),
        output,
        rows_written,
        rows_skipped,
    })
}

/// Write every row the cursor yields, skipping rows that fail to read or
/// write, then flush. Returns `(written, skipped)`.
fn write_rows<W: Write>(
    writer: &mut Writer<W>,
    rows: RowCursor<'_>,
    sheet: &str,
    output: &Path,
) -> Result<(usize, usize)> {
    let mut rows_written = 0;
    let mut rows_skipped = 0;

    // Row numbers in messages are 1-based, as shown in a spreadsheet
    for (row_idx, row) in rows.enumerate() {
        let written = row
            .map_err(|source| ConvertError::ReadRow {
                sheet: sheet.to_string(),
                row: row_idx + 1,
                source,
            })
            .and_then(|cells| {
                writer
                    .write_record(&cells)
                    .map_err(|source| ConvertError::WriteRow {
                        path: output.to_path_buf(),
                        row: row_idx + 1,
                        source,
                    })
            });

        match written {
            Ok(()) => rows_written += 1,
            Err(err) => {
                warn!("{}", err);
                rows_skipped += 1;
            }
        }
    }

    writer.flush().map_err(|source| ConvertError::Flush {
        path: output.to_path_buf(),
        source,
    })?;

    Ok((rows_written, rows_skipped))
}
