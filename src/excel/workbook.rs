use calamine::{Data, Range, Reader, Sheets, open_workbook_auto};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::error::BoxError;
use crate::excel::{OpenWorkbook, Row, RowCursor, SheetSource, cell_text};

/// Opens any format calamine understands (xlsx, xlsm, xlsb, xls, ods).
#[derive(Debug, Clone, Copy, Default)]
pub struct CalamineOpener;

impl OpenWorkbook for CalamineOpener {
    type Book = Workbook;

    fn open(&self, path: &Path) -> Result<Workbook, BoxError> {
        Workbook::open(path)
    }
}

pub struct Workbook {
    inner: Sheets<BufReader<File>>,
}

impl Workbook {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, BoxError> {
        let inner = open_workbook_auto(path)?;
        Ok(Self { inner })
    }
}

impl SheetSource for Workbook {
    fn sheet_names(&self) -> Vec<String> {
        self.inner.sheet_names().to_vec()
    }

    fn rows(&mut self, sheet: &str) -> Result<RowCursor<'_>, BoxError> {
        let range = self.inner.worksheet_range(sheet)?;
        Ok(Box::new(SheetRows::new(range)))
    }
}

/// Row cursor over a loaded sheet range.
///
/// Rows are anchored at A1: rows and columns in front of the first used cell
/// are produced as empty text, so a value keeps its position in the output.
pub struct SheetRows {
    range: Range<Data>,
    next_row: u32,
    last_row: Option<u32>,
    width: u32,
}

impl SheetRows {
    pub fn new(range: Range<Data>) -> Self {
        let (last_row, width) = match range.end() {
            Some((row, col)) => (Some(row), col + 1),
            None => (None, 0),
        };

        Self {
            range,
            next_row: 0,
            last_row,
            width,
        }
    }
}

impl Iterator for SheetRows {
    type Item = Result<Row, BoxError>;

    fn next(&mut self) -> Option<Self::Item> {
        let last_row = self.last_row?;
        if self.next_row > last_row {
            return None;
        }

        let row_idx = self.next_row;
        self.next_row += 1;

        let row = (0..self.width)
            .map(|col_idx| {
                self.range
                    .get_value((row_idx, col_idx))
                    .map(cell_text)
                    .unwrap_or_default()
            })
            .collect();

        Some(Ok(row))
    }
}
