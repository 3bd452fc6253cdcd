mod cell;
mod workbook;

use std::path::Path;

use crate::error::BoxError;

pub use cell::cell_text;
pub use workbook::CalamineOpener;

/// One row of cell display text, in column order.
pub type Row = Vec<String>;

/// Lazily yields the rows of one sheet, top to bottom. Dropping it releases the sheet.
pub type RowCursor<'a> = Box<dyn Iterator<Item = Result<Row, BoxError>> + 'a>;

/// Opens workbook files by path.
pub trait OpenWorkbook {
    type Book: SheetSource;

    fn open(&self, path: &Path) -> Result<Self::Book, BoxError>;
}

/// Read access to the sheets of an opened workbook.
pub trait SheetSource {
    /// Sheet names in workbook order; a sheet's ordinal is its position here.
    fn sheet_names(&self) -> Vec<String>;

    fn rows(&mut self, sheet: &str) -> Result<RowCursor<'_>, BoxError>;
}
