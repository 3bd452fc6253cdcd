use std::collections::BTreeSet;
use std::path::PathBuf;

use crate::error::ConvertError;

/// Which sheets of a workbook to convert, by zero-based ordinal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SheetSelection {
    #[default]
    All,
    Only(BTreeSet<usize>),
}

impl SheetSelection {
    /// An empty list of ordinals selects every sheet.
    pub fn from_ordinals<I: IntoIterator<Item = usize>>(ordinals: I) -> Self {
        let ordinals: BTreeSet<usize> = ordinals.into_iter().collect();
        if ordinals.is_empty() {
            SheetSelection::All
        } else {
            SheetSelection::Only(ordinals)
        }
    }

    /// Ordinals to convert, in workbook order. Requested ordinals past the end match nothing.
    pub fn select(&self, sheet_count: usize) -> Vec<usize> {
        match self {
            SheetSelection::All => (0..sheet_count).collect(),
            SheetSelection::Only(ordinals) => (0..sheet_count)
                .filter(|ordinal| ordinals.contains(ordinal))
                .collect(),
        }
    }

    pub fn out_of_range(&self, sheet_count: usize) -> Vec<usize> {
        match self {
            SheetSelection::All => Vec::new(),
            SheetSelection::Only(ordinals) => ordinals.range(sheet_count..).copied().collect(),
        }
    }
}

/// Settings for one conversion run, passed explicitly into the converter.
#[derive(Debug, Clone, Default)]
pub struct ConvertOptions {
    pub selection: SheetSelection,
    /// Replace characters in sheet names that are not valid in file names.
    pub sanitize_names: bool,
}

#[derive(Debug)]
pub struct SheetReport {
    pub ordinal: usize,
    pub name: String,
    pub output: PathBuf,
    pub rows_written: usize,
    pub rows_skipped: usize,
}

#[derive(Debug)]
pub struct SheetFailure {
    pub ordinal: usize,
    pub name: String,
    pub error: ConvertError,
}

#[derive(Debug)]
pub struct FileReport {
    pub input: PathBuf,
    pub sheets: Vec<SheetReport>,
    pub failed_sheets: Vec<SheetFailure>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub files: Vec<FileReport>,
    pub failed_inputs: Vec<(PathBuf, ConvertError)>,
}

impl BatchReport {
    pub fn outputs(&self) -> impl Iterator<Item = &PathBuf> {
        self.files
            .iter()
            .flat_map(|file| file.sheets.iter().map(|sheet| &sheet.output))
    }

    pub fn has_failures(&self) -> bool {
        !self.failed_inputs.is_empty()
            || self.files.iter().any(|file| {
                !file.failed_sheets.is_empty()
                    || file.sheets.iter().any(|sheet| sheet.rows_skipped > 0)
            })
    }
}
