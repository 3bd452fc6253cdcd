use std::path::{Path, PathBuf};

use crate::error::{ConvertError, Result};

/// Names the CSV files of one input: `<dir>/<stem>_<ordinal>_<sheet>.csv`.
///
/// The sheet name is used as-is unless `sanitize` is set; a name the
/// filesystem rejects then fails when the file is created.
#[derive(Debug, Clone)]
pub struct OutputNamer {
    dir: PathBuf,
    stem: String,
    sanitize: bool,
}

impl OutputNamer {
    pub fn new(input: &Path, sanitize: bool) -> Result<Self> {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConvertError::InvalidInputPath(input.to_path_buf()))?;

        let dir = input.parent().unwrap_or_else(|| Path::new(""));

        Ok(Self {
            dir: dir.to_path_buf(),
            stem: stem.to_string(),
            sanitize,
        })
    }

    pub fn path(&self, ordinal: usize, sheet_name: &str) -> PathBuf {
        let sheet_name = if self.sanitize {
            sanitize_filename::sanitize(sheet_name)
        } else {
            sheet_name.to_string()
        };

        self.dir
            .join(format!("{}_{}_{}.csv", self.stem, ordinal, sheet_name))
    }
}
