mod exporters;
mod paths;
mod types;

pub use exporters::Converter;
pub use paths::OutputNamer;
pub use types::{
    BatchReport, ConvertOptions, FileReport, SheetFailure, SheetReport, SheetSelection,
};
