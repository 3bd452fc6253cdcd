pub mod csv_export;
pub mod error;
pub mod excel;
