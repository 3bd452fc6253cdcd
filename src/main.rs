use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug, warn};
use std::path::PathBuf;

use sheet2csv::csv_export::{ConvertOptions, Converter, SheetSelection};

#[derive(Parser)]
#[command(author, about, long_about = None, disable_version_flag = true)]
struct Cli {
    /// Workbook files to convert; each sheet is written next to its workbook
    files: Vec<PathBuf>,

    /// Sheet number to convert, starting at 0 (repeatable). All sheets when omitted
    #[arg(long, short = 's', value_delimiter = ',')]
    sheet: Vec<usize>,

    /// Strip characters that are not allowed in file names from sheet names
    #[arg(long)]
    sanitize_names: bool,

    /// Verbose logging
    #[arg(long, short = 'd')]
    debug: bool,

    /// Print version
    #[arg(long, short = 'v')]
    version: bool,
}

fn version_text() -> String {
    format!(
        "{} version {}",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

fn init_logging(debug: bool) {
    let level = if debug {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.version {
        println!("{}", version_text());
        return Ok(());
    }

    init_logging(cli.debug);

    debug!("files: {:?}, sheets: {:?}", cli.files, cli.sheet);

    if cli.files.is_empty() {
        debug!("No input files");
        return Ok(());
    }

    let options = ConvertOptions {
        selection: SheetSelection::from_ordinals(cli.sheet),
        sanitize_names: cli.sanitize_names,
    };

    let report = Converter::new(options).convert_all(&cli.files);

    if report.has_failures() {
        let failed_sheets: usize = report.files.iter().map(|f| f.failed_sheets.len()).sum();
        warn!(
            "Finished with errors: {} of {} inputs could not be opened, {} sheets skipped",
            report.failed_inputs.len(),
            cli.files.len(),
            failed_sheets
        );
    }

    Ok(())
}
