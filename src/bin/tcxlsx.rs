//! tcxlsx command-line interface
//!
//! Converts YAML test-case definitions into an Excel test specification workbook.

use std::fs;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use tcxlsx::{
    ExportOutcome, ExportSettings, ExporterBuilder, InputFormat, OutputFormat, TcXlsxError,
};
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "tcxlsx")]
#[command(about = "Convert YAML test-case definitions into an Excel test specification")]
#[command(version)]
struct Cli {
    /// Source file format (yaml, json)
    #[arg(short = 'f', long = "from-format", default_value = "yaml")]
    from_format: String,

    /// Destination file format (only xlsx produces output)
    #[arg(short = 't', long = "to-format", default_value = "xlsx")]
    to_format: String,

    /// Output workbook path
    #[arg(short = 'o', long = "output", default_value = "output.xlsx")]
    output: PathBuf,

    /// Export settings file (YAML)
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", conflicts_with = "quiet")]
    verbose: bool,

    /// Only log errors
    #[arg(short = 'q', long = "quiet")]
    quiet: bool,

    /// Input documents, one sheet each
    files: Vec<PathBuf>,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);

    if let Err(err) = run(&cli) {
        error!("conversion failed: {}", err);
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

/// Configure tracing subscriber based on CLI flags
fn init_logging(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), TcXlsxError> {
    let mut builder =
        ExporterBuilder::new().with_output_format(OutputFormat::from_name(&cli.to_format));
    if let Some(path) = &cli.config {
        let text = fs::read_to_string(path)?;
        builder = builder.with_settings(ExportSettings::from_yaml_str(&text)?);
    }
    let exporter = builder.build()?;

    let input_format = InputFormat::from_name(&cli.from_format).unwrap_or_else(|| {
        warn!(format = %cli.from_format, "unknown source format, reading as yaml");
        InputFormat::Yaml
    });

    let documents = exporter.load_documents(&cli.files, input_format)?;

    match exporter.export(&documents, &cli.output)? {
        ExportOutcome::Written { path, sheets } => {
            info!("Conversion completed: {} sheet(s) -> {}", sheets, path.display());
        }
        ExportOutcome::Skipped { format } => {
            info!("No output written for format '{}'", format);
        }
    }

    Ok(())
}
