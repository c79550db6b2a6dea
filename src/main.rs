use std::path::PathBuf;

use atlas_tools::convert;
use atlas_tools::io::TableSource;
use atlas_tools::{Result, ToolError};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&cli.log_level) {
        eprintln!("error: {error}");
        std::process::exit(error.exit_code());
    }
    if let Err(error) = run(cli) {
        report(&error);
        std::process::exit(error.exit_code());
    }
}

fn init_logging(level: &str) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|err| ToolError::Logging(err.to_string()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|err| ToolError::Logging(err.to_string()))
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Build(args) => execute_build(args),
        Command::Template(args) => convert::write_template(&args.output),
    }
}

fn execute_build(args: BuildArgs) -> Result<()> {
    let output = match (args.check_only, args.output) {
        (true, _) => None,
        (false, Some(output)) => Some(output),
        (false, None) => {
            return Err(ToolError::Usage(
                "--output is required unless --check-only is given".into(),
            ));
        }
    };
    let source = args.source.into_table_source()?;

    match output {
        Some(output) => {
            convert::convert_to_datajs(&source, &output)?;
        }
        None => {
            convert::check_source(&source)?;
            info!("validation completed successfully (check only)");
        }
    }
    Ok(())
}

fn report(error: &ToolError) {
    match error {
        ToolError::Validation(errors) => {
            for message in errors.iter() {
                error!("{message}");
            }
            error!("validation failed");
        }
        other => error!("{other}"),
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Build the map data configuration from workbook or CSV tables."
)]
struct Cli {
    /// Log filter used when RUST_LOG is not set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate the source tables and write the data.js artifact.
    Build(BuildArgs),
    /// Write an empty workbook with every required sheet and header.
    Template(TemplateArgs),
}

#[derive(clap::Args)]
struct BuildArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Target JavaScript file.
    #[arg(long, short)]
    output: Option<PathBuf>,

    /// Only validate, do not write any file.
    #[arg(long)]
    check_only: bool,
}

#[derive(clap::Args)]
#[group(required = true, multiple = false)]
struct SourceArgs {
    /// Workbook holding all sheets.
    #[arg(long, value_name = "PATH")]
    xlsx: Option<PathBuf>,

    /// Directory with one CSV file per sheet.
    #[arg(long, value_name = "DIR")]
    csv_dir: Option<PathBuf>,
}

impl SourceArgs {
    fn into_table_source(self) -> Result<TableSource> {
        match (self.xlsx, self.csv_dir) {
            (Some(path), None) => Ok(TableSource::Workbook(path)),
            (None, Some(path)) => Ok(TableSource::CsvDirectory(path)),
            _ => Err(ToolError::Usage(
                "exactly one of --xlsx or --csv-dir is required".into(),
            )),
        }
    }
}

#[derive(clap::Args)]
struct TemplateArgs {
    /// Workbook file to create.
    #[arg(long, short)]
    output: PathBuf,
}
