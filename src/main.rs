/*!
# WS Doc Parser CLI

Command-line interface for converting web-service operation documentation
pages into JSON.
*/

use anyhow::{Context, Result};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use ws_doc_parser::cli_common::{self, CommonArgs, ConfigArgs, OutputWriter};
use ws_doc_parser::{
    convert_file, parse_file, BatchConverter, DocParseError, OperationDocParser, ParserConfig,
};

#[derive(Parser)]
#[command(
    name = "ws-doc-parser",
    version = env!("CARGO_PKG_VERSION"),
    author = "WS Doc Parser Team",
    about = "Convert web-service operation documentation (HTML) into hierarchical JSON"
)]
struct Cli {
    /// HTML documentation page, or a directory of pages
    input: PathBuf,

    /// Output file name inside the output directory
    output: Option<PathBuf>,

    /// Print JSON to stdout instead of writing a file
    #[arg(long, conflicts_with = "output")]
    stdout: bool,

    /// Number of parallel workers for directory input (0 = CPU count)
    #[arg(short, long, default_value = "0")]
    jobs: usize,

    #[command(flatten)]
    config: ConfigArgs,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = cli_common::init_logging(cli.common.log_level()) {
        eprintln!("{:#}", e);
    }

    match run(&cli) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::from(1),
        Err(e) => {
            match e.downcast_ref::<DocParseError>() {
                Some(DocParseError::FileNotFound(path)) => {
                    eprintln!("Error: File '{}' not found.", path.display());
                }
                _ => cli_common::print_error(&format!("{:?}", e)),
            }
            ExitCode::from(1)
        }
    }
}

/// Возвращает `false`, если часть файлов пакета не сконвертирована
fn run(cli: &Cli) -> Result<bool> {
    let mut config = match &cli.config.config {
        Some(path) => ParserConfig::load_from_file(path)?,
        None => ParserConfig::default(),
    };
    if let Some(output_dir) = &cli.config.output_dir {
        config.output.output_dir = output_dir.clone();
    }

    let output_dir = config.output.output_dir.clone();
    let parser = OperationDocParser::new(config).context("Invalid parser configuration")?;

    if cli.input.is_dir() {
        return run_batch(cli, &parser, &output_dir);
    }
    if !cli.input.exists() {
        return Err(DocParseError::FileNotFound(cli.input.clone()).into());
    }

    if cli.stdout {
        let document = parse_file(&parser, &cli.input)?;
        let mut writer = OutputWriter::stdout();
        writer.write_json(&document)?;
        writer.flush()?;
        return Ok(true);
    }

    let start = Instant::now();
    let outcome = convert_file(&parser, &cli.input, cli.output.as_deref(), &output_dir)
        .with_context(|| format!("Failed to convert {}", cli.input.display()))?;
    info!(
        "Converted in {}",
        cli_common::format_duration(start.elapsed())
    );

    if cli.common.should_print() {
        println!("Successfully parsed and saved to {}", outcome.output.display());
        let mut writer = OutputWriter::stdout();
        writer.write_statistics(&outcome.statistics)?;
        writer.flush()?;
    }

    Ok(true)
}

fn run_batch(cli: &Cli, parser: &OperationDocParser, output_dir: &Path) -> Result<bool> {
    if cli.stdout {
        cli_common::print_warning("--stdout is ignored for directory input");
    }
    if cli.output.is_some() {
        cli_common::print_warning("OUTPUT is ignored for directory input");
    }

    if cli.common.should_print() {
        cli_common::print_header(
            "ws-doc-parser",
            env!("CARGO_PKG_VERSION"),
            "Batch conversion of operation documentation",
        );
        cli_common::print_info(&format!("Source: {}", cli.input.display()));
        cli_common::print_info(&format!("Output: {}", output_dir.display()));
    }

    let start = Instant::now();
    let summary = BatchConverter::new(parser, output_dir)
        .with_jobs(cli.jobs)
        .with_progress(cli.common.should_print())
        .convert_directory(&cli.input)?;

    for failure in &summary.failed {
        cli_common::print_error(&format!("{}: {}", failure.input.display(), failure.message));
    }

    if cli.common.should_print() {
        let message = format!(
            "Converted {}/{} documents in {}",
            summary.converted.len(),
            summary.total(),
            cli_common::format_duration(start.elapsed())
        );
        if summary.is_success() {
            cli_common::print_success(&message);
        } else {
            cli_common::print_warning(&message);
        }
    }

    Ok(summary.is_success())
}
