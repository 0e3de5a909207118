use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use clap_num::maybe_hex;
use log::{info, LevelFilter};
use mv_host_lib::{
    dataset::DEFAULT_HEADERS, decode_calibration, decode_capture_file, evaluate_batch,
    load_test_description, read_time_series, MetricCSVWriter, TestCase,
};

#[derive(Parser)]
#[command(name = "MV CLI")]
#[command(bin_name = "mv-cli")]
struct Cli {
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Calibration(CalibrationArgs),
    Decode(DecodeArgs),
    Evaluate(EvaluateArgs),
}

fn offset_parser(s: &str) -> Result<u64, String> {
    maybe_hex(s)
}

/// `<version>=<path>`
fn dataset_parser(s: &str) -> Result<(String, PathBuf), String> {
    match s.split_once('=') {
        Some((version, path)) if !version.is_empty() && !path.is_empty() => {
            Ok((version.into(), PathBuf::from(path)))
        }
        _ => Err(format!("expected <version>=<path>, got {:?}", s)),
    }
}

#[derive(clap::Args)]
#[command(about = "Decode both calibration windows of a capture file")]
struct CalibrationArgs {
    capture: PathBuf,
}

#[derive(clap::Args)]
#[command(about = "Decode a single capture window")]
struct DecodeArgs {
    capture: PathBuf,
    #[arg(value_parser=offset_parser)]
    offset: u64,
}

#[derive(clap::Args)]
#[command(about = "Evaluate recordings against a test description")]
struct EvaluateArgs {
    #[arg(long)]
    name: String,
    #[arg(long)]
    description: PathBuf,
    #[arg(long = "dataset", value_parser=dataset_parser, required = true)]
    datasets: Vec<(String, PathBuf)>,
    /// Column names of the dataset files, comma separated
    #[arg(long, value_delimiter = ',')]
    headers: Option<Vec<String>>,
    /// Metrics CSV, stdout if omitted
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();

    let level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let _ = env_logger::builder().filter_level(level).try_init();

    match args.command {
        Commands::Calibration(args) => {
            let calibration = decode_calibration(&args.capture).await?;
            println!("{}", serde_json::to_string_pretty(&calibration)?);
        }
        Commands::Decode(args) => {
            let record = decode_capture_file(&args.capture, args.offset).await?;
            println!("{}", serde_json::to_string_pretty(&record)?);
        }
        Commands::Evaluate(args) => evaluate(args)?,
    }
    Ok(())
}

fn evaluate(args: EvaluateArgs) -> Result<()> {
    let headers: Vec<&str> = match &args.headers {
        Some(headers) => headers.iter().map(String::as_str).collect(),
        None => DEFAULT_HEADERS.to_vec(),
    };

    let description = load_test_description(&args.name, &args.description)?;
    let mut datasets = Vec::new();
    for (version, path) in &args.datasets {
        let dataset = read_time_series(path, &headers)
            .with_context(|| format!("reading {:?} for version {}", path, version))?;
        datasets.push((version.clone(), dataset));
    }

    let case = TestCase {
        name: args.name.clone(),
        description,
        datasets,
    };
    let records = evaluate_batch(&[case])?;

    match &args.output {
        Some(path) => {
            let mut writer = MetricCSVWriter::new(path)?;
            writer.write_all(&records)?;
            writer.flush()?;
            info!("wrote {} metrics to {:?}", records.len(), path);
        }
        None => {
            let mut writer = MetricCSVWriter::from_writer(std::io::stdout())?;
            writer.write_all(&records)?;
            writer.flush()?;
        }
    }
    Ok(())
}
