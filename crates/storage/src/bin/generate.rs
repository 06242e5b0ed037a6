use std::fmt;
use std::path::PathBuf;

use rand::SeedableRng;
use rand::rngs::StdRng;
use storage::catalog::JsonFileCatalog;
use storage::dataset::{DatasetReport, GeneratorConfig, RawDataset, generate};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
struct Args {
    input: PathBuf,
    output: PathBuf,
    seed: Option<u64>,
    explore: bool,
    config: GeneratorConfig,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    MissingInput,
    UnknownArg(String),
    InvalidSeed { raw: String },
    InvalidCap { flag: &'static str, raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::MissingInput => write!(f, "--input is required"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
            ArgsError::InvalidCap { flag, raw } => write!(f, "invalid {flag} value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn parse_cap(args: &mut impl Iterator<Item = String>, flag: &'static str) -> Result<usize, ArgsError> {
    let value = require_value(args, flag)?;
    value
        .parse::<usize>()
        .map_err(|_| ArgsError::InvalidCap { flag, raw: value.clone() })
}

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut input = std::env::var("WEB_FEATURES_DATA").ok().map(PathBuf::from);
        let mut output = std::env::var("QUIZ_CATALOG")
            .map_or_else(|_| PathBuf::from("game-features.json"), PathBuf::from);
        let mut seed = std::env::var("QUIZ_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());
        let mut explore = false;
        let mut config = GeneratorConfig::default();

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--input" => input = Some(PathBuf::from(require_value(&mut args, "--input")?)),
                "--output" => output = PathBuf::from(require_value(&mut args, "--output")?),
                "--seed" => {
                    let value = require_value(&mut args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--explore" => explore = true,
                "--max-high" => config.max_high = parse_cap(&mut args, "--max-high")?,
                "--max-low" => config.max_low = parse_cap(&mut args, "--max-low")?,
                "--max-unknown" => config.max_unknown = parse_cap(&mut args, "--max-unknown")?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            input: input.ok_or(ArgsError::MissingInput)?,
            output,
            seed,
            explore,
            config,
        })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin generate -- --input <data.json> [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --input <path>            web-features data.json (required)");
    eprintln!("  --output <path>           Catalog to write (default: game-features.json)");
    eprintln!("  --seed <n>                Seed the shuffle for a reproducible catalog");
    eprintln!("  --explore                 Print a dataset report instead of generating");
    eprintln!("  --max-high <n>            Cap on high features (default: 100)");
    eprintln!("  --max-low <n>             Cap on low features (default: 50)");
    eprintln!("  --max-unknown <n>         Cap on unknown features (default: 50)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  WEB_FEATURES_DATA, QUIZ_CATALOG, QUIZ_SEED");
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let json = tokio::fs::read_to_string(&args.input).await?;
    let dataset = RawDataset::from_json(&json)?;

    if args.explore {
        print!("{}", DatasetReport::from_dataset(&dataset));
        return Ok(());
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_rng(&mut rand::rng()),
    };
    let generated = generate(&dataset, args.config, &mut rng);

    println!("Generated {} game features", generated.total());
    println!(
        "Distribution: High={}, Low={}, Unknown={}",
        generated.high, generated.low, generated.unknown
    );

    JsonFileCatalog::new(&args.output)
        .write(&generated.features)
        .await?;
    println!("Game features saved to {}", args.output.display());

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}
