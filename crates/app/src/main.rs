use std::fmt;
use std::path::PathBuf;

use baseline_core::model::GameMode;
use services::{QuizGame, Randomness};
use tracing_subscriber::EnvFilter;

mod server;
mod terminal;

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidPort { raw: String },
    InvalidMode { raw: String },
    InvalidSeed { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidPort { raw } => write!(f, "invalid --port value: {raw}"),
            ArgsError::InvalidMode { raw } => write!(f, "invalid --mode value: {raw}"),
            ArgsError::InvalidSeed { raw } => write!(f, "invalid --seed value: {raw}"),
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

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- serve [--root <dir>] [--host <addr>] [--port <n>]");
    eprintln!("  cargo run -p app -- play  [--catalog <path|url>] [--mode baseline|mixed] [--seed <n>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --root .  --host 0.0.0.0  --port 3000");
    eprintln!("  --catalog game-features.json  --mode baseline");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  QUIZ_ROOT, QUIZ_HOST, PORT, QUIZ_CATALOG, QUIZ_MODE, QUIZ_SEED");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    Serve,
    Play,
}

impl Command {
    fn from_arg(arg: &str) -> Option<Self> {
        match arg {
            "serve" => Some(Self::Serve),
            "play" => Some(Self::Play),
            _ => None,
        }
    }
}

struct ServeArgs {
    root: PathBuf,
    host: String,
    port: u16,
}

impl ServeArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut root = std::env::var("QUIZ_ROOT").map_or_else(|_| PathBuf::from("."), PathBuf::from);
        let mut host = std::env::var("QUIZ_HOST").unwrap_or_else(|_| "0.0.0.0".into());
        let mut port = match std::env::var("PORT") {
            Ok(raw) => parse_port(raw)?,
            Err(_) => 3000,
        };

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--root" => root = PathBuf::from(require_value(args, "--root")?),
                "--host" => host = require_value(args, "--host")?,
                "--port" => port = parse_port(require_value(args, "--port")?)?,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { root, host, port })
    }
}

fn parse_port(raw: String) -> Result<u16, ArgsError> {
    raw.trim()
        .parse::<u16>()
        .map_err(|_| ArgsError::InvalidPort { raw })
}

struct PlayArgs {
    catalog: String,
    mode: GameMode,
    seed: Option<u64>,
}

impl PlayArgs {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut catalog =
            std::env::var("QUIZ_CATALOG").unwrap_or_else(|_| "game-features.json".into());
        let mut mode = match std::env::var("QUIZ_MODE") {
            Ok(raw) => parse_mode(raw)?,
            Err(_) => GameMode::default(),
        };
        let mut seed = std::env::var("QUIZ_SEED")
            .ok()
            .and_then(|value| value.parse::<u64>().ok());

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--catalog" => catalog = require_value(args, "--catalog")?,
                "--mode" => mode = parse_mode(require_value(args, "--mode")?)?,
                "--seed" => {
                    let value = require_value(args, "--seed")?;
                    let parsed = value
                        .parse::<u64>()
                        .map_err(|_| ArgsError::InvalidSeed { raw: value.clone() })?;
                    seed = Some(parsed);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            catalog,
            mode,
            seed,
        })
    }

    fn randomness(&self) -> Randomness {
        self.seed.map_or(Randomness::Entropy, Randomness::seeded)
    }
}

fn parse_mode(raw: String) -> Result<GameMode, ArgsError> {
    raw.parse::<GameMode>()
        .map_err(|_| ArgsError::InvalidMode { raw })
}

async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut argv: Vec<String> = std::env::args().skip(1).collect();

    // Default behavior: serve the web front end when no subcommand is provided.
    let cmd = match argv.first().map(String::as_str) {
        None => Command::Serve,
        Some("--help" | "-h") => {
            print_usage();
            return Ok(());
        }
        Some(first) if first.starts_with("--") => Command::Serve,
        Some(first) => Command::from_arg(first).ok_or_else(|| {
            eprintln!("unknown subcommand: {first}");
            print_usage();
            std::io::Error::new(std::io::ErrorKind::InvalidInput, "unknown subcommand")
        })?,
    };

    if !argv.is_empty() && !argv[0].starts_with("--") {
        argv.remove(0);
    }

    let report = |e: ArgsError| {
        eprintln!("{e}");
        print_usage();
        e
    };

    let mut iter = argv.into_iter();
    match cmd {
        Command::Serve => {
            let args = ServeArgs::parse(&mut iter).map_err(report)?;
            server::serve(args.root, &args.host, args.port).await?;
            Ok(())
        }
        Command::Play => {
            let args = PlayArgs::parse(&mut iter).map_err(report)?;
            let mut game = QuizGame::new(args.randomness());
            let source = storage::catalog::source_for(&args.catalog);
            game.load_catalog(source.as_ref()).await?;

            let mode = args.mode;
            tokio::task::spawn_blocking(move || {
                let stdin = std::io::stdin();
                let stdout = std::io::stdout();
                terminal::play(&mut game, mode, &mut stdin.lock(), &mut stdout.lock())
            })
            .await??;
            Ok(())
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
