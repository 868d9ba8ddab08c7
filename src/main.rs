use std::{
    io::{self, Write},
    path::PathBuf,
    process::ExitCode,
    time::Duration,
};

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use crossterm::tty::IsTty;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

use rotor16::{config::SolverConfig, render, search, Board, SearchLimits};

/// Sorts a 4x4 grid of 1..16 using row and column rotations.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// File holding 16 whitespace separated numbers in row-major order.
    #[arg(required_unless_present = "scramble", conflicts_with = "scramble")]
    file: Option<PathBuf>,

    /// Solve a board made by this many random rotations instead of a file.
    /// Without a count, the config's `[scramble] moves` is used.
    #[arg(long, value_name = "MOVES", num_args = 0..=1)]
    scramble: Option<Option<usize>>,

    /// Seed for --scramble.
    #[arg(long)]
    seed: Option<u64>,

    /// TOML file with [limits] and [scramble] sections.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Stop after expanding this many boards.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u64).range(1..))]
    max_expansions: Option<u64>,

    /// Stop after this many seconds.
    #[arg(long, value_name = "SECS")]
    time_limit: Option<f64>,

    /// Replay the solution on the start board and fail if it does not sort it.
    #[arg(long)]
    verify: bool,

    #[arg(long, value_enum, default_value_t = ColorChoice::Auto)]
    color: ColorChoice,

    /// Log more (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ColorChoice {
    Auto,
    Always,
    Never,
}

impl ColorChoice {
    fn enabled(self) -> bool {
        match self {
            ColorChoice::Auto => io::stdout().is_tty(),
            ColorChoice::Always => true,
            ColorChoice::Never => false,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rotor16={}", level)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_start(cli: &Cli, config: &SolverConfig) -> anyhow::Result<Board> {
    if let Some(path) = &cli.file {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        return text
            .parse::<Board>()
            .with_context(|| format!("invalid start board in {}", path.display()));
    }

    let moves = cli.scramble.flatten().unwrap_or(config.scramble.moves);
    let seed = cli
        .seed
        .or(config.scramble.seed)
        .unwrap_or_else(|| rand::thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let (board, applied) = Board::scramble(moves, &mut rng);
    info!(seed, moves, scramble = %rotor16::Route::from(applied), "scrambled start board");
    Ok(board)
}

fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = match &cli.config {
        Some(path) => SolverConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => SolverConfig::default(),
    };

    let mut limits: SearchLimits = config.search_limits();
    if let Some(max) = cli.max_expansions {
        limits.max_expansions = Some(usize::try_from(max).unwrap_or(usize::MAX));
    }
    if let Some(secs) = cli.time_limit {
        limits.time_limit = Some(
            Duration::try_from_secs_f64(secs)
                .with_context(|| format!("invalid --time-limit {}", secs))?,
        );
    }

    let start = load_start(&cli, &config)?;
    let color = cli.color.enabled();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    render::write_start(&mut out, &start, color)?;
    out.flush()?;

    let report = search::solve(start, &limits);
    render::write_outcome(&mut out, &report, color)?;

    let Some(solution) = report.solution() else {
        return Ok(ExitCode::from(2));
    };
    if cli.verify {
        let replayed = start.apply_all(&solution.route);
        if !replayed.is_goal() {
            bail!("route {} does not sort the start board", solution.route);
        }
        writeln!(out, "Verified.")?;
    }
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}
