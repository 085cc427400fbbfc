use anyhow::{Context, Result};
use clap::Parser;
use crapsim_simulator::{run, Config, LogProgress, Mode, Report, RollMetric};
use rand::{rngs::OsRng, RngCore};
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, Level};

fn init_tracing(level: Level) {
    tracing_subscriber::fmt().with_max_level(level).init();
}

#[derive(Parser, Debug)]
#[command(author, version, about = "Estimate craps stop-loss/stop-win outcomes by simulation.", long_about = None)]
struct Args {
    /// YAML config file; flags override its values.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Bet type ("Pass Line Bet", "dont-pass", ...).
    #[arg(short, long)]
    bet_type: Option<String>,

    /// Amount wagered on every roll.
    #[arg(short, long)]
    stake: Option<i64>,

    /// Stop once the balance falls to this value (zero or negative).
    #[arg(long, allow_negative_numbers = true)]
    stop_loss: Option<i64>,

    /// Stop once the balance rises to this value (zero or positive).
    #[arg(long)]
    stop_win: Option<i64>,

    /// Maximum rolls per game.
    #[arg(long)]
    max_rolls: Option<usize>,

    /// Number of games to simulate.
    #[arg(short, long)]
    games: Option<usize>,

    /// Hex-encoded 32-byte seed (random when omitted).
    #[arg(long)]
    seed: Option<String>,

    /// Randomness scheduling mode.
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    log_level: Option<String>,

    /// Value aggregated per roll in the trend table.
    #[arg(long, value_enum, default_value_t = RollMetric::Outcome)]
    metric: RollMetric,

    /// Number of trend rows printed.
    #[arg(long, default_value_t = 20)]
    rows: usize,

    /// Write the full report as JSON to this path.
    #[arg(long)]
    json: Option<PathBuf>,

    /// Include every game record in the JSON report.
    #[arg(long, default_value_t = false, requires = "json")]
    include_games: bool,
}

fn build_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(bet_type) = &args.bet_type {
        config.bet_type = bet_type.clone();
    }
    if let Some(stake) = args.stake {
        config.stake = stake;
    }
    if let Some(stop_loss) = args.stop_loss {
        config.stop_loss = stop_loss;
    }
    if let Some(stop_win) = args.stop_win {
        config.stop_win = stop_win;
    }
    if let Some(max_rolls) = args.max_rolls {
        config.max_rolls = max_rolls;
    }
    if let Some(games) = args.games {
        config.games = games;
    }
    if let Some(seed) = &args.seed {
        config.seed = Some(seed.clone());
    }
    if let Some(mode) = args.mode {
        config.mode = mode;
    }
    if let Some(log_level) = &args.log_level {
        config.log_level = log_level.clone();
    }
    Ok(config)
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = build_config(&args)?;
    let simulation = config.simulation()?;
    init_tracing(config.level()?);

    let seed = match config.seed()? {
        Some(seed) => seed,
        None => {
            let mut seed = [0u8; 32];
            OsRng.fill_bytes(&mut seed);
            seed
        }
    };
    let seed_hex = hex::encode(seed);
    info!(
        bet = simulation.bet.bet_type.id(),
        stake = simulation.bet.stake,
        stop_loss = simulation.game.stop_loss,
        stop_win = simulation.game.stop_win,
        max_rolls = simulation.game.max_rolls,
        games = simulation.games,
        mode = ?config.mode,
        seed = %seed_hex,
        "Starting simulation"
    );

    let start = Instant::now();
    let batch = run(&simulation, config.mode, &seed, &mut LogProgress::default())
        .context("simulation failed")?;
    info!(elapsed = ?start.elapsed(), games = batch.len(), "Simulation complete");

    let mut report = Report::new(simulation, seed_hex, args.metric, &batch);
    print!("{}", report.render_text(args.rows));

    if let Some(path) = &args.json {
        if args.include_games {
            report.batch = Some(batch);
        }
        let file = std::fs::File::create(path)
            .with_context(|| format!("could not create {}", path.display()))?;
        serde_json::to_writer_pretty(std::io::BufWriter::new(file), &report)
            .with_context(|| format!("could not write {}", path.display()))?;
        info!(path = %path.display(), "Wrote report");
    }
    Ok(())
}
