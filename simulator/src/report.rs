//! Batch statistics: outcome rates, final-balance distribution and per-roll trends.

use crapsim_types::{BatchResult, GameOutcome, SimulationConfig};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Write as _;

/// Running moments of a sample (Welford's update).
#[derive(Clone, Debug, Default)]
struct Moments {
    count: u64,
    mean: f64,
    /// Sum of squared deviations from `mean`.
    m2: f64,
}

impl Moments {
    fn add(&mut self, value: f64) {
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    fn mean(&self) -> f64 {
        self.mean
    }

    /// Sample variance (n - 1 denominator).
    fn variance(&self) -> f64 {
        if self.count <= 1 {
            return 0.0;
        }
        (self.m2 / (self.count - 1) as f64).max(0.0)
    }

    fn std(&self) -> f64 {
        self.variance().sqrt()
    }

    fn stderr(&self) -> f64 {
        if self.count <= 1 {
            0.0
        } else {
            (self.variance() / self.count as f64).sqrt()
        }
    }
}

/// Headline rates for a batch.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub games: usize,
    /// Games ending exactly on the win target.
    pub win_rate: f64,
    /// Games ending exactly on the loss limit.
    pub loss_rate: f64,
    pub incomplete_rate: f64,
    pub positive_rate: f64,
    pub negative_rate: f64,
    pub zero_rate: f64,
    pub mean_result: f64,
    /// Standard error of `mean_result`.
    pub result_stderr: f64,
    pub mean_rolls: f64,
}

impl Summary {
    pub fn from_batch(batch: &BatchResult) -> Self {
        let mut outcomes = [0usize; 3];
        let mut signs = [0usize; 3];
        let mut results = Moments::default();
        let mut rolls = Moments::default();
        for game in batch {
            match game.outcome() {
                GameOutcome::Won => outcomes[0] += 1,
                GameOutcome::Lost => outcomes[1] += 1,
                GameOutcome::Incomplete => outcomes[2] += 1,
            }
            match game.result.signum() {
                1 => signs[0] += 1,
                -1 => signs[1] += 1,
                _ => signs[2] += 1,
            }
            results.add(game.result as f64);
            rolls.add(game.len() as f64);
        }

        let games = batch.len();
        let rate = |count: usize| {
            if games == 0 {
                0.0
            } else {
                count as f64 / games as f64
            }
        };
        Self {
            games,
            win_rate: rate(outcomes[0]),
            loss_rate: rate(outcomes[1]),
            incomplete_rate: rate(outcomes[2]),
            positive_rate: rate(signs[0]),
            negative_rate: rate(signs[1]),
            zero_rate: rate(signs[2]),
            mean_result: results.mean(),
            result_stderr: results.stderr(),
            mean_rolls: rolls.mean(),
        }
    }
}

/// Value aggregated at each roll index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum RollMetric {
    /// Payout of that roll.
    #[default]
    Outcome,
    /// Balance after that roll.
    RunningTotal,
}

/// Distribution of one roll index across the games that reached it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RollStats {
    /// 1-based roll number.
    pub roll: usize,
    pub count: u64,
    pub mean: f64,
    pub median: f64,
    pub min: i64,
    pub max: i64,
    pub std: f64,
}

/// Per-roll accumulator. Values are multiples of the stake, so a histogram stays small and
/// gives an exact median.
#[derive(Default)]
struct Column {
    moments: Moments,
    histogram: BTreeMap<i64, u64>,
}

impl Column {
    fn add(&mut self, value: i64) {
        self.moments.add(value as f64);
        *self.histogram.entry(value).or_default() += 1;
    }

    /// Value at 0-based sorted position `rank`.
    fn nth(&self, rank: u64) -> i64 {
        let mut seen = 0;
        for (value, count) in &self.histogram {
            seen += count;
            if rank < seen {
                return *value;
            }
        }
        unreachable!("rank {rank} beyond {seen} values")
    }

    fn median(&self) -> f64 {
        let n = self.moments.count;
        let lower = self.nth((n - 1) / 2);
        let upper = self.nth(n / 2);
        (lower as f64 + upper as f64) / 2.0
    }

    fn stats(&self, roll: usize) -> RollStats {
        RollStats {
            roll,
            count: self.moments.count,
            mean: self.moments.mean(),
            median: self.median(),
            min: self.histogram.keys().next().copied().unwrap_or_default(),
            max: self.histogram.keys().next_back().copied().unwrap_or_default(),
            std: self.moments.std(),
        }
    }
}

/// Per-roll statistics over the games that reached each roll.
pub fn roll_trend(batch: &BatchResult, metric: RollMetric) -> Vec<RollStats> {
    let mut columns: Vec<Column> = Vec::new();
    columns.resize_with(batch.longest_game(), Column::default);
    for game in batch {
        match metric {
            RollMetric::Outcome => {
                for (column, outcome) in columns.iter_mut().zip(&game.rolls) {
                    column.add(*outcome);
                }
            }
            RollMetric::RunningTotal => {
                for (column, total) in columns.iter_mut().zip(game.running_totals()) {
                    column.add(total);
                }
            }
        }
    }
    columns
        .iter()
        .enumerate()
        .map(|(index, column)| column.stats(index + 1))
        .collect()
}

/// Everything written out for one batch.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Report {
    pub config: SimulationConfig,
    /// Hex seed the batch was run with.
    pub seed: String,
    pub metric: RollMetric,
    pub summary: Summary,
    pub trend: Vec<RollStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub batch: Option<BatchResult>,
}

impl Report {
    pub fn new(
        config: SimulationConfig,
        seed: String,
        metric: RollMetric,
        batch: &BatchResult,
    ) -> Self {
        Self {
            config,
            seed,
            metric,
            summary: Summary::from_batch(batch),
            trend: roll_trend(batch, metric),
            batch: None,
        }
    }

    /// Plain-text summary followed by the first `rows` rolls of the trend as CSV.
    pub fn render_text(&self, rows: usize) -> String {
        let SimulationConfig { bet, game, games } = &self.config;
        let summary = &self.summary;
        let pct = |rate: f64| rate * 100.0;

        let mut out = String::new();
        let _ = writeln!(
            out,
            "{} x {} | stop loss {} | stop win {} | max rolls {} | games {}",
            bet.bet_type, bet.stake, game.stop_loss, game.stop_win, game.max_rolls, games
        );
        let _ = writeln!(out, "seed {}", self.seed);
        let _ = writeln!(out);
        let _ = writeln!(out, "won {}:        {:>6.1}%", game.stop_win, pct(summary.win_rate));
        let _ = writeln!(
            out,
            "lost {}:       {:>6.1}%",
            game.stop_loss.unsigned_abs(),
            pct(summary.loss_rate)
        );
        let _ = writeln!(out, "no limit hit:  {:>6.1}%", pct(summary.incomplete_rate));
        let _ = writeln!(out, "ended positive:{:>6.1}%", pct(summary.positive_rate));
        let _ = writeln!(out, "ended negative:{:>6.1}%", pct(summary.negative_rate));
        let _ = writeln!(out, "ended at zero: {:>6.1}%", pct(summary.zero_rate));
        let _ = writeln!(
            out,
            "average result: {:.2} (stderr {:.2}) over {:.1} rolls",
            summary.mean_result, summary.result_stderr, summary.mean_rolls
        );
        let _ = writeln!(out);

        let label = match self.metric {
            RollMetric::Outcome => "outcome",
            RollMetric::RunningTotal => "running_total",
        };
        let _ = writeln!(out, "roll,count,mean_{label},median,min,max,std");
        for stats in self.trend.iter().take(rows) {
            let _ = writeln!(
                out,
                "{},{},{:.4},{:.1},{},{},{:.4}",
                stats.roll, stats.count, stats.mean, stats.median, stats.min, stats.max, stats.std
            );
        }
        out
    }
}
