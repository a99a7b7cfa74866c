//! # CLI Module
//!
//! Command-line interface for the duplicate value counter.
//!
//! ## Usage
//! ```bash
//! # Count duplicates in 500k random values, like rand() would produce
//! dupcount count --len 500000 --max 32767
//!
//! # Count a file of integers with the sorted counter
//! dupcount count --input values.txt --strategy sorted
//!
//! # Cross-check histogram against brute force
//! dupcount compare --len 20000 --policy all-pairs --output json
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use console::{style, Term};
use duplicate_value_counter::core::engine::{
    CountReport, CrossCheckReport, DuplicateCounter, Fallback,
};
use duplicate_value_counter::core::{MatchPolicy, DEFAULT_MAX_SLOTS};
use duplicate_value_counter::dataset;
use duplicate_value_counter::error::{DuplicateCounterError, Result};
use duplicate_value_counter::events::{
    CountEvent, CrossCheckEvent, Event, EventChannel, EventReceiver, Strategy,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::thread::{self, JoinHandle};
use tracing::info;

/// Duplicate Value Counter - count repeated integers, fast or thoroughly
#[derive(Parser, Debug)]
#[command(name = "dupcount")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Count duplicate values in a dataset
    Count {
        #[command(flatten)]
        source: SourceArgs,

        /// Counter to try first
        #[arg(short, long, default_value = "histogram")]
        strategy: StrategyArg,

        /// Largest histogram to allocate, in slots
        #[arg(long, default_value_t = DEFAULT_MAX_SLOTS)]
        max_slots: usize,

        /// What to do when the histogram would be too large
        #[arg(long, default_value = "sorted")]
        fallback: FallbackArg,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },

    /// Cross-check the histogram counter against brute force
    Compare {
        #[command(flatten)]
        source: SourceArgs,

        /// How brute force credits repeated matches
        #[arg(short, long, default_value = "first-match")]
        policy: PolicyArg,

        /// Largest histogram to allocate, in slots
        #[arg(long, default_value_t = DEFAULT_MAX_SLOTS)]
        max_slots: usize,

        /// Output format
        #[arg(short, long, default_value = "pretty")]
        output: OutputFormat,
    },
}

/// Where the values come from
#[derive(Args, Debug)]
struct SourceArgs {
    /// Read whitespace- or comma-separated integers from a file
    #[arg(short, long, conflicts_with_all = ["len", "min", "max", "seed"])]
    input: Option<PathBuf>,

    /// Number of random values to generate
    #[arg(short = 'n', long, default_value_t = 100_000)]
    len: usize,

    /// Smallest random value
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    min: i64,

    /// Largest random value
    #[arg(long, default_value_t = 32_767, allow_negative_numbers = true)]
    max: i64,

    /// Random seed (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
}

impl SourceArgs {
    fn load(&self) -> Result<Vec<i64>> {
        let values = match &self.input {
            Some(path) => dataset::load(path)?,
            None => {
                let seed = self.seed.unwrap_or_else(rand::random);
                info!(len = self.len, min = self.min, max = self.max, seed, "generating dataset");
                dataset::generate(self.len, self.min, self.max, seed)?
            }
        };
        Ok(values)
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum StrategyArg {
    /// Counting array sized to the value range - O(n) (default)
    Histogram,
    /// Compare every pair - O(n²), shows progress
    BruteForce,
    /// Sort a copy - O(n log n)
    Sorted,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Histogram => Strategy::Histogram,
            StrategyArg::BruteForce => Strategy::BruteForce,
            StrategyArg::Sorted => Strategy::Sorted,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FallbackArg {
    /// Fail with an allocation error
    None,
    /// Sort a copy (default)
    Sorted,
    /// Compare every pair
    BruteForce,
}

impl From<FallbackArg> for Fallback {
    fn from(arg: FallbackArg) -> Self {
        match arg {
            FallbackArg::None => Fallback::None,
            FallbackArg::Sorted => Fallback::Sorted,
            FallbackArg::BruteForce => Fallback::BruteForce,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PolicyArg {
    /// Credit each element once if it repeats later (default)
    FirstMatch,
    /// Credit every equal pair
    AllPairs,
}

impl From<PolicyArg> for MatchPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::FirstMatch => MatchPolicy::FirstMatch,
            PolicyArg::AllPairs => MatchPolicy::AllPairs,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable output with colors
    Pretty,
    /// JSON output for scripting
    Json,
}

/// Run the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Count {
            source,
            strategy,
            max_slots,
            fallback,
            output,
        } => {
            let counter = DuplicateCounter::builder()
                .strategy(strategy.into())
                .max_slots(checked_slots(max_slots)?)
                .fallback(fallback.into())
                .build();
            run_count(&counter, &source.load()?, output)
        }
        Commands::Compare {
            source,
            policy,
            max_slots,
            output,
        } => {
            let counter = DuplicateCounter::builder()
                .policy(policy.into())
                .max_slots(checked_slots(max_slots)?)
                .build();
            run_compare(&counter, &source.load()?, output)
        }
    }
}

fn checked_slots(max_slots: usize) -> Result<usize> {
    if max_slots == 0 {
        return Err(DuplicateCounterError::Config(
            "--max-slots must be at least 1".to_string(),
        ));
    }
    Ok(max_slots)
}

fn run_count(counter: &DuplicateCounter, values: &[i64], output: OutputFormat) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);
    if pretty {
        print_header(&term);
    }

    let (sender, receiver) = EventChannel::new();
    let renderer = pretty.then(|| spawn_renderer(receiver));

    let result = counter.run_with_events(values, &sender);

    // Drop sender to signal the render thread to finish
    drop(sender);
    if let Some(handle) = renderer {
        handle.join().ok();
    }

    let report = result?;
    match output {
        OutputFormat::Pretty => print_pretty_count(&term, &report),
        OutputFormat::Json => print_json(&report)?,
    }

    Ok(())
}

fn run_compare(counter: &DuplicateCounter, values: &[i64], output: OutputFormat) -> Result<()> {
    let term = Term::stderr();
    let pretty = matches!(output, OutputFormat::Pretty);
    if pretty {
        print_header(&term);
    }

    let (sender, receiver) = EventChannel::new();
    let renderer = pretty.then(|| spawn_renderer(receiver));

    let result = counter.cross_check(values, &sender);

    drop(sender);
    if let Some(handle) = renderer {
        handle.join().ok();
    }

    let report = result?;
    match output {
        OutputFormat::Pretty => print_pretty_compare(&term, &report),
        OutputFormat::Json => print_json(&report)?,
    }

    if !report.agrees() {
        return Err(DuplicateCounterError::Mismatch {
            expected: report.expected_brute_force(),
            actual: report.brute_force,
        });
    }
    Ok(())
}

/// Draw brute-force progress on stderr until every sender is dropped.
fn spawn_renderer(receiver: EventReceiver) -> JoinHandle<()> {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos:>3}% {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░"),
    );

    thread::spawn(move || {
        for event in receiver.iter() {
            match event {
                Event::Count(CountEvent::Started { strategy, .. }) => {
                    pb.set_message(strategy.to_string());
                }
                Event::CrossCheck(CrossCheckEvent::Started { .. }) => {
                    pb.set_message("Histogram vs brute force");
                }
                Event::Count(CountEvent::Progress(p)) => {
                    pb.set_position(u64::from(p.percent_complete));
                }
                Event::Count(CountEvent::FallbackUsed { to, reason, .. }) => {
                    pb.println(format!(
                        "{} {}; using {}",
                        style("!").yellow().bold(),
                        reason,
                        to
                    ));
                    pb.set_message(to.to_string());
                }
                Event::Count(CountEvent::Completed { .. })
                | Event::Count(CountEvent::Cancelled)
                | Event::CrossCheck(CrossCheckEvent::Completed { .. }) => {
                    pb.finish_and_clear();
                }
            }
        }
        pb.finish_and_clear();
    })
}

fn print_header(term: &Term) {
    term.write_line(&format!(
        "{} {}",
        style("Duplicate Value Counter").bold().cyan(),
        style(concat!("v", env!("CARGO_PKG_VERSION"))).dim()
    ))
    .ok();
    term.write_line("").ok();
}

fn print_pretty_count(term: &Term, report: &CountReport) {
    term.write_line(&format!(
        "{} {} duplicates / {} values ({:.2}%)",
        style("✓").green().bold(),
        style(report.duplicates).cyan(),
        report.total,
        report.duplicate_percent()
    ))
    .ok();

    let method = if report.fell_back {
        format!("{} (fallback)", report.strategy)
    } else {
        report.strategy.to_string()
    };
    term.write_line(&format!(
        "  {} in {:.3}s",
        style(method).yellow(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();

    if let Some(range) = report.range {
        term.write_line(&format!(
            "  {} range [{}, {}]",
            style("·").dim(),
            range.min,
            range.max
        ))
        .ok();
    }
}

fn print_pretty_compare(term: &Term, report: &CrossCheckReport) {
    let tally = &report.histogram;
    let verdict = if report.agrees() {
        style("✓ Counters agree").green().bold()
    } else {
        style("✗ Counters disagree").red().bold()
    };
    term.write_line(&verdict.to_string()).ok();
    term.write_line("").ok();

    term.write_line(&format!(
        "  Histogram:   {} duplicates, {} distinct, max multiplicity {}",
        style(tally.duplicates).cyan(),
        tally.distinct,
        tally.max_multiplicity
    ))
    .ok();
    term.write_line(&format!(
        "  Brute force: {} ({})",
        style(report.brute_force).cyan(),
        report.policy
    ))
    .ok();

    if report.divergence() != 0 {
        term.write_line(&format!(
            "  {} divergence {} = pairs beyond one per duplicate ({})",
            style("·").dim(),
            report.divergence(),
            tally.excess_pairs()
        ))
        .ok();
    }
    term.write_line(&format!(
        "  {} {:.3}s",
        style("·").dim(),
        report.duration_ms as f64 / 1000.0
    ))
    .ok();
}

fn print_json<T: serde::Serialize>(report: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    println!("{json}");
    Ok(())
}
