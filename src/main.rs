//! calckit CLI
//!
//! Command-line interface over the calculator engines

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use log::info;

use calckit::amortization::{generate_amortization, write_schedule_csv, LoanSummary};
use calckit::batch::{load_scenarios, write_results, BatchRunner};
use calckit::math::format_currency;
use calckit::{Assumptions, CalculatorKind, Category};

#[derive(Debug, Parser)]
#[command(name = "calckit", version, about = "Personal finance calculators")]
struct Cli {
    /// Directory holding tax_brackets.csv and parameters.csv (built-in values when omitted)
    #[arg(long, global = true)]
    assumptions: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List every calculator by category
    List,

    /// Run one calculator on a JSON input record
    Run {
        /// Calculator slug, e.g. `credit-card-payoff`
        slug: String,

        /// JSON input file; `-` or omitted reads stdin
        #[arg(long, short)]
        input: Option<PathBuf>,
    },

    /// Print a loan summary and export its amortization schedule
    Schedule {
        #[arg(long)]
        principal: f64,

        /// Annual rate, percent
        #[arg(long)]
        rate: f64,

        #[arg(long)]
        years: u32,

        /// First payment falls one month after this date (today when omitted)
        #[arg(long)]
        start: Option<NaiveDate>,

        /// Schedule CSV destination; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },

    /// Price every loan scenario in a CSV file
    Batch {
        /// CSV with columns id,principal,rate,years
        #[arg(long, short)]
        input: PathBuf,

        /// Results CSV destination; stdout when omitted
        #[arg(long, short)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let assumptions = load_assumptions(cli.assumptions.as_deref())?;

    match cli.command {
        Command::List => list(),
        Command::Run { slug, input } => run(&slug, input.as_deref(), &assumptions)?,
        Command::Schedule {
            principal,
            rate,
            years,
            start,
            output,
        } => schedule(principal, rate, years, start, output.as_deref())?,
        Command::Batch { input, output } => batch(&input, output.as_deref())?,
    }

    Ok(())
}

fn load_assumptions(dir: Option<&Path>) -> Result<Assumptions> {
    match dir {
        Some(dir) => {
            let assumptions = Assumptions::from_csv_path(dir)
                .with_context(|| format!("failed to load assumptions from {}", dir.display()))?;
            info!("loaded assumptions from {}", dir.display());
            Ok(assumptions)
        }
        None => Ok(Assumptions::default()),
    }
}

/// Stdout, or a newly created file
fn open_output(path: Option<&Path>) -> Result<Box<dyn Write>> {
    match path {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdout().lock())),
    }
}

fn list() {
    for category in Category::ALL {
        println!("{}", category.label());
        for kind in CalculatorKind::by_category(category) {
            println!("  {:<24} {}", kind.slug(), kind.name());
        }
        println!();
    }
}

fn run(slug: &str, input: Option<&Path>, assumptions: &Assumptions) -> Result<()> {
    let kind: CalculatorKind = slug.parse()?;

    let mut raw = String::new();
    match input {
        Some(path) if path != Path::new("-") => {
            File::open(path)
                .and_then(|mut f| f.read_to_string(&mut raw))
                .with_context(|| format!("failed to read {}", path.display()))?;
        }
        _ => {
            io::stdin()
                .read_to_string(&mut raw)
                .context("failed to read stdin")?;
        }
    }

    let record: serde_json::Value =
        serde_json::from_str(&raw).context("input is not valid JSON")?;
    let output = kind
        .run_json(record, assumptions)
        .with_context(|| format!("{} failed", kind.name()))?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn schedule(
    principal: f64,
    rate: f64,
    years: u32,
    start: Option<NaiveDate>,
    output: Option<&Path>,
) -> Result<()> {
    anyhow::ensure!(principal > 0.0, "principal must be positive");
    anyhow::ensure!(rate >= 0.0, "rate must not be negative");
    anyhow::ensure!(years >= 1, "years must be at least 1");

    let start = start.unwrap_or_else(|| chrono::Local::now().date_naive());
    let months = years * 12;
    let summary = LoanSummary::compute(principal, rate, months);

    eprintln!("Loan: {} at {}% for {} years", format_currency(principal), rate, years);
    eprintln!("  Monthly payment: {}", format_currency(summary.monthly_payment));
    eprintln!("  Total payment:   {}", format_currency(summary.total_payment));
    eprintln!("  Total interest:  {}", format_currency(summary.total_interest));

    let rows = generate_amortization(principal, rate, months, start);
    write_schedule_csv(&rows, open_output(output)?).context("failed to write schedule")?;

    if let Some(path) = output {
        eprintln!("Wrote {} payments to {}", rows.len(), path.display());
    }
    Ok(())
}

fn batch(input: &Path, output: Option<&Path>) -> Result<()> {
    let scenarios = load_scenarios(input)
        .with_context(|| format!("failed to load scenarios from {}", input.display()))?;

    let results = BatchRunner.run_batch(&scenarios);
    let rejected = results.iter().filter(|r| r.error.is_some()).count();

    write_results(&results, open_output(output)?).context("failed to write results")?;

    eprintln!("Priced {} scenarios ({} rejected)", results.len(), rejected);
    Ok(())
}
