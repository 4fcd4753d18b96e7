//! Loan Amortization CLI
//!
//! Command-line interface for computing schedules, running loan batches and
//! replaying slider sessions through the parameter controller

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use loan_amortization::controls::ControlState;
use loan_amortization::loan::load_loans;
use loan_amortization::schedule::ScheduleSummary;
use loan_amortization::{
    compute, AmortizationResult, BatchRunner, ControlConfig, ControlEvent, ControlId, LoanParameters,
    ParameterController, ScheduleSink,
};

#[derive(Parser)]
#[command(name = "loan-amortization", version, about = "Fixed-rate loan amortization schedules")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compute one schedule
    Schedule {
        /// Loan amount
        #[arg(long)]
        principal: f64,
        /// Annual interest rate in percent
        #[arg(long)]
        rate: f64,
        /// Term in years
        #[arg(long)]
        years: u32,
        /// Rows to print to the console
        #[arg(long, default_value_t = 24)]
        rows: usize,
        /// Write the full schedule to a CSV file
        #[arg(long)]
        csv: Option<PathBuf>,
        /// Print the result as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Compute every loan in a CSV file (principal,annual_rate_percent,term_years)
    Batch {
        #[arg(long)]
        input: PathBuf,
        /// Write per-loan summaries to a CSV file
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Replay slider drags through the parameter controller
    Session {
        /// Control range table (defaults to the built-in ranges)
        #[arg(long)]
        controls: Option<PathBuf>,
        /// CONTROL=POS[,POS...]; every position but the last is a live change,
        /// the last one is the release
        #[arg(long = "drag", required = true)]
        drags: Vec<String>,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    match Cli::parse().command {
        Command::Schedule { principal, rate, years, rows, csv, json } => {
            run_schedule(principal, rate, years, rows, csv, json)
        }
        Command::Batch { input, output } => run_batch(input, output),
        Command::Session { controls, drags } => run_session(controls, &drags),
    }
}

fn run_schedule(
    principal: f64,
    rate: f64,
    years: u32,
    rows: usize,
    csv: Option<PathBuf>,
    json: bool,
) -> anyhow::Result<()> {
    let result = compute(principal, rate, years)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result.parameters, &result.summary());
        println!();
        print_rows(&result, rows);
    }

    if let Some(path) = csv {
        let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
        result.write_csv(BufWriter::new(file))?;
        println!("\nFull schedule written to: {}", path.display());
    }

    Ok(())
}

fn run_batch(input: PathBuf, output: Option<PathBuf>) -> anyhow::Result<()> {
    let loans = load_loans(&input).with_context(|| format!("loading loans from {}", input.display()))?;
    println!("Loaded {} loans", loans.len());

    let results = BatchRunner::totals_only().run(&loans);

    let mut out: Box<dyn Write> = match &output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("creating {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };

    writeln!(out, "LoanId,Principal,RatePct,Years,Months,MonthlyPayment,TotalPaid,TotalInterest,Error")?;
    let mut failures = 0;
    for (loan_id, result) in &results {
        match result {
            Ok(r) => writeln!(
                out,
                "{},{:.2},{:.4},{},{},{:.2},{:.2},{:.2},",
                loan_id,
                r.parameters.principal,
                r.parameters.annual_rate_percent,
                r.parameters.term_years,
                r.term_months,
                r.monthly_payment,
                r.total_paid,
                r.total_interest,
            )?,
            Err(e) => {
                failures += 1;
                writeln!(out, "{},,,,,,,,{}", loan_id, e)?;
            }
        }
    }
    out.flush()?;

    if failures > 0 {
        eprintln!("{} of {} loans failed", failures, results.len());
    }
    Ok(())
}

/// Prints label updates and committed summaries as the controller emits them
struct ConsoleSink;

impl ScheduleSink for ConsoleSink {
    fn on_live_change(&mut self, control: ControlId, parameters: &LoanParameters) {
        let label = match control {
            ControlId::Principal => format!("${:.0}", parameters.principal),
            ControlId::Rate => format!("{:.1}%", parameters.annual_rate_percent),
            ControlId::Term => format!("{} years / {} months", parameters.term_years, parameters.term_months()),
        };
        println!("  {:<9} -> {}", control, label);
    }

    fn on_commit(&mut self, result: &AmortizationResult) {
        let (first, last) = result.plot_range();
        println!(
            "  commit: payment ${:.2}, total ${:.2}, interest ${:.2}, chart rows {}..={}",
            result.monthly_payment, result.total_paid, result.total_interest, first, last
        );
    }
}

fn run_session(controls: Option<PathBuf>, drags: &[String]) -> anyhow::Result<()> {
    let config = match controls {
        Some(path) => ControlConfig::from_csv_path(&path)
            .with_context(|| format!("loading control ranges from {}", path.display()))?,
        None => ControlConfig::default(),
    };

    let mut controller = ParameterController::setup(config)?;
    let mut sink = ConsoleSink;
    if let Some(initial) = controller.current_result() {
        println!("Initial:");
        sink.on_commit(&initial);
    }

    for drag in drags {
        let (control, positions) = parse_drag(drag)?;
        println!("Drag {}:", control);

        let (release, adjusting) = positions.split_last().context("drag has no positions")?;
        for &position in adjusting {
            controller.handle_event(ControlEvent::Adjusting { control, position }, &mut sink)?;
        }
        controller.handle_event(ControlEvent::Released { control, position: *release }, &mut sink)?;
        debug_assert_eq!(controller.drag_state(control), ControlState::Idle);
    }

    Ok(())
}

/// Parse `CONTROL=POS[,POS...]`
fn parse_drag(arg: &str) -> anyhow::Result<(ControlId, Vec<i64>)> {
    let Some((name, list)) = arg.split_once('=') else {
        bail!("expected CONTROL=POS[,POS...], got '{}'", arg);
    };
    let control: ControlId = name.parse()?;
    let positions = list
        .split(',')
        .map(|p| p.trim().parse::<i64>().with_context(|| format!("bad position '{}'", p)))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok((control, positions))
}

fn print_summary(params: &LoanParameters, summary: &ScheduleSummary) {
    println!("Loan Amortization");
    println!("=================\n");
    println!("  Principal:      ${:.2}", params.principal);
    println!("  Interest P.A.:  {:.3}%", params.annual_rate_percent);
    println!("  Term:           {} years ({} months)", params.term_years, summary.term_months);
    println!("  Monthly Pay:    ${:.2}", summary.monthly_payment);
    println!("  Total Paid:     ${:.2}", summary.total_paid);
    println!("  Total Interest: ${:.2}", summary.total_interest);
    println!("  Final Balance:  {:.6}", summary.final_balance);
}

fn print_rows(result: &AmortizationResult, rows: usize) {
    println!("{:>5} {:>14} {:>14} {:>16}", "Month", "Interest", "Principal", "Balance");
    println!("{}", "-".repeat(52));

    for row in result.schedule.iter().take(rows) {
        println!(
            "{:>5} {:>14.2} {:>14.2} {:>16.2}",
            row.period, row.interest_portion, row.principal_portion, row.ending_balance
        );
    }

    if result.schedule.len() > rows {
        println!("... ({} more months)", result.schedule.len() - rows);
    }
}
