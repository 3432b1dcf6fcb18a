use raffle_curve::curves::StepSequence;
use raffle_curve::guards::parse_amount;
use raffle_curve::plot::{plot_cost_vs_supply, plot_price_vs_supply};
use raffle_curve::schedule::load_steps;
use raffle_curve::slippage::{compute_max_with_slippage, compute_min_after_slippage};
use raffle_curve::verifier::verify_schedule;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use log::{debug, info};
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "raffle-curve",
    version,
    about = "Stepped bonding-curve ticket pricing + slippage bounds"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Debug logging (RUST_LOG overrides)
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Price a buy or sell against a step schedule
    Quote {
        #[arg(value_enum)]
        side: Side,
        #[arg(long, value_parser = parse_amount)]
        amount: u128,
        #[arg(long, value_parser = parse_amount)]
        supply: u128,
        #[arg(long)]
        steps: PathBuf,
        /// Tolerance in percent, e.g. "0.5"
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue)]
        json: bool,
    },
    /// Turn an estimate into max (buy) and min (sell) bounds
    Bounds {
        #[arg(long, value_parser = parse_amount)]
        estimate: u128,
        #[arg(long)]
        slippage: Option<String>,
    },
    /// Write a per-step CSV (and charts) for a schedule
    Schedule {
        #[arg(long)]
        steps: PathBuf,
        #[arg(long, default_value = "out")]
        out_dir: String,
        #[arg(long)]
        slippage: Option<String>,
        #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
        draw: bool,
    },
    /// Check walked totals against closed-form tier sums
    Verify {
        #[arg(long)]
        steps: PathBuf,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
enum Side {
    Buy,
    Sell,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct QuoteOut {
    side: Side,
    amount: String,
    supply: String,
    quote: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_sof_amount: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    min_sof_amount: Option<String>,
}

#[derive(Serialize)]
struct Row {
    step: usize,
    price: u128,
    range_from: u128,
    range_to: u128,
    tickets: u128,
    step_cost: u128,
    cumulative_cost: u128,
}

fn main() -> Result<()> {
    let args = Args::parse();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if args.verbose { "debug" } else { "info" }),
    )
    .init();

    match args.command {
        Command::Quote { side, amount, supply, steps, slippage, json } => {
            run_quote(side, amount, supply, &steps, slippage.as_deref(), json)
        }
        Command::Bounds { estimate, slippage } => {
            let pct = slippage.as_deref();
            println!("max: {}", compute_max_with_slippage(estimate, pct));
            println!("min: {}", compute_min_after_slippage(estimate, pct));
            Ok(())
        }
        Command::Schedule { steps, out_dir, slippage, draw } => {
            run_schedule(&steps, &out_dir, slippage.as_deref(), draw)
        }
        Command::Verify { steps } => run_verify(&steps),
    }
}

fn run_quote(
    side: Side,
    amount: u128,
    supply: u128,
    steps: &Path,
    slippage: Option<&str>,
    json: bool,
) -> Result<()> {
    let seq = load_steps(steps)?;
    // the CLI is a boundary: surface empty schedules and oversells as errors
    let quote = match side {
        Side::Buy => seq.try_quote_buy(amount, supply),
        Side::Sell => seq.try_quote_sell(amount, supply),
    }
    .with_context(|| format!("{:?} {} at supply {}", side, amount, supply))?;
    debug!("{:?} quote = {}", side, quote);

    let (max_bound, min_bound) = match (side, slippage) {
        (Side::Buy, Some(_)) => (Some(compute_max_with_slippage(quote, slippage)), None),
        (Side::Sell, Some(_)) => (None, Some(compute_min_after_slippage(quote, slippage))),
        (_, None) => (None, None),
    };

    if json {
        let out = QuoteOut {
            side,
            amount: amount.to_string(),
            supply: supply.to_string(),
            quote: quote.to_string(),
            max_sof_amount: max_bound.map(|b| b.to_string()),
            min_sof_amount: min_bound.map(|b| b.to_string()),
        };
        println!("{}", serde_json::to_string(&out)?);
        return Ok(());
    }

    println!("quote: {}", quote);
    if let Some(b) = max_bound {
        println!("maxSofAmount: {}", b);
    }
    if let Some(b) = min_bound {
        println!("minSofAmount: {}", b);
    }
    if let Some(pos) = seq.position(supply) {
        info!(
            "step {} @ {} ({} left in step, next price {:?})",
            pos.step_index, pos.price, pos.remaining_in_step, pos.next_price
        );
    }
    Ok(())
}

fn run_schedule(steps: &Path, out_dir: &str, slippage: Option<&str>, draw: bool) -> Result<()> {
    let seq = load_steps(steps)?;
    create_dir_all(out_dir)?;
    write_schedule_csv(out_dir, &seq, slippage)?;
    if draw {
        plot_price_vs_supply(&seq, &format!("{}/price_vs_supply.png", out_dir))?;
        plot_cost_vs_supply(&seq, &format!("{}/cost_vs_supply.png", out_dir))?;
    }
    info!("wrote schedule for {} steps to {}", seq.steps().len(), out_dir);
    Ok(())
}

fn write_schedule_csv(out_dir: &str, seq: &StepSequence, slippage: Option<&str>) -> Result<()> {
    let file_path = format!("{}/schedule.csv", out_dir);
    let mut file = File::create(&file_path)?;

    let full_cost = seq.quote_buy(seq.capacity(), 0)?;

    // Write metadata header
    writeln!(file, "# Raffle Ticket Step Schedule")?;
    writeln!(file, "# Steps: {}, capacity: {}", seq.steps().len(), seq.capacity())?;
    writeln!(file, "# Full-curve cost: {}", full_cost)?;
    if let Some(pct) = slippage {
        writeln!(file, "# Bounds on full-curve cost at {}%:", pct)?;
        writeln!(file, "#   maxSofAmount: {}", compute_max_with_slippage(full_cost, Some(pct)))?;
        writeln!(file, "#   minSofAmount: {}", compute_min_after_slippage(full_cost, Some(pct)))?;
    }
    writeln!(file)?;

    // header row comes from Row's field names
    let mut wtr = csv::Writer::from_writer(file);
    let mut range_from = 0u128;
    let mut cumulative = 0u128;
    for (i, step) in seq.steps().iter().enumerate() {
        let tickets = step.range_to - range_from;
        let step_cost = seq.quote_buy(tickets, range_from)?;
        cumulative = cumulative
            .checked_add(step_cost)
            .ok_or_else(|| anyhow!("cumulative cost overflows at step {}", i))?;
        wtr.serialize(Row {
            step: i,
            price: step.price,
            range_from,
            range_to: step.range_to,
            tickets,
            step_cost,
            cumulative_cost: cumulative,
        })?;
        range_from = step.range_to;
    }
    wtr.flush()?;
    Ok(())
}

fn run_verify(steps: &Path) -> Result<()> {
    let seq = load_steps(steps)?;
    let rep = verify_schedule(&seq)?;
    println!(
        "steps={} capacity={} buy={} sell={} closed={} monotone={}",
        rep.steps, rep.capacity, rep.buy_total, rep.sell_total, rep.closed_total, rep.monotone_ok
    );
    if !rep.is_consistent() {
        return Err(anyhow!("schedule failed verification"));
    }
    Ok(())
}
