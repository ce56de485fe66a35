use riskfx::logistic::LogisticFeeParams;
use riskfx::plot::plot_fee_vs_volume;
use riskfx::verifier::verify_logistic;
use riskfx::word::{parse_positive, parse_uint_saturating, to_hex, Q64_F64};
use riskfx::{logistic_fee_x64, price_divergence};

use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use primitive_types::U256;
use serde::Serialize;
use std::fs::{create_dir_all, File};
use std::io::Write;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "riskfx",
    version,
    about = "Fixed-point AMM risk parameters encoded as 256-bit ABI words"
)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Print {"value", "word"} JSON instead of the bare word
    /// (price-divergence and logistic-fee; curve always writes CSV)
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    json: bool,
    /// Debug logging on stderr; curve also prints its verification report
    #[arg(long, global = true, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 2^128 − min/max of two scaled spot prices
    PriceDivergence {
        #[arg(allow_hyphen_values = true)]
        v3_spot: String,
        #[arg(allow_hyphen_values = true)]
        v2_outlier: String,
    },
    /// Logistic fee for a volume, in 64.64
    LogisticFee {
        #[arg(allow_hyphen_values = true)]
        x: String,
    },
    /// Sweep the fee curve into fee_curve.csv (+ chart) and verify it
    Curve {
        #[arg(long, default_value_t = 1_200_000)]
        max_volume: u64,
        #[arg(long, default_value_t = 1_000)]
        step: u64,
        #[arg(long, default_value = "out")]
        out_dir: String,
        #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
        draw: bool,
    },
}

#[derive(Serialize)]
struct WordOut {
    value: String,
    word: String,
}

#[derive(Serialize)]
struct Row {
    volume: u64,
    region: &'static str,
    fee_pct: f64,
    word: String,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "riskfx=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    // stdout carries the word; logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    match &args.command {
        Command::PriceDivergence { v3_spot, v2_outlier } => {
            let a = parse_positive("v3_spot", v3_spot)?;
            let b = parse_positive("v2_outlier", v2_outlier)?;
            emit(price_divergence(a, b)?, args.json)
        }
        Command::LogisticFee { x } => {
            let x = parse_uint_saturating("x", x)?;
            emit(logistic_fee_x64(x)?, args.json)
        }
        Command::Curve { max_volume, step, out_dir, draw } => {
            run_curve(*max_volume, *step, out_dir, *draw, args.verbose)
        }
    }
}

fn emit(value: U256, json: bool) -> Result<()> {
    let word = to_hex(value);
    if json {
        let out = WordOut { value: value.to_string(), word };
        println!("{}", serde_json::to_string(&out)?);
    } else {
        println!("{}", word);
    }
    Ok(())
}

fn run_curve(max_volume: u64, step: u64, out_dir: &str, draw: bool, verbose: bool) -> Result<()> {
    let params = LogisticFeeParams::default();
    let rep = verify_logistic(&params, max_volume, step)?;
    info!(
        samples = rep.samples,
        logistic = rep.logistic_samples,
        monotone = rep.monotone_ok,
        clamp_is_floor = rep.clamp_is_floor,
        "curve verified"
    );
    if verbose {
        println!(
            "samples={} logistic={} min={} max={} monotone={} clamp_is_floor={}",
            rep.samples, rep.logistic_samples, rep.min_word, rep.max_word, rep.monotone_ok, rep.clamp_is_floor
        );
    }
    if !rep.monotone_ok {
        return Err(anyhow!("fee curve is not non-increasing over [0, {}]", max_volume));
    }

    create_dir_all(out_dir)?;
    write_curve_csv(out_dir, &params, max_volume, step)?;
    if draw {
        plot_fee_vs_volume(&params, max_volume, &format!("{}/fee_vs_volume.png", out_dir))?;
    }
    Ok(())
}

fn write_curve_csv(out_dir: &str, params: &LogisticFeeParams, max_volume: u64, step: u64) -> Result<()> {
    let file_path = format!("{}/fee_curve.csv", out_dir);
    let mut file = File::create(&file_path)?;

    // Write metadata header
    writeln!(file, "# Logistic fee curve (64.64)")?;
    writeln!(file, "# Params: {}", serde_json::to_string(params)?)?;
    writeln!(file, "# Sweep: 0..={} step {}", max_volume, step)?;
    writeln!(file, "")?;

    let mut wtr = csv::Writer::from_writer(file);
    let mut x = 0u64;
    loop {
        let xv = U256::from(x);
        let word = params.fee_x64(xv)?;
        wtr.serialize(Row {
            volume: x,
            region: params.region(xv).label(),
            fee_pct: word.low_u128() as f64 / Q64_F64 * 100.0,
            word: to_hex(word),
        })?;
        match x.checked_add(step) {
            Some(next) if next <= max_volume => x = next,
            _ => break,
        }
    }
    wtr.flush()?;
    debug!(path = %file_path, "curve written");
    Ok(())
}
