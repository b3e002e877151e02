//! cart-bench: compares the indexed cart view assembler with the
//! nested-loop reference on generated fixtures.
//!
//! Usage:
//!   cart-bench --seed 42 --sizes 50,300,1000 --iterations 20
//!   cart-bench --config assembly.json --json

use anyhow::{bail, Result};
use cartview_core::{
    fixture::CartFixture, reference::assemble_naive, Assembler, AssemblyConfig,
};
use std::env;
use std::time::{Duration, Instant};

#[derive(serde::Serialize)]
struct SizeReport {
    n:          usize,
    indexed_us: f64,
    naive_us:   f64,
    speedup:    f64,
    rows:       usize,
}

#[derive(serde::Serialize)]
struct BenchReport {
    seed:       u64,
    iterations: u32,
    config:     AssemblyConfig,
    sizes:      Vec<SizeReport>,
    /// Indexed time growth from the smallest to the largest size.
    growth:     Option<f64>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64)?;
    let iterations = parse_arg(&args, "--iterations", 20u32)?.max(1);
    let json = args.iter().any(|a| a == "--json");
    let sizes = match string_arg(&args, "--sizes") {
        Some(list) => parse_sizes(list)?,
        None => vec![50, 300, 1000],
    };
    let config = match string_arg(&args, "--config") {
        Some(path) => AssemblyConfig::load(path)?,
        None => AssemblyConfig { log_missing: false, ..AssemblyConfig::default() },
    };

    if !json {
        println!("cart-bench");
        println!("  seed:        {seed}");
        println!("  iterations:  {iterations}");
        println!("  sizes:       {sizes:?}");
        println!("  size_join:   {:?}", config.size_join);
        println!("  missing:     {:?}", config.missing_match);
        println!();
    }

    let assembler = Assembler::new(config.clone());
    let mut reports = Vec::with_capacity(sizes.len());
    for &n in &sizes {
        let report = bench_size(&assembler, n, seed, iterations)?;
        log::info!(
            "n={n}: indexed {:.1}us, naive {:.1}us",
            report.indexed_us, report.naive_us
        );
        reports.push(report);
    }

    let growth = match (reports.first(), reports.last()) {
        (Some(first), Some(last)) if reports.len() > 1 && first.indexed_us > 0.0 => {
            Some(last.indexed_us / first.indexed_us)
        }
        _ => None,
    };

    let report = BenchReport { seed, iterations, config, sizes: reports, growth };
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_summary(&report);
    }
    Ok(())
}

fn bench_size(assembler: &Assembler, n: usize, seed: u64, iterations: u32) -> Result<SizeReport> {
    let fixture = CartFixture::generate(n, seed);

    let indexed = assembler.assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows);
    let naive = assemble_naive(
        assembler.config(),
        &fixture.cart_lines,
        &fixture.catalog_items,
        &fixture.size_rows,
    );
    if indexed.rows != naive {
        bail!("n={n}: indexed and naive assemblers disagree (seed {seed})");
    }

    let indexed_time = best_of(iterations, || {
        assembler.assemble(&fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows).rows.len()
    });
    let naive_time = best_of(iterations, || {
        assemble_naive(assembler.config(), &fixture.cart_lines, &fixture.catalog_items, &fixture.size_rows).len()
    });

    let indexed_us = micros(indexed_time);
    let naive_us = micros(naive_time);
    Ok(SizeReport {
        n,
        indexed_us,
        naive_us,
        speedup: if indexed_us > 0.0 { naive_us / indexed_us } else { 0.0 },
        rows: indexed.rows.len(),
    })
}

fn best_of(iterations: u32, mut run: impl FnMut() -> usize) -> Duration {
    (0..iterations)
        .map(|_| {
            let start = Instant::now();
            std::hint::black_box(run());
            start.elapsed()
        })
        .min()
        .unwrap_or_default()
}

fn micros(d: Duration) -> f64 {
    d.as_secs_f64() * 1_000_000.0
}

fn print_summary(report: &BenchReport) {
    println!("=== BENCH SUMMARY ===");
    println!("  {:>6} | {:>12} | {:>12} | {:>8}", "n", "indexed (us)", "naive (us)", "speedup");
    for s in &report.sizes {
        println!(
            "  {:>6} | {:>12.1} | {:>12.1} | {:>7.1}x",
            s.n, s.indexed_us, s.naive_us, s.speedup
        );
    }
    if let Some(growth) = report.growth {
        println!();
        println!("  indexed growth smallest -> largest: {growth:.1}x");
    }
}

fn parse_sizes(list: &str) -> Result<Vec<usize>> {
    let mut sizes = Vec::new();
    for part in list.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        match part.parse::<usize>() {
            Ok(n) => sizes.push(n),
            Err(e) => bail!("invalid size '{part}' in --sizes: {e}"),
        }
    }
    if sizes.is_empty() {
        bail!("--sizes needs at least one value");
    }
    Ok(sizes)
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match string_arg(args, flag) {
        Some(raw) => raw
            .parse()
            .map_err(|e| anyhow::anyhow!("invalid value '{raw}' for {flag}: {e}")),
        None => Ok(default),
    }
}
