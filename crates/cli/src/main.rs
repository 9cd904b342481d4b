use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use linprog2d::lp2::DEFAULT_SEED;
use linprog2d::rand2::{draw_feasible, ProblemCfg, ReplayToken};
use linprog2d::{Order, Outcome, Problem, RawResult, SolveCfg, Solver};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::fmt::SubscriberBuilder;

mod input;
mod provenance;

#[derive(Parser)]
#[command(name = "linprog2d")]
#[command(about = "Two-dimensional LP solver")]
struct Cmd {
    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Minimize cx·x + cy·y subject to the constraints in --input
    Solve {
        #[arg(long, allow_hyphen_values = true)]
        cx: f64,
        #[arg(long, allow_hyphen_values = true)]
        cy: f64,
        /// Constraint file (.csv/.parquet with gx,gy,h columns, or .json)
        #[arg(long)]
        input: PathBuf,
        /// Seed for the processing order
        #[arg(long)]
        seed: Option<u64>,
        /// Write the result JSON here, plus a provenance sidecar
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Time solves of random feasible problems
    Bench {
        #[arg(long, value_delimiter = ',', default_values_t = [100usize, 1_000, 10_000])]
        n: Vec<usize>,
        #[arg(long, default_value_t = 10)]
        repeat: u32,
        #[arg(long, default_value_t = 6328)]
        seed: u64,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    match cmd.action {
        Action::Solve {
            cx,
            cy,
            input,
            seed,
            out,
        } => solve(cx, cy, &input, seed, out.as_deref()),
        Action::Bench { n, repeat, seed } => bench(&n, repeat, seed),
        Action::Report => report(),
    }
}

/// Result record as printed and written by `solve`.
#[derive(Debug, Serialize)]
struct SolveReport {
    status: &'static str,
    code: u32,
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    /// Objective value at the optimum (POINT and EDGE only).
    value: Option<f64>,
    n: usize,
}

impl SolveReport {
    fn new(problem: &Problem, res: RawResult) -> Self {
        let value = res
            .outcome()
            .and_then(|o| o.point())
            .map(|p| problem.value(p));
        Self {
            status: res.status.name(),
            code: res.status.code(),
            x1: res.x1,
            y1: res.y1,
            x2: res.x2,
            y2: res.y2,
            value,
            n: problem.len(),
        }
    }
}

fn solve_file(cx: f64, cy: f64, input: &Path, seed: Option<u64>) -> Result<SolveReport> {
    let cols = input::load(input)?;
    tracing::debug!(rows = cols.len(), "loaded constraints");
    let problem = Problem::from_arrays(cx, cy, &cols.gx, &cols.gy, &cols.h)
        .with_context(|| format!("building problem from {}", input.display()))?;
    let cfg = match seed {
        Some(seed) => SolveCfg::with_order(Order::Random { seed }),
        None => SolveCfg::default(),
    };
    let res = Solver::new(cfg).solve(&problem);
    if let Err(err) = &res {
        tracing::warn!(%err, "solve failed");
    }
    Ok(SolveReport::new(&problem, res.into()))
}

fn solve(cx: f64, cy: f64, input: &Path, seed: Option<u64>, out: Option<&Path>) -> Result<()> {
    tracing::info!(cx, cy, input = %input.display(), ?seed, "solve");
    let report = solve_file(cx, cy, input, seed)?;
    tracing::info!(status = report.status, n = report.n, "solved");
    let text = serde_json::to_string_pretty(&report)?;
    println!("{text}");

    if let Some(out) = out {
        if let Some(parent) = out.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(out, &text).with_context(|| format!("writing {}", out.display()))?;
        let sidecar = provenance::Sidecar {
            build: provenance::Build::current(),
            objective: [cx, cy],
            input,
            rows: report.n,
            seed: seed.unwrap_or(DEFAULT_SEED),
            status: report.status,
            result: out,
        };
        let path = provenance::write(&sidecar)?;
        tracing::info!(path = %path.display(), "wrote provenance");
    }
    Ok(())
}

/// Timing summary for one problem size.
#[derive(Debug, Default, Serialize)]
struct BenchRow {
    n: usize,
    repeat: u32,
    mean_us: f64,
    min_us: f64,
    max_us: f64,
    statuses: BTreeMap<&'static str, u32>,
}

fn bench_rows(ns: &[usize], repeat: u32, seed: u64) -> Result<Vec<BenchRow>> {
    if repeat == 0 {
        bail!("--repeat must be at least 1");
    }
    let mut solver = Solver::default();
    let mut rows = Vec::with_capacity(ns.len());
    for (i, &n) in ns.iter().enumerate() {
        let cfg = ProblemCfg {
            n,
            ..ProblemCfg::default()
        };
        let mut row = BenchRow {
            n,
            repeat,
            min_us: f64::INFINITY,
            ..BenchRow::default()
        };
        let mut total = 0.0;
        for j in 0..repeat {
            let tok = ReplayToken::new(seed, ((i as u64) << 32) | u64::from(j));
            let draw = draw_feasible(cfg, tok);
            let t0 = Instant::now();
            let out: Result<Outcome, _> = solver.solve(&draw.problem);
            let us = t0.elapsed().as_secs_f64() * 1e6;
            let status = RawResult::from(out).status.name();
            tracing::debug!(n, j, status, us, "bench_solve");
            total += us;
            row.min_us = row.min_us.min(us);
            row.max_us = row.max_us.max(us);
            *row.statuses.entry(status).or_default() += 1;
        }
        row.mean_us = total / f64::from(repeat);
        tracing::info!(n, mean_us = row.mean_us, "bench");
        rows.push(row);
    }
    Ok(rows)
}

fn bench(ns: &[usize], repeat: u32, seed: u64) -> Result<()> {
    let rows = bench_rows(ns, repeat, seed)?;
    let obj = serde_json::json!({
        "seed": seed,
        "rows": rows,
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

fn report() -> Result<()> {
    let build = provenance::Build::current();
    println!("{}", serde_json::to_string_pretty(&build)?);
    Ok(())
}
