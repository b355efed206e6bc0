use anyhow::bail;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use itertools::Itertools;
use paintshop::demand::{DemandSpec, validate};
use paintshop::evaluate::switches;
use paintshop::solver::{ConstrainedSolver, Exhaustive};
use paintshop::{formulation, generate, greedy};
use rayon::prelude::*;

/// Compares greedy switch counts with the exhaustive optimum over many seeds.
#[derive(Parser, Debug)]
struct Args {
    #[clap(long, short = 't', default_value = "binary")]
    r#type: String,
    /// Number of types
    #[clap(long, short = 'k', default_value_t = 8)]
    n_types: usize,
    /// Number of cars (multi only)
    #[clap(long, short = 'n', default_value_t = 16)]
    n_cars: usize,
    #[clap(long, default_value_t = 0)]
    first_seed: u64,
    /// Number of seeds, at least one
    #[clap(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    seeds: u64,
    #[clap(long, short = 'j', default_value_t = 0)]
    threads: usize,
}

struct Row {
    seed: u64,
    greedy: usize,
    optimum: usize,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    if args.threads > 0 {
        rayon::ThreadPoolBuilder::new()
            .num_threads(args.threads)
            .build_global()?;
    }
    if !matches!(args.r#type.as_str(), "binary" | "multi") {
        bail!("Unknown type: {}", args.r#type);
    }

    let pb = ProgressBar::new(args.seeds);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("=> "),
    );

    // The exhaustive search parallelizes internally; seeds run in parallel too.
    let solver = Exhaustive::default();
    let rows = (args.first_seed..args.first_seed + args.seeds)
        .into_par_iter()
        .map(|seed| -> anyhow::Result<Row> {
            let (inst, spec) = if args.r#type == "binary" {
                (
                    generate::random_binary(args.n_types, Some(seed)),
                    DemandSpec::Binary,
                )
            } else {
                generate::random_multi(args.n_cars, args.n_types, Some(seed))
            };
            let demand = validate(&inst, &spec)?;
            let g = switches(&greedy::assign(&inst, &demand)?);
            let sol = solver.solve(&formulation::build(&inst, &demand)?)?;
            let Some(opt) = sol.objective else {
                bail!("seed {}: exhaustive search returned {:?}", seed, sol.status);
            };
            pb.inc(1);
            Ok(Row {
                seed,
                greedy: g,
                optimum: opt as usize,
            })
        })
        .collect::<anyhow::Result<Vec<_>>>()?;
    pb.finish_and_clear();

    let optimal = rows.iter().filter(|r| r.greedy == r.optimum).count();
    let mean = |f: fn(&Row) -> usize| rows.iter().map(f).sum::<usize>() as f64 / rows.len() as f64;
    let worst = rows.iter().max_by_key(|r| (r.greedy.saturating_sub(r.optimum), r.seed));
    eprintln!("!log mean_greedy {:.3}", mean(|r| r.greedy));
    eprintln!("!log mean_optimum {:.3}", mean(|r| r.optimum));
    eprintln!("!log greedy_optimal {}/{}", optimal, rows.len());
    if let Some(w) = worst {
        eprintln!("!log worst_seed {} ({} vs {})", w.seed, w.greedy, w.optimum);
    }
    println!(
        "{}",
        rows.iter()
            .map(|r| format!("{} {} {}", r.seed, r.greedy, r.optimum))
            .join("\n")
    );
    Ok(())
}
