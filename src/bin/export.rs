use anyhow::bail;
use clap::Parser;
use paintshop::{formulation, io, qubo};
use serde::Serialize;

/// Reads a paint job on stdin and writes the exact formulation or its QUBO.
#[derive(Parser, Debug)]
struct Cli {
    /// lp | qubo | ising | system
    #[clap(long, short = 'f', default_value = "lp")]
    format: String,
    /// QUBO penalty weight; defaults to the number of cars, which is always sound
    #[clap(long, short = 'p')]
    penalty: Option<f64>,
    #[clap(long, short = 'c', default_value_t = false)]
    compact: bool,
}

#[derive(Serialize)]
struct IsingJson {
    h: Vec<f64>,
    j: Vec<(usize, usize, f64)>,
    offset: f64,
}

fn print_json<T: Serialize>(v: &T, compact: bool) -> anyhow::Result<()> {
    if compact {
        println!("{}", serde_json::to_string(v)?);
    } else {
        println!("{}", serde_json::to_string_pretty(v)?);
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let job = io::read_job_from_stdin()?;
    let system = formulation::build(&job.instance, &job.demand)?;
    let penalty = cli.penalty.unwrap_or_else(|| qubo::penalty_bound(&system));
    match cli.format.as_str() {
        "lp" => print!("{}", system.to_lp()),
        "system" => print_json(&system, cli.compact)?,
        "qubo" => {
            let model = qubo::reduce(&system, penalty)?;
            eprintln!("!log penalty {}", penalty);
            eprintln!("!log terms {}", model.len());
            print_json(&model.to_serialized(), cli.compact)?;
        }
        "ising" => {
            let ising = qubo::reduce(&system, penalty)?.to_ising();
            eprintln!("!log penalty {}", penalty);
            print_json(
                &IsingJson {
                    h: ising.h,
                    j: ising.j.into_iter().map(|((a, b), v)| (a, b, v)).collect(),
                    offset: ising.offset,
                },
                cli.compact,
            )?;
        }
        other => bail!("Unknown format: {}", other),
    }
    Ok(())
}
