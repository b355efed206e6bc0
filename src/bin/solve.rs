use clap::Parser;
use paintshop::evaluate::score;
use paintshop::solver::{ConstrainedSolver, Exhaustive, SolveStatus};
use paintshop::{formulation, greedy, io};

/// Reads a paint job on stdin and colors it greedily.
#[derive(Parser, Debug)]
struct Cli {
    /// Also search for the optimum exhaustively (small instances only)
    #[clap(long, default_value_t = false)]
    exact: bool,
    /// Largest instance the exhaustive search accepts
    #[clap(long, default_value_t = 24)]
    max_vars: usize,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let job = io::read_job_from_stdin()?;
    eprintln!(
        "job {}: {} cars, {} types",
        job.name,
        job.instance.len(),
        job.instance.num_types()
    );

    let stime = std::time::Instant::now();
    let coloring = greedy::assign(&job.instance, &job.demand)?;
    let s = score(&job.instance, &job.demand, &coloring)?;
    println!("{}", coloring);
    eprintln!("!log time {:.3}", stime.elapsed().as_secs_f64());
    eprintln!("!log status {}", if s.is_feasible() { "AC" } else { "WA" });
    eprintln!("!log switches {}", s.switches);

    if cli.exact {
        let system = formulation::build(&job.instance, &job.demand)?;
        let solver = Exhaustive {
            max_vars: cli.max_vars,
        };
        let sol = solver.solve(&system)?;
        match (sol.status, sol.assignment, sol.objective) {
            (SolveStatus::Optimal, Some(best), Some(obj)) => {
                println!("{}", best);
                eprintln!("!log optimum {}", obj);
                eprintln!("!log gap {}", s.switches as f64 - obj);
            }
            (status, _, _) => eprintln!("!log exact {:?}", status),
        }
    }
    Ok(())
}
