use anyhow::bail;
use clap::Parser;
use paintshop::demand::DemandSpec;
use paintshop::generate;
use paintshop::io::PaintJob;

#[derive(Parser)]
struct Cli {
    /// Number of cars (multi only; binary uses 2 * types)
    #[clap(long, short = 'n', default_value = "20")]
    n_cars: usize,
    #[clap(long, short = 'k', default_value = "10")]
    n_types: usize,
    #[clap(long, short = 's')]
    seed: Option<u64>,
    #[clap(long, short = 'c', default_value_t = false)]
    compact: bool,
    #[clap(long, short = 't', default_value = "binary")]
    r#type: String,
}

fn main() -> anyhow::Result<()> {
    let args = Cli::parse();
    let job = match args.r#type.as_str() {
        "binary" => PaintJob::new(
            "binary",
            generate::random_binary(args.n_types, args.seed),
            &DemandSpec::Binary,
        )?,
        "multi" => {
            let (inst, spec) = generate::random_multi(args.n_cars, args.n_types, args.seed);
            PaintJob::new("multi", inst, &spec)?
        }
        other => bail!("Unknown type: {}", other),
    };
    if args.compact {
        println!("{}", serde_json::to_string(&job.to_json())?);
    } else {
        println!("{}", serde_json::to_string_pretty(&job.to_json())?);
    }
    Ok(())
}
