//! Reading paint jobs from text.
//!
//! Input beginning with `{` is JSON:
//!
//! ```text
//! {"name": "demo", "sequence": ["A", "B", "A", "B"], "black": {"A": 1, "B": 1}}
//! ```
//!
//! (`black` may be omitted for binary demand). Anything else is whitespace
//! separated tokens, starting with a mode:
//!
//! ```text
//! named binary12
//! random binary <n_types> <seed>
//! random multi <n> <n_types> <seed>
//! explicit <n> <label>... <m> (<label> <black>)...    # m = 0 for binary demand
//! ```

use crate::demand::{DemandSpec, TypeDemand, validate};
use crate::instance::SequenceInstance;
use crate::{generate, problems};
use anyhow::{Context, Result, bail};
use proconio::source::Source;
use proconio::source::once::OnceSource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::io::BufRead;
use std::str::FromStr;

/// A validated instance together with its demand.
#[derive(Clone, Debug)]
pub struct PaintJob {
    pub name: String,
    pub instance: SequenceInstance,
    pub demand: TypeDemand,
}

impl PaintJob {
    pub fn new(name: &str, instance: SequenceInstance, spec: &DemandSpec) -> Result<Self> {
        let demand = validate(&instance, spec).with_context(|| format!("job {}", name))?;
        Ok(Self {
            name: name.to_string(),
            instance,
            demand,
        })
    }

    pub fn to_json(&self) -> JobJson {
        let black = match self.demand.to_spec(&self.instance) {
            DemandSpec::Explicit(b) => Some(b),
            DemandSpec::Binary => None,
        };
        JobJson {
            name: Some(self.name.clone()),
            sequence: self.instance.sequence().map(str::to_string).collect(),
            black,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct JobJson {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub sequence: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub black: Option<BTreeMap<String, i64>>,
}

impl JobJson {
    pub fn into_job(self) -> Result<PaintJob> {
        let instance = SequenceInstance::new(&self.sequence);
        let spec = match self.black {
            Some(b) => DemandSpec::Explicit(b),
            None => DemandSpec::Binary,
        };
        PaintJob::new(self.name.as_deref().unwrap_or("json"), instance, &spec)
    }
}

pub fn read_job(input: &str) -> Result<PaintJob> {
    let s = input.trim_start();
    if s.starts_with('{') {
        let parsed: JobJson = serde_json::from_str(s).context("invalid JSON job")?;
        return parsed.into_job();
    }
    if s.is_empty() {
        bail!("empty input");
    }

    let mut src = OnceSource::from(s);
    let mode: String = token(&mut src, "mode")?;
    match mode.as_str() {
        "named" => {
            let name: String = token(&mut src, "problem name")?;
            let p = problems::get_problem(&name)
                .with_context(|| format!("Unknown problem: {}", name))?;
            PaintJob::new(p.problem_name, p.instance(), &p.demand_spec())
        }
        "random" => {
            let kind: String = token(&mut src, "random kind")?;
            match kind.as_str() {
                "binary" => {
                    let n_types: usize = token(&mut src, "n_types")?;
                    let seed: u64 = token(&mut src, "seed")?;
                    let inst = generate::random_binary(n_types, Some(seed));
                    PaintJob::new(
                        &format!("binary-{}-{}", n_types, seed),
                        inst,
                        &DemandSpec::Binary,
                    )
                }
                "multi" => {
                    let n: usize = token(&mut src, "n")?;
                    let n_types: usize = token(&mut src, "n_types")?;
                    let seed: u64 = token(&mut src, "seed")?;
                    let (inst, spec) = generate::random_multi(n, n_types, Some(seed));
                    PaintJob::new(&format!("multi-{}-{}-{}", n, n_types, seed), inst, &spec)
                }
                other => bail!("Unknown random kind: {}", other),
            }
        }
        "explicit" => {
            let n: usize = token(&mut src, "sequence length")?;
            let sequence = (0..n)
                .map(|i| token::<String, _>(&mut src, &format!("label #{}", i)))
                .collect::<Result<Vec<_>>>()?;
            let m: usize = token(&mut src, "demand count")?;
            let mut black = BTreeMap::new();
            for _ in 0..m {
                let label: String = token(&mut src, "demand label")?;
                let b: i64 = token(&mut src, &format!("black count for {}", label))?;
                black.insert(label, b);
            }
            let spec = if m == 0 {
                DemandSpec::Binary
            } else {
                DemandSpec::Explicit(black)
            };
            PaintJob::new("explicit", SequenceInstance::new(&sequence), &spec)
        }
        other => bail!("mode must be 'named', 'random' or 'explicit', got '{}'", other),
    }
}

/// Next whitespace-separated token, parsed as `T`.
fn token<T, R>(src: &mut OnceSource<R>, what: &str) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
    R: BufRead,
{
    let tok = src
        .next_token()
        .with_context(|| format!("unexpected end of input, expected {}", what))?;
    tok.parse()
        .with_context(|| format!("invalid {}: {:?}", what, tok))
}

pub fn read_job_from_stdin() -> Result<PaintJob> {
    use std::io::Read;
    let mut input = String::new();
    std::io::stdin()
        .read_to_string(&mut input)
        .context("Failed to read stdin")?;
    read_job(&input)
}
