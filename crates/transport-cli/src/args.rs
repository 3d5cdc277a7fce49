//! Command-line arguments.
//!
//! `particle-transport <config.json> <scale> [scale ...] [seed=<u64>] [batches=<n>]
//! [out=<dir>] [save_hist]`

use std::path::PathBuf;

use thiserror::Error;

pub const USAGE: &str = "\
Usage: particle-transport <config.json> <scale> [scale ...] [options]

  <scale>        characteristic size: slab length, sphere radius,
                 finite slab depth, or double slab split ratio
Options:
  seed=<u64>     random seed (overrides run.seed)
  batches=<n>    number of batches (overrides run.batches)
  out=<dir>      output directory (overrides run.output_dir)
  save_hist      write the first trajectory of each outcome
  -h, --help     show this message";

#[derive(Debug, Error, PartialEq)]
pub enum UsageError {
    #[error("missing configuration file")]
    MissingConfig,
    #[error("missing scale")]
    MissingScale,
    #[error("could not parse {name} value '{value}'")]
    BadValue { name: &'static str, value: String },
    #[error("unrecognised argument '{0}'")]
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(Args),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub config: PathBuf,
    pub scales: Vec<f64>,
    pub seed: Option<u64>,
    pub batches: Option<usize>,
    pub output_dir: Option<PathBuf>,
    pub save_hist: bool,
}

fn parse_value<T: std::str::FromStr>(name: &'static str, value: &str) -> Result<T, UsageError> {
    value.trim().parse().map_err(|_| UsageError::BadValue {
        name,
        value: value.to_string(),
    })
}

/// Parse everything after the program name
pub fn parse<I>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut config = None;
    let mut scales = Vec::new();
    let mut seed = None;
    let mut batches = None;
    let mut output_dir = None;
    let mut save_hist = false;

    for arg in args {
        let arg = arg.as_ref();
        if arg == "-h" || arg == "--help" || arg == "help" {
            return Ok(Command::Help);
        }
        if arg == "save_hist" {
            save_hist = true;
            continue;
        }
        if let Some(v) = arg.strip_prefix("seed=") {
            seed = Some(parse_value("seed", v)?);
            continue;
        }
        if let Some(v) = arg.strip_prefix("batches=") {
            let n: usize = parse_value("batches", v)?;
            if n == 0 {
                return Err(UsageError::BadValue {
                    name: "batches",
                    value: v.to_string(),
                });
            }
            batches = Some(n);
            continue;
        }
        if let Some(v) = arg.strip_prefix("out=") {
            output_dir = Some(PathBuf::from(v));
            continue;
        }
        if arg.contains('=') {
            return Err(UsageError::Unknown(arg.to_string()));
        }

        if config.is_none() {
            config = Some(PathBuf::from(arg));
        } else {
            scales.push(parse_value("scale", arg)?);
        }
    }

    let config = config.ok_or(UsageError::MissingConfig)?;
    if scales.is_empty() {
        return Err(UsageError::MissingScale);
    }

    Ok(Command::Run(Args {
        config,
        scales,
        seed,
        batches,
        output_dir,
        save_hist,
    }))
}
