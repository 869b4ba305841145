//! Pool demo command
//!
//! Builds a pool of sample models, checks every one of them out, runs a
//! prediction on each and releases them again, printing the pool state at
//! every step. Output depends only on the arguments.

use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use log::info;
use reservoir_core::{PoolConfig, PoolError, SampleModel};
use reservoir_pool::{shared, ModelPool};

/// Inputs every model is asked to predict on
const DEMO_INPUTS: [i64; 3] = [1, 2, 3];

/// Arguments for the demo command
#[derive(Args)]
pub struct DemoArgs {
    /// Number of models to create
    #[clap(long, default_value_t = 3)]
    pub models: usize,

    /// Base seed; model `i` is seeded with `seed + i`
    #[clap(long, default_value_t = 0)]
    pub seed: u64,

    /// Simulated load time for each model, in milliseconds
    #[clap(long, default_value_t = 0)]
    pub init_delay_ms: u64,

    /// Optional TOML pool configuration
    #[clap(long)]
    pub config: Option<PathBuf>,
}

/// Run the demo against a pool built from `config`, writing its transcript
/// to `out`
pub fn execute(args: &DemoArgs, config: PoolConfig, out: &mut impl Write) -> Result<()> {
    run(args, config, out).context("Pool demo failed")
}

fn run(args: &DemoArgs, config: PoolConfig, out: &mut impl Write) -> reservoir_core::Result<()> {
    let pool = ModelPool::<SampleModel>::new(config);
    writeln!(out, "Empty pool created: {}", pool)?;

    writeln!(out, "Creating some models...")?;
    let delay = Duration::from_millis(args.init_delay_ms);
    for i in 0..args.models {
        let seed = args.seed.wrapping_add(i as u64);
        pool.add(shared(SampleModel::load(seed, delay)))?;
    }
    writeln!(out, "{}", pool)?;

    writeln!(out, "Locking models...")?;
    let leases = (0..args.models)
        .map(|_| pool.get())
        .collect::<Result<Vec<_>, PoolError>>()?;
    writeln!(out, "{}", pool)?;
    info!("Locked {} models", leases.len());

    writeln!(out, "Running predictions:")?;
    let count = leases.len();
    for (i, mut lease) in leases.into_iter().enumerate() {
        let outputs = lease.predict(&DEMO_INPUTS);
        writeln!(out, "Model {}", i + 1)?;
        writeln!(out, "\tx={:?}, f(x)={:?}", DEMO_INPUTS, outputs)?;
        writeln!(out, "\tReleasing model.")?;
        pool.release(lease)?;
        writeln!(out, "\t{}", pool)?;
        if i + 1 < count {
            writeln!(out)?;
        }
    }

    Ok(())
}
