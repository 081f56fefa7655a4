//! string-evolver CLI - evolve a single target or sweep a parameter.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use log::info;
use rand::prelude::SeedableRng;
use rand_pcg::Pcg64;
use string_evolver::{
    Alphabet, EvolutionConfig, Target,
    algorithms::elitist::{RunOutcome, evolve},
    sweep::SweepPlan,
};

#[derive(Parser, Debug)]
#[command(name = "string-evolver")]
#[command(about = "Evolve random strings toward a target with an elitist genetic algorithm")]
struct Cli {
    /// Symbols candidates are drawn from (default: ASCII letters, digits, punctuation)
    #[arg(long, global = true)]
    alphabet: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Evolve toward one target
    Run {
        /// Target text; a random target is generated when omitted
        #[arg(short, long, conflicts_with = "length")]
        target: Option<String>,

        /// Length of the random target
        #[arg(short, long, default_value_t = 100)]
        length: usize,

        /// JSON configuration file (defaults are used when omitted)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Seed for the random stream (random when omitted)
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the outcome as JSON to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Run every case of a sweep plan and report (value, score) pairs
    Sweep {
        /// JSON sweep plan (defaults to a population size sweep)
        #[arg(short, long)]
        plan: Option<PathBuf>,

        /// Override the plan seed
        #[arg(short, long)]
        seed: Option<u64>,

        /// Write the report to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Emit CSV instead of JSON
        #[arg(long)]
        csv: bool,
    },
    /// Print the default configuration and sweep plan as JSON
    Defaults,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let alphabet = match &cli.alphabet {
        Some(symbols) => Alphabet::new(symbols).context("invalid alphabet")?,
        None => Alphabet::default(),
    };

    match cli.command {
        Command::Run {
            target,
            length,
            config,
            seed,
            output,
        } => {
            let config = match config {
                Some(path) => EvolutionConfig::from_file(&path)
                    .with_context(|| format!("loading config {}", path.display()))?,
                None => EvolutionConfig::default(),
            };
            let seed = seed.unwrap_or_else(rand::random);
            let mut rng = Pcg64::seed_from_u64(seed);
            let target = match target {
                Some(text) => Target::new(&text, &alphabet)?,
                None => Target::random(length, &alphabet, &mut rng)?,
            };
            info!("target ({} symbols, seed {}): {}", target.len(), seed, target);

            let start = Instant::now();
            let outcome = evolve(&target, &alphabet, &config, &mut rng)?;
            info!("run finished in {:.2?}", start.elapsed());
            print_outcome(&outcome, target.len());

            if let Some(path) = output {
                let file = File::create(&path).with_context(|| format!("creating {}", path.display()))?;
                serde_json::to_writer_pretty(BufWriter::new(file), &outcome)?;
                info!("outcome written to {}", path.display());
            }
        }
        Command::Sweep {
            plan,
            seed,
            output,
            csv,
        } => {
            let mut plan = match plan {
                Some(path) => {
                    SweepPlan::from_file(&path).with_context(|| format!("loading plan {}", path.display()))?
                }
                None => SweepPlan::default(),
            };
            if let Some(seed) = seed {
                plan.seed = seed;
            }
            info!(
                "sweeping {} over {} cases (seed {})",
                plan.parameter.name(),
                plan.cases.len(),
                plan.seed
            );
            let report = plan.run(&alphabet)?;

            match (output, csv) {
                (Some(path), true) => report.write_csv(BufWriter::new(File::create(&path)?))?,
                (Some(path), false) => report.write_json(BufWriter::new(File::create(&path)?))?,
                (None, true) => report.write_csv(io::stdout().lock())?,
                (None, false) => report.write_json(io::stdout().lock())?,
            }
        }
        Command::Defaults => {
            println!("{}", serde_json::to_string_pretty(&EvolutionConfig::default())?);
            println!("{}", serde_json::to_string_pretty(&SweepPlan::default())?);
        }
    }
    Ok(())
}

fn print_outcome(outcome: &RunOutcome, length: usize) {
    if outcome.converged() {
        println!("Perfect solution found in generation {}", outcome.generation);
    } else {
        println!("No perfect solution after {} generations", outcome.generation);
    }
    println!("Best solution: {}", outcome.best);
    println!("Fitness score: {}/{}", outcome.fitness, length);
}
