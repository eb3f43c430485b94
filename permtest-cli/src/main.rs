//! permtest CLI: two-group permutation tests and single-value summaries.

mod format;
mod logging;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use permtest_core::{Result, Summarizable};
use permtest_io::{read_numbers_path, read_numbers_paths};
use permtest_stats::descriptive::{summarize, Statistic};
use permtest_stats::PermutationTest;
use tracing::debug;

use crate::format::{format_general, format_shortest};

#[derive(Parser)]
#[command(name = "permtest")]
#[command(about = "Permutation test for a difference in group means")]
#[command(version)]
struct Cli {
    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Probability that a random regrouping differs in mean at least as much
    /// as the two given groups
    Test {
        /// File holding the first group (whitespace-separated numbers)
        group_a: PathBuf,

        /// File holding the second group
        group_b: PathBuf,

        /// Number of iterations; 0 picks a budget from the pool size
        #[arg(short, long, env = "PERMTEST_ITER", default_value_t = 0)]
        iter: usize,

        /// Random seed for reproducible sampling
        #[arg(long, env = "PERMTEST_SEED")]
        seed: Option<u64>,

        /// Print effect size, trial counts, and mode after the p-value
        #[arg(short, long)]
        detail: bool,
    },

    /// Mean, median, or mode of numbers read from files or stdin
    Summary {
        /// Statistic to compute
        #[arg(short, long, default_value = "mean")]
        stat: Statistic,

        /// Input files; stdin when none are given
        files: Vec<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.quiet);

    let result = match cli.command {
        Commands::Test {
            group_a,
            group_b,
            iter,
            seed,
            detail,
        } => cmd_test(&group_a, &group_b, iter, seed, detail),
        Commands::Summary { stat, files } => cmd_summary(stat, &files),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn cmd_test(
    group_a: &Path,
    group_b: &Path,
    iter: usize,
    seed: Option<u64>,
    detail: bool,
) -> Result<()> {
    let a = read_numbers_path(group_a)?;
    let b = read_numbers_path(group_b)?;
    debug!(len_a = a.len(), len_b = b.len(), "groups loaded");

    let mut test = PermutationTest::new().iterations(iter);
    if let Some(seed) = seed {
        test = test.seed(seed);
    }
    let result = test.run(&a, &b)?;

    println!("{}", format_general(result.p_value, 3));
    if detail {
        println!("{}", result.summary());
    }
    Ok(())
}

fn cmd_summary(stat: Statistic, files: &[PathBuf]) -> Result<()> {
    let data = read_numbers_paths(files)?;
    let value = summarize(&data, stat)?;
    println!("{}", format_shortest(value));
    Ok(())
}
