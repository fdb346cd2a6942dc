use clap::{Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::time::Instant;

use workload_driver::generator;
use workload_driver::models::{
    CacheContainer, CacheWorkloadConfig, VectorContainer, VectorWorkloadConfig, Workload,
};
use workload_driver::runner;
use workload_driver::stats::WorkloadReport;

/// Container workload driver CLI
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Commands,
}

/// Subcommands for the CLI
#[derive(Subcommand, Debug)]
enum Commands {
    /// Random push/pop churn on a byte vector
    Vector {
        /// Number of push/pop steps
        #[arg(long, default_value = "8388608")]
        ops: usize,

        /// Seed for the step generator
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Also run std::vec::Vec on the same steps
        #[arg(long)]
        baseline: bool,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },

    /// Read-through gets and puts on a bounded LRU cache
    Cache {
        /// Number of requests
        #[arg(long, default_value = "1000000")]
        ops: usize,

        /// Cache capacity (number of entries)
        #[arg(short, long, default_value = "1000")]
        capacity: usize,

        /// Number of distinct keys
        #[arg(long, default_value = "10000")]
        keys: u64,

        /// Number of keys in the hot set
        #[arg(long, default_value = "500")]
        hot_keys: u64,

        /// Percentage of requests that target the hot set (default: 80%)
        #[arg(long, default_value = "80")]
        hot_traffic: u8,

        /// Percentage of requests that are explicit puts (default: 10%)
        #[arg(long, default_value = "10")]
        put_ratio: u8,

        /// Seed for the request generator
        #[arg(long, default_value = "42")]
        seed: u64,

        /// Also run the lru crate on the same requests
        #[arg(long)]
        baseline: bool,

        /// Export results to CSV file
        #[arg(long, value_name = "PATH")]
        output_csv: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args = Args::parse();

    match args.command {
        Commands::Vector {
            ops,
            seed,
            baseline,
            output_csv,
        } => {
            let config = VectorWorkloadConfig { ops, seed };
            run_vector_workload(&config, baseline, output_csv.as_deref())
        }

        Commands::Cache {
            ops,
            capacity,
            keys,
            hot_keys,
            hot_traffic,
            put_ratio,
            seed,
            baseline,
            output_csv,
        } => {
            let config = CacheWorkloadConfig {
                ops,
                capacity,
                keys,
                hot_keys,
                hot_traffic_percent: hot_traffic,
                put_percent: put_ratio,
                seed,
            };
            run_cache_workload(&config, baseline, output_csv.as_deref())
        }
    }
}

/// Generate the vector steps and replay them against each selected container
fn run_vector_workload(
    config: &VectorWorkloadConfig,
    baseline: bool,
    output_csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Vector Workload");
    println!("===============");
    println!("Steps: {}", config.ops);
    println!("Seed: {}", config.seed);

    let start = Instant::now();
    let steps = generator::vector_steps(config);
    println!("Generated steps in {:.2?}", start.elapsed());

    let mut report = WorkloadReport::new(Workload::Vector);
    for container in VectorContainer::selected(baseline) {
        report.record(runner::run_vector(container, &steps));
    }

    finish(&report, output_csv)
}

/// Generate the cache requests and replay them against each selected container
fn run_cache_workload(
    config: &CacheWorkloadConfig,
    baseline: bool,
    output_csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let capacity = NonZeroUsize::new(config.capacity).ok_or("capacity must be at least 1")?;

    println!("Cache Workload");
    println!("==============");
    println!("Requests: {}", config.ops);
    println!("Cache capacity: {} entries", capacity);
    println!(
        "Key space: {} keys, hot set {} keys receiving {}% of requests",
        config.keys, config.hot_keys, config.hot_traffic_percent
    );
    println!("Explicit puts: {}%", config.put_percent);
    println!("Seed: {}", config.seed);

    let start = Instant::now();
    let requests = match generator::cache_requests(config) {
        Ok(requests) => requests,
        Err(e) => {
            eprintln!("Invalid workload: {e}");
            return Err(e.into());
        }
    };
    println!("Generated requests in {:.2?}", start.elapsed());

    let mut report = WorkloadReport::new(Workload::Cache);
    for container in CacheContainer::selected(baseline) {
        report.record(runner::run_cache(container, capacity, &requests));
    }

    finish(&report, output_csv)
}

/// Print the report, cross-check the runs and export CSV if requested
fn finish(
    report: &WorkloadReport,
    output_csv: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    report.print_summary();

    if report.runs().len() > 1 {
        if report.runs_agree() {
            println!("\nAll containers observed identical results.");
        } else {
            eprintln!("\nWarning: containers disagree on the same workload");
        }
    }

    // Export to CSV if requested
    if let Some(csv_path) = output_csv {
        match report.export_csv(csv_path) {
            Ok(()) => println!("\nResults exported to: {}", csv_path.display()),
            Err(e) => eprintln!("Failed to export CSV: {e}"),
        }
    }

    Ok(())
}
