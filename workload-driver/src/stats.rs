// Reporting for workload runs

use crate::models::{CsvResultRow, RunStats, Workload};
use std::path::Path;

/// Results of one workload replayed against every selected container
pub struct WorkloadReport {
    workload: Workload,
    runs: Vec<RunStats>,
}

impl WorkloadReport {
    pub fn new(workload: Workload) -> Self {
        Self {
            workload,
            runs: Vec::new(),
        }
    }

    pub fn record(&mut self, stats: RunStats) {
        self.runs.push(stats);
    }

    pub fn runs(&self) -> &[RunStats] {
        &self.runs
    }

    /// Returns true when every run observed the same values as the first one
    pub fn runs_agree(&self) -> bool {
        match self.runs.split_first() {
            Some((first, rest)) => rest.iter().all(|run| {
                run.checksum == first.checksum
                    && run.final_len == first.final_len
                    && run.hits == first.hits
                    && run.pops == first.pops
            }),
            None => true,
        }
    }

    /// Print a summary table of the runs
    pub fn print_summary(&self) {
        println!("\nWorkload Summary ({})", self.workload.as_str());
        println!("=================");

        match self.workload {
            Workload::Vector => {
                println!(
                    "{:<10} {:>12} {:>10} {:>12} {:>8} {:>12} {:>12} {:>10}",
                    "Container", "Ops", "Duration", "Ops/sec", "Avg", "Pushes", "Pops", "FinalCap"
                );
                println!("{}", "-".repeat(94));
                for run in &self.runs {
                    println!(
                        "{:<10} {:>12} {:>9.3}s {:>12.0} {:>6.1}ns {:>12} {:>12} {:>10}",
                        run.container,
                        run.ops,
                        run.duration_secs(),
                        run.ops_per_sec(),
                        run.avg_ns(),
                        run.pushes,
                        run.pops,
                        run.final_capacity
                    );
                }
            }
            Workload::Cache => {
                println!(
                    "{:<10} {:>12} {:>10} {:>12} {:>8} {:>8} {:>10} {:>10}",
                    "Container", "Ops", "Duration", "Ops/sec", "Avg", "HitRate", "Evictions", "Len"
                );
                println!("{}", "-".repeat(88));
                for run in &self.runs {
                    println!(
                        "{:<10} {:>12} {:>9.3}s {:>12.0} {:>6.1}ns {:>7.2}% {:>10} {:>10}",
                        run.container,
                        run.ops,
                        run.duration_secs(),
                        run.ops_per_sec(),
                        run.avg_ns(),
                        run.hit_rate(),
                        run.evictions,
                        run.final_len
                    );
                }
            }
        }
    }

    /// Export results to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<(), std::io::Error> {
        let mut writer = csv::Writer::from_path(path)?;

        for run in &self.runs {
            let row = CsvResultRow {
                workload: self.workload.as_str().to_string(),
                container: run.container.to_string(),
                ops: run.ops,
                duration_ns: u64::try_from(run.duration.as_nanos()).unwrap_or(u64::MAX),
                ops_per_sec: run.ops_per_sec(),
                avg_ns: run.avg_ns(),
                pushes: run.pushes,
                pops: run.pops,
                final_capacity: run.final_capacity,
                hits: run.hits,
                misses: run.misses,
                hit_rate: run.hit_rate(),
                evictions: run.evictions,
                final_len: run.final_len,
                checksum: run.checksum,
            };
            writer.serialize(row)?;
        }

        writer.flush()?;
        Ok(())
    }
}
