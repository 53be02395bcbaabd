//! Ensemble demo: grow a few hundred molecules and print a summary.
//!
//! Set `RUST_LOG=debug` to see per-molecule events.

use branchpoly_bench::reference_ensemble;
use branchpoly_engine::run_ensemble;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== branchpoly ensemble demo ===\n");

    let config = reference_ensemble(500, None);
    let report = match run_ensemble(&config) {
        Ok(report) => report,
        Err(err) => {
            eprintln!("ensemble failed: {err}");
            std::process::exit(1);
        }
    };

    let completed = report.molecules.len();
    let branched = report.polymers().filter(|p| p.branch_count > 0).count();
    let mean_length =
        report.polymers().map(|p| p.total_length).sum::<f64>() / completed.max(1) as f64;
    let (g_sum, g_n) = report
        .polymers()
        .filter(|p| p.branch_count > 0)
        .filter_map(|p| p.g_factor)
        .fold((0.0, 0usize), |(s, n), g| (s + g, n + 1));

    println!("workers:          {}", report.workers);
    println!("completed:        {completed}");
    println!("aborted:          {}", report.aborted);
    println!("branched:         {branched}");
    println!("mean length:      {mean_length:.1}");
    if g_n > 0 {
        println!("mean g (branched): {:.4}", g_sum / g_n as f64);
    }

    println!("\nLargest molecules:");
    let mut largest: Vec<_> = report.molecules.iter().collect();
    largest.sort_by(|a, b| b.polymer.total_length.total_cmp(&a.polymer.total_length));
    for record in largest.iter().take(5) {
        let p = &record.polymer;
        println!(
            "  #{:<4} length {:>9.1}  arms {:>4}  branches {:>3}  g {:.4}",
            record.index,
            p.total_length,
            p.arm_count,
            p.branch_count,
            p.g_factor.unwrap_or(1.0)
        );
    }
}
