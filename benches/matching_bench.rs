use std::time::Instant;

use strokematch::{MatchConfig, match_character, rng_from_seed, types::Character};

fn synthetic_corpus() -> Vec<(String, Character)> {
    (0..20)
        .map(|i| {
            let n = 2 + (i % 4);
            let strokes = (0..n)
                .map(|s| {
                    let y = 10.0 + s as f64 * (80.0 / n as f64);
                    (0..20)
                        .map(|p| [10.0 + p as f64 * 80.0 / 19.0, y])
                        .collect()
                })
                .collect();
            (format!("synthetic-{i}"), strokes)
        })
        .collect()
}

fn main() {
    println!("=== Stroke Matching Benchmark ===\n");

    let load_start = Instant::now();
    let corpus = synthetic_corpus();
    let load_duration = load_start.elapsed();
    println!("Generated {} characters in {:?}\n", corpus.len(), load_duration);

    let config = MatchConfig::default();
    let mut durations = Vec::new();

    for run in 1..=3 {
        println!("Run {run}/3:");
        let start = Instant::now();

        let mut total_tested = 0;
        let mut total_matched_cleanly = 0;

        for (i, (name, reference)) in corpus.iter().enumerate() {
            let mut rng = rng_from_seed(run * 1000 + i as u64);
            let result = match_character(reference, reference, &config, &mut rng)
                .unwrap_or_else(|e| panic!("match failed for '{name}': {e}"));
            total_tested += 1;
            if result.errors.is_empty() {
                total_matched_cleanly += 1;
            }
        }

        let duration = start.elapsed();
        durations.push(duration);

        println!("  Tested: {total_tested}, Clean self-matches: {total_matched_cleanly}, Duration: {duration:?}");
        println!(
            "  Throughput: {:.2} chars/sec\n",
            total_tested as f64 / duration.as_secs_f64()
        );
    }

    let total_ms: f64 = durations.iter().map(|d| d.as_secs_f64() * 1000.0).sum();
    let avg_ms = total_ms / durations.len() as f64;
    let min_ms = durations
        .iter()
        .map(|d| d.as_secs_f64() * 1000.0)
        .fold(f64::INFINITY, f64::min);
    let max_ms = durations
        .iter()
        .map(|d| d.as_secs_f64() * 1000.0)
        .fold(f64::NEG_INFINITY, f64::max);

    println!("=== Summary ===");
    println!("Average: {avg_ms:.2} ms");
    println!("Min: {min_ms:.2} ms");
    println!("Max: {max_ms:.2} ms");
    println!(
        "Average throughput: {:.2} chars/sec",
        corpus.len() as f64 / (avg_ms / 1000.0)
    );

    let results = format!(
        "Baseline Benchmark Results\n\
         ==========================\n\
         Date: {}\n\
         Characters: {}\n\
         Runs: {}\n\
         Average: {:.2} ms\n\
         Min: {:.2} ms\n\
         Max: {:.2} ms\n\
         Throughput: {:.2} chars/sec\n",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
        corpus.len(),
        durations.len(),
        avg_ms,
        min_ms,
        max_ms,
        corpus.len() as f64 / (avg_ms / 1000.0)
    );

    std::fs::write("benchmark_results.txt", results).expect("Failed to write benchmark results");
    println!("\nResults saved to benchmark_results.txt");
}
