//! Sieve benchmark harness.
//! Compares every primer density × strategy pairing against the `primes`
//! and `primal` crates.
//!
//! Usage: cargo bench --bench sieve_bench

use std::fmt;
use std::time::{Duration, Instant};

use primer::{DensityScheme, Sieve, SieveConfig, Sink, Strategy};

// ─── Implementations under test ────────────────────────────────────────────

fn primer_count(density: DensityScheme, strategy: Strategy) -> impl Fn(u64) -> u64 {
    let sieve = Sieve::new(SieveConfig { density, ..SieveConfig::default() })
        .expect("default config is valid");
    move |n| {
        sieve
            .run_with(strategy, n, &mut Sink::count_only())
            .expect("sieve failed")
    }
}

fn primes_crate_count(n: u64) -> u64 {
    use primes::{PrimeSet, Sieve};
    let mut sieve = Sieve::new();
    sieve.iter().take_while(|&p| p <= n).count() as u64
}

fn primal_crate_count(n: u64) -> u64 {
    primal::Primes::all().take_while(|&p| p <= n as usize).count() as u64
}

fn primal_crate_count_direct(n: u64) -> u64 {
    let sieve = primal::Sieve::new(n as usize);
    sieve.prime_pi(n as usize) as u64
}

// ─── Benchmarking machinery ────────────────────────────────────────────────

struct BenchResult {
    name: String,
    prime_count: u64,
    times: Vec<Duration>,
    sieve_bytes: usize,
}

impl BenchResult {
    fn median(&self) -> Duration {
        let mut sorted = self.times.clone();
        sorted.sort();
        sorted[sorted.len() / 2]
    }

    fn min(&self) -> Duration {
        self.times.iter().copied().min().unwrap_or_default()
    }

    fn mean(&self) -> Duration {
        let total: Duration = self.times.iter().sum();
        total / self.times.len() as u32
    }
}

impl fmt::Display for BenchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "│  {:<28} │ {:>10} │ {:>10} │ {:>10} │ {:>9} │ π = {}",
            self.name,
            format_duration(self.min()),
            format_duration(self.median()),
            format_duration(self.mean()),
            format_bytes(self.sieve_bytes),
            format_with_commas(self.prime_count),
        )
    }
}

fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos < 1_000 {
        format!("{} ns", nanos)
    } else if nanos < 1_000_000 {
        format!("{:.1} µs", nanos as f64 / 1_000.0)
    } else if nanos < 1_000_000_000 {
        format!("{:.2} ms", nanos as f64 / 1_000_000.0)
    } else {
        format!("{:.2} s", nanos as f64 / 1_000_000_000.0)
    }
}

fn format_bytes(b: usize) -> String {
    if b == 0 {
        "-".to_string()
    } else if b < 1024 {
        format!("{} B", b)
    } else if b < 1024 * 1024 {
        format!("{:.1} KB", b as f64 / 1024.0)
    } else {
        format!("{:.1} MB", b as f64 / (1024.0 * 1024.0))
    }
}

fn format_with_commas(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

fn bench<F>(name: &str, n: u64, iterations: usize, sieve_bytes: usize, f: F) -> BenchResult
where
    F: Fn(u64) -> u64,
{
    // Warmup
    let _ = f(n);
    let _ = f(n);

    let mut times = Vec::with_capacity(iterations);
    let mut prime_count = 0;
    for _ in 0..iterations {
        let start = Instant::now();
        prime_count = std::hint::black_box(f(n));
        times.push(start.elapsed());
    }

    BenchResult { name: name.to_string(), prime_count, times, sieve_bytes }
}

/// Peak bit-set bytes for a primer run.
fn primer_bytes(n: u64, span_per_bit: u64, strategy: Strategy) -> usize {
    let bits = match strategy {
        Strategy::Flat => n / span_per_bit + 1,
        Strategy::Segmented => {
            let window = primer::config::DEFAULT_SEGMENT_BITS as u64;
            window.min(n / span_per_bit + 1) + primer::codec::isqrt(n) / span_per_bit + 1
        }
    };
    (bits.div_ceil(64) * 8) as usize
}

fn main() {
    println!("🦀 Prime Sieve Benchmark 🦀");
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!();

    let sizes: Vec<u64> = vec![10_000, 100_000, 1_000_000, 10_000_000, 50_000_000];
    let iterations = 15;

    let pairings = [
        ("primer odd-only flat", DensityScheme::OddOnly, 2, Strategy::Flat),
        ("primer odd-only segmented", DensityScheme::OddOnly, 2, Strategy::Segmented),
        ("primer wheel6 flat", DensityScheme::Wheel6, 3, Strategy::Flat),
        ("primer wheel6 segmented", DensityScheme::Wheel6, 3, Strategy::Segmented),
    ];

    for &n in &sizes {
        println!(
            "┌─ n = {} ({} iterations) ─────────────────────────────────────────────",
            format_with_commas(n),
            iterations
        );
        println!(
            "│  {:<28} │ {:>10} │ {:>10} │ {:>10} │ {:>9} │",
            "Implementation", "Min", "Median", "Mean", "Bits"
        );
        println!("│  {}", "─".repeat(86));

        let mut results = Vec::new();
        for (name, density, span, strategy) in pairings {
            let bytes = primer_bytes(n, span, strategy);
            results.push(bench(name, n, iterations, bytes, primer_count(density, strategy)));
        }
        results.push(bench("primes crate (iter)", n, iterations, 0, primes_crate_count));
        results.push(bench("primal (iterator)", n, iterations, 0, primal_crate_count));
        results.push(bench("primal (Sieve::new)", n, iterations, 0, primal_crate_count_direct));

        for result in &results {
            println!("{}", result);
        }

        let expected = results[0].prime_count;
        for result in &results {
            assert_eq!(
                result.prime_count, expected,
                "MISMATCH at n={}: {} found {}, expected {}",
                n, result.name, result.prime_count, expected
            );
        }

        let fastest = results.iter().map(BenchResult::median).min().unwrap_or_default();
        println!("│");
        println!("│  All implementations agree ✓");
        for result in &results {
            let ratio = result.median().as_nanos() as f64 / fastest.as_nanos().max(1) as f64;
            if ratio <= 1.01 {
                println!("│  {} : fastest 🏆", result.name);
            } else {
                println!("│  {} : {:.2}x slower", result.name, ratio);
            }
        }
        println!("└──────────────────────────────────────────────────────────────────────────────────────");
        println!();
    }

    println!("✓ Benchmark complete!");
}
