use std::{hint::black_box, time::Instant};

use clap::Parser;
use rand::{Rng, SeedableRng, rngs::StdRng};
use huffzip_rust::{compress, decompress};

#[derive(Parser, Debug)]
#[command(about = "Time compression and decompression of random inputs")]
struct Args {
    /// Size of each generated input, in bytes
    #[arg(short, long, default_value_t = 1 << 20)]
    size: usize,
    /// Probability that a byte is drawn from a small alphabet instead of all 256 values
    #[arg(long, default_value_t = 0.9)]
    skew: f64,
    /// Seed of the input generator
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

const N_RUNS: usize = 3;

fn gen_input(size: usize, skew: f64, seed: u64) -> Vec<u8> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..size)
        .map(|_| if rng.gen_bool(skew) { rng.gen_range(b'a'..=b'p') } else { rng.gen() })
        .collect()
}

fn main() {
    let args = Args::parse();
    assert!((0.0..=1.0).contains(&args.skew), "The skew has to be a probability, got {}", args.skew);

    let input = gen_input(args.size, args.skew, args.seed);
    let container = compress(&input).expect("Failed compressing the input");
    assert_eq!(decompress(&container).expect("Failed decompressing the input"), input);

    let total = Instant::now();
    for _ in 0..N_RUNS {
        let _ = black_box(compress(black_box(&input)));
    }
    let avg = total.elapsed().as_nanos() as f64 / (N_RUNS * input.len().max(1)) as f64;
    println!("compression: {:.2}ns per byte", avg);

    let total = Instant::now();
    for _ in 0..N_RUNS {
        let _ = black_box(decompress(black_box(&container)));
    }
    let avg = total.elapsed().as_nanos() as f64 / (N_RUNS * input.len().max(1)) as f64;
    println!("decompression: {:.2}ns per byte", avg);

    println!(
        "ratio: {} -> {} bytes ({:.1}%)",
        input.len(),
        container.len(),
        container.len() as f64 * 100.0 / input.len().max(1) as f64
    );
}
