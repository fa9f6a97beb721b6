use std::env;
use std::time::Instant;

use anyhow::{anyhow, bail, Context, Result};
use pm_matrix::{Matrix, MatrixMultiplier, SequentialMultiplier};
use pm_ndarray::NdarrayMultiplier;
use pm_parallel::{ParallelConfig, ParallelMultiplier};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_SEED: u64 = 1;

struct Args {
    strategy: String,
    m: usize,
    k: usize,
    n: usize,
    seed: u64,
    verify: bool,
}

fn usage(program: &str) -> String {
    format!(
        "Usage: {} <strategy> <m> <k> <n> [seed] [--verify]\n\
         Strategies:\n  \
         parallel    - column-partitioned worker pool (PM_PARALLELISM, PM_MIN_COLUMNS_PER_WORKER)\n  \
         sequential  - single-threaded reference\n  \
         ndarray     - packed GEMM via ndarray",
        program
    )
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let program = raw.first().map(String::as_str).unwrap_or("pm");
    let verify = raw.iter().any(|a| a == "--verify");
    let positional: Vec<&String> = raw.iter().skip(1).filter(|a| *a != "--verify").collect();

    if positional.len() < 4 {
        bail!(usage(program));
    }

    let dim = |i: usize, name: &str| -> Result<usize> {
        positional[i]
            .parse()
            .with_context(|| format!("invalid {}: {:?}", name, positional[i]))
    };

    let seed = match positional.get(4) {
        Some(s) => s.parse().with_context(|| format!("invalid seed: {:?}", s))?,
        None => DEFAULT_SEED,
    };

    Ok(Args {
        strategy: positional[0].clone(),
        m: dim(1, "m")?,
        k: dim(2, "k")?,
        n: dim(3, "n")?,
        seed,
        verify,
    })
}

fn select_strategy(name: &str) -> Result<Box<dyn MatrixMultiplier>> {
    match name {
        "parallel" => {
            let config = ParallelConfig::from_env().context("reading parallel config")?;
            Ok(Box::new(ParallelMultiplier::new(config)))
        }
        "sequential" => Ok(Box::new(SequentialMultiplier::new())),
        "ndarray" => Ok(Box::new(NdarrayMultiplier::new())),
        other => Err(anyhow!("unknown strategy: {}", other)),
    }
}

fn random_matrix(rng: &mut StdRng, rows: usize, cols: usize) -> Result<Matrix> {
    let data = (0..rows * cols).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Ok(Matrix::from_vec(rows, cols, data)?)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let raw: Vec<String> = env::args().collect();
    let args = parse_args(&raw)?;
    let strategy = select_strategy(&args.strategy)?;

    let mut rng = StdRng::seed_from_u64(args.seed);
    let a = random_matrix(&mut rng, args.m, args.k)?;
    let b = random_matrix(&mut rng, args.k, args.n)?;

    info!(strategy = strategy.name(), m = args.m, k = args.k, n = args.n, "multiplying");
    let start = Instant::now();
    let c = strategy
        .multiply(&a, &b)
        .with_context(|| format!("{} multiply failed", strategy.name()))?;
    let elapsed = start.elapsed();

    let checksum: f64 = c.as_slice().iter().sum();
    println!(
        "{}: [{}x{}] * [{}x{}] -> [{}x{}] in {:.3?}",
        strategy.name(),
        a.rows(),
        a.cols(),
        b.rows(),
        b.cols(),
        c.rows(),
        c.cols(),
        elapsed
    );
    println!("checksum: {:.12e}", checksum);

    if args.verify {
        let reference = SequentialMultiplier::new().multiply(&a, &b)?;
        let max_diff = c
            .as_slice()
            .iter()
            .zip(reference.as_slice())
            .map(|(x, y)| (x - y).abs())
            .fold(0.0f64, f64::max);
        println!("max abs difference vs sequential: {:e}", max_diff);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_args() {
        let args = parse_args(&argv(&["pm", "parallel", "2", "3", "4", "9", "--verify"])).unwrap();
        assert_eq!(args.strategy, "parallel");
        assert_eq!((args.m, args.k, args.n), (2, 3, 4));
        assert_eq!(args.seed, 9);
        assert!(args.verify);
    }

    #[test]
    fn test_parse_args_defaults() {
        let args = parse_args(&argv(&["pm", "ndarray", "1", "1", "1"])).unwrap();
        assert_eq!(args.seed, DEFAULT_SEED);
        assert!(!args.verify);
    }

    #[test]
    fn test_parse_args_too_few() {
        assert!(parse_args(&argv(&["pm", "parallel", "2"])).is_err());
    }

    #[test]
    fn test_parse_args_bad_dimension() {
        assert!(parse_args(&argv(&["pm", "parallel", "two", "3", "4"])).is_err());
    }

    #[test]
    fn test_select_strategy() {
        assert_eq!(select_strategy("sequential").unwrap().name(), "sequential");
        assert_eq!(select_strategy("ndarray").unwrap().name(), "ndarray");
        assert!(select_strategy("gpu").is_err());
    }
}
