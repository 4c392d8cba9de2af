//! Run seed selection: an explicit `--seed` wins.
//! Otherwise a fresh one is mixed from runtime entropy.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SeedChoice {
    Cli(u64),
    Generated(u64),
}

impl SeedChoice {
    pub fn value(self) -> u64 {
        match self {
            Self::Cli(seed) | Self::Generated(seed) => seed,
        }
    }
}

static RUNTIME_SEED_CALLS: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0_u128, |elapsed| elapsed.as_nanos());
    let calls = RUNTIME_SEED_CALLS.fetch_add(1, Ordering::Relaxed);
    splitmix64(
        (nanos as u64)
            ^ ((nanos >> 64) as u64)
            ^ u64::from(process::id()).rotate_left(17)
            ^ calls.rotate_left(7),
    )
}

/// Reads `--seed N` or `--seed=N` from the process arguments. `args[0]` is the program name.
pub fn resolve_seed_from_args(args: &[String], generated_seed: u64) -> Result<SeedChoice, String> {
    let mut chosen = None;
    let mut rest = args.iter().skip(1);

    while let Some(argument) = rest.next() {
        let raw = if argument == "--seed" {
            rest.next().map(String::as_str).ok_or_else(|| "missing value for --seed".to_string())?
        } else if let Some(inline) = argument.strip_prefix("--seed=") {
            inline
        } else {
            continue;
        };
        if chosen.replace(parse_seed(raw)?).is_some() {
            return Err("seed provided more than once".to_string());
        }
    }

    Ok(chosen.map_or(SeedChoice::Generated(generated_seed), SeedChoice::Cli))
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.parse::<u64>().map_err(|_| format!("seed value '{raw}' must be a number"))
}

fn splitmix64(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|part| part.to_string()).collect()
    }

    #[test]
    fn falls_back_to_generated_seed() {
        assert_eq!(
            resolve_seed_from_args(&args(&["delve"]), 9_876_543),
            Ok(SeedChoice::Generated(9_876_543))
        );
    }

    #[test]
    fn accepts_separate_and_inline_values() {
        assert_eq!(
            resolve_seed_from_args(&args(&["delve", "--seed", "4242"]), 1),
            Ok(SeedChoice::Cli(4_242))
        );
        assert_eq!(
            resolve_seed_from_args(&args(&["delve", "--seed=2026"]), 1),
            Ok(SeedChoice::Cli(2_026))
        );
    }

    #[test]
    fn rejects_missing_bad_and_repeated_values() {
        let missing = resolve_seed_from_args(&args(&["delve", "--seed"]), 1).unwrap_err();
        assert!(missing.contains("missing"), "{missing}");
        let bad = resolve_seed_from_args(&args(&["delve", "--seed=abc"]), 1).unwrap_err();
        assert!(bad.contains("number"), "{bad}");
        let twice =
            resolve_seed_from_args(&args(&["delve", "--seed=1", "--seed", "2"]), 1).unwrap_err();
        assert!(twice.contains("more than once"), "{twice}");
    }

    #[test]
    fn runtime_seeds_differ_between_calls() {
        assert_ne!(generate_runtime_seed(), generate_runtime_seed());
    }
}
