//! Injectable randomness.
//!
//! Seeds and correlation ids are drawn through these traits instead of a
//! global generator so that tests and reproducible pipelines can substitute
//! deterministic sources.

use rand::Rng;
use rand::distributions::Alphanumeric;

use crate::defaults::CORRELATION_ID_LEN;

/// Source of default generation seeds, uniform over `0..=u32::MAX`.
pub trait SeedSource: Send + Sync {
    fn next_seed(&self) -> u32;
}

/// Source of per-request correlation ids.
pub trait CorrelationIdSource: Send + Sync {
    fn next_correlation_id(&self) -> String;
}

/// Thread-local RNG backed source, the default for both seeds and ids.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadRngEntropy;

impl SeedSource for ThreadRngEntropy {
    fn next_seed(&self) -> u32 {
        rand::thread_rng().gen_range(0..=u32::MAX)
    }
}

impl CorrelationIdSource for ThreadRngEntropy {
    /// Six characters drawn uniformly from `[A-Za-z0-9]`.
    fn next_correlation_id(&self) -> String {
        rand::thread_rng()
            .sample_iter(&Alphanumeric)
            .take(CORRELATION_ID_LEN)
            .map(char::from)
            .collect()
    }
}

/// Always yields the same seed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedSeed(pub u32);

impl SeedSource for FixedSeed {
    fn next_seed(&self) -> u32 {
        self.0
    }
}

/// Always yields the same correlation id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixedCorrelationId(pub String);

impl CorrelationIdSource for FixedCorrelationId {
    fn next_correlation_id(&self) -> String {
        self.0.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_ids_are_six_alphanumerics() {
        let source = ThreadRngEntropy;
        for _ in 0..100 {
            let id = source.next_correlation_id();
            assert_eq!(id.len(), 6);
            assert!(id.chars().all(|c| c.is_ascii_alphanumeric()), "{id}");
        }
    }

    #[test]
    fn fixed_sources_are_deterministic() {
        assert_eq!(FixedSeed(42).next_seed(), 42);
        let ids = FixedCorrelationId("abc123".into());
        assert_eq!(ids.next_correlation_id(), "abc123");
        assert_eq!(ids.next_correlation_id(), "abc123");
    }
}
