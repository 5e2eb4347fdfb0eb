//! Where block heights come from.

use std::collections::HashMap;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};
use crate::registry::ChainInfo;

/// Reports the latest height of a chain.
pub trait BlockSource {
    fn current_height(&mut self, chain: &ChainInfo) -> Result<u64>;
}

/// Heights set by hand.
#[derive(Debug, Clone, Default)]
pub struct FixedHeights {
    heights: HashMap<String, u64>,
}

impl FixedHeights {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, chain: impl Into<String>, height: u64) -> &mut Self {
        self.heights.insert(chain.into(), height);
        self
    }
}

impl BlockSource for FixedHeights {
    fn current_height(&mut self, chain: &ChainInfo) -> Result<u64> {
        self.heights
            .get(&chain.name)
            .copied()
            .ok_or_else(|| Error::Source(format!("no height for {}", chain.name)))
    }
}

/// Largest simulated advance per round.
pub const MAX_SIMULATED_ADVANCE: u64 = 100;

/// Seeded random chain progress: each call advances the chain by 1 to 100 blocks.
#[derive(Debug, Clone)]
pub struct SimulatedSource {
    rng: StdRng,
}

impl SimulatedSource {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl BlockSource for SimulatedSource {
    fn current_height(&mut self, chain: &ChainInfo) -> Result<u64> {
        let advance = self.rng.gen_range(1..=MAX_SIMULATED_ADVANCE);
        Ok(chain.current_block.saturating_add(advance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_heights_lookup() {
        let mut source = FixedHeights::new();
        source.set("ethereum", 21).set("bitcoin", 3);

        let eth = ChainInfo::with_default_endpoints("ethereum");
        let sol = ChainInfo::with_default_endpoints("solana");
        assert_eq!(source.current_height(&eth).unwrap(), 21);
        assert!(matches!(source.current_height(&sol), Err(Error::Source(_))));
    }

    #[test]
    fn simulated_advances_within_bounds() {
        let mut source = SimulatedSource::new(42);
        let mut chain = ChainInfo::with_default_endpoints("ethereum");
        for _ in 0..50 {
            let height = source.current_height(&chain).unwrap();
            assert!(height > chain.current_block);
            assert!(height <= chain.current_block + MAX_SIMULATED_ADVANCE);
            chain.current_block = height;
        }
    }

    #[test]
    fn simulated_is_deterministic() {
        let chain = ChainInfo::with_default_endpoints("ethereum");
        let mut a = SimulatedSource::new(7);
        let mut b = SimulatedSource::new(7);
        for _ in 0..10 {
            assert_eq!(
                a.current_height(&chain).unwrap(),
                b.current_height(&chain).unwrap()
            );
        }
    }
}
