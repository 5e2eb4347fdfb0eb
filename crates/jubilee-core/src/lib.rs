//! Jubilee Core
//!
//! Per-chain block counters that flag a **Jubilee block** whenever a chain's
//! count lands on a term of a fixed Fibonacci list.
//!
//! # Counting
//!
//! Every observed block increments its chain's counter by exactly one. When
//! the new count is one of
//!
//! ```text
//! 1, 2, 3, 5, 8, 13, 21, 34, 55, 89, 144
//! ```
//!
//! a [`JubileeEvent`] is appended to the event log. Once a matched term
//! reaches the policy's reset threshold (13 by default) the counter drops
//! back to 0 and the chain starts a new cycle.
//!
//! # Fixed Sequence
//!
//! Membership is tested against the literal list, not the recurrence. 233 is
//! a Fibonacci number but is never a Jubilee term.
//!
//! # Scheduling
//!
//! [`schedule`] derives golden-ratio, maintenance and improvement windows
//! around Jubilee terms. Pure arithmetic, no state.

mod counter;
mod error;
mod event;
mod policy;
pub mod schedule;
mod sequence;

pub use counter::JubileeCounter;
pub use error::{Error, Result};
pub use event::{EventId, JubileeEvent, JubileeResult};
pub use policy::{JubileePolicy, DEFAULT_RESET_THRESHOLD};
pub use schedule::{JubileeSchedule, GOLDEN_RATIO};
pub use sequence::{fibonacci_index, is_fibonacci_number, FIBONACCI_SEQUENCE};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ethereum_thirteen_blocks() {
        let mut counter = JubileeCounter::new();
        let mut jubilees = Vec::new();
        let mut plain = Vec::new();

        for _ in 0..13 {
            let result = counter.count_block_at("ethereum", 1_000).unwrap();
            if result.jubilee {
                jubilees.push(result.count);
            } else {
                plain.push(result.count);
            }
        }

        assert_eq!(jubilees, vec![1, 2, 3, 5, 8, 13]);
        assert_eq!(plain, vec![4, 6, 7, 9, 10, 11, 12]);
        assert_eq!(counter.count("ethereum"), 0);
    }

    #[test]
    fn chains_are_independent() {
        let mut counter = JubileeCounter::new();
        for _ in 0..5 {
            counter.count_block("bitcoin").unwrap();
        }

        assert_eq!(counter.count("bitcoin"), 5);
        assert_eq!(counter.count("ethereum"), 0);

        let result = counter.count_block("ethereum").unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(counter.count("bitcoin"), 5);
    }
}
