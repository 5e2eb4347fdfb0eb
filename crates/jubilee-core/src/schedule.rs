//! Scheduling windows around Jubilee terms.
//!
//! Everything here is pure arithmetic over a Fibonacci list:
//! - golden-ratio windows between consecutive terms
//! - maintenance windows (±10%) centred on each term
//! - improvement windows (20% of the gap) centred between terms

use serde::{Deserialize, Serialize};

use crate::sequence::FIBONACCI_SEQUENCE;

/// φ
pub const GOLDEN_RATIO: f64 = 1.618033988749895;

/// A ratio is "optimal" when it sits this close to φ.
pub const OPTIMAL_RATIO_TOLERANCE: f64 = 0.01;

/// Extend `base` to `len` terms with `a[n] = a[n-1] + a[n-2]`.
///
/// Never truncates. Terms saturate at `u64::MAX`.
pub fn extend_sequence(base: &[u64], len: usize) -> Vec<u64> {
    let mut extended = base.to_vec();
    while extended.len() < len {
        let next = match extended.as_slice() {
            [] => 1,
            [only] => *only,
            [.., a, b] => a.saturating_add(*b),
        };
        extended.push(next);
    }
    extended
}

/// Closed block range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockWindow {
    pub start: u64,
    pub end: u64,
    pub duration: u64,
}

/// Ratio of one term to the previous one, compared to φ.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoldenRatioWindow {
    pub from: u64,
    pub to: u64,
    pub ratio: f64,
    /// `1 - |ratio - φ| / φ`
    pub alignment: f64,
    pub optimal: bool,
    /// `floor(to / φ)`
    pub window_size: u64,
}

/// Maintenance window centred on a Jubilee term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceWindow {
    pub jubilee_block: u64,
    pub window: BlockWindow,
}

/// Improvement window between two Jubilee terms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementWindow {
    pub between: (u64, u64),
    pub window: BlockWindow,
}

/// Golden-ratio window for each consecutive pair. Pairs starting at 0 are skipped.
pub fn golden_ratio_windows(sequence: &[u64]) -> Vec<GoldenRatioWindow> {
    sequence
        .windows(2)
        .filter(|pair| pair[0] > 0)
        .map(|pair| {
            let (from, to) = (pair[0], pair[1]);
            let ratio = to as f64 / from as f64;
            let diff = (ratio - GOLDEN_RATIO).abs();
            GoldenRatioWindow {
                from,
                to,
                ratio,
                alignment: 1.0 - diff / GOLDEN_RATIO,
                optimal: diff < OPTIMAL_RATIO_TOLERANCE,
                window_size: (to as f64 / GOLDEN_RATIO).floor() as u64,
            }
        })
        .collect()
}

/// ±10% window around each term.
pub fn maintenance_windows(sequence: &[u64]) -> Vec<MaintenanceWindow> {
    sequence
        .iter()
        .map(|&block| {
            let pad = block / 10;
            MaintenanceWindow {
                jubilee_block: block,
                window: BlockWindow {
                    start: block - pad,
                    end: block.saturating_add(pad),
                    duration: pad * 2,
                },
            }
        })
        .collect()
}

/// Window of 20% of the gap, centred between consecutive terms.
pub fn improvement_windows(sequence: &[u64]) -> Vec<ImprovementWindow> {
    sequence
        .windows(2)
        .map(|pair| {
            let (current, next) = (pair[0], pair[1]);
            let midpoint = current / 2 + next / 2 + (current % 2 + next % 2) / 2;
            let size = next.saturating_sub(current) / 5;
            let half = size / 2;
            ImprovementWindow {
                between: (current, next),
                window: BlockWindow {
                    start: midpoint.saturating_sub(half),
                    end: midpoint.saturating_add(half),
                    duration: size,
                },
            }
        })
        .collect()
}

/// The full schedule for an extended Jubilee sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JubileeSchedule {
    pub sequence: Vec<u64>,
    pub golden_ratio_windows: Vec<GoldenRatioWindow>,
    pub maintenance_windows: Vec<MaintenanceWindow>,
    pub improvement_windows: Vec<ImprovementWindow>,
}

impl JubileeSchedule {
    /// Build the schedule over the fixed sequence extended to `len` terms.
    pub fn build(len: usize) -> Self {
        Self::from_sequence(extend_sequence(&FIBONACCI_SEQUENCE, len))
    }

    /// Build the schedule over an arbitrary sequence.
    pub fn from_sequence(sequence: Vec<u64>) -> Self {
        Self {
            golden_ratio_windows: golden_ratio_windows(&sequence),
            maintenance_windows: maintenance_windows(&sequence),
            improvement_windows: improvement_windows(&sequence),
            sequence,
        }
    }

    /// Windows whose ratio is within tolerance of φ.
    pub fn optimal_windows(&self) -> impl Iterator<Item = &GoldenRatioWindow> {
        self.golden_ratio_windows.iter().filter(|w| w.optimal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extend_continues_recurrence() {
        let extended = extend_sequence(&FIBONACCI_SEQUENCE, 15);
        assert_eq!(&extended[11..], &[233, 377, 610, 987]);
    }

    #[test]
    fn extend_never_truncates() {
        assert_eq!(extend_sequence(&FIBONACCI_SEQUENCE, 3).len(), 11);
        assert_eq!(extend_sequence(&[], 4), vec![1, 1, 2, 3]);
    }

    #[test]
    fn extend_saturates() {
        let extended = extend_sequence(&FIBONACCI_SEQUENCE, 120);
        assert_eq!(extended.len(), 120);
        assert_eq!(*extended.last().unwrap(), u64::MAX);
        assert!(extended.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn golden_ratio_converges() {
        let windows = golden_ratio_windows(&extend_sequence(&FIBONACCI_SEQUENCE, 20));
        assert!(!windows[0].optimal); // 2/1
        assert!(windows.last().unwrap().optimal);
        assert_eq!(windows[0].window_size, 1); // floor(2 / φ)
        assert_eq!(windows[9].window_size, 88); // floor(144 / φ)
    }

    #[test]
    fn golden_ratio_skips_zero() {
        let windows = golden_ratio_windows(&[0, 1, 1]);
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].ratio, 1.0);
    }

    #[test]
    fn maintenance_window_bounds() {
        let windows = maintenance_windows(&[5, 13, 144]);
        assert_eq!(windows[0].window, BlockWindow { start: 5, end: 5, duration: 0 });
        assert_eq!(windows[1].window, BlockWindow { start: 12, end: 14, duration: 2 });
        assert_eq!(windows[2].window, BlockWindow { start: 130, end: 158, duration: 28 });
    }

    #[test]
    fn improvement_window_bounds() {
        let windows = improvement_windows(&[89, 144]);
        // midpoint floor(233/2)=116, size floor(55*0.2)=11, half 5
        assert_eq!(windows[0].between, (89, 144));
        assert_eq!(windows[0].window, BlockWindow { start: 111, end: 121, duration: 11 });
    }

    #[test]
    fn improvement_midpoint_matches_floor() {
        for (a, b) in [(1u64, 2u64), (3, 5), (21, 34), (u64::MAX - 1, u64::MAX)] {
            let w = improvement_windows(&[a, b]);
            let expected = ((a as u128 + b as u128) / 2) as u64;
            let half = w[0].window.duration / 2;
            assert_eq!(w[0].window.start + half, expected);
        }
    }

    #[test]
    fn schedule_build() {
        let schedule = JubileeSchedule::build(15);
        assert_eq!(schedule.sequence.len(), 15);
        assert_eq!(schedule.golden_ratio_windows.len(), 14);
        assert_eq!(schedule.maintenance_windows.len(), 15);
        assert_eq!(schedule.improvement_windows.len(), 14);
        assert!(schedule.optimal_windows().count() > 0);
    }
}
