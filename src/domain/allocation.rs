//! Benchmark moving-average ribbon allocator.
//!
//! Simple moving averages of the benchmark close are computed for windows
//! 2, 4, ..., 24. Each adjacent pair is differenced (shorter minus longer),
//! the differences are normalized by the combined magnitude of their min
//! and max, and the mean of the normalized differences tilts the aggregate
//! long/short split around 0.5. Pure function of the trailing price
//! history; nothing carries over between days.

/// Longest ribbon window; also the minimum history needed for a signal.
pub const MAX_WINDOW: usize = 24;

const WINDOW_STEP: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AllocationState {
    /// Mean of the normalized ribbon differences.
    pub signal: f64,
    pub long_allocations: f64,
    pub short_allocations: f64,
}

impl AllocationState {
    /// The 0.5/0.5 split used when no signal can be formed.
    pub fn neutral() -> Self {
        AllocationState {
            signal: 0.0,
            long_allocations: 0.5,
            short_allocations: 0.5,
        }
    }
}

/// Mean of the trailing `window` values, or `None` with too little history.
pub fn trailing_mean(prices: &[f64], window: usize) -> Option<f64> {
    if window == 0 || prices.len() < window {
        return None;
    }
    let tail = &prices[prices.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Signed differences between each adjacent pair of ribbon averages.
///
/// Every computed window contributes: 2-4 through 22-24, eleven values.
pub fn ribbon_differences(prices: &[f64]) -> Option<Vec<f64>> {
    if prices.len() < MAX_WINDOW {
        return None;
    }
    let mut differences = Vec::with_capacity(MAX_WINDOW / WINDOW_STEP - 1);
    let mut window = WINDOW_STEP;
    while window + WINDOW_STEP <= MAX_WINDOW {
        let shorter = trailing_mean(prices, window)?;
        let longer = trailing_mean(prices, window + WINDOW_STEP)?;
        differences.push(shorter - longer);
        window += WINDOW_STEP;
    }
    Some(differences)
}

/// Compute the day's allocation split from the benchmark's trailing closes.
///
/// Returns the neutral split when the history is shorter than [`MAX_WINDOW`]
/// or when the normalizing scale is zero (flat benchmark).
pub fn compute_allocation(prices: &[f64]) -> AllocationState {
    let differences = match ribbon_differences(prices) {
        Some(d) => d,
        None => return AllocationState::neutral(),
    };

    let min = differences.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = differences
        .iter()
        .cloned()
        .fold(f64::NEG_INFINITY, f64::max);
    let scale = min.abs() + max.abs();
    if scale == 0.0 {
        return AllocationState::neutral();
    }

    let signal = differences.iter().map(|d| d / scale).sum::<f64>() / differences.len() as f64;
    let long_allocations = 0.5 + signal;
    AllocationState {
        signal,
        long_allocations,
        short_allocations: 1.0 - long_allocations,
    }
}
