//! History downsampling

use crate::price::PriceSample;

/// Approximate number of points returned by a history query
pub const HISTORY_TARGET_POINTS: usize = 30;

/// Keep every K-th sample, K = `len / target + 1`, and return them newest first.
///
/// `samples` must be in storage order (oldest first). Sample 0 is always kept
/// when the input is non-empty.
pub fn downsample(samples: Vec<PriceSample>, target: usize) -> Vec<PriceSample> {
    let total_count = samples.len();
    let stride = total_count / target.max(1) + 1;

    let mut kept: Vec<PriceSample> = samples
        .into_iter()
        .enumerate()
        .filter(|(rn, _)| rn % stride == 0)
        .map(|(_, sample)| sample)
        .collect();
    kept.reverse();
    kept
}
