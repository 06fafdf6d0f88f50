// petrors-logs/src/smoothing.rs

use thiserror::Error;

pub const DEFAULT_WINDOW: usize = 5;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SmoothingError {
    #[error("Median filter window must be odd and >= 1, got {0}")]
    InvalidWindow(usize),
}

pub fn validate_window(window: usize) -> Result<(), SmoothingError> {
    if window == 0 || window % 2 == 0 {
        return Err(SmoothingError::InvalidWindow(window));
    }
    Ok(())
}

/// Centered median filter. Samples beyond either end are mirrored about
/// the edge (`c b a | a b c | c b a`).
pub fn median_filter(values: &[f64], window: usize) -> Vec<f64> {
    let len = values.len();
    if len == 0 || window <= 1 {
        return values.to_vec();
    }
    let half = (window / 2) as isize;
    let mut buffer = Vec::with_capacity(window);
    (0..len as isize)
        .map(|center| {
            buffer.clear();
            buffer.extend(
                (center - half..center - half + window as isize)
                    .map(|index| values[reflect(index, len)]),
            );
            buffer.sort_by(|a, b| a.total_cmp(b));
            buffer[window / 2]
        })
        .collect()
}

fn reflect(index: isize, len: usize) -> usize {
    let len = len as isize;
    let period = 2 * len;
    let wrapped = index.rem_euclid(period);
    if wrapped >= len {
        (period - 1 - wrapped) as usize
    } else {
        wrapped as usize
    }
}

/// Median-filters the valid values of a curve, leaving missing entries
/// where they are. Curves with fewer valid values than `window` come back
/// unchanged.
pub fn smooth_curve(curve: &[Option<f64>], window: usize) -> Vec<Option<f64>> {
    let valid: Vec<f64> = curve.iter().flatten().copied().collect();
    if valid.len() < window {
        return curve.to_vec();
    }
    let mut filtered = median_filter(&valid, window).into_iter();
    curve
        .iter()
        .map(|value| value.and_then(|_| filtered.next()))
        .collect()
}
