// petrors-logs/src/depth.rs

use crate::curves::Curve;
use crate::well::WellDataset;
use log::debug;
use std::collections::HashSet;

/// Curves considered when looking for the depth span that carries data.
pub const KEY_CURVES: [Curve; 5] = [
    Curve::GammaRay,
    Curve::BulkDensity,
    Curve::NeutronPorosity,
    Curve::Resistivity,
    Curve::Caliper,
];

/// Removes rows without a depth, keeps the first row of every repeated
/// depth and sorts ascending when any adjacent pair steps upwards.
pub fn clean_depth<T>(rows: Vec<(Option<f64>, T)>) -> Vec<(f64, T)> {
    let original_len = rows.len();
    let mut seen = HashSet::with_capacity(rows.len());
    let mut cleaned: Vec<(f64, T)> = rows
        .into_iter()
        .filter_map(|(depth, row)| depth.filter(|d| !d.is_nan()).map(|d| (d, row)))
        .filter(|(depth, _)| seen.insert(depth_key(*depth)))
        .collect();

    let negative_steps = cleaned.windows(2).filter(|w| w[1].0 < w[0].0).count();
    if negative_steps > 0 {
        debug!("{} decreasing depth steps, sorting samples", negative_steps);
        cleaned.sort_by(|a, b| a.0.total_cmp(&b.0));
    }
    if cleaned.len() != original_len {
        debug!(
            "Depth cleaning removed {} of {} rows",
            original_len - cleaned.len(),
            original_len
        );
    }
    cleaned
}

fn depth_key(depth: f64) -> u64 {
    // -0.0 and 0.0 are the same depth
    if depth == 0. {
        0f64.to_bits()
    } else {
        depth.to_bits()
    }
}

/// Depth span holding data on any of the [`KEY_CURVES`], widened by 2% on
/// each side. Falls back to the full depth range when no key curve has
/// values, and returns `None` for an empty well.
pub fn valid_data_range(dataset: &WellDataset) -> Option<(f64, f64)> {
    let full_range = dataset.depth_range()?;
    let has_data = |index: &usize| {
        let sample = &dataset.samples()[*index];
        KEY_CURVES.iter().any(|c| sample.value(*c).is_some())
    };
    let mut indices = 0..dataset.len();
    let first = match indices.clone().find(has_data) {
        Some(first) => first,
        None => return Some(full_range),
    };
    let last = indices.rfind(has_data).unwrap_or(first);
    let start = dataset.samples()[first].depth_ft;
    let end = dataset.samples()[last].depth_ft;
    let margin = (end - start) * 0.02;
    Some((start - margin, end + margin))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well::Sample;

    #[test]
    fn test_duplicates_keep_first() {
        let rows = vec![(Some(10.0), "a"), (Some(10.0), "b"), (Some(20.0), "c")];
        let cleaned = clean_depth(rows);
        assert_eq!(cleaned, vec![(10.0, "a"), (20.0, "c")]);
    }

    #[test]
    fn test_missing_depths_removed_and_sorted() {
        let rows = vec![
            (Some(30.0), 3),
            (None, 0),
            (Some(10.0), 1),
            (Some(f64::NAN), 9),
            (Some(20.0), 2),
            (Some(10.0), 4),
        ];
        let cleaned = clean_depth(rows);
        assert_eq!(cleaned, vec![(10.0, 1), (20.0, 2), (30.0, 3)]);
    }

    #[test]
    fn test_already_ordered_untouched() {
        let rows = vec![(Some(1.0), 'x'), (Some(2.0), 'y')];
        assert_eq!(clean_depth(rows), vec![(1.0, 'x'), (2.0, 'y')]);
    }

    #[test]
    fn test_empty_input() {
        let rows: Vec<(Option<f64>, ())> = vec![];
        assert!(clean_depth(rows).is_empty());
    }

    #[test]
    fn test_valid_data_range_with_margin() {
        let samples = vec![
            Sample::new(100.0),
            Sample::new(110.0).with(Curve::GammaRay, 50.0),
            Sample::new(160.0).with(Curve::Resistivity, 10.0),
            Sample::new(200.0),
        ];
        let dataset = WellDataset::from_samples("W", samples);
        let (start, end) = valid_data_range(&dataset).unwrap();
        assert!((start - 109.0).abs() < 1e-9);
        assert!((end - 161.0).abs() < 1e-9);
    }

    #[test]
    fn test_valid_data_range_falls_back_to_full_range() {
        let samples = vec![
            Sample::new(100.0).with(Curve::ShaleVolume, 0.2),
            Sample::new(200.0),
        ];
        let dataset = WellDataset::from_samples("W", samples);
        assert_eq!(valid_data_range(&dataset), Some((100.0, 200.0)));
        let empty = WellDataset::from_samples("W", vec![]);
        assert_eq!(valid_data_range(&empty), None);
    }
}
