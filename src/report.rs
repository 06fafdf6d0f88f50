// petrors-logs/src/report.rs

use crate::lithology::Lithology;
use crate::matrix::Matrix;
use crate::stats::{valid_values, PropertySummary};
use crate::well::WellDataset;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LithologyShare {
    pub lithology: Lithology,
    pub count: usize,
    pub percent: f64,
}

/// Post-processing statistics of one well.
#[derive(Clone, Debug, PartialEq)]
pub struct WellSummary {
    pub well_name: String,
    pub samples: usize,
    pub depth_range: Option<(f64, f64)>,
    pub matrix: Matrix,
    pub matrix_density: f64,
    pub porosity_effective: PropertySummary,
    pub shale_volume: PropertySummary,
    pub water_saturation: PropertySummary,
    /// Only strictly positive permeabilities count.
    pub permeability: PropertySummary,
    /// Ordered by descending count.
    pub lithology: Vec<LithologyShare>,
    pub net_pay_samples: usize,
}

impl WellSummary {
    pub fn of(dataset: &WellDataset) -> Self {
        let samples = dataset.samples();
        let summarize = |values: Vec<Option<f64>>| PropertySummary::of(&valid_values(values));
        let permeability: Vec<f64> = valid_values(samples.iter().map(|s| s.permeability))
            .into_iter()
            .filter(|k| *k > 0.)
            .collect();
        Self {
            well_name: dataset.name().to_string(),
            samples: samples.len(),
            depth_range: dataset.depth_range(),
            matrix: dataset.dominant_matrix(),
            matrix_density: dataset.dominant_matrix_density(),
            porosity_effective: summarize(samples.iter().map(|s| s.porosity_effective).collect()),
            shale_volume: summarize(samples.iter().map(|s| s.shale_volume).collect()),
            water_saturation: summarize(samples.iter().map(|s| s.water_saturation).collect()),
            permeability: PropertySummary::of(&permeability),
            lithology: lithology_distribution(dataset),
            net_pay_samples: samples.iter().filter(|s| s.is_pay).count(),
        }
    }

    pub fn net_pay_percent(&self) -> f64 {
        percent(self.net_pay_samples, self.samples)
    }
}

fn percent(count: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.;
    }
    100. * count as f64 / total as f64
}

pub fn lithology_distribution(dataset: &WellDataset) -> Vec<LithologyShare> {
    let mut counts: BTreeMap<Lithology, usize> = BTreeMap::new();
    for lithology in dataset.samples().iter().filter_map(|s| s.lithology) {
        *counts.entry(lithology).or_default() += 1;
    }
    let mut shares: Vec<LithologyShare> = counts
        .into_iter()
        .map(|(lithology, count)| LithologyShare {
            lithology,
            count,
            percent: percent(count, dataset.len()),
        })
        .collect();
    // stable, so ties keep label order
    shares.sort_by(|a, b| b.count.cmp(&a.count));
    shares
}

fn fmt_summary(f: &mut fmt::Formatter<'_>, name: &str, summary: &PropertySummary) -> fmt::Result {
    match (summary.mean, summary.min, summary.max) {
        (Some(mean), Some(min), Some(max)) => writeln!(
            f,
            "  {:<6} mean={:.4} min={:.4} max={:.4} valid={}",
            name, mean, min, max, summary.valid
        ),
        _ => writeln!(f, "  {:<6} no values", name),
    }
}

impl fmt::Display for WellSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Well: {}", self.well_name)?;
        match self.depth_range {
            Some((top, bottom)) => writeln!(
                f,
                "Depth: {:.2} - {:.2} ft ({} samples)",
                top, bottom, self.samples
            )?,
            None => writeln!(f, "Depth: no samples")?,
        }
        writeln!(
            f,
            "Matrix: {} ({:.2} g/cc)",
            self.matrix, self.matrix_density
        )?;
        writeln!(f, "Properties:")?;
        fmt_summary(f, "PHI_E", &self.porosity_effective)?;
        fmt_summary(f, "VSH", &self.shale_volume)?;
        fmt_summary(f, "SW", &self.water_saturation)?;
        fmt_summary(f, "PERM", &self.permeability)?;
        writeln!(f, "Lithology:")?;
        for share in &self.lithology {
            writeln!(
                f,
                "  {:<24} {:>6} ({:.1}%)",
                share.lithology.label(),
                share.count,
                share.percent
            )?;
        }
        write!(
            f,
            "Net pay: {} samples ({:.1}%)",
            self.net_pay_samples,
            self.net_pay_percent()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well::Sample;

    fn processed_sample(depth: f64, lithology: Lithology, perm: f64, pay: bool) -> Sample {
        let mut sample = Sample::new(depth);
        sample.lithology = Some(lithology);
        sample.permeability = Some(perm);
        sample.porosity_effective = Some(0.1);
        sample.is_pay = pay;
        sample
    }

    fn dataset() -> WellDataset {
        WellDataset::from_samples(
            "SUM-1",
            vec![
                processed_sample(1.0, Lithology::Shale, 0.0, false),
                processed_sample(2.0, Lithology::Sandstone, 10.0, true),
                processed_sample(3.0, Lithology::Sandstone, 30.0, true),
                processed_sample(4.0, Lithology::Limestone, 0.0, false),
            ],
        )
    }

    #[test]
    fn test_lithology_distribution_ordered_by_count() {
        let shares = lithology_distribution(&dataset());
        assert_eq!(shares[0].lithology, Lithology::Sandstone);
        assert_eq!(shares[0].count, 2);
        assert_eq!(shares[0].percent, 50.0);
        // ties keep label order
        assert_eq!(shares[1].lithology, Lithology::Shale);
        assert_eq!(shares[2].lithology, Lithology::Limestone);
    }

    #[test]
    fn test_summary_statistics() {
        let summary = WellSummary::of(&dataset());
        assert_eq!(summary.permeability.valid, 2);
        assert_eq!(summary.permeability.mean, Some(20.0));
        assert_eq!(summary.permeability.min, Some(10.0));
        assert_eq!(summary.porosity_effective.valid, 4);
        assert_eq!(summary.shale_volume.valid, 0);
        assert_eq!(summary.shale_volume.mean, None);
        assert_eq!(summary.net_pay_samples, 2);
        assert_eq!(summary.net_pay_percent(), 50.0);
        assert_eq!(summary.depth_range, Some((1.0, 4.0)));
    }

    #[test]
    fn test_display_report() {
        let text = WellSummary::of(&dataset()).to_string();
        assert!(text.contains("Well: SUM-1"));
        assert!(text.contains("VSH    no values"));
        assert!(text.contains("SANDSTONE"));
        assert!(text.ends_with("Net pay: 2 samples (50.0%)"));
    }
}
