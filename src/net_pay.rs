// petrors-logs/src/net_pay.rs

use crate::curves::Curve;
use crate::params::Cutoffs;
use crate::well::{Sample, WellDataset};
use log::info;

/// Pay flag of a single sample.
///
/// Cutoffs are inclusive. A missing PHI_E counts as 0, a missing VSH or SW
/// as 1. When `saturation_assessed` is false (the well has no resistivity)
/// the saturation cutoff is not applied at all.
pub fn is_pay(sample: &Sample, cutoffs: &Cutoffs, saturation_assessed: bool) -> bool {
    let porous = sample.porosity_effective.unwrap_or(0.) >= cutoffs.phi;
    let clean = sample.shale_volume.unwrap_or(1.) <= cutoffs.vsh;
    let saturated = !saturation_assessed || sample.water_saturation.unwrap_or(1.) <= cutoffs.sw;
    porous && clean && saturated
}

/// Flags every sample of the well and returns the pay sample count.
pub fn evaluate_net_pay(dataset: &mut WellDataset, cutoffs: &Cutoffs) -> usize {
    let saturation_assessed = dataset.has_values(Curve::Resistivity);
    let mut count = 0;
    for sample in dataset.samples_mut() {
        sample.is_pay = is_pay(sample, cutoffs, saturation_assessed);
        count += sample.is_pay as usize;
    }
    info!(
        "Net pay: {} of {} samples (PHI >= {}, VSH <= {}{})",
        count,
        dataset.len(),
        cutoffs.phi,
        cutoffs.vsh,
        if saturation_assessed {
            format!(", SW <= {}", cutoffs.sw)
        } else {
            ", SW not assessed".to_string()
        }
    );
    count
}
