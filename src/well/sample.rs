// petrors-logs/src/well/sample.rs

use crate::curves::Curve;
use crate::lithology::Lithology;

/// One depth-indexed row of a well.
///
/// Pre-calculated VSH, PHIT and SW curves land directly in `shale_volume`,
/// `porosity_total` and `water_saturation`; the engine fills whatever the
/// source file did not provide.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Sample {
    pub depth_ft: f64,
    pub caliper: Option<f64>,
    pub gamma_ray: Option<f64>,
    pub bulk_density: Option<f64>,
    pub neutron_porosity: Option<f64>,
    pub photoelectric_factor: Option<f64>,
    pub resistivity_deep: Option<f64>,
    pub shale_volume: Option<f64>,
    pub porosity_total: Option<f64>,
    pub porosity_effective: Option<f64>,
    pub water_saturation: Option<f64>,
    pub permeability: Option<f64>,
    pub lithology: Option<Lithology>,
    pub matrix_density: Option<f64>,
    pub is_pay: bool,
}

impl Sample {
    pub fn new(depth_ft: f64) -> Self {
        Self {
            depth_ft,
            ..Default::default()
        }
    }

    pub fn with(mut self, curve: Curve, value: f64) -> Self {
        self.set_value(curve, Some(value));
        self
    }

    pub fn value(&self, curve: Curve) -> Option<f64> {
        match curve {
            Curve::Caliper => self.caliper,
            Curve::GammaRay => self.gamma_ray,
            Curve::Resistivity => self.resistivity_deep,
            Curve::BulkDensity => self.bulk_density,
            Curve::NeutronPorosity => self.neutron_porosity,
            Curve::Photoelectric => self.photoelectric_factor,
            Curve::ShaleVolume => self.shale_volume,
            Curve::TotalPorosity => self.porosity_total,
            Curve::WaterSaturation => self.water_saturation,
        }
    }

    /// Non-finite values are stored as missing.
    pub fn set_value(&mut self, curve: Curve, value: Option<f64>) {
        let value = value.filter(|v| v.is_finite());
        let slot = match curve {
            Curve::Caliper => &mut self.caliper,
            Curve::GammaRay => &mut self.gamma_ray,
            Curve::Resistivity => &mut self.resistivity_deep,
            Curve::BulkDensity => &mut self.bulk_density,
            Curve::NeutronPorosity => &mut self.neutron_porosity,
            Curve::Photoelectric => &mut self.photoelectric_factor,
            Curve::ShaleVolume => &mut self.shale_volume,
            Curve::TotalPorosity => &mut self.porosity_total,
            Curve::WaterSaturation => &mut self.water_saturation,
        };
        *slot = value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_value_drops_non_finite() {
        let mut sample = Sample::new(100.0).with(Curve::GammaRay, 45.0);
        assert_eq!(sample.value(Curve::GammaRay), Some(45.0));
        sample.set_value(Curve::GammaRay, Some(f64::NAN));
        assert_eq!(sample.value(Curve::GammaRay), None);
        sample.set_value(Curve::Resistivity, Some(f64::INFINITY));
        assert_eq!(sample.resistivity_deep, None);
    }
}
