// petrors-logs/src/matrix.rs

use crate::curves::Curve;
use crate::params::ArchieParameters;
use crate::stats::{median, Quartiles};
use crate::well::WellDataset;
use log::{debug, info};
use std::fmt;

/// Dominant mineral framework of a well.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Matrix {
    #[default]
    Sandstone,
    Limestone,
    Dolomite,
}

impl Matrix {
    /// Canonical grain density, g/cc.
    pub fn density(&self) -> f64 {
        match self {
            Matrix::Sandstone => 2.65,
            Matrix::Limestone => 2.71,
            Matrix::Dolomite => 2.87,
        }
    }

    pub fn archie_defaults(&self) -> ArchieParameters {
        match self {
            Matrix::Sandstone => ArchieParameters::SANDSTONE,
            Matrix::Limestone => ArchieParameters::LIMESTONE,
            Matrix::Dolomite => ArchieParameters::DOLOMITE,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Matrix::Sandstone => "SANDSTONE",
            Matrix::Limestone => "LIMESTONE",
            Matrix::Dolomite => "DOLOMITE",
        }
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Infers the dominant matrix of a well from its density, photoelectric
/// factor and gamma-ray medians.
pub fn detect_dominant_matrix(dataset: &WellDataset) -> (Matrix, f64) {
    let density = dataset.valid_values(Curve::BulkDensity);
    let quartiles = match Quartiles::of(&density) {
        Some(quartiles) => quartiles,
        None => {
            info!("No valid density values, assuming {}", Matrix::Sandstone);
            return (Matrix::Sandstone, Matrix::Sandstone.density());
        }
    };
    let pef_median = median(&dataset.valid_values(Curve::Photoelectric));
    let gr_median = median(&dataset.valid_values(Curve::GammaRay));
    debug!(
        "RHOB p25={:.3} median={:.3} p75={:.3}, PEF median={:?}, GR median={:?}",
        quartiles.p25, quartiles.median, quartiles.p75, pef_median, gr_median
    );
    let matrix = match pef_median {
        Some(pef) => matrix_from_pef(pef, quartiles.median),
        None => matrix_from_density(&quartiles, gr_median),
    };
    info!("Dominant matrix: {} ({:.2} g/cc)", matrix, matrix.density());
    (matrix, matrix.density())
}

fn matrix_from_pef(pef_median: f64, rhob_median: f64) -> Matrix {
    if pef_median > 4.5 {
        if rhob_median > 2.80 {
            Matrix::Dolomite
        } else {
            Matrix::Limestone
        }
    } else if pef_median > 2.5 {
        Matrix::Dolomite
    } else if pef_median < 2.2 {
        Matrix::Sandstone
    } else if rhob_median > 2.75 {
        Matrix::Dolomite
    } else if rhob_median > 2.68 {
        Matrix::Limestone
    } else {
        Matrix::Sandstone
    }
}

fn matrix_from_density(quartiles: &Quartiles, gr_median: Option<f64>) -> Matrix {
    let rhob_median = quartiles.median;
    if rhob_median > 2.80 {
        Matrix::Dolomite
    } else if rhob_median > 2.68 {
        if quartiles.p75 > 2.75 {
            return Matrix::Limestone;
        }
        match gr_median {
            Some(gr) if gr >= 50. => Matrix::Sandstone,
            _ => Matrix::Limestone,
        }
    } else if rhob_median < 2.60 {
        Matrix::Sandstone
    } else {
        match gr_median {
            Some(gr) if gr < 60. => Matrix::Limestone,
            _ => Matrix::Sandstone,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::well::Sample;

    fn well(rows: &[(f64, Option<f64>, Option<f64>)]) -> WellDataset {
        // (rhob, pef, gr)
        let samples = rows
            .iter()
            .enumerate()
            .map(|(i, &(rhob, pef, gr))| {
                let mut sample = Sample::new(1000.0 + i as f64).with(Curve::BulkDensity, rhob);
                sample.photoelectric_factor = pef;
                sample.gamma_ray = gr;
                sample
            })
            .collect();
        WellDataset::from_samples("TEST", samples)
    }

    #[test]
    fn test_no_density_defaults_to_sandstone() {
        let dataset = WellDataset::from_samples(
            "TEST",
            vec![Sample::new(1.0).with(Curve::GammaRay, 20.0)],
        );
        assert_eq!(detect_dominant_matrix(&dataset), (Matrix::Sandstone, 2.65));
    }

    #[test]
    fn test_low_gamma_band_picks_limestone() {
        let dataset = well(&[
            (2.64, None, Some(35.0)),
            (2.66, None, Some(40.0)),
            (2.67, None, Some(45.0)),
        ]);
        assert_eq!(detect_dominant_matrix(&dataset), (Matrix::Limestone, 2.71));
    }

    #[test]
    fn test_band_without_gamma_is_sandstone() {
        let dataset = well(&[(2.62, None, None), (2.66, None, None)]);
        assert_eq!(detect_dominant_matrix(&dataset), (Matrix::Sandstone, 2.65));
    }

    #[test]
    fn test_dense_well_is_dolomite() {
        let dataset = well(&[(2.85, None, None), (2.84, None, Some(20.0))]);
        assert_eq!(detect_dominant_matrix(&dataset), (Matrix::Dolomite, 2.87));
    }

    #[test]
    fn test_limestone_range_consults_p75_then_gamma() {
        let dataset = well(&[
            (2.69, None, Some(80.0)),
            (2.70, None, Some(80.0)),
            (2.78, None, Some(80.0)),
            (2.79, None, Some(80.0)),
        ]);
        // median 2.74, p75 > 2.75
        assert_eq!(detect_dominant_matrix(&dataset).0, Matrix::Limestone);

        let dataset = well(&[
            (2.69, None, Some(80.0)),
            (2.70, None, Some(80.0)),
            (2.71, None, Some(80.0)),
        ]);
        assert_eq!(detect_dominant_matrix(&dataset).0, Matrix::Sandstone);

        let dataset = well(&[
            (2.69, None, None),
            (2.70, None, None),
            (2.71, None, None),
        ]);
        assert_eq!(detect_dominant_matrix(&dataset).0, Matrix::Limestone);
    }

    #[test]
    fn test_pef_disambiguation() {
        assert_eq!(matrix_from_pef(5.0, 2.85), Matrix::Dolomite);
        assert_eq!(matrix_from_pef(5.0, 2.71), Matrix::Limestone);
        assert_eq!(matrix_from_pef(3.0, 2.50), Matrix::Dolomite);
        assert_eq!(matrix_from_pef(4.5, 2.50), Matrix::Dolomite);
        assert_eq!(matrix_from_pef(1.8, 2.90), Matrix::Sandstone);
        assert_eq!(matrix_from_pef(2.3, 2.76), Matrix::Dolomite);
        assert_eq!(matrix_from_pef(2.3, 2.70), Matrix::Limestone);
        assert_eq!(matrix_from_pef(2.3, 2.65), Matrix::Sandstone);
    }

    #[test]
    fn test_pef_takes_precedence_over_density() {
        let dataset = well(&[
            (2.55, Some(5.1), Some(90.0)),
            (2.56, Some(5.2), Some(90.0)),
        ]);
        assert_eq!(detect_dominant_matrix(&dataset), (Matrix::Limestone, 2.71));
    }
}
