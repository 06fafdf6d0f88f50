// petrors-logs/src/well/dataset.rs

use super::errors::DatasetError;
use super::sample::Sample;
use crate::curves::{Curve, CurveResolution};
use crate::depth::clean_depth;
use crate::las::LasFile;
use crate::matrix::Matrix;
use crate::stats::valid_values;
use log::{debug, info};
use std::collections::BTreeMap;

/// All samples of one well on a single, strictly increasing depth axis.
#[derive(Clone, Debug)]
pub struct WellDataset {
    name: String,
    samples: Vec<Sample>,
    depth_source: Option<String>,
    curve_sources: BTreeMap<Curve, String>,
    dominant_matrix: Matrix,
    dominant_matrix_density: f64,
}

impl WellDataset {
    /// Builds a dataset from rows whose depth is already set. Rows are
    /// still passed through the depth cleaner, so NaN depths are dropped
    /// and duplicated depths keep their first occurrence.
    pub fn from_samples(name: impl Into<String>, samples: Vec<Sample>) -> Self {
        let rows = samples
            .into_iter()
            .map(|sample| (Some(sample.depth_ft), sample))
            .collect();
        Self::from_cleaned_rows(name.into(), rows, None, BTreeMap::new())
    }

    /// Builds a dataset from canonical columns. Curves absent from `columns`
    /// are left without values.
    pub fn from_columns(
        name: impl Into<String>,
        depth: &[Option<f64>],
        columns: &BTreeMap<Curve, Vec<Option<f64>>>,
    ) -> Result<Self, DatasetError> {
        for (curve, values) in columns {
            if values.len() != depth.len() {
                return Err(DatasetError::ColumnLengthMismatch(
                    *curve,
                    values.len(),
                    depth.len(),
                ));
            }
        }
        let rows = depth
            .iter()
            .enumerate()
            .map(|(row, &depth_ft)| {
                let mut sample = Sample::default();
                for (curve, values) in columns {
                    sample.set_value(*curve, values[row]);
                }
                (depth_ft, sample)
            })
            .collect();
        Ok(Self::from_cleaned_rows(
            name.into(),
            rows,
            None,
            BTreeMap::new(),
        ))
    }

    /// Maps the columns of a LAS file onto canonical curves and builds the
    /// dataset from them.
    pub fn from_las(las: &LasFile) -> Result<Self, DatasetError> {
        let mnemonics = las.mnemonics();
        let resolution = CurveResolution::resolve(&mnemonics).ok_or(DatasetError::NoColumns)?;
        let depth = las.column(resolution.depth);
        let mut columns = BTreeMap::new();
        let mut curve_sources = BTreeMap::new();
        for (&curve, &index) in &resolution.curves {
            columns.insert(curve, las.column(index));
            curve_sources.insert(curve, mnemonics[index].clone());
        }
        let depth_source = mnemonics[resolution.depth].clone();
        debug!(
            "Depth taken from {}, mapped curves: {:?}",
            depth_source, curve_sources
        );
        let mut dataset = Self::from_columns(las.well_name(), &depth, &columns)?;
        dataset.depth_source = Some(depth_source);
        dataset.curve_sources = curve_sources;
        Ok(dataset)
    }

    fn from_cleaned_rows(
        name: String,
        rows: Vec<(Option<f64>, Sample)>,
        depth_source: Option<String>,
        curve_sources: BTreeMap<Curve, String>,
    ) -> Self {
        let original_len = rows.len();
        let samples: Vec<Sample> = clean_depth(rows)
            .into_iter()
            .map(|(depth_ft, mut sample)| {
                sample.depth_ft = depth_ft;
                sample
            })
            .collect();
        info!(
            "Well {}: {} samples ({} dropped by depth cleaning)",
            name,
            samples.len(),
            original_len - samples.len()
        );
        let matrix = Matrix::default();
        Self {
            name,
            samples,
            depth_source,
            curve_sources,
            dominant_matrix: matrix,
            dominant_matrix_density: matrix.density(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn samples(&self) -> &[Sample] {
        &self.samples
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [Sample] {
        &mut self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn depths(&self) -> Vec<f64> {
        self.samples.iter().map(|s| s.depth_ft).collect()
    }

    /// First and last depth, `None` for an empty well.
    pub fn depth_range(&self) -> Option<(f64, f64)> {
        Some((self.samples.first()?.depth_ft, self.samples.last()?.depth_ft))
    }

    pub fn curve(&self, curve: Curve) -> Vec<Option<f64>> {
        self.samples.iter().map(|s| s.value(curve)).collect()
    }

    pub fn valid_values(&self, curve: Curve) -> Vec<f64> {
        valid_values(self.samples.iter().map(|s| s.value(curve)))
    }

    pub fn has_values(&self, curve: Curve) -> bool {
        self.samples.iter().any(|s| s.value(curve).is_some())
    }

    pub(crate) fn set_curve(&mut self, curve: Curve, values: Vec<Option<f64>>) {
        for (sample, value) in self.samples.iter_mut().zip(values) {
            sample.set_value(curve, value);
        }
    }

    pub fn depth_source(&self) -> Option<&str> {
        self.depth_source.as_deref()
    }

    /// Source mnemonic of every mapped canonical curve.
    pub fn curve_sources(&self) -> &BTreeMap<Curve, String> {
        &self.curve_sources
    }

    pub fn dominant_matrix(&self) -> Matrix {
        self.dominant_matrix
    }

    pub fn dominant_matrix_density(&self) -> f64 {
        self.dominant_matrix_density
    }

    pub(crate) fn set_dominant_matrix(&mut self, matrix: Matrix, density: f64) {
        self.dominant_matrix = matrix;
        self.dominant_matrix_density = density;
    }
}
