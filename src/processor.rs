// petrors-logs/src/processor.rs

use crate::curves::Curve;
use crate::lithology::{classify, LithologyInputs};
use crate::matrix::{detect_dominant_matrix, Matrix};
use crate::net_pay::evaluate_net_pay;
use crate::params::{ArchieParameters, CalculationParameters};
use crate::petrophysics::{
    effective_porosity, permeability_kozeny, porosity_density, porosity_neutron_density,
    shale_volume, water_saturation,
};
use crate::smoothing::{smooth_curve, validate_window, SmoothingError, DEFAULT_WINDOW};
use crate::stats::quantile;
use crate::well::WellDataset;
use log::{debug, info, warn};
use std::fmt;
use std::time::{Duration, Instant};
use thiserror::Error;

/// Curves median-filtered before any computation.
pub const SMOOTHED_CURVES: [Curve; 3] = [
    Curve::GammaRay,
    Curve::BulkDensity,
    Curve::NeutronPorosity,
];

/// A curve needs more than this many valid values to be smoothed.
pub const DEFAULT_MIN_VALID_FOR_SMOOTHING: usize = 10;

/// A required curve is absent for the whole well. Never aborts
/// processing; the dependent property is left unset and the condition is
/// returned in the [`ProcessingReport`].
#[derive(Error, Clone, Debug, PartialEq)]
pub enum MissingInputError {
    #[error("no gamma ray curve, shale volume left unset")]
    GammaRay,
    #[error("gamma ray P2 ({0}) is not below P98 ({1}), shale volume left unset")]
    DegenerateGammaRange(f64, f64),
    #[error("no bulk density curve, porosity left unset")]
    BulkDensity,
    #[error("no resistivity curve, water saturation left unset")]
    Resistivity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PropertySource {
    Precalculated,
    Computed,
    Unavailable,
}

impl fmt::Display for PropertySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            PropertySource::Precalculated => "pre-calculated",
            PropertySource::Computed => "computed",
            PropertySource::Unavailable => "unavailable",
        };
        write!(f, "{}", text)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PropertySources {
    pub shale_volume: PropertySource,
    pub porosity_total: PropertySource,
    pub porosity_effective: PropertySource,
    pub water_saturation: PropertySource,
    pub permeability: PropertySource,
}

impl Default for PropertySources {
    fn default() -> Self {
        Self {
            shale_volume: PropertySource::Unavailable,
            porosity_total: PropertySource::Unavailable,
            porosity_effective: PropertySource::Unavailable,
            water_saturation: PropertySource::Unavailable,
            permeability: PropertySource::Unavailable,
        }
    }
}

/// Outcome of one well run.
#[derive(Clone, Debug)]
pub struct ProcessingReport {
    pub well_name: String,
    pub samples: usize,
    pub smoothed: Vec<Curve>,
    pub matrix: Matrix,
    pub matrix_density: f64,
    /// Parameters in force for this well, after matrix defaults and the
    /// Archie override.
    pub parameters: CalculationParameters,
    pub sources: PropertySources,
    pub missing_inputs: Vec<MissingInputError>,
    pub net_pay_samples: usize,
    pub elapsed: Duration,
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let archie = &self.parameters.archie;
        writeln!(f, "Well {} ({} samples)", self.well_name, self.samples)?;
        writeln!(f, "Matrix: {} ({:.2} g/cc)", self.matrix, self.matrix_density)?;
        writeln!(
            f,
            "Archie: A={} M={} N={}  Rw={}",
            archie.a, archie.m, archie.n, self.parameters.rw
        )?;
        let smoothed: Vec<&str> = self.smoothed.iter().map(|c| c.mnemonic()).collect();
        if smoothed.is_empty() {
            writeln!(f, "Smoothed: none")?;
        } else {
            writeln!(f, "Smoothed: {}", smoothed.join(", "))?;
        }
        writeln!(f, "VSH: {}", self.sources.shale_volume)?;
        writeln!(f, "PHI_T: {}", self.sources.porosity_total)?;
        writeln!(f, "PHI_E: {}", self.sources.porosity_effective)?;
        writeln!(f, "SW: {}", self.sources.water_saturation)?;
        writeln!(f, "PERM: {}", self.sources.permeability)?;
        for missing in &self.missing_inputs {
            writeln!(f, "Warning: {}", missing)?;
        }
        write!(f, "Net pay samples: {}", self.net_pay_samples)
    }
}

/// Runs the full per-well computation with a fixed set of caller
/// parameters. Every well starts from its own copy of them.
#[derive(Clone, Debug)]
pub struct WellProcessor {
    parameters: CalculationParameters,
    archie_override: Option<ArchieParameters>,
    smoothing_window: usize,
    min_valid_for_smoothing: usize,
}

impl WellProcessor {
    pub fn parameters(&self) -> &CalculationParameters {
        &self.parameters
    }

    pub fn process(&self, dataset: &mut WellDataset) -> ProcessingReport {
        let start = Instant::now();
        let mut parameters = self.parameters.clone();
        let mut sources = PropertySources::default();
        let mut missing_inputs = Vec::new();
        info!("Processing well {}", dataset.name());

        let smoothed = self.smooth(dataset);

        let (matrix, matrix_density) = detect_dominant_matrix(dataset);
        dataset.set_dominant_matrix(matrix, matrix_density);
        parameters.apply_matrix_defaults(matrix);
        if let Some(archie) = self.archie_override {
            info!(
                "Archie override A={} M={} N={} replaces {} defaults",
                archie.a, archie.m, archie.n, matrix
            );
            parameters.archie = archie;
        }

        match compute_shale_volume(dataset) {
            Ok(source) => sources.shale_volume = source,
            Err(missing) => missing_inputs.push(missing),
        }
        assign_lithology(dataset);
        match compute_total_porosity(dataset, &parameters) {
            Ok(source) => sources.porosity_total = source,
            Err(missing) => missing_inputs.push(missing),
        }
        sources.porosity_effective = compute_effective_porosity(dataset);
        match compute_water_saturation(dataset, &parameters) {
            Ok(source) => sources.water_saturation = source,
            Err(missing) => missing_inputs.push(missing),
        }
        sources.permeability = compute_permeability(dataset);
        let net_pay_samples = evaluate_net_pay(dataset, &parameters.cutoffs);

        for missing in &missing_inputs {
            warn!("{}: {}", dataset.name(), missing);
        }
        let elapsed = start.elapsed();
        info!(
            "Well {} processed in {}",
            dataset.name(),
            humantime::format_duration(elapsed)
        );
        ProcessingReport {
            well_name: dataset.name().to_string(),
            samples: dataset.len(),
            smoothed,
            matrix,
            matrix_density,
            parameters,
            sources,
            missing_inputs,
            net_pay_samples,
            elapsed,
        }
    }

    /// Processes the wells one after another.
    pub fn process_batch(&self, datasets: &mut [WellDataset]) -> Vec<ProcessingReport> {
        let start = Instant::now();
        let reports: Vec<ProcessingReport> = datasets
            .iter_mut()
            .map(|dataset| self.process(dataset))
            .collect();
        info!(
            "Processed {} wells in {}",
            reports.len(),
            humantime::format_duration(start.elapsed())
        );
        reports
    }

    fn smooth(&self, dataset: &mut WellDataset) -> Vec<Curve> {
        let mut smoothed = Vec::new();
        for curve in SMOOTHED_CURVES {
            let values = dataset.curve(curve);
            let valid = values.iter().flatten().count();
            if valid <= self.min_valid_for_smoothing {
                debug!("{} has {} valid values, not smoothed", curve, valid);
                continue;
            }
            dataset.set_curve(curve, smooth_curve(&values, self.smoothing_window));
            smoothed.push(curve);
        }
        debug!(
            "Median filter (window {}) applied to {:?}",
            self.smoothing_window, smoothed
        );
        smoothed
    }
}

fn compute_shale_volume(dataset: &mut WellDataset) -> Result<PropertySource, MissingInputError> {
    if dataset.has_values(Curve::ShaleVolume) {
        info!("Using pre-calculated VSH");
        return Ok(PropertySource::Precalculated);
    }
    let gr = dataset.valid_values(Curve::GammaRay);
    let (gr_min, gr_max) = match (quantile(&gr, 0.02), quantile(&gr, 0.98)) {
        (Some(gr_min), Some(gr_max)) => (gr_min, gr_max),
        _ => return Err(MissingInputError::GammaRay),
    };
    debug!("GR normalisation P2={:.2} P98={:.2}", gr_min, gr_max);
    if !(gr_max > gr_min) {
        return Err(MissingInputError::DegenerateGammaRange(gr_min, gr_max));
    }
    for sample in dataset.samples_mut() {
        sample.shale_volume = shale_volume(sample.gamma_ray, gr_min, gr_max);
    }
    Ok(PropertySource::Computed)
}

fn assign_lithology(dataset: &mut WellDataset) {
    let matrix = dataset.dominant_matrix();
    let dominant_density = dataset.dominant_matrix_density();
    for sample in dataset.samples_mut() {
        let inputs = LithologyInputs::new(
            sample.shale_volume,
            sample.bulk_density,
            sample.neutron_porosity,
            sample.photoelectric_factor,
            matrix,
        );
        let lithology = classify(&inputs);
        sample.lithology = Some(lithology);
        sample.matrix_density = Some(lithology.matrix_density(dominant_density));
    }
}

fn compute_total_porosity(
    dataset: &mut WellDataset,
    parameters: &CalculationParameters,
) -> Result<PropertySource, MissingInputError> {
    if dataset.has_values(Curve::TotalPorosity) {
        info!("Using pre-calculated PHIT");
        return Ok(PropertySource::Precalculated);
    }
    if !dataset.has_values(Curve::BulkDensity) {
        return Err(MissingInputError::BulkDensity);
    }
    let dominant_density = dataset.dominant_matrix_density();
    let mut neutron_density = 0usize;
    for sample in dataset.samples_mut() {
        let rho_matrix = sample.matrix_density.unwrap_or(dominant_density);
        sample.porosity_total = if sample.neutron_porosity.is_some() {
            neutron_density += 1;
            porosity_neutron_density(
                sample.neutron_porosity,
                sample.bulk_density,
                rho_matrix,
                parameters.rho_fluid,
                sample.shale_volume,
                parameters.rho_shale,
            )
        } else {
            porosity_density(
                sample.bulk_density,
                rho_matrix,
                parameters.rho_fluid,
                sample.shale_volume,
                parameters.rho_shale,
            )
        };
    }
    debug!(
        "Total porosity: {} neutron-density samples, {} density-only",
        neutron_density,
        dataset.len() - neutron_density
    );
    Ok(PropertySource::Computed)
}

fn compute_effective_porosity(dataset: &mut WellDataset) -> PropertySource {
    let mut any = false;
    for sample in dataset.samples_mut() {
        sample.porosity_effective = effective_porosity(sample.porosity_total, sample.shale_volume);
        any |= sample.porosity_effective.is_some();
    }
    if any {
        PropertySource::Computed
    } else {
        PropertySource::Unavailable
    }
}

fn compute_water_saturation(
    dataset: &mut WellDataset,
    parameters: &CalculationParameters,
) -> Result<PropertySource, MissingInputError> {
    if dataset.has_values(Curve::WaterSaturation) {
        info!("Using pre-calculated SW");
        return Ok(PropertySource::Precalculated);
    }
    if !dataset.has_values(Curve::Resistivity) {
        return Err(MissingInputError::Resistivity);
    }
    for sample in dataset.samples_mut() {
        sample.water_saturation = water_saturation(
            sample.porosity_effective,
            sample.resistivity_deep,
            &parameters.archie,
            parameters.rw,
        );
    }
    Ok(PropertySource::Computed)
}

fn compute_permeability(dataset: &mut WellDataset) -> PropertySource {
    let mut any = false;
    for sample in dataset.samples_mut() {
        sample.permeability = permeability_kozeny(sample.porosity_effective, sample.shale_volume);
        any |= sample.permeability.is_some();
    }
    if any {
        PropertySource::Computed
    } else {
        PropertySource::Unavailable
    }
}

#[derive(Default)]
pub struct WellProcessorBuilder<'a> {
    parameters: Option<&'a CalculationParameters>,
    archie_override: Option<&'a ArchieParameters>,
    smoothing_window: Option<&'a usize>,
    min_valid_for_smoothing: Option<&'a usize>,
}

impl<'a> WellProcessorBuilder<'a> {
    pub fn build(&self) -> Result<WellProcessor, WellProcessorBuilderError> {
        let parameters = self.parameters.ok_or_else(|| {
            WellProcessorBuilderError::UninitializedFieldError("parameters".to_string())
        })?;
        if let Some(archie) = self.archie_override {
            archie
                .validate()
                .map_err(WellProcessorBuilderError::InvalidArchieOverride)?;
        }
        let smoothing_window = *self.smoothing_window.unwrap_or(&DEFAULT_WINDOW);
        validate_window(smoothing_window)?;
        let min_valid_for_smoothing = *self
            .min_valid_for_smoothing
            .unwrap_or(&DEFAULT_MIN_VALID_FOR_SMOOTHING);
        Ok(WellProcessor {
            parameters: parameters.clone(),
            archie_override: self.archie_override.copied(),
            smoothing_window,
            min_valid_for_smoothing,
        })
    }
    pub fn parameters(&mut self, parameters: &'a CalculationParameters) -> &mut Self {
        self.parameters = Some(parameters);
        self
    }
    /// Archie constants forced over the matrix defaults.
    pub fn archie_override(&mut self, archie: &'a ArchieParameters) -> &mut Self {
        self.archie_override = Some(archie);
        self
    }
    pub fn smoothing_window(&mut self, window: &'a usize) -> &mut Self {
        self.smoothing_window = Some(window);
        self
    }
    pub fn min_valid_for_smoothing(&mut self, count: &'a usize) -> &mut Self {
        self.min_valid_for_smoothing = Some(count);
        self
    }
}

#[derive(Error, Debug)]
pub enum WellProcessorBuilderError {
    #[error("Unitialized field on WellProcessorBuilder: {0}")]
    UninitializedFieldError(String),
    #[error("Invalid Archie override: {0}")]
    InvalidArchieOverride(String),
    #[error(transparent)]
    SmoothingError(#[from] SmoothingError),
}
