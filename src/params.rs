// petrors-logs/src/params.rs

use crate::matrix::Matrix;
use derive_builder::Builder;

/// Archie equation constants: tortuosity `a`, cementation exponent `m`
/// and saturation exponent `n`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArchieParameters {
    pub a: f64,
    pub m: f64,
    pub n: f64,
}

impl ArchieParameters {
    pub const SANDSTONE: Self = Self::new(1.0, 2.0, 2.0);
    pub const CONSOLIDATED_SANDSTONE: Self = Self::new(0.62, 2.15, 2.0);
    pub const LIMESTONE: Self = Self::new(1.0, 2.0, 2.0);
    pub const DOLOMITE: Self = Self::new(1.0, 2.0, 2.0);
    pub const VUGGY_CARBONATE: Self = Self::new(1.0, 1.8, 2.0);

    pub const fn new(a: f64, m: f64, n: f64) -> Self {
        Self { a, m, n }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("A", self.a), ("M", self.m), ("N", self.n)] {
            if !(value > 0.) {
                return Err(format!("Archie parameter {} must be > 0, got {}", name, value));
            }
        }
        Ok(())
    }
}

impl Default for ArchieParameters {
    fn default() -> Self {
        Self::SANDSTONE
    }
}

/// Named Archie presets an analyst can pick instead of typing constants.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArchiePreset {
    Sandstone,
    ConsolidatedSandstone,
    Limestone,
    Dolomite,
    VuggyCarbonate,
}

impl ArchiePreset {
    pub fn parameters(&self) -> ArchieParameters {
        match self {
            ArchiePreset::Sandstone => ArchieParameters::SANDSTONE,
            ArchiePreset::ConsolidatedSandstone => ArchieParameters::CONSOLIDATED_SANDSTONE,
            ArchiePreset::Limestone => ArchieParameters::LIMESTONE,
            ArchiePreset::Dolomite => ArchieParameters::DOLOMITE,
            ArchiePreset::VuggyCarbonate => ArchieParameters::VUGGY_CARBONATE,
        }
    }
}

/// Net pay thresholds, all expressed as fractions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cutoffs {
    pub phi: f64,
    pub vsh: f64,
    pub sw: f64,
}

impl Cutoffs {
    pub const fn new(phi: f64, vsh: f64, sw: f64) -> Self {
        Self { phi, vsh, sw }
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, value) in [("phi", self.phi), ("vsh", self.vsh), ("sw", self.sw)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{} cutoff must be within [0, 1], got {}", name, value));
            }
        }
        Ok(())
    }
}

impl Default for Cutoffs {
    fn default() -> Self {
        Self::new(0.06, 0.50, 0.70)
    }
}

/// Parameters of one well's computation.
///
/// Built once by the caller and copied into every well run, so a well can be
/// given its own Archie constants without touching its neighbours. Matrix
/// detection overwrites `archie` with the matrix defaults; anything the
/// caller wants to force must be applied after that step.
#[derive(Builder, Clone, Debug, PartialEq)]
#[builder(default, build_fn(validate = "Self::validate"))]
pub struct CalculationParameters {
    pub archie: ArchieParameters,
    /// Formation water resistivity, ohm-m.
    pub rw: f64,
    /// Pore fluid density, g/cc.
    pub rho_fluid: f64,
    /// Shale density used by the shale correction of density porosity, g/cc.
    pub rho_shale: f64,
    pub cutoffs: Cutoffs,
}

impl CalculationParameters {
    pub fn apply_matrix_defaults(&mut self, matrix: Matrix) {
        let defaults = matrix.archie_defaults();
        log::debug!(
            "Applying {} Archie defaults: A={} M={} N={}",
            matrix,
            defaults.a,
            defaults.m,
            defaults.n
        );
        self.archie = defaults;
    }
}

impl Default for CalculationParameters {
    fn default() -> Self {
        Self {
            archie: ArchieParameters::default(),
            rw: 0.05,
            rho_fluid: 1.0,
            rho_shale: 2.7,
            cutoffs: Cutoffs::default(),
        }
    }
}

impl CalculationParametersBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(archie) = &self.archie {
            archie.validate()?;
        }
        if let Some(rw) = self.rw {
            if !(rw > 0.) {
                return Err(format!("Rw must be > 0, got {}", rw));
            }
        }
        if let (Some(rho_fluid), Some(rho_shale)) = (self.rho_fluid, self.rho_shale) {
            if rho_fluid >= rho_shale {
                return Err(format!(
                    "rho_fluid ({}) must be smaller than rho_shale ({})",
                    rho_fluid, rho_shale
                ));
            }
        }
        if let Some(cutoffs) = &self.cutoffs {
            cutoffs.validate()?;
        }
        Ok(())
    }
}
