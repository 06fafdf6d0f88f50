use pretty_env_logger;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn _setup_pretty_env_logger_default() {
    INIT.call_once(|| {
        pretty_env_logger::init();
    });
}

pub use lithology::Lithology;
pub use matrix::{detect_dominant_matrix, Matrix};
pub use params::{
    ArchieParameters, ArchiePreset, CalculationParameters, CalculationParametersBuilder,
    CalculationParametersBuilderError, Cutoffs,
};
pub use processor::{ProcessingReport, WellProcessor, WellProcessorBuilder};
pub use well::{Sample, WellDataset};
pub mod curves;
pub mod depth;
pub mod export;
pub mod las;
pub mod lithology;
pub mod matrix;
pub mod net_pay;
pub mod params;
pub mod petrophysics;
pub mod plot;
pub mod processor;
pub mod report;
pub mod smoothing;
pub mod stats;
pub mod well;
