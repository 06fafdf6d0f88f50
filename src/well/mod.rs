// petrors-logs/src/well/mod.rs

mod dataset;
mod errors;
mod sample;

pub use dataset::WellDataset;
pub use errors::DatasetError;
pub use sample::Sample;
