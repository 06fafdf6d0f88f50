// petrors-logs/src/well/errors.rs

use crate::curves::Curve;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Source has no columns")]
    NoColumns,
    #[error("Curve {0} has {1} values but the depth column has {2}")]
    ColumnLengthMismatch(Curve, usize, usize),
}
