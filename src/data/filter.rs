use thiserror::Error;

use super::model::{Dataset, TurbineRecord};

// ---------------------------------------------------------------------------
// Selection by row position
// ---------------------------------------------------------------------------

/// A selection referenced a row position the dataset does not have.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("selected position {position} is out of range for {len} row(s)")]
pub struct OutOfRangeError {
    pub position: usize,
    pub len: usize,
}

/// Return the records at `positions`, in the order given.
///
/// A selection event hands over row positions, not identifiers, so the
/// output corresponds 1:1 to the input: duplicates yield duplicates and an
/// empty selection yields an empty vector. Every position is validated
/// before any row is copied; on error nothing is returned.
pub fn select_records(
    dataset: &Dataset,
    positions: &[usize],
) -> Result<Vec<TurbineRecord>, OutOfRangeError> {
    let len = dataset.len();
    for &position in positions {
        if position >= len {
            return Err(OutOfRangeError { position, len });
        }
    }

    Ok(positions
        .iter()
        .map(|&position| dataset.records[position].clone())
        .collect())
}
