use thiserror::Error;

/// Why a typed weight was not applied. The previous weight is kept in every case.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WeightEditError {
	#[error("no weight edit is pending")]
	NoPendingEdit,
	#[error("`{0}` is not a valid weight")]
	InvalidWeight(String),
}
