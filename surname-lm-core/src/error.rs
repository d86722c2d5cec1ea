use std::io;

/// Errors reported by the modeling functions and the corpus glue.
///
/// Modeling functions are pure, so none of these are transient: retrying
/// the same call with the same input always fails the same way.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// An argument is outside the accepted domain (empty completion prefix,
	/// negative smoothing constant, `n == 0`, ...).
	#[error("invalid argument: {0}")]
	InvalidArgument(String),

	/// A step probability was exactly zero, so its logarithm is undefined.
	///
	/// Only reachable with add-k smoothing and `k == 0`.
	#[error("domain error: P({symbol}|{context}) is zero, log-probability is undefined")]
	DomainError { context: char, symbol: char },

	#[error("IO error: {0}")]
	Io(#[from] io::Error),

	#[error("configuration error: {0}")]
	Config(#[from] serde_json::Error),
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
	pub(crate) fn invalid(message: impl Into<String>) -> Self {
		Error::InvalidArgument(message.into())
	}
}
