use std::io;

use thiserror::Error;

/// Errors that can occur while building a model from a token stream.
///
/// All errors are terminal for the build: no partial model is ever
/// returned alongside one of these.
#[derive(Debug, Error)]
pub enum BuildError {
	/// The prefix length was zero. Detected before any input is consumed.
	#[error("prefix length must be at least 1")]
	InvalidArgument,

	/// The source ran out of tokens before a full seed prefix was read.
	#[error("prefix may not exceed input size")]
	PrefixExceedsInput,

	/// The source or split function failed during scanning.
	#[error("failed to read from source: {0}")]
	SourceRead(#[from] io::Error),
}

/// Errors that can occur during sequence generation.
#[derive(Debug, Error)]
pub enum GenError {
	/// The model table has no entries to pick a starting prefix from.
	///
	/// Only reachable when the training input held exactly `prefix_len`
	/// tokens, so a seed prefix existed but no suffix was ever observed.
	#[error("model has no entries to start from")]
	EmptyModel,
}
