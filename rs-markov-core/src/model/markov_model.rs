use std::collections::HashMap;
use std::io::Read;

use rand::Rng;
use rand::prelude::IteratorRandom;
use serde::{Deserialize, Serialize};

use super::state::State;
use crate::error::{BuildError, GenError};
use crate::scan::{Scanner, SplitFn};

/// Represents a word-level Markov chain model.
///
/// The `MarkovModel` maps every fixed-length token prefix observed in
/// the training input to the multiset of tokens seen to follow it, and
/// generates new sequences by walking those transitions.
///
/// # Responsibilities
/// - Build the prefix table from a streaming token source
/// - Accumulate observed suffixes per prefix window
/// - Generate delimited sequences by weighted-random walking
///
/// # Invariants
/// - `prefix_len` is always >= 1
/// - Every key is a token sequence of exactly `prefix_len` tokens,
///   compared element-wise (no joined-string keys, so distinct prefixes
///   can never collide)
/// - Every state in `table` has at least one suffix
/// - The model is immutable after `build`; generation takes `&self`
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct MarkovModel {
	/// Number of tokens in a prefix window.
	prefix_len: usize,

	/// Mapping from a prefix window to its corresponding state.
	table: HashMap<Vec<String>, State>,
}

impl MarkovModel {
	/// Builds a model by fully consuming a token source.
	///
	/// The first `prefix_len` tokens seed the sliding window; every
	/// subsequent token is recorded as a suffix of the current window
	/// before the window slides forward by one.
	///
	/// # Parameters
	/// - `source`: Any sequential byte source. Fully consumed, not
	///   reusable afterward.
	/// - `prefix_len`: Number of tokens per prefix window, >= 1.
	/// - `split`: Token splitting strategy (ex. [`scan_words`]).
	///
	/// # Errors
	/// - [`BuildError::InvalidArgument`] if `prefix_len` is 0, checked
	///   before any input is consumed.
	/// - [`BuildError::PrefixExceedsInput`] if the source holds fewer
	///   than `prefix_len` tokens. No partial model is produced.
	/// - [`BuildError::SourceRead`] if the source or split function
	///   fails mid-scan. The build aborts.
	///
	/// [`scan_words`]: crate::scan::scan_words
	pub fn build<R, F>(source: R, prefix_len: usize, split: F) -> Result<Self, BuildError>
	where
		R: Read,
		F: SplitFn,
	{
		if prefix_len == 0 {
			return Err(BuildError::InvalidArgument);
		}

		let mut scanner = Scanner::new(source, split);

		// Seed the sliding window: requires prefix_len tokens
		let mut prefix: Vec<String> = Vec::with_capacity(prefix_len);
		for _ in 0..prefix_len {
			match scanner.next() {
				Some(token) => prefix.push(token?),
				None => return Err(BuildError::PrefixExceedsInput),
			}
		}

		// Install each further token as a suffix of the current window,
		// then slide the window forward by one
		let mut table: HashMap<Vec<String>, State> = HashMap::new();
		for token in scanner {
			let suffix = token?;
			let state = table
				.entry(prefix.clone())
				.or_insert_with(|| State::new(&prefix));
			state.push(suffix.clone());
			prefix.remove(0);
			prefix.push(suffix);
		}

		Ok(Self { prefix_len, table })
	}

	/// Returns the number of tokens per prefix window.
	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Returns the number of distinct prefixes in the table.
	pub fn len(&self) -> usize {
		self.table.len()
	}

	/// Returns `true` if no prefix ever gained a suffix.
	///
	/// Only possible when the training input held exactly `prefix_len`
	/// tokens.
	pub fn is_empty(&self) -> bool {
		self.table.is_empty()
	}

	/// Returns an iterator over the prefix windows known to the model.
	pub fn prefixes(&self) -> impl Iterator<Item = &[String]> {
		self.table.keys().map(|k| k.as_slice())
	}

	/// Generates a sequence using an injected random source.
	///
	/// # Parameters
	/// - `limit`: Maximum total token count of the output, seed prefix
	///   included.
	/// - `delim`: String used to join the output tokens.
	/// - `rng`: The random source; inject a seeded generator for
	///   deterministic output.
	///
	/// # Behavior
	/// - Picks a uniformly random known prefix as the starting point
	///   and seeds the output with its tokens.
	/// - Repeatedly samples one suffix of the trailing window (tokens
	///   observed more often are proportionally more likely) and slides
	///   the window, until `limit` is reached or the trailing window is
	///   unknown. An unknown window is a normal termination: the walk
	///   reached the end of the training corpus.
	///
	/// # Errors
	/// Returns [`GenError::EmptyModel`] if the table has no entries.
	pub fn generate_delimited_with<R: Rng + ?Sized>(
		&self,
		limit: usize,
		delim: &str,
		rng: &mut R,
	) -> Result<String, GenError> {
		// Select a random starting point
		let start = self.table.keys().choose(rng).ok_or(GenError::EmptyModel)?;

		// Seed the output with the starting prefix
		let mut elements: Vec<String> = self.table[start].prefix().to_vec();
		let mut window: Vec<String> = elements.clone();

		// Walk the chain
		while elements.len() < limit {
			let Some(state) = self.table.get(&window) else {
				break;
			};
			// The state invariant guarantees at least one suffix
			let Some(suffix) = state.sample(rng) else {
				break;
			};
			elements.push(suffix.to_owned());
			window.remove(0);
			window.push(suffix.to_owned());
		}

		Ok(elements.join(delim))
	}

	/// Generates a sequence joined with the given delimiter, using the
	/// thread-local random source.
	pub fn generate_delimited(&self, limit: usize, delim: &str) -> Result<String, GenError> {
		self.generate_delimited_with(limit, delim, &mut rand::rng())
	}

	/// Generates a space-delimited sequence using the thread-local
	/// random source.
	pub fn generate(&self, limit: usize) -> Result<String, GenError> {
		self.generate_delimited(limit, " ")
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::scan::scan_words;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	#[test]
	fn build_records_every_transition() {
		let model = MarkovModel::build("a b a b a".as_bytes(), 1, scan_words).unwrap();

		// "a" is followed by "b" twice, "b" by "a" twice
		assert_eq!(model.prefix_len(), 1);
		assert_eq!(model.len(), 2);
		assert!(model.prefixes().any(|p| p == ["a".to_owned()]));
		assert!(model.prefixes().any(|p| p == ["b".to_owned()]));
	}

	#[test]
	fn prefix_keys_are_element_wise() {
		// With joined-string keys, ["ab", "c"] and ["a", "bc"] would
		// collide; element-wise keys must keep them distinct
		let model = MarkovModel::build("ab c x a bc y".as_bytes(), 2, scan_words).unwrap();
		let keys: Vec<&[String]> = model.prefixes().collect();
		assert!(keys.contains(&["ab".to_owned(), "c".to_owned()].as_slice()));
		assert!(keys.contains(&["a".to_owned(), "bc".to_owned()].as_slice()));
	}

	#[test]
	fn exact_prefix_len_input_builds_empty_model() {
		let model = MarkovModel::build("one two".as_bytes(), 2, scan_words).unwrap();
		assert!(model.is_empty());

		let mut rng = StdRng::seed_from_u64(7);
		assert!(matches!(
			model.generate_delimited_with(10, " ", &mut rng),
			Err(GenError::EmptyModel)
		));
	}

	#[test]
	fn zero_prefix_len_is_rejected() {
		let err = MarkovModel::build("some input".as_bytes(), 0, scan_words).unwrap_err();
		assert!(matches!(err, BuildError::InvalidArgument));
	}

	#[test]
	fn deterministic_with_seeded_rng() {
		let corpus = "the quick brown fox jumps over the lazy dog the quick cat";
		let model = MarkovModel::build(corpus.as_bytes(), 2, scan_words).unwrap();

		let a = model
			.generate_delimited_with(8, " ", &mut StdRng::seed_from_u64(42))
			.unwrap();
		let b = model
			.generate_delimited_with(8, " ", &mut StdRng::seed_from_u64(42))
			.unwrap();
		assert_eq!(a, b);
	}

	#[test]
	fn limit_below_prefix_len_yields_seed_only() {
		let model = MarkovModel::build("a b c d e".as_bytes(), 2, scan_words).unwrap();
		let mut rng = StdRng::seed_from_u64(5);
		let out = model.generate_delimited_with(1, " ", &mut rng).unwrap();
		assert_eq!(out.split(' ').count(), 2);
	}
}
