use rand::Rng;

use serde::{Deserialize, Serialize};


/// Represents a state in a Markov chain.
///
/// A `State` corresponds to one fixed-length token prefix and stores
/// every token observed to directly follow that prefix anywhere in the
/// training input, in insertion order, duplicates preserved.
///
/// Conceptually this is a node in a Markov chain; keeping the suffix
/// multiset flat (rather than counting occurrences) means uniform index
/// sampling is already frequency-weighted.
///
/// ## Invariants
/// - `suffixes` is non-empty once the state is installed in a model
///   table (a state is only created upon observing a successor)
/// - `prefix` holds exactly the model's `prefix_len` tokens
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct State {
	/// The token window this state was created for.
	prefix: Vec<String>,
	/// All observed successor tokens, in order of observation.
	/// Example: ["and", "and", "I"]
	suffixes: Vec<String>,
}

impl State {
	/// Creates a new state for the given prefix window, with no
	/// suffixes recorded yet.
	pub fn new(prefix: &[String]) -> Self {
		Self {
			prefix: prefix.to_vec(),
			suffixes: Vec::new(),
		}
	}

	/// Returns the token window this state was created for.
	pub fn prefix(&self) -> &[String] {
		&self.prefix
	}

	/// Records one observed successor token.
	pub fn push(&mut self, suffix: String) {
		self.suffixes.push(suffix);
	}

	/// Picks one suffix uniformly at random over the multiset.
	///
	/// Tokens observed more often occupy more slots and are
	/// proportionally more likely.
	///
	/// Returns `None` if the state has no suffixes.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&str> {
		if self.suffixes.is_empty() {
			return None;
		}
		let i = rng.random_range(0..self.suffixes.len());
		Some(&self.suffixes[i])
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	fn prefix(tokens: &[&str]) -> Vec<String> {
		tokens.iter().map(|s| s.to_string()).collect()
	}

	#[test]
	fn sample_returns_none_when_empty() {
		let state = State::new(&prefix(&["a", "b"]));
		let mut rng = StdRng::seed_from_u64(1);
		assert!(state.sample(&mut rng).is_none());
	}

	#[test]
	fn sample_always_returns_a_member() {
		let mut state = State::new(&prefix(&["a", "b"]));
		state.push("x".to_owned());
		state.push("y".to_owned());

		let mut rng = StdRng::seed_from_u64(2);
		for _ in 0..100 {
			let s = state.sample(&mut rng).unwrap();
			assert!(s == "x" || s == "y");
		}
	}

	#[test]
	fn repeated_suffixes_bias_sampling() {
		let mut state = State::new(&prefix(&["a", "b"]));
		for _ in 0..9 {
			state.push("common".to_owned());
		}
		state.push("rare".to_owned());

		let mut rng = StdRng::seed_from_u64(3);
		let common = (0..1000)
			.filter(|_| state.sample(&mut rng).unwrap() == "common")
			.count();
		// Expected ~900 of 1000; a wide margin keeps this robust
		assert!(common > 800, "common sampled only {} times", common);
	}
}
