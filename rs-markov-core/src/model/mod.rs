//! Top-level module for the Markov generation system.
//!
//! This module provides a word-level Markov chain, including:
//! - The prefix-to-suffix model and its builder (`MarkovModel`)
//! - Internal state management (`State`)

/// Prefix-to-suffix Markov model.
///
/// Handles streaming ingestion of a token source, suffix accumulation
/// per prefix window, and weighted-random sequence generation.
pub mod markov_model;

/// Internal representation of a single chain state (prefix).
///
/// Tracks observed suffixes and supports uniform random sampling over
/// the multiset. This module is not exposed publicly.
mod state;
