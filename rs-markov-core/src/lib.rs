//! Markov-chain text generation library.
//!
//! This crate provides a word-level Markov chain system including:
//! - A streaming scanner with pluggable token splitting
//! - A prefix-to-suffix model builder over any byte source
//! - Weighted-random sequence synthesis with injectable randomness
//!
//! The model is built once from a token stream and is immutable afterward;
//! any number of independent generation calls may then read it.

/// Core Markov model and generation logic.
///
/// This module exposes the high-level model interface while keeping
/// internal state representations private.
pub mod model;

/// Streaming scanner and token splitting strategies.
///
/// Word splitting is the expected default, but any strategy honouring
/// the [`scan::SplitFn`] contract is valid.
pub mod scan;

/// Error types for building and generation.
pub mod error;
