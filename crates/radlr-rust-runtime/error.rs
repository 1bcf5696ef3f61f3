//! Status codes and error types.
//!
//! [`Status`] is the hot-path return value of [`ParseState::parse`] and
//! friends — a plain `Copy` enum, no allocation, no payload heavier than an
//! index. Everything above it ([`StreamError`], [`GrammarError`]) is a richer
//! `thiserror`-derived enum for the embedding surfaces that want one: the
//! stream driver's `Result`-based API, and grammar construction.
//!
//! [`ParseState::parse`]: crate::interp::ParseState::parse

/// Outcome of feeding a byte slice (or finishing a parse) to the interpreter.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Status {
  /// The slice was consumed with no error; more input may follow.
  Ok,
  /// A lex error or syntax error occurred; a callback has already fired.
  Error,
  /// The start rule has been fully accepted. The stack is empty; no further
  /// transitions occur for this parse state.
  HardEof,
  /// `max_stack_depth` or `max_lookahead` was exceeded.
  ResourceLimitExceeded,
}

/// Errors that can occur while hand-building a [`Grammar`](crate::types::grammar::Grammar)
/// with the constructors in [`types::grammar`](crate::types::grammar). These
/// are construction-time sanity checks, not parse-time errors.
#[derive(thiserror::Error, Clone, Debug)]
pub enum GrammarError {
  #[error("{what} is empty")]
  EmptyAutomaton { what: &'static str },

  #[error("{what} references out-of-range index {index}")]
  DanglingReference { what: &'static str, index: usize },
}

/// Errors surfaced by [`StreamParser::drive`](crate::stream::StreamParser::drive).
#[derive(thiserror::Error, Debug)]
pub enum StreamError {
  #[error("I/O error reading from stream: {0}")]
  Io(#[from] std::io::Error),

  #[error("input exhausted while the parse was not in a legal end state")]
  PrematureEof,

  #[error("growing the stream buffer to {requested} bytes would exceed the configured maximum of {max}")]
  BufferLimitExceeded { requested: usize, max: usize },

  #[error("parse error ({0:?})")]
  Parse(Status),
}
