use std::io;
use std::sync::Arc;

use radlr_rust_runtime::error::StreamError;
use radlr_rust_runtime::{ByteSource, EngineConfig, ParseState, StreamConfig, StreamParser};

use crate::fixtures::{sequential_terminals_grammar, word_grammar};
use crate::recording::{recording_callbacks, Event};

/// A `ByteSource` that always fails, to exercise the I/O-error path without
/// depending on real file or socket plumbing.
struct FailingSource;

impl ByteSource for FailingSource {
  fn read(&mut self, _buf: &mut [u8]) -> io::Result<usize> {
    Err(io::Error::other("synthetic read failure"))
  }
}

#[test]
fn drives_a_well_formed_input_to_completion() {
  let (grammar, _word) = word_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());
  // A tiny `min_new_data` forces several refill iterations over one short
  // input, exercising the buffer-growth loop rather than satisfying it in
  // a single read.
  let config = StreamConfig::new().min_new_data(2);
  let mut driver = StreamParser::with_config(b"hello".as_slice(), &mut ps, config);

  assert!(driver.drive().is_ok());
  assert_eq!(
    ps.user_data,
    vec![Event::StartRule, Event::Terminal { name: Some("WORD".to_string()), offset: 0, len: 5 }, Event::EndRule]
  );
}

#[test]
fn premature_eof_on_the_stream_is_reported_distinctly_from_a_parse_error() {
  let (grammar, _a, _b) = sequential_terminals_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());
  let mut driver = StreamParser::new(b"a".as_slice(), &mut ps);

  match driver.drive() {
    Err(StreamError::PrematureEof) => {}
    other => panic!("expected PrematureEof, got {other:?}"),
  }
}

#[test]
fn a_failing_source_surfaces_as_an_io_error() {
  let (grammar, _word) = word_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());
  let mut driver = StreamParser::new(FailingSource, &mut ps);

  match driver.drive() {
    Err(StreamError::Io(_)) => {}
    other => panic!("expected Io, got {other:?}"),
  }
}

#[test]
fn growing_past_the_configured_maximum_buffer_size_is_rejected() {
  let (grammar, _word) = word_grammar();
  let mut ps: ParseState<Vec<Event>> = ParseState::with_config(Arc::new(grammar), recording_callbacks(), EngineConfig::default(), Vec::new());
  let config = StreamConfig::new().min_new_data(4000).max_buffer_size(100);
  let mut driver = StreamParser::with_config(b"hello".as_slice(), &mut ps, config);

  match driver.drive() {
    Err(StreamError::BufferLimitExceeded { .. }) => {}
    other => panic!("expected BufferLimitExceeded, got {other:?}"),
  }
}
