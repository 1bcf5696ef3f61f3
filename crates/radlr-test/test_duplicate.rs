use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::ParseState;

use crate::fixtures::sequential_terminals_grammar;
use crate::recording::{recording_callbacks, Event};

#[test]
fn duplicating_midstream_lets_both_copies_continue_independently() {
  let (grammar, _a, _b) = sequential_terminals_grammar();
  let grammar = Arc::new(grammar);
  let mut original = ParseState::new(Arc::clone(&grammar), recording_callbacks(), Vec::new());

  // Feed only the first terminal, then fork.
  assert_eq!(original.parse(b"a"), Status::Ok);
  let mut forked = original.duplicate();

  // Both copies see the same remaining input and must produce identical
  // callback sequences from this point on.
  assert_eq!(original.parse(b"b"), Status::HardEof);
  assert_eq!(forked.parse(b"b"), Status::HardEof);

  assert_eq!(original.user_data, forked.user_data);
  assert_eq!(
    original.user_data,
    vec![
      Event::StartRule,
      Event::Terminal { name: Some("A".to_string()), offset: 0, len: 1 },
      Event::Terminal { name: Some("B".to_string()), offset: 1, len: 1 },
      Event::EndRule,
    ]
  );
}

#[test]
fn a_forked_copy_diverging_from_the_original_does_not_affect_it() {
  let (grammar, _a, _b) = sequential_terminals_grammar();
  let grammar = Arc::new(grammar);
  let mut original = ParseState::new(Arc::clone(&grammar), recording_callbacks(), Vec::new());

  assert_eq!(original.parse(b"a"), Status::Ok);
  let mut forked = original.duplicate();

  // Feed the fork a byte that can't possibly complete the rule; the
  // original, untouched, can still finish normally afterward.
  assert_eq!(forked.parse(b"z"), Status::Error);
  assert_eq!(forked.user_data.last(), Some(&Event::ErrorChar(b'z')));

  assert_eq!(original.parse(b"b"), Status::HardEof);
  assert!(!original.user_data.contains(&Event::ErrorChar(b'z')));
}
