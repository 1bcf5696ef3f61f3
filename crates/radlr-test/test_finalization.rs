use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::ParseState;

use crate::fixtures::{empty_ok_grammar, int_grammar, sequential_terminals_grammar};
use crate::recording::{recording_callbacks, Event};

#[test]
fn empty_input_against_an_already_final_start_state_accepts_immediately() {
  let grammar = empty_ok_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // The start state is final with no transitions, so the very first
  // `descend_to_gla` call pops the start rule before any byte is read.
  assert_eq!(ps.parse(&[]), Status::HardEof);
  assert_eq!(ps.user_data, vec![Event::StartRule, Event::EndRule]);
  assert!(ps.is_finished());
  // Finalizing an already-empty stack is a trivial accept.
  assert!(ps.finish_parse());
}

#[test]
fn a_fully_consumed_two_terminal_rule_reaches_hard_eof_without_finish_parse() {
  let (grammar, _a, _b) = sequential_terminals_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"ab"), Status::HardEof);
  assert!(ps.is_finished());
  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      Event::Terminal { name: Some("A".to_string()), offset: 0, len: 1 },
      Event::Terminal { name: Some("B".to_string()), offset: 1, len: 1 },
      Event::EndRule,
    ]
  );
}

#[test]
fn stopping_mid_rule_fails_finalization() {
  let (grammar, _a, _b) = sequential_terminals_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // Only the first of two required terminals arrives; the rule is left in a
  // non-final state with no further input coming.
  assert_eq!(ps.parse(b"a"), Status::Ok);
  assert!(!ps.finish_parse());
}

#[test]
fn longest_match_emits_on_a_non_matching_byte_rather_than_at_eof() {
  let (grammar, _int) = int_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // The space never matches the digit lexer, so the INT terminal is emitted
  // (and the rule completes) before the space is even consumed as part of
  // any token — the engine reaches `HardEof` on the fourth byte.
  assert_eq!(ps.parse(b"123 "), Status::HardEof);
  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      Event::Terminal { name: Some("INT".to_string()), offset: 0, len: 3 },
      Event::EndRule,
    ]
  );
}
