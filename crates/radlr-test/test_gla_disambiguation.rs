use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::ParseState;

use crate::fixtures::branching_grammar;
use crate::recording::{recording_callbacks, Event};

#[test]
fn a_one_token_gla_routes_to_rule_a() {
  let (grammar, _a, _b) = branching_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // The start rule has no continuation after either branch, so resolving
  // the GLA, running the callee, and returning all happen inside this one
  // call — it reaches HardEof without a separate `finish_parse`.
  assert_eq!(ps.parse(b"a"), Status::HardEof);

  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      Event::StartRule,
      Event::Terminal { name: Some("A".to_string()), offset: 0, len: 1 },
      Event::EndRule,
      Event::EndRule,
    ]
  );
}

#[test]
fn a_one_token_gla_routes_to_rule_b() {
  let (grammar, _a, _b) = branching_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"b"), Status::HardEof);

  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      Event::StartRule,
      Event::Terminal { name: Some("B".to_string()), offset: 0, len: 1 },
      Event::EndRule,
      Event::EndRule,
    ]
  );
}

#[test]
fn an_unrecognized_first_letter_is_a_lex_error() {
  let (grammar, _a, _b) = branching_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"c"), Status::Error);
  assert_eq!(ps.user_data, vec![Event::StartRule, Event::ErrorChar(b'c')]);
}
