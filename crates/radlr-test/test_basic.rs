use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::ParseState;

use crate::fixtures::word_grammar;
use crate::recording::{recording_callbacks, Event};

#[test]
fn parses_a_single_word_and_fires_callbacks_in_order() {
  let (grammar, _word) = word_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"hello"), Status::Ok);
  assert!(ps.finish_parse());

  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      Event::Terminal { name: Some("WORD".to_string()), offset: 0, len: 5 },
      Event::EndRule,
    ]
  );
}

#[test]
fn rejects_a_byte_outside_the_lexer_alphabet() {
  let (grammar, _word) = word_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // '5' never matches the [a-z] lexer from the very first byte, so this is
  // a lex error, not a syntax one.
  assert_eq!(ps.parse(b"5"), Status::Error);
  assert_eq!(ps.user_data, vec![Event::StartRule, Event::ErrorChar(b'5')]);
}

#[test]
fn tracks_line_and_column_across_multiple_parse_calls() {
  let (grammar, _word) = word_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"hel"), Status::Ok);
  assert_eq!(ps.offset().byte, 3);
  assert_eq!(ps.parse(b"lo"), Status::Ok);
  assert_eq!(ps.offset().byte, 5);
  assert_eq!(ps.offset().line, 1);
}
