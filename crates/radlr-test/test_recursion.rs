use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::ParseState;

use crate::fixtures::balanced_parens_grammar;
use crate::recording::{recording_callbacks, Event};

fn lp(name: &str, offset: usize) -> Event {
  Event::Terminal { name: Some(name.to_string()), offset, len: 1 }
}

#[test]
fn empty_input_accepts_the_epsilon_alternative() {
  let (grammar, _lparen, _rparen) = balanced_parens_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(&[]), Status::Ok);
  assert!(ps.finish_parse());
  assert_eq!(ps.user_data, vec![Event::StartRule, Event::EndRule]);
}

#[test]
fn one_balanced_pair_recurses_one_level_and_pops_back_out() {
  let (grammar, _lparen, _rparen) = balanced_parens_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // The matching ')' completes the whole start rule without a separate
  // finish_parse call: the nested S's entry GLA resolves its own epsilon
  // alternative off the same ')' lookahead, then `pop_rtn_frame` advances
  // the outer S's recorded transition to the state that shifts ')' directly.
  assert_eq!(ps.parse(b"()"), Status::HardEof);
  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      lp("LPAREN", 0),
      Event::StartRule,
      Event::EndRule,
      lp("RPAREN", 1),
      Event::EndRule,
    ]
  );
}

#[test]
fn unbalanced_open_parens_leave_every_level_short_of_its_closing_paren() {
  let (grammar, _lparen, _rparen) = balanced_parens_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  // Two opens with no closes: both the outer and the inner S are left
  // waiting on a recorded transition whose destination state still expects
  // ')', so finalization must fail rather than silently accept.
  assert_eq!(ps.parse(b"(("), Status::Ok);
  assert!(!ps.finish_parse());
}

#[test]
fn nested_pairs_recurse_and_unwind_at_each_level() {
  let (grammar, _lparen, _rparen) = balanced_parens_grammar();
  let mut ps = ParseState::new(Arc::new(grammar), recording_callbacks(), Vec::new());

  assert_eq!(ps.parse(b"(())"), Status::HardEof);
  assert_eq!(
    ps.user_data,
    vec![
      Event::StartRule,
      lp("LPAREN", 0),
      Event::StartRule,
      lp("LPAREN", 1),
      Event::StartRule,
      Event::EndRule,
      lp("RPAREN", 2),
      Event::EndRule,
      lp("RPAREN", 3),
      Event::EndRule,
    ]
  );
}
