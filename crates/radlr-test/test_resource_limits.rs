use std::sync::Arc;

use radlr_rust_runtime::error::Status;
use radlr_rust_runtime::{Callbacks, EngineConfig, ParseState};

use crate::fixtures::{deep_lookahead_grammar, infinite_recursion_grammar};

#[test]
fn unbounded_recursion_trips_the_stack_depth_limit() {
  let grammar = infinite_recursion_grammar();
  let config = EngineConfig::new().max_stack_depth(8);
  let mut ps: ParseState<()> = ParseState::with_config(Arc::new(grammar), Callbacks::new(), config, ());

  // The grammar calls itself forever without ever reading a byte, so the
  // limit is hit on the very first call, even with an empty slice.
  assert_eq!(ps.parse(&[]), Status::ResourceLimitExceeded);
}

#[test]
fn a_gla_that_never_resolves_trips_the_lookahead_limit() {
  let (grammar, _x) = deep_lookahead_grammar(200);
  let config = EngineConfig::new().max_lookahead(20);
  let mut ps: ParseState<()> = ParseState::with_config(Arc::new(grammar), Callbacks::new(), config, ());

  let input = vec![b'x'; 100];
  assert_eq!(ps.parse(&input), Status::ResourceLimitExceeded);
}

#[test]
fn a_gla_that_resolves_before_the_limit_succeeds() {
  let (grammar, _x) = deep_lookahead_grammar(3);
  let config = EngineConfig::new().max_lookahead(20);
  let mut ps: ParseState<()> = ParseState::with_config(Arc::new(grammar), Callbacks::new(), config, ());

  // `chain_len + 1` (4) `x`s resolve the GLA, which hands the very first of
  // them back to the RTN's sole terminal transition — completing the start
  // rule (it has no continuation state) and popping the stack to empty.
  let input = vec![b'x'; 4];
  assert_eq!(ps.parse(&input), Status::HardEof);
}
