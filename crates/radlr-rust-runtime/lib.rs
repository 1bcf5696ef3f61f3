//! A table-driven interpreter for precompiled context-free grammars.
//!
//! The grammar itself — three interlocking automata (RTNs, GLAs, IntFAs, see
//! [`types::grammar`]) — is built and owned elsewhere (a grammar compiler, a
//! wire-format decoder); this crate only knows how to *execute* one against a
//! byte stream. A [`ParseState`](interp::ParseState) drives the three
//! automata through a single stack ([`stack::Frame`]), buffers terminals for
//! bounded lookahead, and invokes user callbacks ([`callbacks::Callbacks`]) as
//! it goes.
//!
//! See the `interp` and `lexer` module docs for the orchestration protocol
//! among the three automata.

pub mod callbacks;
pub mod config;
pub mod error;
pub mod interp;
pub mod lexer;
pub mod stack;
pub mod stream;
pub mod types;

pub use callbacks::Callbacks;
pub use config::{EngineConfig, StreamConfig};
pub use error::{GrammarError, Status, StreamError};
pub use interp::ParseState;
pub use stream::{ByteSource, StreamParser};
pub use types::grammar::Grammar;

#[cfg(test)]
mod tracing_smoke {
  use std::sync::Arc;

  use crate::error::Status;
  use crate::types::grammar::{GrammarBuilder, IntFaBuilder, Lookahead, RtnBuilder, TransitionKind};
  use crate::types::IntFaStateId;
  use crate::{Callbacks, ParseState};

  /// Confirms a `tracing` subscriber can be installed around a parse without
  /// the engine's `trace!`/`debug!`/`warn!` events panicking or altering
  /// control flow — logging is an observability side channel, never load
  /// bearing.
  #[test]
  fn parsing_under_an_active_subscriber_is_a_no_op_for_control_flow() {
    let subscriber = tracing_subscriber::fmt().with_test_writer().with_env_filter("trace").finish();

    let mut gb = GrammarBuilder::new();
    let word = gb.interner_mut().intern("WORD");
    let mut ifb = IntFaBuilder::new();
    let s1 = ifb.add_state();
    ifb.add_transition(IntFaStateId(0), b'a', b'z' + 1, s1);
    ifb.set_final(s1, word);
    ifb.add_transition(s1, b'a', b'z' + 1, s1);
    let intfa_id = gb.add_intfa(ifb.build().unwrap());
    let mut rb = RtnBuilder::new("word");
    let st0 = rb.add_state(false, Lookahead::IntFa(intfa_id));
    let st1 = rb.add_state(true, Lookahead::Neither);
    rb.add_transition(st0, TransitionKind::Terminal(word), st1);
    gb.add_rtn(rb.build(st0).unwrap());
    let grammar = gb.build().unwrap();

    tracing::subscriber::with_default(subscriber, || {
      let mut ps: ParseState<()> = ParseState::new(Arc::new(grammar), Callbacks::new(), ());
      assert_eq!(ps.parse(b"hi"), Status::Ok);
      assert!(ps.finish_parse());
    });
  }
}
