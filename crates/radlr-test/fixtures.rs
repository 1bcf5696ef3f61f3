//! Hand-built grammars exercising one interpreter behavior apiece. None of
//! these come from a compiler — they're assembled directly with the runtime's
//! own builders, the way an embedder without a grammar compiler would.

use radlr_rust_runtime::types::grammar::{Grammar, GlaBuilder, GrammarBuilder, IntFaBuilder, Lookahead, RtnBuilder, TransitionKind};
use radlr_rust_runtime::types::{IntFaStateId, RtnId, TerminalId};

/// `WORD -> [a-z]+`, a single rule with no GLA at all: the RTN state goes
/// straight from lexing to an unambiguous terminal-keyed transition.
pub fn word_grammar() -> (Grammar, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let word = gb.interner_mut().intern("WORD");

  let mut ifb = IntFaBuilder::new();
  let s1 = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'a', b'z' + 1, s1);
  ifb.set_final(s1, word);
  ifb.add_transition(s1, b'a', b'z' + 1, s1);
  let intfa_id = gb.add_intfa(ifb.build().expect("word lexer builds"));

  let mut rb = RtnBuilder::new("word");
  let st0 = rb.add_state(false, Lookahead::IntFa(intfa_id));
  let st1 = rb.add_state(true, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::Terminal(word), st1);
  gb.add_rtn(rb.build(st0).expect("word rule builds"));

  (gb.build().expect("word grammar builds"), word)
}

/// An RTN that calls itself unconditionally, forever, and never reads a
/// byte. Exists purely to drive the stack-depth resource limit from
/// `descend_to_gla` without needing any lexer at all.
pub fn infinite_recursion_grammar() -> Grammar {
  let mut gb = GrammarBuilder::new();
  let mut rb = RtnBuilder::new("loop");
  let st0 = rb.add_state(false, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::NonTerminal(RtnId(0)), st0);
  gb.add_rtn(rb.build(st0).expect("loop rule builds"));
  gb.build().expect("infinite recursion grammar builds")
}

/// A GLA that must see `chain_len + 1` consecutive `X` terminals before it
/// can decide anything, to exercise the lookahead-buffer resource limit
/// rather than the stack one.
pub fn deep_lookahead_grammar(chain_len: usize) -> (Grammar, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let x = gb.interner_mut().intern("X");

  let mut ifb = IntFaBuilder::new();
  let s1 = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'x', b'x' + 1, s1);
  ifb.set_final(s1, x);
  let intfa_id = gb.add_intfa(ifb.build().expect("x lexer builds"));

  let mut glab = GlaBuilder::new();
  let gla_start = glab.add_non_final(intfa_id);
  let mut prev = gla_start;
  for _ in 0..chain_len {
    let next = glab.add_non_final(intfa_id);
    glab.add_transition(prev, Some(x), next);
    prev = next;
  }
  let final_state = glab.add_final(1);
  glab.add_transition(prev, Some(x), final_state);
  let gla_id = gb.add_gla(glab.build(gla_start).expect("deep lookahead GLA builds"));

  let mut rb = RtnBuilder::new("deep");
  let st0 = rb.add_state(false, Lookahead::Gla(gla_id));
  let st1 = rb.add_state(true, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::Terminal(x), st1);
  gb.add_rtn(rb.build(st0).expect("deep rule builds"));

  (gb.build().expect("deep lookahead grammar builds"), x)
}

/// `INT -> [0-9]+`, a single greedy digit run with no terminator terminal —
/// exists to exercise longest-match recovery landing on a non-EOF byte
/// (a space) rather than at end of input.
pub fn int_grammar() -> (Grammar, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let int = gb.interner_mut().intern("INT");

  let mut ifb = IntFaBuilder::new();
  let s1 = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'0', b'9' + 1, s1);
  ifb.set_final(s1, int);
  ifb.add_transition(s1, b'0', b'9' + 1, s1);
  let intfa_id = gb.add_intfa(ifb.build().expect("int lexer builds"));

  let mut rb = RtnBuilder::new("int");
  let st0 = rb.add_state(false, Lookahead::IntFa(intfa_id));
  let st1 = rb.add_state(true, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::Terminal(int), st1);
  gb.add_rtn(rb.build(st0).expect("int rule builds"));

  (gb.build().expect("int grammar builds"), int)
}

/// A start rule whose initial state is immediately final with no outgoing
/// transitions at all — the empty-input boundary case: the parse completes
/// without ever entering a lexer.
pub fn empty_ok_grammar() -> Grammar {
  let mut gb = GrammarBuilder::new();
  let mut rb = RtnBuilder::new("nothing");
  let st0 = rb.add_state(true, Lookahead::Neither);
  gb.add_rtn(rb.build(st0).expect("empty rule builds"));
  gb.build().expect("empty-ok grammar builds")
}

/// `AB -> 'a' 'b'`, two required terminals in sequence with no GLA at all —
/// each state reads directly off its own `IntFa` lookahead. Used to exercise
/// plain sequencing and premature-EOF finalization (stopping after just `a`
/// leaves the rule in a non-final state).
pub fn sequential_terminals_grammar() -> (Grammar, TerminalId, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let a = gb.interner_mut().intern("A");
  let b = gb.interner_mut().intern("B");

  let mut ifb = IntFaBuilder::new();
  let s_a = ifb.add_state();
  let s_b = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'a', b'a' + 1, s_a);
  ifb.add_transition(IntFaStateId(0), b'b', b'b' + 1, s_b);
  ifb.set_final(s_a, a);
  ifb.set_final(s_b, b);
  let intfa_id = gb.add_intfa(ifb.build().expect("a/b lexer builds"));

  let mut rb = RtnBuilder::new("ab");
  let st0 = rb.add_state(false, Lookahead::IntFa(intfa_id));
  let st1 = rb.add_state(false, Lookahead::IntFa(intfa_id));
  let st2 = rb.add_state(true, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::Terminal(a), st1);
  rb.add_transition(st1, TransitionKind::Terminal(b), st2);
  gb.add_rtn(rb.build(st0).expect("ab rule builds"));

  (gb.build().expect("sequential terminals grammar builds"), a, b)
}

/// `S -> 'a' RuleA | 'b' RuleB`, where the choice of which nonterminal to
/// call is made by a one-token GLA peeking at the first letter — the case a
/// GLA exists for. `start` is inserted first so it lands at `RtnId(0)`;
/// `rule_a`/`rule_b` are hardcoded as `RtnId(1)`/`RtnId(2)` since insertion
/// order is fixed by this function.
pub fn branching_grammar() -> (Grammar, TerminalId, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let a = gb.interner_mut().intern("A");
  let b = gb.interner_mut().intern("B");

  let mut ifb = IntFaBuilder::new();
  let s_a = ifb.add_state();
  let s_b = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'a', b'a' + 1, s_a);
  ifb.add_transition(IntFaStateId(0), b'b', b'b' + 1, s_b);
  ifb.set_final(s_a, a);
  ifb.set_final(s_b, b);
  let intfa_id = gb.add_intfa(ifb.build().expect("a/b lexer builds"));

  let mut glab = GlaBuilder::new();
  let gla_start = glab.add_non_final(intfa_id);
  let take_a = glab.add_final(1);
  let take_b = glab.add_final(2);
  glab.add_transition(gla_start, Some(a), take_a);
  glab.add_transition(gla_start, Some(b), take_b);
  let gla_id = gb.add_gla(glab.build(gla_start).expect("branching GLA builds"));

  let rule_a_id = RtnId(1);
  let rule_b_id = RtnId(2);

  let mut start = RtnBuilder::new("start");
  let st0 = start.add_state(false, Lookahead::Gla(gla_id));
  let st_done = start.add_state(true, Lookahead::Neither);
  start.add_transition(st0, TransitionKind::NonTerminal(rule_a_id), st_done);
  start.add_transition(st0, TransitionKind::NonTerminal(rule_b_id), st_done);
  gb.add_rtn(start.build(st0).expect("start rule builds"));

  let mut rule_a = RtnBuilder::new("rule_a");
  let ra0 = rule_a.add_state(false, Lookahead::IntFa(intfa_id));
  let ra1 = rule_a.add_state(true, Lookahead::Neither);
  rule_a.add_transition(ra0, TransitionKind::Terminal(a), ra1);
  gb.add_rtn(rule_a.build(ra0).expect("rule_a builds"));

  let mut rule_b = RtnBuilder::new("rule_b");
  let rb0 = rule_b.add_state(false, Lookahead::IntFa(intfa_id));
  let rb1 = rule_b.add_state(true, Lookahead::Neither);
  rule_b.add_transition(rb0, TransitionKind::Terminal(b), rb1);
  gb.add_rtn(rule_b.build(rb0).expect("rule_b builds"));

  (gb.build().expect("branching grammar builds"), a, b)
}

/// `S -> '(' S ')' | ε`, true RTN self-recursion: `S` calls itself as its own
/// nonterminal transition. A one-token GLA at the entry state decides
/// between shifting `(` (there's another nested pair to open) and popping
/// straight back out (a `)` or true EOF means this `S` matched the empty
/// alternative); the state reached after a nested `S` returns shifts the
/// matching `)` directly, with no further lookahead needed. Exercises
/// `pop_rtn_frame`'s "advance the parent's recorded transition" path once
/// per level of nesting.
pub fn balanced_parens_grammar() -> (Grammar, TerminalId, TerminalId) {
  let mut gb = GrammarBuilder::new();
  let lparen = gb.interner_mut().intern("LPAREN");
  let rparen = gb.interner_mut().intern("RPAREN");

  let mut ifb = IntFaBuilder::new();
  let s_lp = ifb.add_state();
  let s_rp = ifb.add_state();
  ifb.add_transition(IntFaStateId(0), b'(', b'(' + 1, s_lp);
  ifb.add_transition(IntFaStateId(0), b')', b')' + 1, s_rp);
  ifb.set_final(s_lp, lparen);
  ifb.set_final(s_rp, rparen);
  let intfa_id = gb.add_intfa(ifb.build().expect("paren lexer builds"));

  let mut glab = GlaBuilder::new();
  let gla_start = glab.add_non_final(intfa_id);
  let shift = glab.add_final(1);
  let pop = glab.add_final(0);
  glab.add_transition(gla_start, Some(lparen), shift);
  glab.add_transition(gla_start, Some(rparen), pop);
  glab.add_transition(gla_start, None, pop);
  let gla_id = gb.add_gla(glab.build(gla_start).expect("entry GLA builds"));

  let mut rb = RtnBuilder::new("s");
  let st0 = rb.add_state(true, Lookahead::Gla(gla_id));
  let st1 = rb.add_state(false, Lookahead::Neither);
  let st2 = rb.add_state(false, Lookahead::IntFa(intfa_id));
  let st3 = rb.add_state(true, Lookahead::Neither);
  rb.add_transition(st0, TransitionKind::Terminal(lparen), st1);
  rb.add_transition(st1, TransitionKind::NonTerminal(RtnId(0)), st2);
  rb.add_transition(st2, TransitionKind::Terminal(rparen), st3);
  gb.add_rtn(rb.build(st0).expect("s rule builds"));

  (gb.build().expect("balanced parens grammar builds"), lparen, rparen)
}
