//! The in-memory grammar model: an immutable, shared, read-only arena of
//! RTNs, GLAs and IntFAs addressed by stable integer ids.
//!
//! Building a [`Grammar`] from a compiled wire format (or from source
//! notation) is out of scope for this crate — that is the job of a loader
//! that lives elsewhere. What's here is the target shape that loader
//! produces, plus a small set of constructors (`RtnBuilder`, `GlaBuilder`,
//! `IntFaBuilder`, `GrammarBuilder`) good enough for embedders and tests to
//! build one by hand.

use crate::error::GrammarError;
use crate::types::{GlaId, GlaStateId, IntFaId, IntFaStateId, NameInterner, RtnId, RtnStateId, TerminalId};

/// A half-open byte range `[lo, hi)` labeling one outgoing IntFA transition.
#[derive(Clone, Copy, Debug)]
pub struct IntFaTransition {
  pub lo:   u8,
  pub hi:   u8,
  pub dest: IntFaStateId,
}

impl IntFaTransition {
  pub fn matches(&self, byte: u8) -> bool {
    byte >= self.lo && byte < self.hi
  }
}

/// One state of a byte-level DFA. `final_terminal` is set iff this state is
/// an accepting state for the named terminal (longest-match recovery reads
/// this field; it is unrelated to whether the state has outgoing
/// transitions).
#[derive(Clone, Debug, Default)]
pub struct IntFaState {
  pub final_terminal: Option<TerminalId>,
  pub transitions:    Vec<IntFaTransition>,
}

impl IntFaState {
  pub fn is_final(&self) -> bool {
    self.final_terminal.is_some()
  }

  pub fn find_transition(&self, byte: u8) -> Option<&IntFaTransition> {
    self.transitions.iter().find(|t| t.matches(byte))
  }
}

/// A byte-level DFA recognizing terminals under longest match.
#[derive(Clone, Debug)]
pub struct IntFa {
  pub states: Vec<IntFaState>,
  pub start:  IntFaStateId,
}

impl IntFa {
  pub fn state(&self, id: IntFaStateId) -> &IntFaState {
    &self.states[id.index()]
  }
}

/// One outgoing edge of a non-final GLA state, keyed by terminal name. `None`
/// represents the EOF sentinel, which only GLAs (never RTNs) may consume.
#[derive(Clone, Copy, Debug)]
pub struct GlaTransition {
  pub terminal: Option<TerminalId>,
  pub dest:     GlaStateId,
}

/// A GLA state is either non-final (it still has a lexer to drive and
/// terminal-keyed transitions to follow) or final (it has decided which RTN
/// transition the lookahead resolved to).
#[derive(Clone, Debug)]
pub enum GlaStateKind {
  NonFinal { lexer: IntFaId, transitions: Vec<GlaTransition> },
  /// `transition_offset` is 1-origin into the RTN state that entered this
  /// GLA; `0` means "pop the current RTN" rather than take a transition.
  Final { transition_offset: u32 },
}

#[derive(Clone, Debug)]
pub struct GlaState {
  pub kind: GlaStateKind,
}

impl GlaState {
  pub fn is_final(&self) -> bool {
    matches!(self.kind, GlaStateKind::Final { .. })
  }

  pub fn find_transition(&self, terminal: Option<TerminalId>) -> Option<&GlaTransition> {
    match &self.kind {
      GlaStateKind::NonFinal { transitions, .. } => transitions.iter().find(|t| t.terminal == terminal),
      GlaStateKind::Final { .. } => None,
    }
  }
}

/// A lookahead DFA over terminal names, used to disambiguate among the
/// outgoing transitions of one RTN state.
#[derive(Clone, Debug)]
pub struct Gla {
  pub states: Vec<GlaState>,
  pub start:  GlaStateId,
}

impl Gla {
  pub fn state(&self, id: GlaStateId) -> &GlaState {
    &self.states[id.index()]
  }
}

/// What an RTN transition consumes: a terminal (shift) or a nonterminal (a
/// call into another RTN).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TransitionKind {
  Terminal(TerminalId),
  NonTerminal(RtnId),
}

/// One outgoing edge of an RTN state.
#[derive(Clone, Copy, Debug)]
pub struct Transition {
  pub kind: TransitionKind,
  pub dest: RtnStateId,
}

/// What drives lookahead from this RTN state, if anything.
#[derive(Clone, Copy, Debug)]
pub enum Lookahead {
  IntFa(IntFaId),
  Gla(GlaId),
  Neither,
}

/// One state of a recursive-transition network.
#[derive(Clone, Debug)]
pub struct RtnState {
  pub is_final:    bool,
  pub lookahead:   Lookahead,
  pub transitions: Vec<Transition>,
}

/// A per-nonterminal DFA. The grammar's first RTN (`RtnId(0)`) is the start
/// rule.
#[derive(Clone, Debug)]
pub struct Rtn {
  pub name:   String,
  pub states: Vec<RtnState>,
  pub start:  RtnStateId,
}

impl Rtn {
  pub fn state(&self, id: RtnStateId) -> &RtnState {
    &self.states[id.index()]
  }
}

/// The immutable, shared grammar. Constructed once by a loader (or, in this
/// crate's test suite, by [`GrammarBuilder`]) and thereafter read-only —
/// safe to share across threads behind an `Arc`.
#[derive(Clone, Debug)]
pub struct Grammar {
  pub rtns:     Vec<Rtn>,
  pub glas:     Vec<Gla>,
  pub intfas:   Vec<IntFa>,
  pub interner: NameInterner,
}

impl Grammar {
  pub fn start_rtn(&self) -> RtnId {
    RtnId(0)
  }

  pub fn rtn(&self, id: RtnId) -> &Rtn {
    &self.rtns[id.index()]
  }

  pub fn gla(&self, id: GlaId) -> &Gla {
    &self.glas[id.index()]
  }

  pub fn intfa(&self, id: IntFaId) -> &IntFa {
    &self.intfas[id.index()]
  }

  pub fn terminal_name(&self, id: TerminalId) -> &str {
    self.interner.name(id)
  }
}

/// Builds one [`IntFa`], validating that every transition and final-state
/// destination is in range before handing back the frozen automaton.
#[derive(Default)]
pub struct IntFaBuilder {
  states: Vec<IntFaState>,
}

impl IntFaBuilder {
  pub fn new() -> Self {
    Self { states: vec![IntFaState::default()] }
  }

  /// Adds a fresh, non-final state with no outgoing transitions and returns
  /// its id.
  pub fn add_state(&mut self) -> IntFaStateId {
    self.states.push(IntFaState::default());
    IntFaStateId((self.states.len() - 1) as u32)
  }

  pub fn set_final(&mut self, state: IntFaStateId, terminal: TerminalId) -> &mut Self {
    self.states[state.index()].final_terminal = Some(terminal);
    self
  }

  pub fn add_transition(&mut self, from: IntFaStateId, lo: u8, hi: u8, dest: IntFaStateId) -> &mut Self {
    self.states[from.index()].transitions.push(IntFaTransition { lo, hi, dest });
    self
  }

  pub fn build(self) -> Result<IntFa, GrammarError> {
    for state in &self.states {
      for t in &state.transitions {
        if t.dest.index() >= self.states.len() {
          return Err(GrammarError::DanglingReference { what: "IntFA transition destination", index: t.dest.index() });
        }
      }
    }
    Ok(IntFa { states: self.states, start: IntFaStateId(0) })
  }
}

/// Builds one [`Gla`].
#[derive(Default)]
pub struct GlaBuilder {
  states: Vec<GlaState>,
}

impl GlaBuilder {
  pub fn new() -> Self {
    Self { states: Vec::new() }
  }

  pub fn add_non_final(&mut self, lexer: IntFaId) -> GlaStateId {
    self.states.push(GlaState { kind: GlaStateKind::NonFinal { lexer, transitions: Vec::new() } });
    GlaStateId((self.states.len() - 1) as u32)
  }

  pub fn add_final(&mut self, transition_offset: u32) -> GlaStateId {
    self.states.push(GlaState { kind: GlaStateKind::Final { transition_offset } });
    GlaStateId((self.states.len() - 1) as u32)
  }

  pub fn add_transition(&mut self, from: GlaStateId, terminal: Option<TerminalId>, dest: GlaStateId) -> &mut Self {
    if let GlaStateKind::NonFinal { transitions, .. } = &mut self.states[from.index()].kind {
      transitions.push(GlaTransition { terminal, dest });
    }
    self
  }

  pub fn build(self, start: GlaStateId) -> Result<Gla, GrammarError> {
    if self.states.is_empty() {
      return Err(GrammarError::EmptyAutomaton { what: "GLA" });
    }
    for state in &self.states {
      if let GlaStateKind::NonFinal { transitions, .. } = &state.kind {
        for t in transitions {
          if t.dest.index() >= self.states.len() {
            return Err(GrammarError::DanglingReference { what: "GLA transition destination", index: t.dest.index() });
          }
        }
      }
    }
    Ok(Gla { states: self.states, start })
  }
}

/// Builds one [`Rtn`].
pub struct RtnBuilder {
  name:   String,
  states: Vec<RtnState>,
}

impl RtnBuilder {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), states: Vec::new() }
  }

  pub fn add_state(&mut self, is_final: bool, lookahead: Lookahead) -> RtnStateId {
    self.states.push(RtnState { is_final, lookahead, transitions: Vec::new() });
    RtnStateId((self.states.len() - 1) as u32)
  }

  pub fn add_transition(&mut self, from: RtnStateId, kind: TransitionKind, dest: RtnStateId) -> &mut Self {
    self.states[from.index()].transitions.push(Transition { kind, dest });
    self
  }

  pub fn build(self, start: RtnStateId) -> Result<Rtn, GrammarError> {
    if self.states.is_empty() {
      return Err(GrammarError::EmptyAutomaton { what: "RTN" });
    }
    for state in &self.states {
      for t in &state.transitions {
        if t.dest.index() >= self.states.len() {
          return Err(GrammarError::DanglingReference { what: "RTN transition destination", index: t.dest.index() });
        }
      }
    }
    Ok(Rtn { name: self.name, states: self.states, start })
  }
}

/// Assembles a whole [`Grammar`] out of already-built RTNs, GLAs and IntFAs,
/// validating the cross-references among them.
#[derive(Default)]
pub struct GrammarBuilder {
  rtns:     Vec<Rtn>,
  glas:     Vec<Gla>,
  intfas:   Vec<IntFa>,
  interner: NameInterner,
}

impl GrammarBuilder {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn interner_mut(&mut self) -> &mut NameInterner {
    &mut self.interner
  }

  pub fn add_intfa(&mut self, intfa: IntFa) -> IntFaId {
    self.intfas.push(intfa);
    IntFaId((self.intfas.len() - 1) as u32)
  }

  pub fn add_gla(&mut self, gla: Gla) -> GlaId {
    self.glas.push(gla);
    GlaId((self.glas.len() - 1) as u32)
  }

  /// Adds an RTN. The first RTN ever added becomes the start rule.
  pub fn add_rtn(&mut self, rtn: Rtn) -> RtnId {
    self.rtns.push(rtn);
    RtnId((self.rtns.len() - 1) as u32)
  }

  pub fn build(self) -> Result<Grammar, GrammarError> {
    if self.rtns.is_empty() {
      return Err(GrammarError::EmptyAutomaton { what: "grammar (no RTNs)" });
    }
    for rtn in &self.rtns {
      for state in &rtn.states {
        match state.lookahead {
          Lookahead::IntFa(id) if id.index() >= self.intfas.len() => {
            return Err(GrammarError::DanglingReference { what: "RTN state's IntFA", index: id.index() });
          }
          Lookahead::Gla(id) if id.index() >= self.glas.len() => {
            return Err(GrammarError::DanglingReference { what: "RTN state's GLA", index: id.index() });
          }
          _ => {}
        }
        for t in &state.transitions {
          if let TransitionKind::NonTerminal(id) = t.kind {
            if id.index() >= self.rtns.len() {
              return Err(GrammarError::DanglingReference { what: "RTN transition's callee RTN", index: id.index() });
            }
          }
        }
      }
    }
    for gla in &self.glas {
      for state in &gla.states {
        if let GlaStateKind::NonFinal { lexer, .. } = &state.kind {
          if lexer.index() >= self.intfas.len() {
            return Err(GrammarError::DanglingReference { what: "GLA state's IntFA", index: lexer.index() });
          }
        }
      }
    }
    Ok(Grammar { rtns: self.rtns, glas: self.glas, intfas: self.intfas, interner: self.interner })
  }
}
