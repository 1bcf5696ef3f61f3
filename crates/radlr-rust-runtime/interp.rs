//! The interpreter core: [`ParseState`] and the free functions that drive it
//! through RTN calls/returns, GLA disambiguation, and terminal delivery. The
//! byte-level half of the loop (`do_intfa_transition`) lives in
//! [`crate::lexer`]; this module picks up once a terminal has been fully
//! lexed.

use std::sync::Arc;

use crate::callbacks::Callbacks;
use crate::config::EngineConfig;
use crate::error::Status;
use crate::lexer::do_intfa_transition;
use crate::stack::{Frame, GlaFrame, IntFaFrame, RtnFrame, Stack};
use crate::types::grammar::{Grammar, GlaStateKind, Lookahead, Transition, TransitionKind};
use crate::types::{GlaId, GlaStateId, IntFaId, IntFaStateId, Offset, RtnId, RtnStateId, Terminal};

/// One parse in progress. Cheap to construct, expensive-ish to [`duplicate`]
/// (deep-copies the stack and token buffer) — intended for one parse state
/// per input stream, with `duplicate` reserved for speculative forking.
///
/// [`duplicate`]: ParseState::duplicate
pub struct ParseState<U> {
  pub(crate) grammar:   Arc<Grammar>,
  pub(crate) callbacks: Callbacks<U>,
  pub(crate) config:    EngineConfig,
  pub(crate) stack:     Stack,
  pub(crate) token_buffer: Vec<Terminal>,
  pub(crate) offset:    Offset,
  pub(crate) open_terminal_offset: Offset,
  pub(crate) last_char_was_newline: bool,
  pub user_data: U,
  span: tracing::Span,
}

impl<U> ParseState<U> {
  pub fn new(grammar: Arc<Grammar>, callbacks: Callbacks<U>, user_data: U) -> Self {
    Self::with_config(grammar, callbacks, EngineConfig::default(), user_data)
  }

  pub fn with_config(grammar: Arc<Grammar>, callbacks: Callbacks<U>, config: EngineConfig, user_data: U) -> Self {
    let span = tracing::info_span!("parse_state", max_stack_depth = config.max_stack_depth, max_lookahead = config.max_lookahead);
    Self {
      grammar,
      callbacks,
      config,
      stack: Stack::new(),
      token_buffer: Vec::new(),
      offset: Offset::start(),
      open_terminal_offset: Offset::start(),
      last_char_was_newline: false,
      user_data,
      span,
    }
  }

  pub fn offset(&self) -> Offset {
    self.offset
  }

  /// The earliest offset whose source bytes must not yet be discarded from
  /// any upstream byte buffer — the start of the oldest terminal that has
  /// been lexed (or is still being lexed) but not yet consumed by an RTN or
  /// GLA transition.
  pub fn open_terminal_offset(&self) -> Offset {
    self.open_terminal_offset
  }

  pub fn grammar(&self) -> &Grammar {
    &self.grammar
  }

  pub fn is_finished(&self) -> bool {
    self.stack.is_empty()
  }

  /// Deep-copies the stack and token buffer; the grammar is shared via
  /// `Arc::clone`, and `user_data` is cloned independently so the two states
  /// no longer observe each other's callbacks.
  pub fn duplicate(&self) -> Self
  where
    U: Clone,
  {
    Self {
      grammar: Arc::clone(&self.grammar),
      callbacks: self.callbacks,
      config: self.config,
      stack: self.stack.clone(),
      token_buffer: self.token_buffer.clone(),
      offset: self.offset,
      open_terminal_offset: self.open_terminal_offset,
      last_char_was_newline: self.last_char_was_newline,
      user_data: self.user_data.clone(),
      span: tracing::info_span!(parent: &self.span, "duplicate"),
    }
  }

  /// Feeds one slice of newly-available input. May be called repeatedly with
  /// successive slices of the same stream.
  pub fn parse(&mut self, buf: &[u8]) -> Status {
    let _guard = self.span.enter();
    if self.offset.byte == 0 && self.stack.is_empty() {
      let start_rtn = self.grammar.start_rtn();
      let start_state = self.grammar.rtn(start_rtn).start;
      push_rtn_frame(self, start_rtn, start_state, self.offset);
      match descend_to_gla(self, self.offset) {
        DescendOutcome::ResourceLimitExceeded => return Status::ResourceLimitExceeded,
        DescendOutcome::HardEof => return Status::HardEof,
        DescendOutcome::Ready { .. } => enter_lexer(self, self.offset),
      }
    } else if self.stack.is_empty() {
      return Status::HardEof;
    }

    for &byte in buf {
      match do_intfa_transition(self, byte) {
        Status::Ok => {}
        other => return other,
      }
    }
    Status::Ok
  }

  /// Signals end of input. Returns whether the parse is in a legal accepting
  /// configuration; forcibly pops whatever remains on the stack either way.
  pub fn finish_parse(&mut self) -> bool {
    let _guard = self.span.enter();
    finish_parse_impl(self)
  }
}

fn finish_parse_impl<U>(ps: &mut ParseState<U>) -> bool {
  // Step 1: resolve an open IntFA frame, if any.
  if let Some(Frame::IntFa(frame)) = ps.stack.top().copied() {
    let intfa = ps.grammar.intfa(frame.intfa);
    let state = intfa.state(frame.state);
    let is_final = state.is_final();
    let is_start = frame.state == intfa.start;

    if is_final && is_start {
      let surrounding_gla_has_eof = ps
        .stack
        .iter()
        .rev()
        .nth(1)
        .and_then(Frame::as_gla)
        .map(|g| ps.grammar.gla(g.gla).state(g.state).find_transition(None).is_some())
        .unwrap_or(false);
      if !surrounding_gla_has_eof {
        return false;
      }
      ps.stack.pop();
    } else if is_final {
      let term_name = state.final_terminal;
      let len = ps.offset.byte - frame.start_offset.byte;
      match process_terminal(ps, frame.start_offset, len, term_name) {
        Status::Ok | Status::HardEof => {}
        _ => return false,
      }
    } else if is_start {
      ps.stack.pop();
    } else {
      return false;
    }
  }

  // Step 2: resolve an open GLA frame, if any.
  if let Some(Frame::Gla(frame)) = ps.stack.top().copied() {
    let gla = ps.grammar.gla(frame.gla);
    if frame.state == gla.start {
      ps.stack.pop();
    } else {
      let state = gla.state(frame.state);
      if state.find_transition(None).is_none() {
        return false;
      }
      // A throwaway frame: `process_terminal` pops it unconditionally as its
      // first step without reading any of its fields back.
      ps.stack.push(Frame::IntFa(IntFaFrame { intfa: IntFaId(0), state: IntFaStateId(0), start_offset: ps.offset }));
      match process_terminal(ps, ps.offset, 0, None) {
        Status::Ok | Status::HardEof => {}
        _ => return false,
      }
      while matches!(ps.stack.top(), Some(Frame::Gla(_))) {
        ps.stack.pop();
      }
    }
  }

  // Step 3: every remaining RTN frame must be in, or on its way to, a final
  // state: the top frame must itself be final, and every frame beneath it
  // must have a recorded transition whose destination is final.
  if ps.stack.is_empty() {
    return true;
  }
  let len = ps.stack.len();
  for (i, frame) in ps.stack.iter().enumerate() {
    let rtn_frame = match frame {
      Frame::Rtn(f) => f,
      _ => return false,
    };
    let rtn = ps.grammar.rtn(rtn_frame.rtn);
    let ok = if i + 1 == len {
      rtn.state(rtn_frame.state).is_final
    } else {
      match rtn_frame.transition_taken {
        Some(t) => rtn.state(t.dest).is_final,
        None => false,
      }
    };
    if !ok {
      return false;
    }
  }

  // Step 4: everything left is accepting; pop it all off.
  while !ps.stack.is_empty() {
    pop_rtn_frame(ps);
  }
  true
}

pub(crate) enum DescendOutcome {
  Ready { entered_gla: bool },
  ResourceLimitExceeded,
  HardEof,
}

enum PopOutcome {
  Continued,
  HardEof,
}

/// Repeatedly resolves the top of the stack until it is ready to drive a
/// lexer directly: either an RTN state with `IntFa` lookahead, or a freshly
/// (or previously) entered GLA frame. Walks through RTN states with neither
/// kind of lookahead by taking their sole nonterminal transition or popping
/// a final state with none.
pub(crate) fn descend_to_gla<U>(ps: &mut ParseState<U>, frame_offset: Offset) -> DescendOutcome {
  let mut entered_gla = false;
  loop {
    let rtn_frame = match ps.stack.top() {
      Some(Frame::Rtn(f)) => *f,
      _ => return DescendOutcome::Ready { entered_gla },
    };

    // Leave room for the one IntFA frame this descent will end with.
    if ps.stack.len() + 1 > ps.config.max_stack_depth.saturating_sub(1) {
      tracing::warn!(depth = ps.stack.len(), "max_stack_depth exceeded");
      return DescendOutcome::ResourceLimitExceeded;
    }

    let rtn = ps.grammar.rtn(rtn_frame.rtn);
    let state = rtn.state(rtn_frame.state);
    match state.lookahead {
      Lookahead::IntFa(_) => return DescendOutcome::Ready { entered_gla },
      Lookahead::Gla(gla_id) => {
        let start = ps.grammar.gla(gla_id).start;
        push_gla_frame(ps, gla_id, start, frame_offset);
        entered_gla = true;
        return DescendOutcome::Ready { entered_gla };
      }
      Lookahead::Neither => {
        if state.transitions.is_empty() {
          match pop_rtn_frame(ps) {
            PopOutcome::HardEof => return DescendOutcome::HardEof,
            PopOutcome::Continued => {}
          }
        } else {
          debug_assert_eq!(state.transitions.len(), 1);
          let t = state.transitions[0];
          let callee = match t.kind {
            TransitionKind::NonTerminal(id) => id,
            TransitionKind::Terminal(_) => unreachable!("RTN state with Neither lookahead but a terminal transition"),
          };
          if let Some(Frame::Rtn(f)) = ps.stack.top_mut() {
            f.transition_taken = Some(t);
          }
          let callee_start = ps.grammar.rtn(callee).start;
          push_rtn_frame(ps, callee, callee_start, frame_offset);
        }
      }
    }
  }
}

/// Pushes the lexer appropriate for whatever is now on top of the stack (an
/// RTN state with `IntFa` lookahead, or a non-final GLA state).
pub(crate) fn enter_lexer<U>(ps: &mut ParseState<U>, start_offset: Offset) {
  match ps.stack.top().copied() {
    Some(Frame::Rtn(f)) => {
      let rtn = ps.grammar.rtn(f.rtn);
      match rtn.state(f.state).lookahead {
        Lookahead::IntFa(id) => push_intfa_frame(ps, id, start_offset),
        _ => unreachable!("enter_lexer: top RTN state has no IntFA lookahead"),
      }
    }
    Some(Frame::Gla(f)) => {
      let gla = ps.grammar.gla(f.gla);
      match &gla.state(f.state).kind {
        GlaStateKind::NonFinal { lexer, .. } => push_intfa_frame(ps, *lexer, start_offset),
        GlaStateKind::Final { .. } => unreachable!("enter_lexer: top GLA state is final"),
      }
    }
    _ => unreachable!("enter_lexer: top frame is neither RTN nor GLA"),
  }
}

fn push_rtn_frame<U>(ps: &mut ParseState<U>, rtn: RtnId, state: RtnStateId, start_offset: Offset) {
  tracing::debug!(rtn = ?rtn, name = %ps.grammar.rtn(rtn).name, "enter rule");
  ps.stack.push(Frame::Rtn(RtnFrame { rtn, state, start_offset, transition_taken: None }));
  if let Some(cb) = ps.callbacks.start_rule_cb {
    cb(ps);
  }
}

fn push_gla_frame<U>(ps: &mut ParseState<U>, gla: GlaId, state: GlaStateId, start_offset: Offset) {
  ps.stack.push(Frame::Gla(GlaFrame { gla, state, start_offset }));
}

fn push_intfa_frame<U>(ps: &mut ParseState<U>, intfa: IntFaId, start_offset: Offset) {
  let start = ps.grammar.intfa(intfa).start;
  ps.stack.push(Frame::IntFa(IntFaFrame { intfa, state: start, start_offset }));
}

/// Pops the RTN frame at the top of the stack, invoking `end_rule_cb` first
/// and, if a parent frame remains, advancing it past the nonterminal call
/// that is now returning.
fn pop_rtn_frame<U>(ps: &mut ParseState<U>) -> PopOutcome {
  tracing::debug!("exit rule");
  if let Some(cb) = ps.callbacks.end_rule_cb {
    cb(ps);
  }
  ps.stack.pop();
  if ps.stack.is_empty() {
    return PopOutcome::HardEof;
  }
  if let Some(parent) = ps.stack.top_mut().and_then(Frame::as_rtn_mut) {
    if let Some(t) = parent.transition_taken.take() {
      parent.state = t.dest;
    }
  }
  PopOutcome::Continued
}

fn do_rtn_terminal_transition<U>(ps: &mut ParseState<U>, t: Transition, term: Terminal) {
  if let Some(cb) = ps.callbacks.terminal_cb {
    cb(ps, term);
  }
  if let Some(Frame::Rtn(f)) = ps.stack.top_mut() {
    f.state = t.dest;
  }
}

/// Feeds one freshly-lexed terminal (or the synthetic EOF terminal, named
/// `None`) into the RTN/GLA stack, draining as many already-buffered
/// terminals as the stack can consume without further input.
///
/// Precondition: the top of the stack is the IntFA frame that produced this
/// terminal (or, for the EOF case, a placeholder frame with the same shape).
pub(crate) fn process_terminal<U>(ps: &mut ParseState<U>, start_offset: Offset, len: usize, term_name: Option<crate::types::TerminalId>) -> Status {
  ps.stack.pop();

  let terminal = Terminal { name: term_name, offset: start_offset, len };
  tracing::trace!(terminal = ?term_name, offset = start_offset.byte, len, "lexed terminal");
  let new_index = ps.token_buffer.len();
  ps.token_buffer.push(terminal);
  if ps.token_buffer.len() > ps.config.max_lookahead {
    tracing::warn!(buffered = ps.token_buffer.len(), "max_lookahead exceeded");
    return Status::ResourceLimitExceeded;
  }

  let mut rtn_term_offset = 0usize;
  let mut gla_term_offset = new_index;

  loop {
    match ps.stack.top() {
      Some(Frame::Rtn(_)) => {
        if rtn_term_offset >= ps.token_buffer.len() {
          break;
        }
        let term = ps.token_buffer[rtn_term_offset];
        if term.is_eof() {
          // RTNs never consume EOF directly; only GLAs do.
          break;
        }
        let rtn_frame = *ps.stack.top().unwrap().as_rtn().unwrap();
        let rtn = ps.grammar.rtn(rtn_frame.rtn);
        let state = rtn.state(rtn_frame.state);
        let transition = state.transitions.iter().find(|t| matches!(t.kind, TransitionKind::Terminal(id) if Some(id) == term.name)).copied();
        match transition {
          None => {
            tracing::error!(terminal = ?term.name, "no matching RTN transition");
            if let Some(cb) = ps.callbacks.error_terminal_cb {
              cb(ps, term);
            }
            return Status::Error;
          }
          Some(t) => {
            do_rtn_terminal_transition(ps, t, term);
            rtn_term_offset += 1;
          }
        }
      }
      Some(Frame::Gla(_)) => {
        if gla_term_offset >= ps.token_buffer.len() {
          break;
        }
        let term = ps.token_buffer[gla_term_offset];
        match do_gla_transition(ps, term, &mut rtn_term_offset) {
          Status::Ok => gla_term_offset += 1,
          other => return other,
        }
      }
      _ => break,
    }

    let next_unconsumed = rtn_term_offset.min(gla_term_offset);
    let frame_offset = ps.token_buffer.get(next_unconsumed).map(|t| t.offset).unwrap_or(ps.offset);
    match descend_to_gla(ps, frame_offset) {
      DescendOutcome::ResourceLimitExceeded => return Status::ResourceLimitExceeded,
      DescendOutcome::HardEof => return Status::HardEof,
      DescendOutcome::Ready { entered_gla } => {
        if entered_gla {
          gla_term_offset = rtn_term_offset;
        }
      }
    }
  }

  if rtn_term_offset < ps.token_buffer.len() && ps.token_buffer[rtn_term_offset].is_eof() {
    rtn_term_offset += 1;
  }

  ps.token_buffer.drain(0..rtn_term_offset.min(ps.token_buffer.len()));
  ps.open_terminal_offset = ps.token_buffer.first().map(|t| t.offset).unwrap_or(ps.offset);

  Status::Ok
}

/// Feeds one terminal into the GLA frame at the top of the stack. On
/// reaching a final GLA state, resolves the RTN transition it names (or pops
/// the RTN outright if the GLA decided "no further input needed, the rule is
/// done").
fn do_gla_transition<U>(ps: &mut ParseState<U>, term: Terminal, rtn_term_offset: &mut usize) -> Status {
  let gla_frame = *ps.stack.top().unwrap().as_gla().unwrap();
  let gla = ps.grammar.gla(gla_frame.gla);
  let state = gla.state(gla_frame.state);
  let transition = match state.find_transition(term.name) {
    Some(t) => *t,
    None => {
      tracing::error!(terminal = ?term.name, "no matching GLA transition");
      if let Some(cb) = ps.callbacks.error_terminal_cb {
        cb(ps, term);
      }
      return Status::Error;
    }
  };

  if let Some(Frame::Gla(f)) = ps.stack.top_mut() {
    f.state = transition.dest;
  }
  let new_state = ps.grammar.gla(gla_frame.gla).state(transition.dest);
  if !new_state.is_final() {
    return Status::Ok;
  }

  let transition_offset = match new_state.kind {
    GlaStateKind::Final { transition_offset } => transition_offset,
    GlaStateKind::NonFinal { .. } => unreachable!(),
  };
  ps.stack.pop();

  if transition_offset == 0 {
    return match pop_rtn_frame(ps) {
      PopOutcome::HardEof => Status::HardEof,
      PopOutcome::Continued => Status::Ok,
    };
  }

  let rtn_frame = *ps.stack.top().unwrap().as_rtn().unwrap();
  let rtn = ps.grammar.rtn(rtn_frame.rtn);
  let state = rtn.state(rtn_frame.state);
  let t = state.transitions[(transition_offset - 1) as usize];
  match t.kind {
    TransitionKind::Terminal(expected) => {
      let buffered = ps.token_buffer[*rtn_term_offset];
      debug_assert_eq!(Some(expected), buffered.name, "GLA resolved to a transition whose terminal doesn't match the buffered one");
      *rtn_term_offset += 1;
      do_rtn_terminal_transition(ps, t, buffered);
    }
    TransitionKind::NonTerminal(callee) => {
      let next_offset = ps.token_buffer.get(*rtn_term_offset).map(|t| t.offset).unwrap_or(ps.offset);
      if let Some(Frame::Rtn(f)) = ps.stack.top_mut() {
        f.transition_taken = Some(t);
      }
      let callee_start = ps.grammar.rtn(callee).start;
      push_rtn_frame(ps, callee, callee_start, next_offset);
    }
  }
  Status::Ok
}
