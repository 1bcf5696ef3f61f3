//! The callback vector: a plain record of optional function pointers plus
//! the user data they close over, carried inline on the parse state rather
//! than behind an opaque pointer. No dynamic dispatch through trait objects
//! — the callback set is fixed and known at parse-state construction.

use crate::interp::ParseState;
use crate::types::Terminal;

pub type StartRuleCb<U> = fn(&mut ParseState<U>);
pub type EndRuleCb<U> = fn(&mut ParseState<U>);
pub type TerminalCb<U> = fn(&mut ParseState<U>, Terminal);
pub type ErrorCharCb<U> = fn(&mut ParseState<U>, u8);
pub type ErrorTerminalCb<U> = fn(&mut ParseState<U>, Terminal);

/// Any field may be left `None`, meaning "no delivery" for that event.
pub struct Callbacks<U> {
  /// Fired after a new RTN frame is pushed.
  pub start_rule_cb: Option<StartRuleCb<U>>,
  /// Fired before an RTN frame is popped.
  pub end_rule_cb: Option<EndRuleCb<U>>,
  /// Fired when a terminal is consumed by an RTN transition.
  pub terminal_cb: Option<TerminalCb<U>>,
  /// Fired on an unlexable byte.
  pub error_char_cb: Option<ErrorCharCb<U>>,
  /// Fired on a terminal with no matching RTN or GLA transition.
  pub error_terminal_cb: Option<ErrorTerminalCb<U>>,
}

// Manually implemented rather than derived: `Option<fn(...)>` is `Clone`/
// `Copy` regardless of whether `U` is, but `#[derive]` would add an
// unnecessary `U: Clone` bound.
impl<U> Clone for Callbacks<U> {
  fn clone(&self) -> Self {
    *self
  }
}

impl<U> Copy for Callbacks<U> {}

impl<U> Default for Callbacks<U> {
  fn default() -> Self {
    Self { start_rule_cb: None, end_rule_cb: None, terminal_cb: None, error_char_cb: None, error_terminal_cb: None }
  }
}

impl<U> Callbacks<U> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn on_start_rule(mut self, cb: StartRuleCb<U>) -> Self {
    self.start_rule_cb = Some(cb);
    self
  }

  pub fn on_end_rule(mut self, cb: EndRuleCb<U>) -> Self {
    self.end_rule_cb = Some(cb);
    self
  }

  pub fn on_terminal(mut self, cb: TerminalCb<U>) -> Self {
    self.terminal_cb = Some(cb);
    self
  }

  pub fn on_error_char(mut self, cb: ErrorCharCb<U>) -> Self {
    self.error_char_cb = Some(cb);
    self
  }

  pub fn on_error_terminal(mut self, cb: ErrorTerminalCb<U>) -> Self {
    self.error_terminal_cb = Some(cb);
    self
  }
}
