//! The parse stack and its tagged frame variants.
//!
//! A sum type with three arms — never a union-of-pointers — so the
//! interpreter can `match` on the tag instead of juggling an untyped
//! discriminant. Frames hold non-owning integer ids into the grammar, not
//! references, which is what keeps [`Frame`] `Copy` and lets
//! [`ParseState::duplicate`](crate::interp::ParseState::duplicate) clone the
//! whole stack with a plain `Vec::clone`.

use crate::types::grammar::Transition;
use crate::types::{GlaId, GlaStateId, IntFaId, IntFaStateId, Offset, RtnId, RtnStateId};

#[derive(Clone, Copy, Debug)]
pub struct RtnFrame {
  pub rtn:   RtnId,
  pub state: RtnStateId,
  pub start_offset: Offset,
  /// The transition taken to leave this frame's RTN, recorded once a
  /// transition's edge carries us through this state. `None` until then.
  pub transition_taken: Option<Transition>,
}

#[derive(Clone, Copy, Debug)]
pub struct GlaFrame {
  pub gla:   GlaId,
  pub state: GlaStateId,
  pub start_offset: Offset,
}

#[derive(Clone, Copy, Debug)]
pub struct IntFaFrame {
  pub intfa: IntFaId,
  pub state: IntFaStateId,
  pub start_offset: Offset,
}

/// One stack record identifying which automaton is active and its current
/// state.
#[derive(Clone, Copy, Debug)]
pub enum Frame {
  Rtn(RtnFrame),
  Gla(GlaFrame),
  IntFa(IntFaFrame),
}

impl Frame {
  pub fn as_rtn(&self) -> Option<&RtnFrame> {
    match self {
      Frame::Rtn(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_rtn_mut(&mut self) -> Option<&mut RtnFrame> {
    match self {
      Frame::Rtn(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_gla(&self) -> Option<&GlaFrame> {
    match self {
      Frame::Gla(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_intfa(&self) -> Option<&IntFaFrame> {
    match self {
      Frame::IntFa(f) => Some(f),
      _ => None,
    }
  }

  pub fn as_intfa_mut(&mut self) -> Option<&mut IntFaFrame> {
    match self {
      Frame::IntFa(f) => Some(f),
      _ => None,
    }
  }

  pub fn start_offset(&self) -> Offset {
    match self {
      Frame::Rtn(f) => f.start_offset,
      Frame::Gla(f) => f.start_offset,
      Frame::IntFa(f) => f.start_offset,
    }
  }
}

/// The runtime parse stack: bottom is always the start-rule RTN frame while
/// a parse is active; top is the most recently pushed frame.
#[derive(Clone, Debug, Default)]
pub struct Stack(Vec<Frame>);

impl Stack {
  pub fn new() -> Self {
    Self(Vec::new())
  }

  pub fn len(&self) -> usize {
    self.0.len()
  }

  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  pub fn top(&self) -> Option<&Frame> {
    self.0.last()
  }

  pub fn top_mut(&mut self) -> Option<&mut Frame> {
    self.0.last_mut()
  }

  pub fn push(&mut self, frame: Frame) {
    self.0.push(frame);
  }

  pub fn pop(&mut self) -> Option<Frame> {
    self.0.pop()
  }

  /// The RTN frame directly beneath the top, if the top is a GLA frame sat
  /// atop one (per the invariant that a GLA frame always sits directly on an
  /// RTN frame).
  pub fn parent_rtn_mut(&mut self) -> Option<&mut RtnFrame> {
    let len = self.0.len();
    if len < 2 {
      return None;
    }
    self.0[len - 2].as_rtn_mut()
  }

  pub fn iter(&self) -> impl DoubleEndedIterator<Item = &Frame> {
    self.0.iter()
  }
}
