//! The byte-level lexer driver: feeds one byte at a time into the IntFA
//! frame at the top of the stack, under longest-match, with eager emission
//! when a match can't get any longer.

use crate::error::Status;
use crate::interp::{enter_lexer, process_terminal};
use crate::stack::Frame;
use crate::types::Offset;

/// `0x0A` (LF) and `0x0D` (CR) both count as newlines; a CR immediately
/// followed by an LF, or vice versa, collapses into a single line advance.
pub fn advance_offset(offset: &mut Offset, last_char_was_newline: &mut bool, byte: u8) {
  offset.byte += 1;
  let is_newline = byte == b'\n' || byte == b'\r';
  if is_newline {
    if *last_char_was_newline {
      // second half of a CR/LF or LF/CR pair: already advanced the line.
    } else {
      offset.line += 1;
      offset.column = 1;
    }
  } else {
    offset.column += 1;
  }
  *last_char_was_newline = is_newline;
}

/// Drives one byte through the IntFA frame at the top of the stack.
/// Precondition: the top frame is an IntFA frame.
pub(crate) fn do_intfa_transition<U>(ps: &mut crate::interp::ParseState<U>, byte: u8) -> Status {
  loop {
    let frame = *ps.stack.top().expect("do_intfa_transition: empty stack").as_intfa().expect("do_intfa_transition: top is not an IntFA frame");
    let intfa = ps.grammar.intfa(frame.intfa);
    let state = intfa.state(frame.state);

    match state.find_transition(byte).copied() {
      None => {
        // Longest-match recovery: the current state must itself be an
        // accepting state, or this byte is a genuine lex error.
        let Some(term_name) = state.final_terminal else {
          tracing::error!(byte, offset = ps.offset.byte, "unlexable byte");
          if let Some(cb) = ps.callbacks.error_char_cb {
            cb(ps, byte);
          }
          return Status::Error;
        };
        let len = ps.offset.byte - frame.start_offset.byte;
        match process_terminal(ps, frame.start_offset, len, Some(term_name)) {
          Status::Ok => {}
          other => return other,
        }
        enter_lexer(ps, ps.offset);
        // Retry the same byte against the freshly pushed automaton.
        continue;
      }
      Some(transition) => {
        advance_offset(&mut ps.offset, &mut ps.last_char_was_newline, byte);
        tracing::trace!(byte, offset = ps.offset.byte, "consumed byte");
        if let Some(Frame::IntFa(f)) = ps.stack.top_mut() {
          f.state = transition.dest;
        }
        let new_state = ps.grammar.intfa(frame.intfa).state(transition.dest);
        if new_state.is_final() && new_state.transitions.is_empty() {
          let term_name = new_state.final_terminal;
          let len = ps.offset.byte - frame.start_offset.byte;
          match process_terminal(ps, frame.start_offset, len, term_name) {
            Status::Ok => {}
            other => return other,
          }
          enter_lexer(ps, ps.offset);
        }
        return Status::Ok;
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn plain_ascii_advances_column_only() {
    let mut offset = Offset::start();
    let mut newline = false;
    advance_offset(&mut offset, &mut newline, b'x');
    assert_eq!(offset, Offset { byte: 1, line: 1, column: 2 });
    assert!(!newline);
  }

  #[test]
  fn lone_lf_advances_the_line() {
    let mut offset = Offset::start();
    let mut newline = false;
    advance_offset(&mut offset, &mut newline, b'\n');
    assert_eq!(offset, Offset { byte: 1, line: 2, column: 1 });
    assert!(newline);
  }

  #[test]
  fn crlf_pair_counts_as_one_line_advance() {
    let mut offset = Offset::start();
    let mut newline = false;
    advance_offset(&mut offset, &mut newline, b'\r');
    advance_offset(&mut offset, &mut newline, b'\n');
    assert_eq!(offset, Offset { byte: 2, line: 2, column: 1 });
  }
}
