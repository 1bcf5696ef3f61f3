//! A callback set whose `user_data` is the event log itself — the typed
//! `user_data: U` field on `ParseState` means a recording harness is just
//! `Callbacks<Vec<Event>>`, no opaque pointer casting required.

use radlr_rust_runtime::{Callbacks, ParseState};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
  StartRule,
  EndRule,
  Terminal { name: Option<String>, offset: usize, len: usize },
  ErrorChar(u8),
  ErrorTerminal { name: Option<String> },
}

pub fn recording_callbacks() -> Callbacks<Vec<Event>> {
  Callbacks::new()
    .on_start_rule(|ps| ps.user_data.push(Event::StartRule))
    .on_end_rule(|ps| ps.user_data.push(Event::EndRule))
    .on_terminal(|ps, term| {
      let name = term.name.map(|id| ps.grammar().terminal_name(id).to_string());
      ps.user_data.push(Event::Terminal { name, offset: term.offset.byte, len: term.len });
    })
    .on_error_char(|ps, byte| ps.user_data.push(Event::ErrorChar(byte)))
    .on_error_terminal(|ps, term| {
      let name = term.name.map(|id| ps.grammar().terminal_name(id).to_string());
      ps.user_data.push(Event::ErrorTerminal { name });
    })
}

pub type RecordingParseState = ParseState<Vec<Event>>;
