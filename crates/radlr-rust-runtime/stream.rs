//! A buffered driver that repeatedly fills a growable buffer from a
//! [`ByteSource`] and feeds it to a [`ParseState`], so callers parsing a
//! `Read` stream don't have to hand-manage the refill loop themselves.
//!
//! The buffer preserves any bytes belonging to a terminal that is still
//! being lexed (`open_terminal_offset` in [`ParseState`]) across refills —
//! growing (by doubling) only when the data it must retain plus one fresh
//! chunk no longer fits.

use crate::config::StreamConfig;
use crate::error::{Status, StreamError};
use crate::interp::ParseState;

/// Anything bytes can be pulled from. Blanket-implemented for every
/// `std::io::Read`, so a `File`, a `TcpStream`, or a `&[u8]` all work as-is.
pub trait ByteSource {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize>;
}

impl<R: std::io::Read> ByteSource for R {
  fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
    std::io::Read::read(self, buf)
  }
}

/// Drives a [`ParseState`] to completion (or failure) against a [`ByteSource`],
/// refilling its buffer in chunks of at least `min_new_data` bytes.
pub struct StreamParser<'a, U, S> {
  source: S,
  buf:    Vec<u8>,
  /// Target capacity; `buf` is grown (not shrunk) to match it.
  buf_size:   usize,
  /// Absolute byte index of `buf[0]` within the whole stream.
  buf_offset: usize,
  /// Count of valid, not-yet-discarded bytes starting at `buf[0]`.
  buf_len:    usize,
  config: StreamConfig,
  parse_state: &'a mut ParseState<U>,
}

impl<'a, U, S: ByteSource> StreamParser<'a, U, S> {
  pub fn new(source: S, parse_state: &'a mut ParseState<U>) -> Self {
    Self::with_config(source, parse_state, StreamConfig::default())
  }

  pub fn with_config(source: S, parse_state: &'a mut ParseState<U>, config: StreamConfig) -> Self {
    let buf_size = config.min_new_data;
    Self { source, buf: Vec::new(), buf_size, buf_offset: 0, buf_len: 0, config, parse_state }
  }

  /// Runs the refill/feed loop until the source is exhausted or the parse
  /// reaches a terminal outcome. On success the underlying [`ParseState`]
  /// has reached `HardEof` via [`ParseState::finish_parse`].
  pub fn drive(&mut self) -> Result<(), StreamError> {
    loop {
      self.grow_for_refill()?;
      let (read_total, is_eof) = self.refill()?;

      let parse_start = self.buf_len;
      self.buf_len += read_total;
      tracing::debug!(bytes = read_total, "feeding buffer to parse state");
      let status = self.parse_state.parse(&self.buf[parse_start..self.buf_len]);

      if let Status::Error | Status::ResourceLimitExceeded = status {
        return Err(StreamError::Parse(status));
      }
      self.discard_consumed();

      match status {
        Status::HardEof if self.buf_len > 0 || !is_eof => {
          // Grammar-complete before file-complete: there's unconsumed data
          // sitting in the buffer, or more still unread from the source.
          let _ = self.parse_state.finish_parse();
          return Ok(());
        }
        Status::HardEof => return self.finalize(),
        Status::Ok if is_eof => return self.finalize(),
        Status::Ok => {}
        Status::Error | Status::ResourceLimitExceeded => unreachable!("handled above"),
      }
    }
  }

  /// Ensures `buf` has room for `buf_len` retained bytes plus at least
  /// `min_new_data` fresh ones, doubling `buf_size` until it fits (or
  /// rejecting the grow if it would cross `max_buffer_size`).
  fn grow_for_refill(&mut self) -> Result<(), StreamError> {
    while self.buf_len + self.config.min_new_data > self.buf_size {
      self.buf_size *= 2;
    }
    if self.buf_size > self.config.max_buffer_size {
      return Err(StreamError::BufferLimitExceeded { requested: self.buf_size, max: self.config.max_buffer_size });
    }
    if self.buf.len() != self.buf_size {
      self.buf.resize(self.buf_size, 0);
    }
    Ok(())
  }

  /// Reads into the tail of `buf` until it is full or the source reports
  /// true EOF (a zero-byte read). Returns the number of bytes read and
  /// whether EOF was observed.
  fn refill(&mut self) -> Result<(usize, bool), StreamError> {
    let mut read_total = 0;
    loop {
      let n = self.source.read(&mut self.buf[self.buf_len + read_total..])?;
      if n == 0 {
        return Ok((read_total, true));
      }
      read_total += n;
      if self.buf_len + read_total >= self.buf.len() {
        return Ok((read_total, false));
      }
    }
  }

  /// Shifts the surviving suffix (everything from `open_terminal_offset`
  /// onward) down to `buf[0]`, per the invariant that those bytes must stay
  /// reachable until their terminal is finally emitted.
  fn discard_consumed(&mut self) {
    let open_offset = self.parse_state.open_terminal_offset().byte;
    let bytes_to_discard = open_offset - self.buf_offset;
    debug_assert!(bytes_to_discard <= self.buf_len);
    let bytes_to_save = self.buf_len - bytes_to_discard;
    self.buf.copy_within(bytes_to_discard..self.buf_len, 0);
    self.buf_offset += bytes_to_discard;
    self.buf_len = bytes_to_save;
  }

  /// Called once the source is exhausted (or the grammar signaled `HardEof`
  /// with nothing left over): finalizes the parse and re-checks the buffer,
  /// since finalization may flush the terminal that was keeping it open.
  fn finalize(&mut self) -> Result<(), StreamError> {
    let finished = self.parse_state.finish_parse();
    self.discard_consumed();
    if finished && self.buf_len == 0 {
      Ok(())
    } else {
      Err(StreamError::PrematureEof)
    }
  }
}
