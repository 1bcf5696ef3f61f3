//! Fluent configuration structs. Both are plain in-memory values the
//! embedder constructs and passes in — neither reads environment variables
//! or files, consistent with the engine persisting no state between runs.

/// Resource bounds for one [`ParseState`](crate::interp::ParseState).
#[derive(Clone, Copy, Debug)]
pub struct EngineConfig {
  pub max_stack_depth: usize,
  pub max_lookahead:   usize,
}

impl Default for EngineConfig {
  fn default() -> Self {
    Self { max_stack_depth: 500, max_lookahead: 500 }
  }
}

impl EngineConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn max_stack_depth(mut self, depth: usize) -> Self {
    self.max_stack_depth = depth;
    self
  }

  pub fn max_lookahead(mut self, lookahead: usize) -> Self {
    self.max_lookahead = lookahead;
    self
  }
}

/// Buffering behavior for the [`StreamParser`](crate::stream::StreamParser).
#[derive(Clone, Copy, Debug)]
pub struct StreamConfig {
  /// Minimum amount of fresh capacity the buffer is grown to hold on each
  /// refill.
  pub min_new_data:   usize,
  /// Upper bound on total buffer capacity; growing past this returns
  /// [`StreamError::BufferLimitExceeded`](crate::error::StreamError::BufferLimitExceeded).
  pub max_buffer_size: usize,
}

impl Default for StreamConfig {
  fn default() -> Self {
    Self { min_new_data: 4000, max_buffer_size: usize::MAX }
  }
}

impl StreamConfig {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn min_new_data(mut self, bytes: usize) -> Self {
    self.min_new_data = bytes;
    self
  }

  pub fn max_buffer_size(mut self, bytes: usize) -> Self {
    self.max_buffer_size = bytes;
    self
  }
}
