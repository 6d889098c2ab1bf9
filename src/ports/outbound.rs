//! Outbound ports. The batch driver reads commands and writes reports through these.
//!
//! Implemented by adapters (stdin/file reader, stdout writer).

use crate::domain::RecordsError;

/// Line-oriented command input.
#[async_trait::async_trait]
pub trait LineSource: Send {
    /// Next raw line without its terminator. `None` at end of input.
    async fn next_line(&mut self) -> Result<Option<String>, RecordsError>;
}

/// Line-oriented report output.
#[async_trait::async_trait]
pub trait LineSink: Send {
    async fn write_line(&mut self, line: &str) -> Result<(), RecordsError>;

    async fn flush(&mut self) -> Result<(), RecordsError>;
}
