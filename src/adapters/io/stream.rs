//! Implements LineSource / LineSink over tokio readers and writers.
//!
//! Source: stdin or a file, read line by line. Sink: stdout (or any writer), one line per report.

use crate::domain::RecordsError;
use crate::ports::{LineSink, LineSource};
use std::path::Path;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, Lines};

/// Line source over any buffered async reader.
pub struct ReaderSource<R> {
    lines: Lines<R>,
}

impl<R: AsyncBufRead + Unpin + Send> ReaderSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
        }
    }
}

#[async_trait::async_trait]
impl<R: AsyncBufRead + Unpin + Send> LineSource for ReaderSource<R> {
    async fn next_line(&mut self) -> Result<Option<String>, RecordsError> {
        self.lines
            .next_line()
            .await
            .map_err(|e| RecordsError::Input(format!("read input: {}", e)))
    }
}

/// Open `path` for reading, or stdin when `None`.
pub async fn open_source(path: Option<&Path>) -> Result<Box<dyn LineSource>, RecordsError> {
    match path {
        Some(path) => {
            let file = tokio::fs::File::open(path).await.map_err(|e| {
                RecordsError::Input(format!("open {}: {}", path.display(), e))
            })?;
            Ok(Box::new(ReaderSource::new(BufReader::new(file))))
        }
        None => Ok(Box::new(ReaderSource::new(BufReader::new(tokio::io::stdin())))),
    }
}

/// Line sink over any async writer.
pub struct WriterSink<W> {
    writer: W,
}

impl<W: AsyncWrite + Unpin + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<tokio::io::Stdout> {
    pub fn stdout() -> Self {
        Self::new(tokio::io::stdout())
    }
}

#[async_trait::async_trait]
impl<W: AsyncWrite + Unpin + Send> LineSink for WriterSink<W> {
    async fn write_line(&mut self, line: &str) -> Result<(), RecordsError> {
        self.writer
            .write_all(line.as_bytes())
            .await
            .map_err(|e| RecordsError::Input(format!("write output: {}", e)))?;
        self.writer
            .write_all(b"\n")
            .await
            .map_err(|e| RecordsError::Input(format!("write output: {}", e)))
    }

    async fn flush(&mut self) -> Result<(), RecordsError> {
        self.writer
            .flush()
            .await
            .map_err(|e| RecordsError::Input(format!("flush output: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_reader_source_yields_lines() {
        let mut source = ReaderSource::new(&b"first\n\nsecond"[..]);
        assert_eq!(source.next_line().await.unwrap().as_deref(), Some("first"));
        assert_eq!(source.next_line().await.unwrap().as_deref(), Some(""));
        assert_eq!(source.next_line().await.unwrap().as_deref(), Some("second"));
        assert_eq!(source.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_writer_sink_terminates_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.write_line("{\"ok\":true}").await.unwrap();
        sink.write_line("{\"ok\":false}").await.unwrap();
        sink.flush().await.unwrap();
        let out = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(out, "{\"ok\":true}\n{\"ok\":false}\n");
    }

    #[tokio::test]
    async fn test_open_missing_file_is_input_error() {
        let result = open_source(Some(Path::new("/nonexistent/commands.jsonl"))).await;
        assert!(matches!(result, Err(RecordsError::Input(_))));
    }
}
