pub mod stream;

pub use stream::{ReaderSource, WriterSink, open_source};
