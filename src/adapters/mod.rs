//! Infrastructure adapters. Implement outbound ports and drive the managers.
//!
//! Line I/O over stdin, files and stdout; the batch command driver. Map errors to RecordsError.

pub mod batch;
pub mod io;
