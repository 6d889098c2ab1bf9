//! Port traits. API boundaries for the hexagon.
//!
//! - Inbound: the manager contract callers drive
//! - Outbound: line I/O used by the batch driver

pub mod inbound;
pub mod outbound;

pub use inbound::{AnyManager, CrudManager, StudentOps};
pub use outbound::{LineSink, LineSource};
