//! JSON Lines batch driver: one command per input line, one report per output line.

pub mod command;
pub mod runner;

pub use command::{Command, Payload, Report};
pub use runner::{BatchRunner, RunStats};
