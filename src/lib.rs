//! academic-records: in-memory academic records store with Hexagonal Architecture.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod store;
pub mod usecases;
