//! Core types and schedule queries for the Ekosystem Wrocław waste pickup client.

/// Domain models and the static waste-type table.
pub mod model;
/// Error types and the trait describing a schedule provider.
pub mod ports;
/// Queries over an already fetched pickup schedule.
pub mod schedule;

pub use model::*;
pub use ports::*;
pub use schedule::*;
