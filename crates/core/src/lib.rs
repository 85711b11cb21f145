//! `tripsplit-core`: domain foundation building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns):
//! the error model, the shared numeric tolerance, trip identifiers and the
//! aggregate/entity traits the ledger is built on.

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod numeric;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::{Entity, position_of};
pub use error::{DomainError, DomainResult};
pub use id::TripId;
pub use numeric::{TOLERANCE, approx_eq, round_cents};
