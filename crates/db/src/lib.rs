//! MongoDB side of the bootstrap: connection, index and seed definitions,
//! the concrete steps, and read-only inspection.

pub mod client;
pub mod error;
pub mod indexes;
pub mod inspect;
pub mod seed;
pub mod steps;

pub use client::{connect, database};
pub use error::DbError;
