//! Core domain entities
//!
//! Pure data structures and projection logic - no I/O or external
//! dependencies.

mod account;
mod normalize;
mod transaction;
pub mod result;

pub use account::{Account, AccountDirectory, AccountEntry};
pub use normalize::{NormalizedRow, Normalizer};
pub use transaction::{Counterparty, Direction, Transaction};
