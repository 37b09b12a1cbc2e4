//! Pure booking rules
//!
//! Everything in this crate is a plain function over plain data. The model
//! layer re-runs these checks inside its write transactions, so a candidate
//! that passed at request time is checked again against row-locked state
//! before anything is persisted.

mod availability;
mod lifecycle;

pub use availability::*;
pub use lifecycle::*;
