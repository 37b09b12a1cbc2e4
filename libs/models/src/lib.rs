//! Database model definitions

#[macro_use]
extern crate tracing;

mod booking;
mod dining_table;
mod restaurant;
mod time_slot;

pub use booking::*;
pub use dining_table::*;
pub use restaurant::*;
pub use time_slot::*;
