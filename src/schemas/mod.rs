pub mod booking;
pub mod dining_table;
pub mod restaurant;
pub mod time_slot;

/// Serde default for flags that are on unless the request disables them.
pub(crate) fn default_true() -> bool { true }
