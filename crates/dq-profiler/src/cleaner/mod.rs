//! Type coercion module.
//!
//! Applies the date detector's verdicts, producing a new table in which the
//! flagged text columns hold datetimes.

mod converters;
mod date_coercer;

pub use date_coercer::DateCoercer;
