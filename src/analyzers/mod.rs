//! Descriptive statistics over a filtered trip set.
//!
//! Four independent groups are computed: time of travel, station popularity,
//! trip duration and user demographics. Each reports "no data" on its own
//! when the selection is empty instead of failing the whole run.

pub mod aggregate;
pub mod analyzer;
pub mod types;
pub mod utility;
