//! Background loops for housekeeping.

pub mod weather_prune_loop;
