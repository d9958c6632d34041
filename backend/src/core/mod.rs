//! Race distance bookkeeping

pub mod laps;
