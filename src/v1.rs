#![forbid(unsafe_code)]

pub mod counters;
