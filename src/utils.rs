#![forbid(unsafe_code)]

pub mod config;
pub mod counter_store;
pub mod counter_types;
pub mod counter_utils;
pub mod errors;
