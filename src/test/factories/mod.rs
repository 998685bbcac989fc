//! Factory methods creating the graphs and errors used across unit tests.

pub mod hierarchy;
pub mod signal;
