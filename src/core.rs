//! Core primitives shared by the generation pipeline.

pub mod random;
pub mod tasks;

pub use random::RandomSource;
pub use tasks::{Task, run_all};
