#![allow(dead_code)]

pub mod fixtures;

pub use fixtures::*;
pub use in_memory_backend::*;
