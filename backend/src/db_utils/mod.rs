//! Search engine access.

pub mod elastic_utils;
