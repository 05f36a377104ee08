//! Configuration loader and schema types.
//!
//! This module exposes the settings schema that drives the page (timings,
//! audio behaviour, content) and helpers to load it from disk and env.

mod load;
mod schema;

pub use schema::*;

#[cfg(test)]
mod tests;
