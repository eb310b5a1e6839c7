//! Azul rules engine and search agents
//!
//! This crate re-exports the engine and search crates for convenience and
//! hosts the terminal display helpers shared by the binaries.

pub mod display;

pub use azul_engine::*;
pub use azul_search as search;
