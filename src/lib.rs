//! Pixelwar engine library.
//!
//! Exposes the board representation, turn resolver, victory evaluation,
//! reporting, and batch-play modules for use by integration tests and the
//! binary entry point.

pub mod batch;
pub mod board;
pub mod config;
pub mod engine;
pub mod report;
pub mod resolve;
pub mod victory;
