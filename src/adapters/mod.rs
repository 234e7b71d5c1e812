//! Infrastructure adapters. Implement ports.
//!
//! Rewriting service, PDF rendering, file input, command line. Map errors to DomainError.

pub mod ai;
pub mod cli;
pub mod input;
pub mod pdf;
