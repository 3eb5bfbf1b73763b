//! Snarl - dependency-graph risk analysis for issue trackers.
//!
//! This crate provides both a CLI application and a library for analyzing
//! issue dependencies: graph construction, cycle detection, cascade-risk
//! scoring, and blocking-chain extraction.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod config;
pub mod domain;
pub mod error;
pub mod graph;
pub mod source;

// Public CLI module (needed by binary)
pub mod cli;

// Output formatting (used by CLI, useful for embedders)
pub mod output;
