//! Command-line front end for csvmodel.
//!
//! The binary reads one CSV file, keeps the rows matching `--where`
//! conditions, and prints them as JSON lines or CSV.

#![forbid(unsafe_code)]

pub mod cli;
pub mod output;
