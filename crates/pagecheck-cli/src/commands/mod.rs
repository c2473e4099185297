//! Command implementations for the pagecheck CLI.
//!
//! There is one command, [`check`], which loads configuration, runs the
//! smoke test and prints the report.

pub mod check;

pub use check::execute as check_execute;
