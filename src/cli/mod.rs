//! Command Line Interface (CLI) layer for nucorrect.
//!
//! This module defines argument parsing (`args`), error types (`errors`),
//! and the orchestration logic (`runner`) that maps flags onto the three
//! request structures and calls `nucorrect::process`.
//!
//! If you are embedding nucorrect into a pipeline, use the library API
//! (`nucorrect::api`) instead of calling the CLI code.
pub mod args;
pub mod errors;
pub mod runner;

pub use args::CliArgs;
pub use runner::run;
