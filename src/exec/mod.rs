//! # Execution Module
//!
//! Variable expansion and shell command execution.
//!
//! Commands are plain strings with `${KEY}` placeholders. [`expand`] fills
//! placeholders from a context's variable map, and [`runner`] hands the
//! expanded line to `sh -c` either with the terminal attached (context
//! activation) or with captured output (recorded job runs).

pub mod expand;
pub mod runner;

pub use expand::expand_variables;
pub use runner::{run_captured, run_interactive, CommandReport, ExecError, RunStatus};
