//! # CLI Behavior
//!
//! One possible front end for permablog. This is the only place that knows
//! about terminal I/O and exit codes.
//!
//! Requests arrive either as process arguments (`permablog show acme`) or as
//! lines typed into `permablog shell`. Both go through the same clap
//! definitions in `args.rs`, so a shell line takes exactly the arguments the
//! subcommand does. Arguments are validated into typed requests before the
//! API sees them.
//!
//! In the shell a failed request prints its error and the prompt comes back;
//! only `exit`, `quit` or end of input leave.

pub mod print;
pub mod shell;
