//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod batch;
pub mod process;
pub mod summarize;

pub use batch::{run as batch_run, BatchArgs, BatchOutcome};
pub use process::{run as process_run, ProcessArgs};
pub use summarize::run as summarize_run;
