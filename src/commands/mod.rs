//! Command implementations
//!
//! Each module corresponds to a subcommand in the CLI.

pub mod ask;
pub mod index;
pub mod search;
pub mod stats;
pub mod trial;

pub use ask::run as ask_run;
pub use index::run as index_run;
pub use search::run as search_run;
pub use stats::run as stats_run;
pub use trial::{create_md, load_questions, run_trial, write_csv, TrialReport, TRIAL_MODELS};
