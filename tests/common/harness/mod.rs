//! Test harness for CLI integration tests.
//!
//! Provides isolated databases, programmatic search seeding,
//! and CLI assertion helpers using `assert_cmd`.

mod command;
mod env;
mod search;

// Re-export main types for external use
#[allow(unused_imports)]
pub use command::SplCommand;
#[allow(unused_imports)]
pub use env::TestEnv;
#[allow(unused_imports)]
pub use search::TestSearch;
