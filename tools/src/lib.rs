//! Shared pieces of the wordfreq command-line tools.
pub mod logging;
pub mod merge;
pub mod rows;
