//! Integration tests for Layer 1: the dispatcher
//!
//! Tests tree registration, parsing with backtracking, execution through
//! redirects and forks, completion and usage strings.

mod completion;
mod execution;
mod usage;
