//! Integration tests for Layer 0: the string reader
//!
//! Tests primitive reads, string quoting and error positions.

mod numbers;
mod strings;
