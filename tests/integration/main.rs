//! Integration tests for lipcue

mod cli_test;
mod helpers;
mod session_test;
