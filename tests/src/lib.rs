//! End-to-end tests for the assembled blogsite API.

#[cfg(test)]
mod system_tests;
