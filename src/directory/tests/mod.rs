//! Unit tests for the team and user directory.

mod domain_tests;
