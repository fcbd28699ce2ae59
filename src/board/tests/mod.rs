//! Unit tests for the board-service context.

mod domain_tests;
