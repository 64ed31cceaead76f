//! Scenario tests for the labelling session.

mod persistence_tests;
