/// Ledger uniqueness and skip semantics under concurrency
pub mod ledger_tests;

/// Sequential member-number allocation tests
pub mod counter_tests;
