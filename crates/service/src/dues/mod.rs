//! Dues module: monthly payment registration and standing classification.
//!
//! Same three-layer shape as auth: domain types, a repository trait with an
//! in-memory mock, and the business service holding the rules (schedule
//! completeness, silent duplicate skip, two-month tolerance).

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod status;

pub use service::DuesService;
