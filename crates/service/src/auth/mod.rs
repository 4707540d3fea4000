//! Auth module: three-layer architecture (domain, repository, service).
//!
//! Login resolves a principal's full grant list and embeds it in the bearer
//! token; request handling never goes back to the database for roles.

pub mod domain;
pub mod errors;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AuthService;
