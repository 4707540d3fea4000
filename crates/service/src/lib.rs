//! Business layer on top of `models`.
//! - Auth and dues workflows live behind repository traits so the rules are
//!   testable without a database.
//! - Simpler CRUD-style operations (members, schedule, income, tenants) work
//!   directly against the connection.

pub mod access;
pub mod auth;
pub mod dues;
pub mod errors;
pub mod income;
pub mod members;
pub mod pagination;
pub mod schedule;
pub mod tenant_service;
#[cfg(test)]
pub mod test_support;
