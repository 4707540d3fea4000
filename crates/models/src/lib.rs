pub mod db;
pub mod errors;
pub mod fee_schedule;
pub mod income;
pub mod income_type;
pub mod member;
pub mod payment;
pub mod role_grant;
pub mod tenant;
pub mod tenant_counter;
pub mod user;
pub mod user_credentials;

#[cfg(test)]
mod tests;
