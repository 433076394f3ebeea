//! Service layer for the joke catalog.
//! - `joke`: the catalog operations (list, search, get, create, update, delete).
//! - `auth`: accounts, sessions and anti-forgery tokens used by the HTTP gates.
//!
//! Storage is reached through repository traits so services can run against
//! PostgreSQL or the in-memory mocks.

pub mod errors;
pub mod joke;
pub mod auth;
#[cfg(test)]
pub mod test_support;
